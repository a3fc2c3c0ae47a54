//! Image features built from planar color frames.
//!
//! The adapter computes the orientation-corrected output size itself and
//! delegates the actual pixel packing to a [`PixelConverter`]. The adapter's
//! size is authoritative; whatever the converter reports is informational.

use crate::convert::{ConversionRequest, PACKED_CHANNELS, PixelConverter};
use crate::error::{FeatureError, Result};
use arfeat_data::{FeatureType, Orientation, RawFrame, ScalarKind};
use image::RgbaImage;
use tracing::debug;

/// Packed 4-channel byte feature, ready for inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFeature {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageFeature {
    /// Allocate a zeroed feature of the given display-space size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; width as usize * height as usize * PACKED_CHANNELS],
            width,
            height,
        }
    }

    /// Allocate a feature matching a frame's orientation-corrected size.
    pub fn for_frame(frame: &RawFrame<'_>, orientation: Orientation, display: Orientation) -> Self {
        let (width, height) = output_dimensions(frame, orientation, display);
        Self::new(width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn feature_type(&self) -> FeatureType {
        FeatureType::new(self.width, self.height, PACKED_CHANNELS, Some(ScalarKind::U8))
    }

    /// Copy the feature into an RGBA image, e.g. for debug dumps.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone())
    }
}

/// Orientation-corrected (width, height) of a frame's features.
pub fn output_dimensions(
    frame: &RawFrame<'_>,
    orientation: Orientation,
    display: Orientation,
) -> (u32, u32) {
    orientation
        .resolve(display)
        .output_dimensions(frame.width(), frame.height())
}

/// Feature type describing a frame: oriented size, plane count and element type.
pub fn frame_feature_type(
    frame: &RawFrame<'_>,
    orientation: Orientation,
    display: Orientation,
) -> Result<FeatureType> {
    if !frame.is_valid() {
        return Err(FeatureError::InvalidImage);
    }
    let (width, height) = output_dimensions(frame, orientation, display);
    Ok(FeatureType::new(
        width,
        height,
        frame.plane_count(),
        frame.format().scalar_kind(),
    ))
}

/// Builds image features from AR color frames.
pub struct ImageFeatureAdapter<C> {
    converter: C,
    display: Orientation,
}

impl<C: PixelConverter> ImageFeatureAdapter<C> {
    /// Create an adapter. `display` stands in for the current screen
    /// orientation whenever a caller passes `Orientation::Unknown`.
    pub fn new(converter: C, display: Orientation) -> Self {
        Self { converter, display }
    }

    pub fn display_orientation(&self) -> Orientation {
        self.display
    }

    /// Update the display orientation, e.g. after the device rotates.
    pub fn set_display_orientation(&mut self, display: Orientation) {
        self.display = display;
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Feature type for a frame under this adapter's display orientation.
    pub fn feature_type(&self, frame: &RawFrame<'_>, orientation: Orientation) -> Result<FeatureType> {
        frame_feature_type(frame, orientation, self.display)
    }

    /// Convert a frame into a newly allocated feature.
    pub fn build_feature(
        &self,
        frame: &RawFrame<'_>,
        world_facing: bool,
        orientation: Orientation,
    ) -> Result<ImageFeature> {
        let orientation = orientation.resolve(self.display);
        let (width, height) = orientation.output_dimensions(frame.width(), frame.height());
        let request = ConversionRequest::new(frame, orientation, world_facing)?;
        let mut data = vec![0u8; request.required_capacity()];
        self.run(&request, &mut data, (width, height));

        Ok(ImageFeature {
            data,
            width,
            height,
        })
    }

    /// Convert a frame into an existing feature.
    ///
    /// The feature must already have the orientation-corrected size. On error
    /// the feature is left untouched.
    pub fn copy_into(
        &self,
        feature: &mut ImageFeature,
        frame: &RawFrame<'_>,
        world_facing: bool,
        orientation: Orientation,
    ) -> Result<()> {
        if !frame.is_valid() {
            return Err(FeatureError::InvalidImage);
        }
        let orientation = orientation.resolve(self.display);
        let expected = orientation.output_dimensions(frame.width(), frame.height());
        if feature.dimensions() != expected {
            return Err(FeatureError::SizeMismatch {
                expected,
                actual: feature.dimensions(),
            });
        }
        let request = ConversionRequest::new(frame, orientation, world_facing)?;
        self.run(&request, &mut feature.data, expected);
        Ok(())
    }

    fn run(&self, request: &ConversionRequest<'_>, dst: &mut [u8], expected: (u32, u32)) {
        let reported = self.converter.convert(request, dst);
        if reported != expected {
            debug!(
                "Converter reported {}x{}, using {}x{}",
                reported.0, reported.1, expected.0, expected.1
            );
        }
        debug!(
            "Converted {}x{} frame ({} planes, {:?}, world facing: {}) into {}x{} feature",
            request.width(),
            request.height(),
            request.plane_count(),
            request.orientation(),
            request.world_facing(),
            expected.0,
            expected.1
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arfeat_data::{PixelFormat, Plane};
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    struct Call {
        plane_lens: Vec<usize>,
        row_strides: Vec<i32>,
        pixel_strides: Vec<i32>,
        size: (i32, i32),
        orientation_code: i32,
        world_facing: bool,
        dst_len: usize,
    }

    /// Records each call and fills the destination with a marker byte.
    #[derive(Default)]
    struct RecordingConverter {
        calls: RefCell<Vec<Call>>,
        reported: (u32, u32),
    }

    impl PixelConverter for RecordingConverter {
        fn convert(&self, request: &ConversionRequest<'_>, dst: &mut [u8]) -> (u32, u32) {
            self.calls.borrow_mut().push(Call {
                plane_lens: request.planes().iter().map(|p| p.len()).collect(),
                row_strides: request.row_strides().to_vec(),
                pixel_strides: request.pixel_strides().to_vec(),
                size: (request.width(), request.height()),
                orientation_code: request.orientation_code(),
                world_facing: request.world_facing(),
                dst_len: dst.len(),
            });
            dst.fill(0xAB);
            self.reported
        }
    }

    struct Planes {
        luma: Vec<u8>,
        chroma: Vec<u8>,
    }

    impl Planes {
        fn new() -> Self {
            // 6x4 bi-planar frame, rows padded to 8 bytes.
            Self {
                luma: vec![16; 8 * 4],
                chroma: vec![128; 8 * 2],
            }
        }

        fn frame(&self, format: PixelFormat) -> RawFrame<'_> {
            RawFrame::new(
                6,
                4,
                format,
                [Plane::new(&self.luma, 8, 1), Plane::new(&self.chroma, 8, 2)],
            )
            .unwrap()
        }
    }

    #[test]
    fn test_build_feature_landscape() {
        let planes = Planes::new();
        let frame = planes.frame(PixelFormat::IosYpCbCr420BiPlanar);
        let adapter = ImageFeatureAdapter::new(RecordingConverter::default(), Orientation::Portrait);

        let feature = adapter
            .build_feature(&frame, true, Orientation::LandscapeLeft)
            .unwrap();
        assert_eq!(feature.dimensions(), (6, 4));
        assert_eq!(feature.data().len(), 6 * 4 * 4);
        assert!(feature.data().iter().all(|&b| b == 0xAB));

        let calls = adapter.converter().calls.borrow();
        assert_eq!(
            calls[0],
            Call {
                plane_lens: vec![32, 16],
                row_strides: vec![8, 8],
                pixel_strides: vec![1, 2],
                size: (6, 4),
                orientation_code: Orientation::LandscapeLeft.code(),
                world_facing: true,
                dst_len: 96,
            }
        );
    }

    #[test]
    fn test_build_feature_unknown_uses_display_and_swaps() {
        let planes = Planes::new();
        let frame = planes.frame(PixelFormat::AndroidYuv420);
        let adapter =
            ImageFeatureAdapter::new(RecordingConverter::default(), Orientation::Portrait);

        let feature = adapter
            .build_feature(&frame, false, Orientation::Unknown)
            .unwrap();
        assert_eq!(feature.dimensions(), (4, 6));

        let calls = adapter.converter().calls.borrow();
        assert_eq!(calls[0].orientation_code, Orientation::Portrait.code());
        assert_eq!(calls[0].size, (6, 4));
        assert!(!calls[0].world_facing);
    }

    #[test]
    fn test_reported_size_is_informational() {
        let planes = Planes::new();
        let frame = planes.frame(PixelFormat::AndroidYuv420);
        let converter = RecordingConverter {
            reported: (1, 1),
            ..Default::default()
        };
        let adapter = ImageFeatureAdapter::new(converter, Orientation::LandscapeLeft);
        let feature = adapter
            .build_feature(&frame, true, Orientation::PortraitUpsideDown)
            .unwrap();
        assert_eq!(feature.dimensions(), (4, 6));
    }

    #[test]
    fn test_build_feature_rejects_invalid_frame() {
        let planes = Planes::new();
        let mut frame = planes.frame(PixelFormat::AndroidYuv420);
        frame.discard();
        let adapter =
            ImageFeatureAdapter::new(RecordingConverter::default(), Orientation::Portrait);
        let err = adapter
            .build_feature(&frame, true, Orientation::Portrait)
            .unwrap_err();
        assert_eq!(err, FeatureError::InvalidImage);
        assert!(adapter.converter().calls.borrow().is_empty());
    }

    #[test]
    fn test_build_feature_rejects_depth_format() {
        let data = vec![0u8; 6 * 4 * 2];
        let frame =
            RawFrame::new(6, 4, PixelFormat::DepthUint16, [Plane::new(&data, 12, 2)]).unwrap();
        let adapter =
            ImageFeatureAdapter::new(RecordingConverter::default(), Orientation::Portrait);
        let err = adapter
            .build_feature(&frame, true, Orientation::Portrait)
            .unwrap_err();
        assert_eq!(err, FeatureError::InvalidFormat(PixelFormat::DepthUint16));
        assert!(adapter.converter().calls.borrow().is_empty());
    }

    #[test]
    fn test_copy_into_fills_existing_feature() {
        let planes = Planes::new();
        let frame = planes.frame(PixelFormat::AndroidYuv420);
        let adapter =
            ImageFeatureAdapter::new(RecordingConverter::default(), Orientation::Portrait);
        let mut feature = ImageFeature::for_frame(&frame, Orientation::Unknown, Orientation::Portrait);
        assert_eq!(feature.dimensions(), (4, 6));

        adapter
            .copy_into(&mut feature, &frame, true, Orientation::Unknown)
            .unwrap();
        assert!(feature.data().iter().all(|&b| b == 0xAB));
        assert_eq!(adapter.converter().calls.borrow()[0].dst_len, 96);
    }

    #[test]
    fn test_copy_into_size_mismatch_leaves_feature_untouched() {
        let planes = Planes::new();
        let frame = planes.frame(PixelFormat::AndroidYuv420);
        let adapter =
            ImageFeatureAdapter::new(RecordingConverter::default(), Orientation::Portrait);
        // Landscape-sized feature for a portrait conversion.
        let mut feature = ImageFeature::new(6, 4);

        let err = adapter
            .copy_into(&mut feature, &frame, true, Orientation::Portrait)
            .unwrap_err();
        assert_eq!(
            err,
            FeatureError::SizeMismatch {
                expected: (4, 6),
                actual: (6, 4)
            }
        );
        assert!(feature.data().iter().all(|&b| b == 0));
        assert!(adapter.converter().calls.borrow().is_empty());
    }

    #[test]
    fn test_copy_into_rejects_format_without_writing() {
        let data = vec![0u8; 8 * 4];
        let frame =
            RawFrame::new(6, 4, PixelFormat::OneComponent8, [Plane::new(&data, 8, 1)]).unwrap();
        let adapter =
            ImageFeatureAdapter::new(RecordingConverter::default(), Orientation::LandscapeLeft);
        let mut feature = ImageFeature::new(6, 4);
        let err = adapter
            .copy_into(&mut feature, &frame, true, Orientation::Unknown)
            .unwrap_err();
        assert_eq!(err, FeatureError::InvalidFormat(PixelFormat::OneComponent8));
        assert!(feature.data().iter().all(|&b| b == 0));
        assert!(adapter.converter().calls.borrow().is_empty());
    }

    #[test]
    fn test_copy_into_rejects_invalid_frame() {
        let planes = Planes::new();
        let mut frame = planes.frame(PixelFormat::AndroidYuv420);
        frame.discard();
        let adapter =
            ImageFeatureAdapter::new(RecordingConverter::default(), Orientation::Portrait);
        let mut feature = ImageFeature::new(4, 6);

        let err = adapter
            .copy_into(&mut feature, &frame, true, Orientation::Portrait)
            .unwrap_err();
        assert_eq!(err, FeatureError::InvalidImage);
        assert!(feature.data().iter().all(|&b| b == 0));
        assert!(adapter.converter().calls.borrow().is_empty());
    }

    #[test]
    fn test_copy_into_checks_size_before_format() {
        let data = vec![0u8; 8 * 4];
        let frame =
            RawFrame::new(6, 4, PixelFormat::OneComponent8, [Plane::new(&data, 8, 1)]).unwrap();
        let adapter =
            ImageFeatureAdapter::new(RecordingConverter::default(), Orientation::Portrait);
        let mut feature = ImageFeature::new(6, 4);

        let err = adapter
            .copy_into(&mut feature, &frame, true, Orientation::Portrait)
            .unwrap_err();
        assert_eq!(
            err,
            FeatureError::SizeMismatch {
                expected: (4, 6),
                actual: (6, 4)
            }
        );
        assert!(adapter.converter().calls.borrow().is_empty());
    }

    #[test]
    fn test_frame_feature_type() {
        let planes = Planes::new();
        let frame = planes.frame(PixelFormat::AndroidYuv420);
        let ty = frame_feature_type(&frame, Orientation::Portrait, Orientation::LandscapeLeft)
            .unwrap();
        assert_eq!(ty, FeatureType::new(4, 6, 2, Some(ScalarKind::U8)));
        assert_eq!(
            ty.width,
            Orientation::Portrait.output_dimensions(frame.width(), frame.height()).0
        );
    }

    #[test]
    fn test_frame_feature_type_invalid() {
        let frame = RawFrame::new(0, 0, PixelFormat::AndroidYuv420, std::iter::empty()).unwrap();
        let err = frame_feature_type(&frame, Orientation::Portrait, Orientation::Portrait)
            .unwrap_err();
        assert_eq!(err, FeatureError::InvalidImage);
    }

    #[test]
    fn test_frame_feature_type_unknown_format() {
        let data = vec![0u8; 16];
        let frame = RawFrame::new(4, 4, PixelFormat::Unknown, [Plane::new(&data, 4, 1)]).unwrap();
        let ty = frame_feature_type(&frame, Orientation::LandscapeLeft, Orientation::Portrait)
            .unwrap();
        assert_eq!(ty.scalar, None);
    }

    #[test]
    fn test_image_feature_type_and_export() {
        let feature = ImageFeature::new(3, 2);
        assert_eq!(
            feature.feature_type(),
            FeatureType::new(3, 2, 4, Some(ScalarKind::U8))
        );
        let image = feature.to_rgba_image().unwrap();
        assert_eq!(image.dimensions(), (3, 2));
    }
}
