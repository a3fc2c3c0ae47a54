//! Boundary to the pixel conversion kernel.
//!
//! The kernel that packs planar YUV into an interleaved 4-channel buffer lives
//! in the host's native library. This module describes what is handed across
//! that boundary and, with the `native` feature, binds the real symbol.

use crate::error::{FeatureError, Result};
use arfeat_data::{MAX_PLANES, Orientation, PixelFormat, RawFrame};
use arrayvec::ArrayVec;

/// Bytes per pixel of the packed output.
pub const PACKED_CHANNELS: usize = 4;

/// Plane handles, strides and flags for one conversion.
///
/// Every array lives inline, so building a request never allocates. Requests
/// are only built from valid planar color frames, whose planes were checked
/// against their strides when the frame was assembled.
#[derive(Debug, Clone)]
pub struct ConversionRequest<'a> {
    planes: ArrayVec<&'a [u8], MAX_PLANES>,
    row_strides: ArrayVec<i32, MAX_PLANES>,
    pixel_strides: ArrayVec<i32, MAX_PLANES>,
    width: i32,
    height: i32,
    orientation: Orientation,
    world_facing: bool,
}

impl<'a> ConversionRequest<'a> {
    /// Gather plane handles from a frame. `orientation` must already be resolved.
    pub(crate) fn new(
        frame: &RawFrame<'a>,
        orientation: Orientation,
        world_facing: bool,
    ) -> Result<Self> {
        if !frame.is_valid() {
            return Err(FeatureError::InvalidImage);
        }
        check_color_format(frame.format())?;

        let mut row_strides = ArrayVec::new();
        let mut pixel_strides = ArrayVec::new();
        for plane in frame.planes() {
            row_strides.push(to_i32(plane.row_stride())?);
            pixel_strides.push(to_i32(plane.pixel_stride())?);
        }
        Ok(Self {
            planes: frame.planes().iter().map(|plane| plane.data()).collect(),
            row_strides,
            pixel_strides,
            width: to_i32(frame.width())?,
            height: to_i32(frame.height())?,
            orientation,
            world_facing,
        })
    }

    pub fn planes(&self) -> &[&'a [u8]] {
        &self.planes
    }

    pub fn plane_count(&self) -> i32 {
        self.planes.len() as i32
    }

    pub fn row_strides(&self) -> &[i32] {
        &self.row_strides
    }

    pub fn pixel_strides(&self) -> &[i32] {
        &self.pixel_strides
    }

    /// Raw sensor width.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Raw sensor height.
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Orientation ordinal as understood by the host display subsystem.
    pub fn orientation_code(&self) -> i32 {
        self.orientation.code()
    }

    pub fn world_facing(&self) -> bool {
        self.world_facing
    }

    /// Minimum destination size in bytes.
    pub fn required_capacity(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize * PACKED_CHANNELS
    }
}

/// Only the planar YUV layouts can be packed.
pub(crate) fn check_color_format(format: PixelFormat) -> Result<()> {
    match format {
        PixelFormat::AndroidYuv420 | PixelFormat::IosYpCbCr420BiPlanar => Ok(()),
        other => Err(FeatureError::InvalidFormat(other)),
    }
}

fn to_i32<T: TryInto<i32>>(value: T) -> Result<i32> {
    value.try_into().map_err(|_| FeatureError::LayoutOutOfRange)
}

/// Converts multi-plane frames into packed 4-channel buffers.
pub trait PixelConverter {
    /// Fill `dst` from the request's planes and return the dimensions the
    /// converter produced. `dst` holds at least
    /// [`ConversionRequest::required_capacity`] bytes.
    fn convert(&self, request: &ConversionRequest<'_>, dst: &mut [u8]) -> (u32, u32);
}

impl<C: PixelConverter + ?Sized> PixelConverter for &C {
    fn convert(&self, request: &ConversionRequest<'_>, dst: &mut [u8]) -> (u32, u32) {
        (**self).convert(request, dst)
    }
}

#[cfg(feature = "native")]
pub use native::NativeConverter;

#[cfg(feature = "native")]
mod native {
    use super::{ConversionRequest, PixelConverter};
    use arfeat_data::MAX_PLANES;
    use arrayvec::ArrayVec;
    use std::ffi::c_void;
    use tracing::warn;

    #[cfg_attr(
        not(any(target_os = "ios", target_arch = "wasm32")),
        link(name = "NatMLARFoundation")
    )]
    unsafe extern "C" {
        #[link_name = "NMLCreateARFoundationImageFeatureData"]
        fn create_image_feature_data(
            planes: *const *const c_void,
            plane_count: i32,
            width: i32,
            height: i32,
            row_strides: *const i32,
            pixel_strides: *const i32,
            orientation: i32,
            world: bool,
            dst: *mut u8,
            dst_width: *mut i32,
            dst_height: *mut i32,
        );
    }

    /// Converter backed by the host's native library.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct NativeConverter;

    impl PixelConverter for NativeConverter {
        fn convert(&self, request: &ConversionRequest<'_>, dst: &mut [u8]) -> (u32, u32) {
            if dst.len() < request.required_capacity() {
                warn!(
                    "Destination holds {} bytes, {} required; skipping conversion",
                    dst.len(),
                    request.required_capacity()
                );
                return (0, 0);
            }

            let planes: ArrayVec<*const c_void, MAX_PLANES> = request
                .planes()
                .iter()
                .map(|plane| plane.as_ptr().cast::<c_void>())
                .collect();
            let mut dst_width = 0i32;
            let mut dst_height = 0i32;

            // SAFETY: plane pointers and stride arrays outlive the call and hold
            // `plane_count` entries. Requests are only built from color frames
            // whose planes cover their (sub-sampled) extent at the given
            // non-negative strides, and `dst` was checked against the capacity
            // the kernel writes.
            unsafe {
                create_image_feature_data(
                    planes.as_ptr(),
                    request.plane_count(),
                    request.width(),
                    request.height(),
                    request.row_strides().as_ptr(),
                    request.pixel_strides().as_ptr(),
                    request.orientation_code(),
                    request.world_facing(),
                    dst.as_mut_ptr(),
                    &mut dst_width,
                    &mut dst_height,
                );
            }

            (dst_width.max(0) as u32, dst_height.max(0) as u32)
        }
    }
}
