//! Depth features over AR depth frames.
//!
//! A [`DepthFeature`] cannot be fed to a model directly. Predictors use it to
//! look up metric depth at viewport points and to lift those points into
//! world space.

use crate::error::{FeatureError, Result};
use crate::projection::ViewportProjector;
use crate::sampler;
use arfeat_data::{FeatureType, Orientation, PixelFormat, Plane, RawFrame, ViewportTransform};
use glam::{Vec2, Vec3};
use tracing::trace;

/// Returned by [`DepthFeature::sample`] when the point falls outside the frame.
pub const NO_DEPTH: f32 = -1.0;

/// Scale from millimeter depth values to meters.
pub const MILLIMETERS_TO_METERS: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DepthEncoding {
    /// `f32` meters.
    Meters,
    /// `u16` millimeters.
    Millimeters,
}

/// Read-only depth view over one frame.
#[derive(Debug, Clone)]
pub struct DepthFeature<'a> {
    plane: Plane<'a>,
    width: u32,
    height: u32,
    format: PixelFormat,
    encoding: DepthEncoding,
    orientation: Orientation,
    transform: ViewportTransform,
}

impl<'a> DepthFeature<'a> {
    /// Create a depth feature.
    ///
    /// `orientation` may be `Unknown`, in which case `display` is used.
    pub fn new(frame: &RawFrame<'a>, orientation: Orientation, display: Orientation) -> Result<Self> {
        if !frame.is_valid() {
            return Err(FeatureError::InvalidImage);
        }
        let encoding = match frame.format() {
            PixelFormat::DepthFloat32 => DepthEncoding::Meters,
            PixelFormat::DepthUint16 => DepthEncoding::Millimeters,
            other => return Err(FeatureError::InvalidFormat(other)),
        };
        let plane = *frame.plane(0).ok_or(FeatureError::InvalidImage)?;
        let orientation = orientation.resolve(display);

        Ok(Self {
            plane,
            width: frame.width(),
            height: frame.height(),
            format: frame.format(),
            encoding,
            orientation,
            transform: ViewportTransform::for_orientation(orientation),
        })
    }

    /// Effective orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Orientation-corrected shape of the depth map.
    pub fn feature_type(&self) -> FeatureType {
        let (width, height) = self.orientation.output_dimensions(self.width, self.height);
        FeatureType::new(width, height, 1, self.format.scalar_kind())
    }

    /// Depth in meters at a normalized viewport point, or [`NO_DEPTH`] when the
    /// point maps outside the frame.
    pub fn sample(&self, point: Vec2) -> f32 {
        if !point.is_finite() {
            trace!("Depth sample at non-finite point {:?}", point);
            return NO_DEPTH;
        }
        // Depth planes stay in sensor layout, so map with the unrotated size.
        let pixel = self
            .transform
            .to_sensor_pixel(point, self.width, self.height);
        if pixel.x < 0
            || pixel.y < 0
            || pixel.x as u32 >= self.width
            || pixel.y as u32 >= self.height
        {
            trace!(
                "Depth sample at {:?} maps to {:?}, outside {}x{}",
                point, pixel, self.width, self.height
            );
            return NO_DEPTH;
        }

        let (x, y) = (pixel.x as usize, pixel.y as usize);
        match self.encoding {
            DepthEncoding::Meters => sampler::sample::<f32>(&self.plane, x, y),
            DepthEncoding::Millimeters => {
                f32::from(sampler::sample::<u16>(&self.plane, x, y)) * MILLIMETERS_TO_METERS
            }
        }
    }

    /// Project a viewport point into world space using its sampled depth.
    pub fn viewport_to_world(&self, point: Vec2, projector: &impl ViewportProjector) -> Vec3 {
        let depth = self.sample(point);
        projector.viewport_to_world(Vec3::new(point.x, point.y, depth))
    }
}
