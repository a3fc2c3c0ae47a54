//! Viewport to sensor coordinate mapping.
//!
//! Viewport points are normalized `[0, 1]` display coordinates. Sensor pixels
//! live in the unrotated, landscape-native plane, with the row origin at the
//! top. The mapping pivots around the image center:
//!
//! ```text
//! p' = R(theta) * F * (p - 0.5) + 0.5
//! pixel = trunc(p' * (width, height))
//! ```
//!
//! where `F` flips the vertical axis and `theta` is the orientation's rotation.

use crate::orientation::Orientation;
use glam::{IVec2, Mat2, Vec2};

/// Rotation + reflection from viewport space into sensor space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    matrix: Mat2,
}

impl ViewportTransform {
    /// Build the transform for an already-resolved orientation.
    pub fn for_orientation(orientation: Orientation) -> Self {
        let rotation = Mat2::from_angle(orientation.rotation_radians());
        let flip = Mat2::from_diagonal(Vec2::new(1.0, -1.0));
        Self {
            matrix: rotation * flip,
        }
    }

    pub fn matrix(&self) -> Mat2 {
        self.matrix
    }

    /// Map a viewport point to normalized sensor coordinates.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        let center = Vec2::splat(0.5);
        self.matrix * (point - center) + center
    }

    /// Map a viewport point to a sensor pixel.
    ///
    /// `raw_width`/`raw_height` are the unrotated sensor dimensions. The result
    /// is truncated toward zero and is not clamped; callers check bounds.
    pub fn to_sensor_pixel(&self, point: Vec2, raw_width: u32, raw_height: u32) -> IVec2 {
        let scaled = self.apply(point) * Vec2::new(raw_width as f32, raw_height as f32);
        IVec2::new(scaled.x as i32, scaled.y as i32)
    }
}

/// Map a viewport point to a sensor pixel for the given orientation.
pub fn to_sensor_pixel(
    point: Vec2,
    raw_width: u32,
    raw_height: u32,
    orientation: Orientation,
) -> IVec2 {
    ViewportTransform::for_orientation(orientation).to_sensor_pixel(point, raw_width, raw_height)
}
