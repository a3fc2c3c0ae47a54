//! Viewport to world projection.

use glam::{Mat4, Vec2, Vec3};

/// Camera-side unprojection of viewport points.
///
/// `viewport.x`/`viewport.y` are normalized viewport coordinates and
/// `viewport.z` is the distance from the camera in world units.
pub trait ViewportProjector {
    fn viewport_to_world(&self, viewport: Vec3) -> Vec3;
}

impl<F> ViewportProjector for F
where
    F: Fn(Vec3) -> Vec3,
{
    fn viewport_to_world(&self, viewport: Vec3) -> Vec3 {
        self(viewport)
    }
}

/// Right-handed perspective camera looking down `-Z` in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    camera_to_world: Mat4,
    fov_y: f32,
    aspect: f32,
}

impl PerspectiveCamera {
    /// Create a camera from its view matrix, vertical field of view (radians)
    /// and width / height aspect ratio.
    pub fn new(view: Mat4, fov_y: f32, aspect: f32) -> Self {
        Self {
            camera_to_world: view.inverse(),
            fov_y,
            aspect,
        }
    }

    /// Camera at `position` looking along `forward`.
    pub fn look_to(position: Vec3, forward: Vec3, up: Vec3, fov_y: f32, aspect: f32) -> Self {
        Self::new(Mat4::look_to_rh(position, forward, up), fov_y, aspect)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Update the aspect ratio, e.g. after the viewport is resized.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}

impl ViewportProjector for PerspectiveCamera {
    fn viewport_to_world(&self, viewport: Vec3) -> Vec3 {
        let ndc = Vec2::new(viewport.x, viewport.y) * 2.0 - Vec2::ONE;
        let half_height = (self.fov_y * 0.5).tan();
        let distance = viewport.z;
        let view_point = Vec3::new(
            ndc.x * half_height * self.aspect * distance,
            ndc.y * half_height * distance,
            -distance,
        );
        self.camera_to_world.transform_point3(view_point)
    }
}
