//! Arfeat
//!
//! Orientation-aware adapters from AR camera and depth frames to ML features.
//!
//! ## Crates
//!
//! - [`data`]: frames, planes, pixel formats, orientations and the viewport
//!   to sensor mapping
//! - [`adapter`]: depth features, image feature conversion and projection
//!
//! This facade adds configuration and logging setup for applications.

pub mod config;
pub mod logging;

pub use arfeat_adapter as adapter;
pub use arfeat_data as data;

pub use arfeat_adapter::{
    DepthFeature, FeatureError, ImageFeature, ImageFeatureAdapter, NO_DEPTH, PerspectiveCamera,
    PixelConverter, ViewportProjector,
};
pub use arfeat_data::{FeatureType, Orientation, PixelFormat, Plane, RawFrame};
pub use config::{ConfigError, FeatureConfig, LoggingConfig};
pub use logging::init_logging;

impl FeatureConfig {
    /// Build an image adapter using this configuration's display orientation.
    pub fn image_adapter<C: PixelConverter>(&self, converter: C) -> ImageFeatureAdapter<C> {
        ImageFeatureAdapter::new(converter, self.display_orientation)
    }

    /// Build a depth feature, resolving `Unknown` against the configured display.
    pub fn depth_feature<'a>(
        &self,
        frame: &RawFrame<'a>,
        orientation: Orientation,
    ) -> arfeat_adapter::Result<DepthFeature<'a>> {
        DepthFeature::new(frame, orientation, self.display_orientation)
    }
}
