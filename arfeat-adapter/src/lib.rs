//! Arfeat Adapter - ML features from AR camera and depth frames
//!
//! This crate turns borrowed [`RawFrame`](arfeat_data::RawFrame)s into
//! features an inference pipeline can consume:
//!
//! - [`DepthFeature`]: metric depth lookups at viewport points, plus
//!   viewport-to-world projection through a [`ViewportProjector`]
//! - [`ImageFeatureAdapter`]: orientation-corrected packed image features,
//!   with pixel packing delegated to a [`PixelConverter`]
//!
//! ## Example
//!
//! ```ignore
//! use arfeat_adapter::{DepthFeature, NO_DEPTH};
//! use arfeat_data::Orientation;
//!
//! let depth = DepthFeature::new(&frame, Orientation::Unknown, Orientation::Portrait)?;
//! let meters = depth.sample(glam::Vec2::new(0.5, 0.5));
//! if meters != NO_DEPTH {
//!     // ...
//! }
//! ```

pub mod convert;
pub mod depth;
pub mod error;
pub mod image_feature;
pub mod projection;
mod sampler;

pub use convert::{ConversionRequest, PACKED_CHANNELS, PixelConverter};
pub use depth::{DepthFeature, MILLIMETERS_TO_METERS, NO_DEPTH};
pub use error::{FeatureError, Result};
pub use image_feature::{ImageFeature, ImageFeatureAdapter, frame_feature_type, output_dimensions};
pub use projection::{PerspectiveCamera, ViewportProjector};

#[cfg(feature = "native")]
pub use convert::NativeConverter;
