//! Arfeat Data Crate
//!
//! Frame, plane and orientation types shared by the feature adapters.
//! This crate never touches the host AR subsystem; frames are plain borrowed
//! byte planes and every orientation lookup is an explicit parameter.

pub mod format;
pub mod frame;
pub mod orientation;
pub mod transform;
pub mod types;

pub use format::{PixelFormat, ScalarKind};
pub use frame::{FrameError, MAX_PLANES, Plane, RawFrame};
pub use orientation::Orientation;
pub use transform::{ViewportTransform, to_sensor_pixel};
pub use types::FeatureType;
