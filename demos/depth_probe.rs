//! Depth probe example
//!
//! Builds a synthetic millimeter depth frame (a left-to-right ramp), samples
//! it at a viewport point and lifts the point into world space.
//!
//! Usage:
//!   cargo run --example depth_probe -- --orientation portrait -x 0.25 -y 0.5

use arfeat::{FeatureConfig, Orientation, PerspectiveCamera, PixelFormat, Plane, RawFrame};
use clap::{Parser, ValueEnum};
use glam::{Vec2, Vec3};
use std::error::Error;
use std::path::PathBuf;
use tracing::{info, warn};

/// Sample a synthetic depth frame at a viewport point.
#[derive(Parser, Debug)]
#[command(name = "depth_probe")]
struct Args {
    /// Frame orientation; `unknown` falls back to the configured display
    #[arg(short, long, value_enum, default_value_t = OrientationArg::Unknown)]
    orientation: OrientationArg,

    /// Viewport x in [0, 1]
    #[arg(short, default_value_t = 0.5)]
    x: f32,

    /// Viewport y in [0, 1]
    #[arg(short, default_value_t = 0.5)]
    y: f32,

    /// Optional JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OrientationArg {
    Unknown,
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Unknown => Orientation::Unknown,
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::PortraitUpsideDown => Orientation::PortraitUpsideDown,
            OrientationArg::LandscapeLeft => Orientation::LandscapeLeft,
            OrientationArg::LandscapeRight => Orientation::LandscapeRight,
        }
    }
}

const WIDTH: u32 = 256;
const HEIGHT: u32 = 192;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => FeatureConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => FeatureConfig::default(),
    };
    arfeat::init_logging(&config.logging);

    // Depth grows from 0.5 m on the left edge to ~3 m on the right.
    let row_stride = WIDTH as usize * 2;
    let mut depth_bytes = vec![0u8; row_stride * HEIGHT as usize];
    for y in 0..HEIGHT as usize {
        for x in 0..WIDTH as usize {
            let millimeters = 500 + (x as u16) * 10;
            let offset = y * row_stride + x * 2;
            depth_bytes[offset..offset + 2].copy_from_slice(&millimeters.to_ne_bytes());
        }
    }
    let frame = RawFrame::new(
        WIDTH,
        HEIGHT,
        PixelFormat::DepthUint16,
        [Plane::new(&depth_bytes, row_stride, 2)],
    )?;

    let depth = config.depth_feature(&frame, args.orientation.into())?;
    info!(
        "Depth feature {:?} ({:?})",
        depth.feature_type(),
        depth.orientation()
    );

    let point = Vec2::new(args.x, args.y);
    let meters = depth.sample(point);
    if meters == arfeat::NO_DEPTH {
        warn!("No depth at {:?}", point);
        return Ok(());
    }
    info!("Depth at {:?}: {:.3} m", point, meters);

    let (width, height) = depth.feature_type().dimensions();
    let camera = PerspectiveCamera::look_to(
        Vec3::ZERO,
        -Vec3::Z,
        Vec3::Y,
        60f32.to_radians(),
        width as f32 / height as f32,
    );
    let world = depth.viewport_to_world(point, &camera);
    info!("World point: {:?}", world);

    Ok(())
}
