//! Image feature example
//!
//! Converts a synthetic NV12-style bi-planar frame with the host's native
//! converter and writes the packed result to a PNG.
//!
//! Usage:
//!   cargo run --example image_feature --features native -- out.png

use arfeat::adapter::NativeConverter;
use arfeat::{FeatureConfig, Orientation, PixelFormat, Plane, RawFrame};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

fn main() -> Result<(), Box<dyn Error>> {
    let config = FeatureConfig::default();
    arfeat::init_logging(&config.logging);

    let out_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("feature.png"));

    // Horizontal luma gradient over neutral chroma.
    let luma: Vec<u8> = (0..HEIGHT)
        .flat_map(|_| (0..WIDTH).map(|x| (x * 255 / WIDTH) as u8))
        .collect();
    let chroma = vec![128u8; (WIDTH * HEIGHT / 2) as usize];
    let frame = RawFrame::new(
        WIDTH,
        HEIGHT,
        PixelFormat::IosYpCbCr420BiPlanar,
        [
            Plane::new(&luma, WIDTH as usize, 1),
            Plane::new(&chroma, WIDTH as usize, 2),
        ],
    )?;

    let adapter = config.image_adapter(NativeConverter);
    info!(
        "Frame feature type: {:?}",
        adapter.feature_type(&frame, Orientation::Unknown)?
    );

    let feature = adapter.build_feature(&frame, config.world_facing, Orientation::Unknown)?;
    info!("Built {}x{} feature", feature.width(), feature.height());

    let image = feature
        .to_rgba_image()
        .ok_or("feature buffer does not match its dimensions")?;
    image.save(&out_path)?;
    info!("Wrote {:?}", out_path);

    Ok(())
}
