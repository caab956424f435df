// Example runner for the `beacon_vision` library.
//
// Synthesizes one low-resolution RGB565 frame containing a round light, a long
// reflection streak and scattered hot pixels, then locates the light and prints
// what the pipeline saw. An optional JSON config path overrides the defaults.

use beacon_vision::core_modules::pixel::pixel::Pixel;
use beacon_vision::logging::setup_logging;
use beacon_vision::{BeaconConfig, ByteOrder, Frame, GazeMapper, LightLocator, LocateError};
use std::path::Path;
use tracing::info;

const FRAME_WIDTH: u32 = 160;
const FRAME_HEIGHT: u32 = 120;

fn synthetic_frame() -> Frame {
    let light = Pixel::pack(250, 248, 245);
    let glare = Pixel::pack(240, 240, 240);
    let background = Pixel::pack(40, 45, 60);

    let mut packed = vec![background; (FRAME_WIDTH * FRAME_HEIGHT) as usize];
    for y in 0..FRAME_HEIGHT {
        for x in 0..FRAME_WIDTH {
            let index = (y * FRAME_WIDTH + x) as usize;
            let (dx, dy) = (x as i32 - 110, y as i32 - 40);
            let in_disk = dx * dx + dy * dy <= 36;
            let in_streak = y == 90 && (20..70).contains(&x);
            let hot_pixel = (x * 7 + y * 13) % 211 == 0;
            if in_disk {
                packed[index] = light;
            } else if in_streak || hot_pixel {
                packed[index] = glare;
            }
        }
    }
    Frame::rgb565(FRAME_WIDTH, FRAME_HEIGHT, ByteOrder::Little, &packed)
}

fn main() -> Result<(), LocateError> {
    setup_logging("info");
    println!("Beacon Vision - Example Runner");

    let config = match std::env::args().nth(1) {
        Some(path) => BeaconConfig::from_file(Path::new(&path))?,
        None => BeaconConfig::default(),
    };

    let mut locator = LightLocator::new(config.locator.clone())?;
    let mut gaze = GazeMapper::new(config.gaze.clone());

    let frame = synthetic_frame();
    let analysis = locator.analyze(&frame)?;

    for candidate in &analysis.candidates {
        info!(
            label = candidate.label,
            pixels = candidate.stats.count,
            circularity = candidate.shape.circularity,
            accepted = candidate.accepted,
            "candidate"
        );
    }

    let offset = gaze.update(&analysis.result);
    println!(
        "light source: x={:.3} y={:.3} pixels={} -> display offset ({}, {})",
        analysis.result.x, analysis.result.y, analysis.result.pixel_count, offset.dx, offset.dy
    );
    Ok(())
}
