use anyhow::{Context, Result, bail};
use beacon_vision::core_modules::utils::image_helper::image_helper::{
    frame_from_rgb_image, save_label_map,
};
use beacon_vision::logging::setup_logging;
use beacon_vision::{BeaconConfig, ByteOrder, GazeMapper, LightLocator, LightSourceResult};
use image::{Rgb, RgbImage};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const MARKER_COLOR: Rgb<u8> = Rgb([255, 0, 255]);
const MARKER_ARM: i64 = 6;

fn main() -> Result<()> {
    setup_logging("info");

    // --- 1. Argument Parsing & Setup ---
    let mut args: Vec<String> = env::args().skip(1).collect();
    let config = if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            bail!("--config needs a path");
        }
        let path = args.remove(1);
        args.remove(0);
        BeaconConfig::from_file(Path::new(&path))
            .with_context(|| format!("loading config {path}"))?
    } else {
        BeaconConfig::default()
    };

    if args.len() < 2 {
        println!("Usage: beacon_tester [--config <config.json>] <output_dir> <image>...");
        return Ok(());
    }
    let output_dir = PathBuf::from(&args[0]);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    // --- 2. Locator Initialization ---
    let mut locator = LightLocator::new(config.locator.clone())?;
    let mut gaze = GazeMapper::new(config.gaze.clone());
    let settings = locator.config();
    info!(
        threshold = settings.brightness_threshold,
        min_pixels = settings.min_blob_pixels,
        min_circularity = settings.min_circularity,
        capacity = settings.label_capacity,
        "locator ready"
    );

    // --- 3. Main Processing Loop ---
    let mut found = 0usize;
    for input in &args[1..] {
        let input = Path::new(input);
        let mut image = match image::open(input) {
            Ok(image) => image.to_rgb8(),
            Err(e) => {
                warn!(path = %input.display(), error = %e, "skipping unreadable image");
                continue;
            }
        };

        // Camera frames arrive as packed RGB565; reproduce that here.
        let frame = frame_from_rgb_image(&image, ByteOrder::Little);
        let analysis = locator
            .analyze(&frame)
            .with_context(|| format!("locating light in {}", input.display()))?;
        let offset = gaze.update(&analysis.result);

        info!(
            path = %input.display(),
            x = analysis.result.x,
            y = analysis.result.y,
            pixels = analysis.result.pixel_count,
            candidates = analysis.candidates.len(),
            dropped = analysis.dropped_pixels,
            dx = offset.dx,
            dy = offset.dy,
            "frame processed"
        );

        // --- 4. Visualization ---
        if analysis.result.is_found() {
            found += 1;
            draw_marker(&mut image, &analysis.result);
        }

        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("frame");
        let annotated = output_dir.join(format!("{stem}_located.png"));
        image
            .save(&annotated)
            .with_context(|| format!("writing {}", annotated.display()))?;

        let (width, height) = locator.label_map_size();
        let labels = output_dir.join(format!("{stem}_labels.png"));
        save_label_map(&labels, locator.label_map(), width, height)
            .with_context(|| format!("writing {}", labels.display()))?;
    }

    println!(
        "Processing complete. Light found in {found} of {} images; output saved to {}",
        args.len() - 1,
        output_dir.display()
    );
    Ok(())
}

/// Draws a cross-hair at the located centroid, mapping [-1, 1] back to pixels.
fn draw_marker(image: &mut RgbImage, result: &LightSourceResult) {
    let (width, height) = image.dimensions();
    let cx = ((result.x + 1.0) / 2.0 * width as f32) as i64;
    let cy = ((result.y + 1.0) / 2.0 * height as f32) as i64;

    for d in -MARKER_ARM..=MARKER_ARM {
        for (x, y) in [(cx + d, cy), (cx, cy + d)] {
            if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                image.put_pixel(x as u32, y as u32, MARKER_COLOR);
            }
        }
    }
}
