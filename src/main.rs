use lane_lines::image::io::{load_rgb_image, save_rgb_image};
use lane_lines::pipeline::render;
use lane_lines::{LaneDetector, PipelineParams};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

// Single image: detect lanes, print the endpoints, optionally write the overlay.
fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let input = args.next().ok_or_else(usage)?;
    let output = args.next();

    let frame = load_rgb_image(Path::new(&input))?;
    let mut det = LaneDetector::new(PipelineParams::still_images());
    let report = det.process(&frame);

    match (&report.lanes, &report.error) {
        (Some(lanes), _) => {
            for (side, line) in lanes.iter() {
                println!("{side}: {:?}", line.to_pixel_segment());
            }
        }
        (None, Some(err)) => println!("no lanes: {err}"),
        (None, None) => println!("no lanes"),
    }
    println!(
        "segments={} latency_ms={:.3}",
        report.segments.len(),
        report.latency_ms
    );

    if let Some(output) = output {
        let annotated = render(&frame, &report, det.params()).map_err(|e| e.to_string())?;
        save_rgb_image(&annotated, Path::new(&output))?;
        println!("Saved {}", output);
    }
    Ok(())
}

fn usage() -> String {
    "Usage: lane_lines <input-image> [output-image]".to_string()
}
