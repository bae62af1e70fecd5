use lane_lines::batch::derived_path;
use lane_lines::config::tune;
use lane_lines::image::io::{load_rgb_image, save_gray_image, save_rgb_image, write_json_file};
use lane_lines::pipeline::{render_raw_segments, LaneDetector, PipelineParams};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = tune::load_config(Path::new(&config_path))?;
    let frame = load_rgb_image(&config.input)?;

    let mut variants = vec![("base".to_string(), config.params.clone())];
    variants.extend(
        config
            .sweep
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.label_or(i), entry.apply(&config.params))),
    );

    let mut runs = Vec::with_capacity(variants.len());
    for (label, params) in variants {
        runs.push(render_variant(&frame, &config.input, &config.output_dir, &label, params)?);
    }

    let report_path = config.output_dir.join("tune_report.json");
    write_json_file(&report_path, &runs)?;
    println!("Saved tuning report to {}", report_path.display());
    Ok(())
}

fn render_variant(
    frame: &image::RgbImage,
    input: &Path,
    output_dir: &Path,
    label: &str,
    params: PipelineParams,
) -> Result<TuneRun, String> {
    let mut detector = LaneDetector::new(params.clone());
    let output = detector.process_frame(frame);

    let suffix = if label == "base" {
        String::new()
    } else {
        format!("-{label}")
    };
    let edged = derived_path(output_dir, input, &format!("-edged{suffix}"));
    let houghed = derived_path(output_dir, input, &format!("-houghed{suffix}"));
    save_gray_image(&output.edges.edges, &edged)?;
    let raw = render_raw_segments(
        frame.width(),
        frame.height(),
        &output.report.lanes,
        &params,
    );
    save_rgb_image(&raw, &houghed)?;

    let hough = params.hough;
    println!("[{label}] Edge parameters:");
    println!("  Filter size: {}", params.edge.kernel_size);
    println!("  Threshold1: {}", params.edge.low_threshold);
    println!("  Threshold2: {}", params.edge.high_threshold);
    println!("[{label}] Hough parameters:");
    println!("  Rho: {:.6}", hough.rho);
    println!("  Theta: {:.6}", hough.theta_rad());
    println!("  Threshold: {}", hough.threshold);
    println!("  Min Line Length: {}", hough.min_line_length);
    println!("  Max Line Gap: {}", hough.max_line_gap);
    println!(
        "[{label}] {} edge pixels, {} segments -> {}, {}",
        output.report.edges.edge_pixels,
        output.report.hough.segment_count,
        edged.display(),
        houghed.display()
    );

    Ok(TuneRun {
        label: label.to_string(),
        params,
        edge_pixels: output.report.edges.edge_pixels,
        masked_edge_pixels: output.report.edges.masked_edge_pixels,
        segment_count: output.report.hough.segment_count,
        lanes_fitted: output.report.lanes.lanes.is_some(),
        edge_image: edged,
        hough_image: houghed,
    })
}

fn usage() -> String {
    "Usage: lane_tune <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TuneRun {
    label: String,
    params: PipelineParams,
    edge_pixels: usize,
    masked_edge_pixels: usize,
    segment_count: usize,
    lanes_fitted: bool,
    edge_image: PathBuf,
    hough_image: PathBuf,
}
