//! Directory-level processing: run the lane pipeline on every image in a
//! folder and write the annotated results next to optional intermediates.
use crate::image::io::{
    is_image_path, load_rgb_image, save_gray_image, save_rgb_image,
};
use crate::lanes::FittingError;
use crate::pipeline::{render, render_raw_segments, FallbackPolicy, LaneDetector, PipelineParams};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Also write `<stem>-edged.<ext>` (Canny output).
    pub save_edges: bool,
    /// Also write `<stem>-houghed.<ext>` (raw segments on black).
    pub save_hough: bool,
    /// Process images on the rayon thread pool. Disables `HoldLast` fallback.
    pub parallel: bool,
}

/// What happened to one input image.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub segment_count: usize,
    /// Pixel endpoints `[left, right]` of the drawn lanes.
    pub lanes: Option<[[i32; 4]; 2]>,
    pub held: bool,
    pub error: Option<FittingError>,
    pub latency_ms: f64,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub processed: usize,
    pub fitted: usize,
    pub failed: usize,
    pub images: Vec<ImageOutcome>,
    /// Files that could not be read or written, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Image files directly inside `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("Failed to read directory {}: {e}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read entry in {}: {e}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && is_image_path(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// `dir/<stem><suffix>.<ext>` for an input file name.
pub fn derived_path(dir: &Path, input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    dir.join(name)
}

/// Run `detector` on one image and write the requested outputs.
pub fn process_image(
    detector: &mut LaneDetector,
    input: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<ImageOutcome, String> {
    let frame = load_rgb_image(input)?;
    let frame_out = detector.process_frame(&frame);
    let report = &frame_out.report.lanes;
    let params = detector.params();

    let rendered = render(&frame, report, params).map_err(|e| e.to_string())?;
    let output = derived_path(output_dir, input, "");
    save_rgb_image(&rendered, &output)?;

    if options.save_edges {
        save_gray_image(
            &frame_out.edges.edges,
            &derived_path(output_dir, input, "-edged"),
        )?;
    }
    if options.save_hough {
        let raw = render_raw_segments(frame.width(), frame.height(), report, params);
        save_rgb_image(&raw, &derived_path(output_dir, input, "-houghed"))?;
    }

    match (&report.lanes, &report.error) {
        (Some(_), None) => info!(
            "{}: {} segments, lanes fitted",
            input.display(),
            report.segments.len()
        ),
        (_, Some(err)) => warn!("{}: {err}", input.display()),
        (None, None) => {}
    }

    Ok(ImageOutcome {
        input: input.to_path_buf(),
        output,
        segment_count: report.segments.len(),
        lanes: report
            .lanes
            .map(|l| [l.left.to_pixel_segment(), l.right.to_pixel_segment()]),
        held: report.held,
        error: report.error,
        latency_ms: report.latency_ms,
    })
}

/// Process every image of `input_dir` into `output_dir`.
///
/// Unreadable or unwritable files are recorded in [`BatchSummary::skipped`];
/// only failing to list the input directory is an error.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    params: &PipelineParams,
    options: &BatchOptions,
) -> Result<BatchSummary, String> {
    let inputs = list_images(input_dir)?;
    info!(
        "processing {} images from {} into {}",
        inputs.len(),
        input_dir.display(),
        output_dir.display()
    );

    let results: Vec<(PathBuf, Result<ImageOutcome, String>)> = if options.parallel {
        let mut params = params.clone();
        if params.fallback == FallbackPolicy::HoldLast {
            warn!("hold-last fallback is ignored in parallel mode");
            params.fallback = FallbackPolicy::Skip;
        }
        inputs
            .par_iter()
            .map(|path| {
                let mut detector = LaneDetector::new(params.clone());
                (path.clone(), process_image(&mut detector, path, output_dir, options))
            })
            .collect()
    } else {
        let mut detector = LaneDetector::new(params.clone());
        inputs
            .iter()
            .map(|path| (path.clone(), process_image(&mut detector, path, output_dir, options)))
            .collect()
    };

    let mut summary = BatchSummary::default();
    for (path, result) in results {
        match result {
            Ok(outcome) => {
                summary.processed += 1;
                if outcome.lanes.is_some() && !outcome.held {
                    summary.fitted += 1;
                } else {
                    summary.failed += 1;
                }
                summary.images.push(outcome);
            }
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
                summary.skipped.push((path, err));
            }
        }
    }
    Ok(summary)
}
