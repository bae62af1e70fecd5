use super::blur::{gaussian_blur, grayscale};
use image::{GrayImage, RgbImage};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Smoothing and hysteresis thresholds for the edge stage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeOptions {
    /// Side of the Gaussian kernel in pixels (rounded up to odd).
    pub kernel_size: u32,
    /// Lower hysteresis threshold on the gradient magnitude.
    pub low_threshold: f32,
    /// Upper hysteresis threshold on the gradient magnitude.
    pub high_threshold: f32,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            kernel_size: 17,
            low_threshold: 10.0,
            high_threshold: 40.0,
        }
    }
}

/// Intermediate images of the edge stage.
#[derive(Clone, Debug)]
pub struct EdgeResult {
    pub gray: GrayImage,
    pub smoothed: GrayImage,
    /// Binary edge map (0 or 255).
    pub edges: GrayImage,
    pub elapsed_ms: f64,
}

impl EdgeResult {
    pub fn edge_pixel_count(&self) -> usize {
        self.edges.pixels().filter(|p| p[0] != 0).count()
    }
}

/// Canny edge detection on an already smoothed grayscale image.
pub fn canny(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let (low, high) = if low_threshold <= high_threshold {
        (low_threshold, high_threshold)
    } else {
        (high_threshold, low_threshold)
    };
    imageproc::edges::canny(image, low, high)
}

/// Grayscale, blur and Canny in one pass.
pub fn detect_edges(image: &RgbImage, options: &EdgeOptions) -> EdgeResult {
    let start = Instant::now();
    let gray = grayscale(image);
    let smoothed = gaussian_blur(&gray, options.kernel_size);
    let edges = canny(&smoothed, options.low_threshold, options.high_threshold);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "detect_edges w={} h={} kernel={} thresholds=({}, {}) ms={:.3}",
        image.width(),
        image.height(),
        options.kernel_size,
        options.low_threshold,
        options.high_threshold,
        elapsed_ms
    );
    EdgeResult {
        gray,
        smoothed,
        edges,
        elapsed_ms,
    }
}
