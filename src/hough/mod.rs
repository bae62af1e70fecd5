//! Probabilistic Hough transform turning a binary edge map into segments.
//!
//! Implements the progressive variant: edge pixels are visited in a seeded
//! random order and vote into a `(rho, theta)` accumulator. As soon as the
//! best cell for the current pixel reaches `threshold`, the corresponding line
//! is followed through the edge map in both directions, bridging gaps of up to
//! `max_line_gap` pixels. Pixels on the walked line are removed from the map
//! so they cannot seed another segment, and, if the segment is long enough to
//! be kept, their votes are retracted from the accumulator.
//!
//! Endpoints are integer pixel coordinates. Results depend on the visiting
//! order, hence on [`HoughOptions::seed`]; a fixed seed gives reproducible
//! output.
//!
//! The lane pipeline only relies on the [`SegmentDetector`] trait, so another
//! line detector can be plugged in.

mod accumulator;
mod extractor;
mod options;

pub use extractor::HoughResult;
pub use options::HoughOptions;

use crate::types::Segment;
use image::GrayImage;
use log::debug;
use std::time::Instant;

/// Anything that can turn a binary edge image into line segments.
pub trait SegmentDetector {
    fn detect(&self, edges: &GrayImage) -> Vec<Segment>;
}

/// [`SegmentDetector`] backed by the progressive probabilistic Hough transform.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProbabilisticHough {
    pub options: HoughOptions,
}

impl ProbabilisticHough {
    pub fn new(options: HoughOptions) -> Self {
        Self { options }
    }
}

impl SegmentDetector for ProbabilisticHough {
    fn detect(&self, edges: &GrayImage) -> Vec<Segment> {
        hough_segments(edges, self.options).segments
    }
}

/// Run the transform on `edges`; any non-zero pixel is an edge.
pub fn hough_segments(edges: &GrayImage, options: HoughOptions) -> HoughResult {
    let start = Instant::now();
    let segments = extractor::HoughExtractor::new(edges, options).extract();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "hough_segments w={} h={} segments={} ms={:.3}",
        edges.width(),
        edges.height(),
        segments.len(),
        elapsed_ms
    );
    HoughResult {
        segments,
        elapsed_ms,
    }
}

#[cfg(test)]
mod tests;
