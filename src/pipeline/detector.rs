//! Frame-level driver: edges, mask, Hough, lane extrapolation.
//!
//! ```no_run
//! use lane_lines::{LaneDetector, PipelineParams};
//!
//! # fn example(frame: image::RgbImage) {
//! let mut detector = LaneDetector::new(PipelineParams::still_images());
//! let report = detector.process(&frame);
//! if let Some(lanes) = report.lanes {
//!     println!("left: {:?}", lanes.left.to_pixel_segment());
//! }
//! # }
//! ```
use super::params::{FallbackPolicy, PipelineParams};
use crate::diagnostics::{EdgeStage, FrameReport, HoughStage, InputDescriptor, TimingBreakdown};
use crate::edges::{detect_edges, EdgeResult};
use crate::hough::hough_segments;
use crate::lanes::{ExtrapolatedLine, FittingError, LaneExtrapolator};
use crate::overlay::{draw_segments, line_image, weighted_blend, OverlayError};
use crate::roi::region_of_interest;
use crate::types::{LanePair, Segment};
use image::{GrayImage, RgbImage};
use log::{debug, warn};
use serde::Serialize;
use std::time::Instant;

/// Lane outcome for a single frame.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LaneReport {
    pub lanes: Option<LanePair<ExtrapolatedLine>>,
    /// Why fitting failed on this frame, even when `held` lanes are reported.
    pub error: Option<FittingError>,
    /// `lanes` were carried over from an earlier frame.
    pub held: bool,
    /// Raw segments found by the Hough stage.
    pub segments: Vec<Segment>,
    pub latency_ms: f64,
}

/// Full result of one frame including intermediate images.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub report: FrameReport,
    pub edges: EdgeResult,
    pub masked_edges: GrayImage,
}

/// Lane detector holding the parameters and, for
/// [`FallbackPolicy::HoldLast`], the last good lanes.
pub struct LaneDetector {
    params: PipelineParams,
    extrapolator: LaneExtrapolator,
    last_lanes: Option<LanePair<ExtrapolatedLine>>,
}

impl LaneDetector {
    pub fn new(params: PipelineParams) -> Self {
        let extrapolator = LaneExtrapolator::new(params.extrapolation);
        Self {
            params,
            extrapolator,
            last_lanes: None,
        }
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    /// Forget lanes remembered from earlier frames.
    pub fn reset(&mut self) {
        self.last_lanes = None;
    }

    pub fn process(&mut self, frame: &RgbImage) -> LaneReport {
        self.process_frame(frame).report.lanes
    }

    pub fn process_with_diagnostics(&mut self, frame: &RgbImage) -> FrameReport {
        self.process_frame(frame).report
    }

    pub fn process_frame(&mut self, frame: &RgbImage) -> FrameOutput {
        let (width, height) = frame.dimensions();
        debug!("LaneDetector::process start w={} h={}", width, height);
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let edges = detect_edges(frame, &self.params.edge);
        timing.push("edges", edges.elapsed_ms);

        let mask_start = Instant::now();
        let masked_edges = region_of_interest(&edges.edges, &self.params.roi);
        timing.push("roi", mask_start.elapsed().as_secs_f64() * 1000.0);

        let hough = hough_segments(&masked_edges, self.params.hough);
        timing.push("hough", hough.elapsed_ms);

        let fit_start = Instant::now();
        let fitted = self.extrapolator.extrapolate(&hough.segments, height);
        timing.push("extrapolate", fit_start.elapsed().as_secs_f64() * 1000.0);

        let (lanes, error, held) = self.resolve(fitted);
        let latency_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        timing.total_ms = latency_ms;
        debug!(
            "LaneDetector::process done segments={} lanes={} held={} ms={:.3}",
            hough.segments.len(),
            lanes.is_some(),
            held,
            latency_ms
        );

        let report = FrameReport {
            input: InputDescriptor { width, height },
            edges: EdgeStage {
                options: self.params.edge,
                edge_pixels: edges.edge_pixel_count(),
                masked_edge_pixels: masked_edges.pixels().filter(|p| p[0] != 0).count(),
                roi_vertices: self.params.roi.vertices(width, height),
                elapsed_ms: edges.elapsed_ms,
            },
            hough: HoughStage {
                options: self.params.hough,
                segment_count: hough.segments.len(),
                elapsed_ms: hough.elapsed_ms,
            },
            lanes: LaneReport {
                lanes,
                error,
                held,
                segments: hough.segments,
                latency_ms,
            },
            timing,
        };
        FrameOutput {
            report,
            edges,
            masked_edges,
        }
    }

    fn resolve(
        &mut self,
        fitted: Result<LanePair<ExtrapolatedLine>, FittingError>,
    ) -> (Option<LanePair<ExtrapolatedLine>>, Option<FittingError>, bool) {
        match fitted {
            Ok(lanes) => {
                if self.params.fallback == FallbackPolicy::HoldLast {
                    self.last_lanes = Some(lanes);
                }
                (Some(lanes), None, false)
            }
            Err(err) => {
                warn!("lane fit failed: {err}");
                match (self.params.fallback, self.last_lanes) {
                    (FallbackPolicy::HoldLast, Some(last)) => (Some(last), Some(err), true),
                    _ => (None, Some(err), false),
                }
            }
        }
    }
}

/// Draw the frame's lanes and blend them over `frame`.
pub fn render(
    frame: &RgbImage,
    report: &LaneReport,
    params: &PipelineParams,
) -> Result<RgbImage, OverlayError> {
    let mut layer = RgbImage::new(frame.width(), frame.height());
    if let Some(lanes) = &report.lanes {
        let segments: Vec<Segment> = lanes.iter().map(|(_, l)| l.to_segment()).collect();
        draw_segments(&mut layer, &segments, &params.lane_style);
    }
    weighted_blend(frame, &layer, &params.blend)
}

/// Raw Hough segments on a black background.
pub fn render_raw_segments(
    width: u32,
    height: u32,
    report: &LaneReport,
    params: &PipelineParams,
) -> RgbImage {
    line_image(width, height, &report.segments, &params.raw_style)
}
