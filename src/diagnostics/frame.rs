use super::TimingBreakdown;
use crate::edges::EdgeOptions;
use crate::hough::HoughOptions;
use crate::pipeline::LaneReport;
use serde::Serialize;

/// Result of [`LaneDetector::process_with_diagnostics`](crate::LaneDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub input: InputDescriptor,
    pub edges: EdgeStage,
    pub hough: HoughStage,
    pub lanes: LaneReport,
    pub timing: TimingBreakdown,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStage {
    pub options: EdgeOptions,
    /// Non-zero pixels of the Canny output.
    pub edge_pixels: usize,
    /// Edge pixels left after the region-of-interest mask.
    pub masked_edge_pixels: usize,
    pub roi_vertices: Vec<[i32; 2]>,
    pub elapsed_ms: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoughStage {
    pub options: HoughOptions,
    pub segment_count: usize,
    pub elapsed_ms: f64,
}
