#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod batch;
pub mod config;
pub mod diagnostics;
pub mod image;
pub mod lanes;
pub mod pipeline;
pub mod types;

// Stage building blocks, usable on their own.
pub mod edges;
pub mod hough;
pub mod overlay;
pub mod roi;

// --- High-level re-exports -------------------------------------------------

pub use crate::lanes::{extrapolate_lanes, ExtrapolatedLine, FittingError, LaneExtrapolator};
pub use crate::pipeline::{LaneDetector, LaneReport, PipelineParams};
pub use crate::types::{LanePair, LaneSide, Segment};

pub use crate::diagnostics::FrameReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use lane_lines::prelude::*;
///
/// let segments = [
///     Segment::from_pixels([200, 500, 300, 400]),
///     Segment::from_pixels([620, 360, 700, 440]),
/// ];
/// let lanes = extrapolate_lanes(&segments, 540).unwrap();
/// assert_eq!(lanes.left.bottom[1], 540.0);
/// assert_eq!(lanes.right.top[1], 330.0);
/// ```
pub mod prelude {
    pub use crate::hough::{HoughOptions, ProbabilisticHough, SegmentDetector};
    pub use crate::lanes::{extrapolate_lanes, ExtrapolationOptions, FittingError};
    pub use crate::{LaneDetector, LanePair, LaneSide, PipelineParams, Segment};
}
