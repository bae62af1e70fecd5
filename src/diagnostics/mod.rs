//! Per-frame diagnostics returned by the lane detector.
//!
//! [`FrameReport`] bundles the lane outcome with a short description of each
//! stage (parameters, pixel counts, timings) and serializes to JSON for the
//! command-line tools.

pub mod frame;
pub mod timing;

pub use frame::{EdgeStage, FrameReport, HoughStage, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
