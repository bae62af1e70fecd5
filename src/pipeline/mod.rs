//! Lane pipeline orchestrating one frame end-to-end.
//!
//! - [`params`] – the single configuration structure with named presets.
//! - `detector` – [`LaneDetector`] and rendering helpers.
//!
//! Stages: grayscale → Gaussian blur → Canny → region-of-interest mask →
//! probabilistic Hough → slope bucketing and least-squares extrapolation.
//! Rendering is a separate call on the returned geometry.

mod detector;
pub mod params;

pub use detector::{render, render_raw_segments, FrameOutput, LaneDetector, LaneReport};
pub use params::{FallbackPolicy, PipelineParams};
