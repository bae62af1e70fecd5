use crate::edges::EdgeOptions;
use crate::hough::HoughOptions;
use crate::lanes::ExtrapolationOptions;
use crate::overlay::{BlendWeights, LineStyle};
use crate::roi::RegionOfInterest;
use serde::{Deserialize, Serialize};

/// What to report when a frame's lanes cannot be fitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Report no lanes for the frame.
    #[default]
    Skip,
    /// Reuse the most recent successfully fitted lanes, if any.
    HoldLast,
}

/// Every tunable of the lane pipeline in one place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub edge: EdgeOptions,
    pub roi: RegionOfInterest,
    pub hough: HoughOptions,
    pub extrapolation: ExtrapolationOptions,
    pub fallback: FallbackPolicy,
    /// Style of the extrapolated lane lines.
    pub lane_style: LineStyle,
    /// Style of raw Hough segments in debug renders.
    pub raw_style: LineStyle,
    pub blend: BlendWeights,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self::still_images()
    }
}

impl PipelineParams {
    /// Values tuned for the 960x540 still test images.
    pub fn still_images() -> Self {
        Self {
            edge: EdgeOptions::default(),
            roi: RegionOfInterest::default(),
            hough: HoughOptions::default(),
            extrapolation: ExtrapolationOptions::default(),
            fallback: FallbackPolicy::Skip,
            lane_style: LineStyle::default(),
            raw_style: LineStyle::raw_segments(),
            blend: BlendWeights::default(),
        }
    }

    /// Starting point of the tuning tool: no smoothing, zero thresholds,
    /// minimal Hough constraints and an image-relative triangle mask.
    pub fn tuning() -> Self {
        Self {
            edge: EdgeOptions {
                kernel_size: 1,
                low_threshold: 0.0,
                high_threshold: 0.0,
            },
            roi: RegionOfInterest::relative_triangle(),
            hough: HoughOptions {
                rho: 1.0,
                theta_deg: 1.0,
                threshold: 1,
                min_line_length: 1,
                max_line_gap: 1,
                ..HoughOptions::default()
            },
            ..Self::still_images()
        }
    }
}
