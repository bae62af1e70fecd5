//! Lane-line extrapolation from raw line segments.
//!
//! Segments coming out of the Hough stage are split by slope sign into a left
//! bucket (negative slope, since image y grows downward) and a right bucket
//! (zero or positive slope). Each bucket's endpoints are fitted with an
//! ordinary least-squares line, which is then evaluated at two rows: the
//! bottom of the image and a row above mid-height. The result is one segment
//! per side spanning the visible lane.
//!
//! Failures are explicit [`FittingError`]s: an empty bucket, a vertical input
//! segment, or a horizontal fit. Deciding what to do with a failed frame is
//! left to the caller (see [`crate::pipeline::FallbackPolicy`]).

mod bucket;
mod error;
mod extrapolate;
mod fit;

pub use bucket::{partition_segments, side_for_slope, SlopeBuckets};
pub use error::FittingError;
pub use extrapolate::{
    extrapolation_rows, ExtrapolatedLine, ExtrapolationOptions, LaneExtrapolator, TopAnchor,
};
pub use fit::{fit_lane, LaneFit, MIN_SLOPE};

use crate::types::{LanePair, Segment};

/// Extrapolate both lanes with default options.
pub fn extrapolate_lanes(
    segments: &[Segment],
    height: u32,
) -> Result<LanePair<ExtrapolatedLine>, FittingError> {
    LaneExtrapolator::default().extrapolate(segments, height)
}

#[cfg(test)]
mod tests;
