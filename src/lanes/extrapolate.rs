use super::bucket::{partition_segments, SlopeBuckets};
use super::error::FittingError;
use super::fit::{fit_lane, LaneFit};
use crate::types::{LanePair, LaneSide, Segment};
use serde::{Deserialize, Serialize};

/// Where the upper end of each extrapolated lane is placed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum TopAnchor {
    /// `height / 2 + offset_px` (integer division).
    MidOffset { offset_px: i32 },
    /// Highest endpoint (smallest y) over all bucketed segments.
    HighestSegment,
}

impl Default for TopAnchor {
    fn default() -> Self {
        TopAnchor::MidOffset { offset_px: 60 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrapolationOptions {
    pub top: TopAnchor,
}

/// Lane boundary spanning the two extrapolation rows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExtrapolatedLine {
    pub side: LaneSide,
    /// Endpoint on the bottom row of the image.
    pub bottom: [f32; 2],
    /// Endpoint on the upper extrapolation row.
    pub top: [f32; 2],
    pub fit: LaneFit,
}

impl ExtrapolatedLine {
    pub fn to_segment(&self) -> Segment {
        Segment::new(self.bottom[0], self.bottom[1], self.top[0], self.top[1])
    }

    /// Endpoints truncated toward zero, ready for rasterization.
    pub fn to_pixel_segment(&self) -> [i32; 4] {
        [
            self.bottom[0] as i32,
            self.bottom[1] as i32,
            self.top[0] as i32,
            self.top[1] as i32,
        ]
    }
}

/// Rows `(y_bottom, y_top)` at which lanes are evaluated.
pub fn extrapolation_rows(
    height: u32,
    options: &ExtrapolationOptions,
    buckets: &SlopeBuckets,
) -> Result<(f64, f64), FittingError> {
    check_height(height)?;
    let y_bottom = height as f64;
    let y_top = match options.top {
        TopAnchor::MidOffset { offset_px } => (height / 2) as f64 + offset_px as f64,
        TopAnchor::HighestSegment => {
            let min_y = buckets.min_y().ok_or(FittingError::EmptyBucket {
                side: LaneSide::Left,
            })?;
            min_y as f64
        }
    };
    Ok((y_bottom, y_top))
}

fn check_height(height: u32) -> Result<(), FittingError> {
    if height == 0 {
        return Err(FittingError::InvalidHeight { height });
    }
    Ok(())
}

/// Turns detected segments into one extrapolated line per lane side.
#[derive(Clone, Debug, Default)]
pub struct LaneExtrapolator {
    options: ExtrapolationOptions,
}

impl LaneExtrapolator {
    pub fn new(options: ExtrapolationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtrapolationOptions {
        &self.options
    }

    /// Fit and extrapolate a single side from already partitioned buckets.
    pub fn extrapolate_side(
        &self,
        buckets: &SlopeBuckets,
        side: LaneSide,
        height: u32,
    ) -> Result<ExtrapolatedLine, FittingError> {
        let fit = fit_lane(buckets.points(side), side)?;
        let (y_bottom, y_top) = extrapolation_rows(height, &self.options, buckets)?;
        Ok(ExtrapolatedLine {
            side,
            bottom: [fit.x_at(y_bottom) as f32, y_bottom as f32],
            top: [fit.x_at(y_top) as f32, y_top as f32],
            fit,
        })
    }

    /// Extrapolate both lanes; the first failure (left before right) is returned.
    pub fn extrapolate(
        &self,
        segments: &[Segment],
        height: u32,
    ) -> Result<LanePair<ExtrapolatedLine>, FittingError> {
        check_height(height)?;
        let buckets = partition_segments(segments)?;
        let left = self.extrapolate_side(&buckets, LaneSide::Left, height)?;
        let right = self.extrapolate_side(&buckets, LaneSide::Right, height)?;
        Ok(LanePair { left, right })
    }

    /// Extrapolate each lane independently so one failing side does not hide
    /// the other. Partitioning errors still fail the whole call.
    pub fn extrapolate_each(
        &self,
        segments: &[Segment],
        height: u32,
    ) -> Result<LanePair<Result<ExtrapolatedLine, FittingError>>, FittingError> {
        check_height(height)?;
        let buckets = partition_segments(segments)?;
        Ok(LanePair {
            left: self.extrapolate_side(&buckets, LaneSide::Left, height),
            right: self.extrapolate_side(&buckets, LaneSide::Right, height),
        })
    }
}
