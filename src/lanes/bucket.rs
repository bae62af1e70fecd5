use super::error::FittingError;
use crate::types::{LaneSide, Segment};
use serde::Serialize;

/// Endpoints of all segments assigned to each lane side.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SlopeBuckets {
    pub left: Vec<[f32; 2]>,
    pub right: Vec<[f32; 2]>,
}

impl SlopeBuckets {
    pub fn points(&self, side: LaneSide) -> &[[f32; 2]] {
        match side {
            LaneSide::Left => &self.left,
            LaneSide::Right => &self.right,
        }
    }

    /// Number of segments in a bucket (two endpoints each).
    pub fn segment_count(&self, side: LaneSide) -> usize {
        self.points(side).len() / 2
    }

    /// Smallest endpoint y over both buckets, i.e. the highest point in the image.
    pub fn min_y(&self) -> Option<f32> {
        self.left
            .iter()
            .chain(self.right.iter())
            .map(|p| p[1])
            .reduce(f32::min)
    }

    fn push(&mut self, side: LaneSide, seg: &Segment) {
        let bucket = match side {
            LaneSide::Left => &mut self.left,
            LaneSide::Right => &mut self.right,
        };
        bucket.push(seg.p0);
        bucket.push(seg.p1);
    }
}

/// Side a slope belongs to. Zero slope goes right.
#[inline]
pub fn side_for_slope(slope: f32) -> LaneSide {
    if slope < 0.0 {
        LaneSide::Left
    } else {
        LaneSide::Right
    }
}

/// Split segments into left/right buckets by slope sign.
///
/// Fails on the first vertical segment rather than producing an infinite slope.
pub fn partition_segments(segments: &[Segment]) -> Result<SlopeBuckets, FittingError> {
    let mut buckets = SlopeBuckets::default();
    for (index, seg) in segments.iter().enumerate() {
        let slope = seg
            .slope()
            .ok_or(FittingError::DegenerateSegment { index, x: seg.p0[0] })?;
        buckets.push(side_for_slope(slope), seg);
    }
    Ok(buckets)
}
