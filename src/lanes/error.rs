use crate::types::LaneSide;
use serde::Serialize;

/// Reasons why a lane line cannot be fitted or extrapolated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FittingError {
    /// No segment was assigned to `side`; regression needs at least one.
    EmptyBucket { side: LaneSide },
    /// Segment `index` is vertical (`x1 == x2`), so its slope is undefined.
    DegenerateSegment { index: usize, x: f32 },
    /// The fitted line for `side` is horizontal (or its points share one
    /// x-coordinate), so x cannot be recovered from y.
    DegenerateFit { side: LaneSide, slope: f64 },
    /// The output image has zero rows, so there is nothing to extrapolate to.
    InvalidHeight { height: u32 },
}

impl FittingError {
    /// Lane side the error is attributed to, if any.
    pub fn side(&self) -> Option<LaneSide> {
        match self {
            FittingError::EmptyBucket { side } | FittingError::DegenerateFit { side, .. } => {
                Some(*side)
            }
            FittingError::DegenerateSegment { .. } | FittingError::InvalidHeight { .. } => None,
        }
    }
}

impl std::fmt::Display for FittingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FittingError::EmptyBucket { side } => {
                write!(f, "no segments assigned to the {side} lane")
            }
            FittingError::DegenerateSegment { index, x } => {
                write!(f, "segment #{index} is vertical at x={x}")
            }
            FittingError::DegenerateFit { side, slope } => write!(
                f,
                "fitted {side} lane cannot be inverted (slope={slope})"
            ),
            FittingError::InvalidHeight { height } => {
                write!(f, "image height must be positive, got {height}")
            }
        }
    }
}

impl std::error::Error for FittingError {}
