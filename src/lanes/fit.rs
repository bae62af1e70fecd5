//! Ordinary least-squares line fit over a bucket's endpoints.
use super::error::FittingError;
use crate::types::LaneSide;
use nalgebra::{Matrix2, Vector2};
use serde::Serialize;

/// Slopes with a smaller magnitude are treated as horizontal.
pub const MIN_SLOPE: f64 = 1e-9;

/// Fitted lane line `y = slope * x + intercept` in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LaneFit {
    pub slope: f64,
    pub intercept: f64,
    /// Number of points the fit was computed from.
    pub support: usize,
}

impl LaneFit {
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn x_at(&self, y: f64) -> f64 {
        (y - self.intercept) / self.slope
    }
}

/// Fit `y = a x + b` minimising squared vertical deviation.
///
/// Solves the 2x2 normal equations. Fails when `points` is empty, when all
/// points share one x-coordinate, or when the fitted slope is (numerically) zero.
pub fn fit_lane(points: &[[f32; 2]], side: LaneSide) -> Result<LaneFit, FittingError> {
    if points.is_empty() {
        return Err(FittingError::EmptyBucket { side });
    }

    let mut sx = 0.0f64;
    let mut sy = 0.0f64;
    let mut sxx = 0.0f64;
    let mut sxy = 0.0f64;
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    for p in points {
        let x = p[0] as f64;
        let y = p[1] as f64;
        sx += x;
        sy += y;
        sxx += x * x;
        sxy += x * y;
        x_min = x_min.min(x);
        x_max = x_max.max(x);
    }
    if x_max - x_min <= 0.0 {
        return Err(FittingError::DegenerateFit {
            side,
            slope: f64::INFINITY,
        });
    }

    let n = points.len() as f64;
    let normal = Matrix2::new(sxx, sx, sx, n);
    let rhs = Vector2::new(sxy, sy);
    let solution = normal.lu().solve(&rhs).ok_or(FittingError::DegenerateFit {
        side,
        slope: f64::NAN,
    })?;
    let (slope, intercept) = (solution[0], solution[1]);

    if !slope.is_finite() || slope.abs() < MIN_SLOPE {
        return Err(FittingError::DegenerateFit { side, slope });
    }

    Ok(LaneFit {
        slope,
        intercept,
        support: points.len(),
    })
}
