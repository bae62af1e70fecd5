use serde::{Deserialize, Serialize};

/// Parameters of the probabilistic Hough transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f32,
    /// Angular resolution of the accumulator in degrees.
    pub theta_deg: f32,
    /// Minimum number of votes for a line to be walked.
    pub threshold: u32,
    /// Minimum segment extent (along x or y) in pixels.
    pub min_line_length: u32,
    /// Maximum run of missing edge pixels bridged inside one segment.
    pub max_line_gap: u32,
    /// Seed of the pixel visiting order.
    pub seed: u64,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta_deg: 1.0,
            threshold: 20,
            min_line_length: 5,
            max_line_gap: 1,
            seed: 0x5eed,
        }
    }
}

impl HoughOptions {
    pub const MIN_RHO: f32 = 0.5;
    pub const MIN_THETA_DEG: f32 = 0.1;

    /// Clamp resolutions and threshold to usable values.
    pub fn sanitized(mut self) -> Self {
        if !self.rho.is_finite() || self.rho < Self::MIN_RHO {
            self.rho = Self::MIN_RHO;
        }
        if !self.theta_deg.is_finite() || self.theta_deg < Self::MIN_THETA_DEG {
            self.theta_deg = Self::MIN_THETA_DEG;
        }
        self.threshold = self.threshold.max(1);
        self
    }

    pub fn theta_rad(&self) -> f32 {
        self.theta_deg.to_radians()
    }
}
