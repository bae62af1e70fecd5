//! Edge stage: grayscale conversion, Gaussian smoothing and Canny hysteresis.
//!
//! The heavy lifting is delegated to `imageproc`; this module only fixes the
//! parameterisation used by the lane pipeline (kernel size rather than sigma,
//! thresholds in gradient-magnitude units) and records timings.

pub mod blur;
pub mod canny;

pub use blur::{gaussian_blur, grayscale, odd_kernel_size, sigma_for_kernel};
pub use canny::{canny, detect_edges, EdgeOptions, EdgeResult};
