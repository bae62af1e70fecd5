//! Grayscale conversion and Gaussian smoothing ahead of edge detection.
use image::{GrayImage, RgbImage};
use imageproc::filter::gaussian_blur_f32;

/// Luma conversion of an RGB frame.
pub fn grayscale(image: &RgbImage) -> GrayImage {
    image::imageops::grayscale(image)
}

/// Round a kernel size up to the next odd value (`4 -> 5`, `5 -> 5`).
#[inline]
pub fn odd_kernel_size(kernel_size: u32) -> u32 {
    kernel_size + (kernel_size + 1) % 2
}

/// Standard deviation implied by a square kernel of side `kernel_size`
/// when no explicit sigma is given: `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
#[inline]
pub fn sigma_for_kernel(kernel_size: u32) -> f32 {
    let k = odd_kernel_size(kernel_size) as f32;
    0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8
}

/// Gaussian blur parameterised by kernel size. Sizes `<= 1` are a no-op.
pub fn gaussian_blur(image: &GrayImage, kernel_size: u32) -> GrayImage {
    if odd_kernel_size(kernel_size) <= 1 {
        return image.clone();
    }
    gaussian_blur_f32(image, sigma_for_kernel(kernel_size))
}
