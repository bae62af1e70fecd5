//! Rendering of segments and blending of the line layer over the frame.
//!
//! Everything here is separate from geometry: the lane stage returns segments
//! and these helpers turn them into pixels on request.
use crate::types::Segment;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub color: [u8; 3],
    pub thickness: u32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            thickness: 4,
        }
    }
}

impl LineStyle {
    /// Style used for raw Hough segments in the tuning tool.
    pub fn raw_segments() -> Self {
        Self {
            color: [255, 0, 0],
            thickness: 10,
        }
    }
}

/// Weights of `initial * alpha + overlay * beta + gamma`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendWeights {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            alpha: 0.8,
            beta: 1.0,
            gamma: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayError {
    SizeMismatch {
        initial: (u32, u32),
        overlay: (u32, u32),
    },
}

impl std::fmt::Display for OverlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayError::SizeMismatch { initial, overlay } => write!(
                f,
                "overlay size {}x{} does not match image size {}x{}",
                overlay.0, overlay.1, initial.0, initial.1
            ),
        }
    }
}

impl std::error::Error for OverlayError {}

/// Draw `segments` onto `canvas` in place.
pub fn draw_segments(canvas: &mut RgbImage, segments: &[Segment], style: &LineStyle) {
    let color = Rgb(style.color);
    for seg in segments {
        draw_thick_segment(canvas, seg, style.thickness, color);
    }
}

/// Clip `seg` to the axis-aligned box `[min, max]` (Liang-Barsky).
///
/// Returns `None` when the segment misses the box entirely.
pub fn clip_segment(seg: &Segment, min: [f32; 2], max: [f32; 2]) -> Option<Segment> {
    let (x0, y0) = (seg.p0[0] as f64, seg.p0[1] as f64);
    let (dx, dy) = (seg.p1[0] as f64 - x0, seg.p1[1] as f64 - y0);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    let bounds = [
        (-dx, x0 - min[0] as f64),
        (dx, max[0] as f64 - x0),
        (-dy, y0 - min[1] as f64),
        (dy, max[1] as f64 - y0),
    ];
    for (p, q) in bounds {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some(Segment::new(
        (x0 + t0 * dx) as f32,
        (y0 + t0 * dy) as f32,
        (x0 + t1 * dx) as f32,
        (y0 + t1 * dy) as f32,
    ))
}

fn draw_thick_segment(canvas: &mut RgbImage, seg: &Segment, thickness: u32, color: Rgb<u8>) {
    // Rasterizers walk the whole line, so far off-canvas endpoints are cut first.
    let margin = thickness.max(1) as f32;
    let max = [
        canvas.width() as f32 - 1.0 + margin,
        canvas.height() as f32 - 1.0 + margin,
    ];
    let Some(clipped) = clip_segment(seg, [-margin, -margin], max) else {
        return;
    };
    let seg = &clipped;
    let start = (seg.p0[0], seg.p0[1]);
    let end = (seg.p1[0], seg.p1[1]);
    let len = seg.length();
    if thickness <= 1 || len < 1.0 {
        draw_line_segment_mut(canvas, start, end, color);
        return;
    }
    let half = thickness as f32 * 0.5;
    let nx = -(seg.p1[1] - seg.p0[1]) / len * half;
    let ny = (seg.p1[0] - seg.p0[0]) / len * half;
    let corner = |x: f32, y: f32| Point::new(x.round() as i32, y.round() as i32);
    let mut quad = vec![
        corner(start.0 + nx, start.1 + ny),
        corner(end.0 + nx, end.1 + ny),
        corner(end.0 - nx, end.1 - ny),
        corner(start.0 - nx, start.1 - ny),
    ];
    quad.dedup();
    if quad.len() < 3 || quad.first() == quad.last() {
        draw_line_segment_mut(canvas, start, end, color);
        return;
    }
    draw_polygon_mut(canvas, &quad, color);
}

/// Black image of the given size with `segments` drawn on it.
pub fn line_image(width: u32, height: u32, segments: &[Segment], style: &LineStyle) -> RgbImage {
    let mut canvas = RgbImage::new(width, height);
    draw_segments(&mut canvas, segments, style);
    canvas
}

/// Per-channel `initial * alpha + overlay * beta + gamma`, saturated to `u8`.
pub fn weighted_blend(
    initial: &RgbImage,
    overlay: &RgbImage,
    weights: &BlendWeights,
) -> Result<RgbImage, OverlayError> {
    if initial.dimensions() != overlay.dimensions() {
        return Err(OverlayError::SizeMismatch {
            initial: initial.dimensions(),
            overlay: overlay.dimensions(),
        });
    }
    let mut out = RgbImage::new(initial.width(), initial.height());
    for ((dst, a), b) in out.pixels_mut().zip(initial.pixels()).zip(overlay.pixels()) {
        for c in 0..3 {
            let v = a[c] as f32 * weights.alpha + b[c] as f32 * weights.beta + weights.gamma;
            dst[c] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thick_line_covers_neighbouring_rows() {
        let seg = Segment::new(5.0, 20.0, 35.0, 20.0);
        let img = line_image(40, 40, &[seg], &LineStyle::default());
        assert_eq!(*img.get_pixel(20, 20), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(20, 21), Rgb([255, 0, 0]));
        assert_eq!(*img.get_pixel(20, 30), Rgb([0, 0, 0]));
    }

    #[test]
    fn zero_length_segment_does_not_panic() {
        let seg = Segment::new(10.0, 10.0, 10.0, 10.0);
        let img = line_image(20, 20, &[seg], &LineStyle::raw_segments());
        assert_eq!(img.dimensions(), (20, 20));
    }

    #[test]
    fn far_off_canvas_endpoints_are_clipped() {
        // Nearly flat fit extrapolated to rows 540 and 330.
        let seg = Segment::new(1_376_256_000.0, 540.0, -688_128_000.0, 330.0);
        let style = LineStyle {
            color: [255, 0, 0],
            thickness: 1,
        };
        let start = std::time::Instant::now();
        let img = line_image(960, 540, &[seg], &style);
        assert!(
            start.elapsed().as_secs_f64() < 1.0,
            "drawing took {:?}",
            start.elapsed()
        );
        let drawn: Vec<(u32, u32)> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] == 255)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!drawn.is_empty(), "visible part of the line was not drawn");
        assert!(drawn.iter().all(|&(_, y)| (398..=402).contains(&y)), "{drawn:?}");
    }

    #[test]
    fn clip_segment_keeps_inside_part() {
        let seg = Segment::new(-10.0, 5.0, 30.0, 5.0);
        let clipped = clip_segment(&seg, [0.0, 0.0], [19.0, 19.0]).unwrap();
        assert_eq!(clipped.p0, [0.0, 5.0]);
        assert_eq!(clipped.p1, [19.0, 5.0]);

        let inside = Segment::new(2.0, 3.0, 4.0, 5.0);
        assert_eq!(clip_segment(&inside, [0.0, 0.0], [19.0, 19.0]), Some(inside));

        let outside = Segment::new(-50.0, -5.0, -10.0, -40.0);
        assert!(clip_segment(&outside, [0.0, 0.0], [19.0, 19.0]).is_none());
        let img = line_image(20, 20, &[outside], &LineStyle::default());
        assert!(img.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn blend_saturates() {
        let base = RgbImage::from_pixel(2, 2, Rgb([200, 100, 0]));
        let over = RgbImage::from_pixel(2, 2, Rgb([100, 0, 255]));
        let out = weighted_blend(&base, &over, &BlendWeights::default()).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgb([255, 80, 255]));
    }

    #[test]
    fn blend_rejects_mismatched_sizes() {
        let base = RgbImage::new(4, 4);
        let over = RgbImage::new(4, 3);
        assert_eq!(
            weighted_blend(&base, &over, &BlendWeights::default()).unwrap_err(),
            OverlayError::SizeMismatch {
                initial: (4, 4),
                overlay: (4, 3)
            }
        );
    }
}
