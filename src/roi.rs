//! Region-of-interest masking for the edge map.
//!
//! Only the road area in front of the camera is kept; everything outside a
//! polygon (a triangle by default) is set to zero before line detection.
use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// Polygon bounding the road area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RegionOfInterest {
    /// Fixed vertices in pixel coordinates.
    Polygon { vertices: Vec<[i32; 2]> },
    /// Triangle derived from the image size: bottom-left at `left_inset`,
    /// bottom-right at `width - right_inset`, apex at the horizontal centre
    /// `apex_offset` pixels below mid-height.
    Triangle {
        left_inset: i32,
        right_inset: i32,
        apex_offset: i32,
    },
}

impl Default for RegionOfInterest {
    fn default() -> Self {
        RegionOfInterest::Polygon {
            vertices: vec![[100, 540], [480, 290], [910, 540]],
        }
    }
}

impl RegionOfInterest {
    /// Triangle used by the tuning tool.
    pub fn relative_triangle() -> Self {
        RegionOfInterest::Triangle {
            left_inset: 100,
            right_inset: 50,
            apex_offset: 20,
        }
    }

    pub fn vertices(&self, width: u32, height: u32) -> Vec<[i32; 2]> {
        match self {
            RegionOfInterest::Polygon { vertices } => vertices.clone(),
            RegionOfInterest::Triangle {
                left_inset,
                right_inset,
                apex_offset,
            } => {
                let (w, h) = (width as i32, height as i32);
                vec![
                    [*left_inset, h],
                    [w / 2, h / 2 + apex_offset],
                    [w - right_inset, h],
                ]
            }
        }
    }
}

/// Binary mask (255 inside) of the polygon given by `vertices`.
///
/// Fewer than three distinct vertices yields an all-zero mask.
pub fn polygon_mask(width: u32, height: u32, vertices: &[[i32; 2]]) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    let mut poly: Vec<Point<i32>> = vertices.iter().map(|v| Point::new(v[0], v[1])).collect();
    poly.dedup();
    if poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    if poly.len() < 3 {
        return mask;
    }
    draw_polygon_mut(&mut mask, &poly, Luma([255u8]));
    mask
}

/// Keep `image` only where `mask` is non-zero (bitwise AND).
pub fn apply_mask(image: &GrayImage, mask: &GrayImage) -> GrayImage {
    debug_assert_eq!(image.dimensions(), mask.dimensions());
    let mut out = image.clone();
    for (px, m) in out.pixels_mut().zip(mask.pixels()) {
        px[0] &= m[0];
    }
    out
}

pub fn region_of_interest(image: &GrayImage, roi: &RegionOfInterest) -> GrayImage {
    let (w, h) = image.dimensions();
    let mask = polygon_mask(w, h, &roi.vertices(w, h));
    apply_mask(image, &mask)
}
