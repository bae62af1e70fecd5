use image::{Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

pub const WIDTH: u32 = 960;
pub const HEIGHT: u32 = 540;

/// Left lane centre line: y = -0.7 x + 645 (x=150 at the bottom, x=450 at y=330).
pub const LEFT_BOTTOM_X: f32 = 150.0;
pub const LEFT_TOP_X: f32 = 450.0;
/// Right lane centre line: y = 0.7 x - 34 (x=820 at the bottom, x=520 at y=330).
pub const RIGHT_BOTTOM_X: f32 = 820.0;
pub const RIGHT_TOP_X: f32 = 520.0;

fn thick_line(img: &mut RgbImage, p0: (f32, f32), p1: (f32, f32), thickness: f32, color: Rgb<u8>) {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let len = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = (-dy / len * thickness * 0.5, dx / len * thickness * 0.5);
    let pt = |x: f32, y: f32| Point::new(x.round() as i32, y.round() as i32);
    let quad = [
        pt(p0.0 + nx, p0.1 + ny),
        pt(p1.0 + nx, p1.1 + ny),
        pt(p1.0 - nx, p1.1 - ny),
        pt(p0.0 - nx, p0.1 - ny),
    ];
    draw_polygon_mut(img, &quad, color);
}

/// Dark road with two bright lane markings converging toward the horizon.
///
/// Markings run past the bottom edge and past the region-of-interest apex so
/// their end caps never produce edges inside the mask.
pub fn road_frame() -> RgbImage {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([60, 60, 60]));
    // Left: y = -0.7 x + 645, from y=560 (x≈121.4) to y=250 (x≈564.3).
    thick_line(
        &mut img,
        (121.4, 560.0),
        (564.3, 250.0),
        10.0,
        Rgb([235, 235, 235]),
    );
    // Right: y = 0.7 x - 34, from y=560 (x=848.6) to y=250 (x≈405.7).
    thick_line(
        &mut img,
        (848.6, 560.0),
        (405.7, 250.0),
        10.0,
        Rgb([230, 200, 40]),
    );
    img
}

/// Road with only the left marking.
pub fn left_only_frame() -> RgbImage {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([60, 60, 60]));
    thick_line(
        &mut img,
        (121.4, 560.0),
        (564.3, 250.0),
        10.0,
        Rgb([235, 235, 235]),
    );
    img
}

/// Featureless frame: no edges at all.
pub fn blank_frame() -> RgbImage {
    RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([60, 60, 60]))
}
