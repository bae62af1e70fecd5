use super::*;
use image::Luma;
use imageproc::drawing::draw_line_segment_mut;

fn options() -> HoughOptions {
    HoughOptions {
        threshold: 10,
        min_line_length: 20,
        max_line_gap: 2,
        ..HoughOptions::default()
    }
}

fn longest(segments: &[Segment]) -> Segment {
    *segments
        .iter()
        .max_by(|a, b| a.length().partial_cmp(&b.length()).unwrap())
        .expect("at least one segment")
}

fn near(p: [f32; 2], q: [f32; 2], tol: f32) -> bool {
    (p[0] - q[0]).abs() <= tol && (p[1] - q[1]).abs() <= tol
}

#[test]
fn empty_edge_map_yields_nothing() {
    let edges = GrayImage::new(64, 48);
    assert!(hough_segments(&edges, options()).segments.is_empty());
}

#[test]
fn diagonal_line_is_recovered() {
    let mut edges = GrayImage::new(80, 80);
    draw_line_segment_mut(&mut edges, (10.0, 10.0), (60.0, 60.0), Luma([255]));
    let segments = hough_segments(
        &edges,
        HoughOptions {
            threshold: 30,
            ..options()
        },
    )
    .segments;
    assert!(!segments.is_empty(), "expected a segment on the diagonal");
    let seg = longest(&segments);
    assert!(seg.length() >= 45.0, "segment too short: {seg:?}");
    let ends = [[10.0, 10.0], [60.0, 60.0]];
    assert!(
        (near(seg.p0, ends[0], 2.0) && near(seg.p1, ends[1], 2.0))
            || (near(seg.p0, ends[1], 2.0) && near(seg.p1, ends[0], 2.0)),
        "unexpected endpoints {seg:?}"
    );
}

#[test]
fn short_lines_are_rejected() {
    let mut edges = GrayImage::new(64, 64);
    draw_line_segment_mut(&mut edges, (5.0, 30.0), (16.0, 30.0), Luma([255]));
    let segments = hough_segments(
        &edges,
        HoughOptions {
            threshold: 5,
            ..options()
        },
    )
    .segments;
    assert!(segments.is_empty(), "12px line kept: {segments:?}");
}

#[test]
fn gaps_split_or_bridge_depending_on_budget() {
    let mut edges = GrayImage::new(100, 30);
    draw_line_segment_mut(&mut edges, (10.0, 10.0), (40.0, 10.0), Luma([255]));
    draw_line_segment_mut(&mut edges, (44.0, 10.0), (74.0, 10.0), Luma([255]));

    let base = HoughOptions {
        threshold: 25,
        ..options()
    };
    let split = hough_segments(&edges, base).segments;
    assert_eq!(split.len(), 2, "gap of 3 should split: {split:?}");

    let bridged = hough_segments(
        &edges,
        HoughOptions {
            max_line_gap: 5,
            ..base
        },
    )
    .segments;
    assert_eq!(bridged.len(), 1, "gap of 3 should be bridged: {bridged:?}");
    assert!(longest(&bridged).length() >= 60.0);
}

#[test]
fn fixed_seed_is_deterministic() {
    let mut edges = GrayImage::new(120, 90);
    draw_line_segment_mut(&mut edges, (5.0, 85.0), (55.0, 40.0), Luma([255]));
    draw_line_segment_mut(&mut edges, (65.0, 40.0), (115.0, 85.0), Luma([255]));
    let detector = ProbabilisticHough::new(options());
    assert_eq!(detector.detect(&edges), detector.detect(&edges));
}

#[test]
fn degenerate_resolutions_are_clamped() {
    let opts = HoughOptions {
        rho: 0.0,
        theta_deg: -1.0,
        threshold: 0,
        ..HoughOptions::default()
    }
    .sanitized();
    assert_eq!(opts.rho, HoughOptions::MIN_RHO);
    assert_eq!(opts.theta_deg, HoughOptions::MIN_THETA_DEG);
    assert_eq!(opts.threshold, 1);
}
