use super::*;
use crate::types::{LaneSide, Segment};

const TOL: f64 = 1e-6;

fn road_segments() -> Vec<Segment> {
    // Left lane along y = -x + 700, right lane along y = x - 260 (960x540 frame).
    vec![
        Segment::new(200.0, 500.0, 300.0, 400.0),
        Segment::new(330.0, 370.0, 380.0, 320.0),
        Segment::new(620.0, 360.0, 700.0, 440.0),
        Segment::new(720.0, 460.0, 790.0, 530.0),
    ]
}

#[test]
fn negative_slopes_all_go_left() {
    let segs = vec![
        Segment::new(0.0, 10.0, 10.0, 0.0),
        Segment::new(5.0, 100.0, 50.0, 20.0),
        Segment::new(-3.0, 4.0, 1.0, -2.0),
    ];
    let buckets = partition_segments(&segs).expect("no vertical segments");
    assert_eq!(buckets.segment_count(LaneSide::Left), 3);
    assert!(buckets.right.is_empty());
}

#[test]
fn non_negative_slopes_all_go_right() {
    let segs = vec![
        Segment::new(0.0, 0.0, 10.0, 10.0),
        Segment::new(0.0, 5.0, 10.0, 5.0),
        Segment::new(10.0, 1.0, 0.0, 0.0),
    ];
    let buckets = partition_segments(&segs).expect("no vertical segments");
    assert_eq!(buckets.segment_count(LaneSide::Right), 3);
    assert!(buckets.left.is_empty());
}

#[test]
fn zero_slope_is_assigned_right() {
    assert_eq!(side_for_slope(0.0), LaneSide::Right);
    assert_eq!(side_for_slope(-0.0), LaneSide::Right);
    assert_eq!(side_for_slope(-1e-6), LaneSide::Left);
}

#[test]
fn exact_line_fit_recovers_slope_and_intercept() {
    let segs = vec![
        Segment::new(0.0, 3.0, 1.0, 5.0),
        Segment::new(4.0, 11.0, 10.0, 23.0),
    ];
    let buckets = partition_segments(&segs).unwrap();
    let fit = fit_lane(buckets.points(LaneSide::Right), LaneSide::Right).unwrap();
    assert!((fit.slope - 2.0).abs() < TOL, "slope={}", fit.slope);
    assert!((fit.intercept - 3.0).abs() < TOL, "intercept={}", fit.intercept);
    assert_eq!(fit.support, 4);
}

#[test]
fn extrapolation_rows_for_540_high_frame() {
    let buckets = partition_segments(&road_segments()).unwrap();
    let (bottom, top) =
        extrapolation_rows(540, &ExtrapolationOptions::default(), &buckets).unwrap();
    assert_eq!(bottom, 540.0);
    assert_eq!(top, 330.0);
}

#[test]
fn odd_height_uses_integer_half() {
    let buckets = partition_segments(&road_segments()).unwrap();
    let (bottom, top) =
        extrapolation_rows(541, &ExtrapolationOptions::default(), &buckets).unwrap();
    assert_eq!(bottom, 541.0);
    assert_eq!(top, 330.0);
}

#[test]
fn highest_segment_anchor_uses_smallest_y() {
    let buckets = partition_segments(&road_segments()).unwrap();
    let options = ExtrapolationOptions {
        top: TopAnchor::HighestSegment,
    };
    let (_, top) = extrapolation_rows(540, &options, &buckets).unwrap();
    assert_eq!(top, 320.0);
}

#[test]
fn lone_vertical_segment_is_degenerate() {
    let segs = vec![Segment::new(100.0, 500.0, 100.0, 300.0)];
    let err = partition_segments(&segs).unwrap_err();
    assert_eq!(err, FittingError::DegenerateSegment { index: 0, x: 100.0 });
    assert!(matches!(
        extrapolate_lanes(&segs, 540),
        Err(FittingError::DegenerateSegment { .. })
    ));
}

#[test]
fn vertical_segment_index_is_reported() {
    let mut segs = road_segments();
    segs.insert(2, Segment::new(480.0, 300.0, 480.0, 340.0));
    let err = extrapolate_lanes(&segs, 540).unwrap_err();
    assert_eq!(err, FittingError::DegenerateSegment { index: 2, x: 480.0 });
    assert_eq!(err.side(), None);
}

#[test]
fn empty_right_bucket_fails_right_side_only() {
    let segs = vec![
        Segment::new(200.0, 500.0, 300.0, 400.0),
        Segment::new(330.0, 370.0, 380.0, 320.0),
    ];
    let extrapolator = LaneExtrapolator::default();
    let buckets = partition_segments(&segs).unwrap();
    assert!(extrapolator
        .extrapolate_side(&buckets, LaneSide::Left, 540)
        .is_ok());
    assert_eq!(
        extrapolator
            .extrapolate_side(&buckets, LaneSide::Right, 540)
            .unwrap_err(),
        FittingError::EmptyBucket {
            side: LaneSide::Right
        }
    );

    let each = extrapolator.extrapolate_each(&segs, 540).unwrap();
    assert!(each.left.is_ok());
    assert!(each.right.is_err());
    assert_eq!(
        extrapolator.extrapolate(&segs, 540).unwrap_err(),
        FittingError::EmptyBucket {
            side: LaneSide::Right
        }
    );
}

#[test]
fn horizontal_fit_is_degenerate() {
    // Two flat segments at the same height: right bucket, slope 0.
    let points = [[10.0, 200.0], [50.0, 200.0], [60.0, 200.0], [90.0, 200.0]];
    let err = fit_lane(&points, LaneSide::Right).unwrap_err();
    assert!(
        matches!(err, FittingError::DegenerateFit { side: LaneSide::Right, slope } if slope.abs() < MIN_SLOPE),
        "unexpected error {err:?}"
    );
}

#[test]
fn points_sharing_one_x_are_degenerate() {
    let points = [[10.0, 200.0], [10.0, 300.0]];
    assert!(matches!(
        fit_lane(&points, LaneSide::Left),
        Err(FittingError::DegenerateFit { .. })
    ));
}

#[test]
fn extrapolated_lanes_follow_the_fitted_lines() {
    let lanes = extrapolate_lanes(&road_segments(), 540).expect("both lanes present");
    // Left: y = -x + 700 -> x = 700 - y.
    assert!((lanes.left.bottom[0] - 160.0).abs() < 1e-3);
    assert!((lanes.left.top[0] - 370.0).abs() < 1e-3);
    // Right: y = x - 260 -> x = y + 260.
    assert!((lanes.right.bottom[0] - 800.0).abs() < 1e-3);
    assert!((lanes.right.top[0] - 590.0).abs() < 1e-3);
}

#[test]
fn pixel_segment_truncates_toward_zero() {
    let line = ExtrapolatedLine {
        side: LaneSide::Left,
        bottom: [159.97, 540.0],
        top: [-0.6, 330.0],
        fit: LaneFit {
            slope: -1.0,
            intercept: 700.0,
            support: 2,
        },
    };
    assert_eq!(line.to_pixel_segment(), [159, 540, 0, 330]);
}

#[test]
fn extrapolated_segment_reproduces_fitted_slope() {
    let segs = vec![
        Segment::new(210.0, 520.0, 290.0, 430.0),
        Segment::new(300.0, 410.0, 360.0, 345.0),
        Segment::new(600.0, 350.0, 690.0, 428.0),
        Segment::new(700.0, 445.0, 800.0, 537.0),
    ];
    let lanes = extrapolate_lanes(&segs, 540).unwrap();
    for (side, line) in lanes.iter() {
        let reslope = line.to_segment().slope().expect("not vertical") as f64;
        let rel = (reslope - line.fit.slope).abs() / line.fit.slope.abs();
        assert!(
            rel < 1e-4,
            "{side}: refit slope {reslope} vs fitted {}",
            line.fit.slope
        );
    }
}

#[test]
fn error_messages_name_the_side() {
    let err = FittingError::EmptyBucket {
        side: LaneSide::Left,
    };
    assert_eq!(err.to_string(), "no segments assigned to the left lane");
}

#[test]
fn zero_height_is_rejected() {
    let segs = vec![
        Segment::new(200.0, 500.0, 300.0, 400.0),
        Segment::new(620.0, 360.0, 700.0, 440.0),
    ];
    let err = extrapolate_lanes(&segs, 0).unwrap_err();
    assert_eq!(err, FittingError::InvalidHeight { height: 0 });
    assert_eq!(err.side(), None);
    assert_eq!(err.to_string(), "image height must be positive, got 0");

    let extrapolator = LaneExtrapolator::default();
    assert_eq!(
        extrapolator.extrapolate_each(&segs, 0).unwrap_err(),
        FittingError::InvalidHeight { height: 0 }
    );
    let buckets = partition_segments(&segs).unwrap();
    assert!(extrapolation_rows(0, extrapolator.options(), &buckets).is_err());
    // Height checks come before bucketing, so an empty input still reports it.
    assert_eq!(
        extrapolate_lanes(&[], 0).unwrap_err(),
        FittingError::InvalidHeight { height: 0 }
    );
}
