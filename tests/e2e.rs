mod common;

use approx::assert_abs_diff_eq;
use common::synthetic_frame::{
    filled, is_overlay, left_only_road, shifted_road, two_lane_road, ASPHALT, HEIGHT, WIDTH,
};
use lane_detector::lanes::{AggregatorParams, EndpointMode, FrameGeometry, LaneTracker, SmoothingParams};
use lane_detector::{LaneDetector, LaneError, LaneParams, LineSegment, NoLaneReason};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn span_params() -> LaneParams {
    let mut params = LaneParams::default();
    params.aggregator.endpoint_mode = EndpointMode::RoiSpan;
    params
}

#[test]
fn converging_road_is_detected_and_drawn() {
    init_logger();
    let mut detector = LaneDetector::new(span_params()).unwrap();
    let out = detector
        .process_with_report(&two_lane_road())
        .expect("both markings should be detected");
    let report = &out.report;

    assert!(report.left_segments >= 1, "left={}", report.left_segments);
    assert!(report.right_segments >= 1, "right={}", report.right_segments);
    assert!(report.first_frame);
    assert!(!report.crossing_corrected);
    assert_eq!(report.smoothed, report.raw);

    assert_abs_diff_eq!(report.raw.left.x1, 130.0, epsilon = 6.0);
    assert_abs_diff_eq!(report.raw.right.x1, 510.0, epsilon = 6.0);
    assert_eq!(report.raw.left.y1, 480.0);
    assert_eq!(report.raw.left.y2, 288.0);

    // Overlay follows the markings (left at x = 210, right at x = 430 on row 400).
    assert!((200..=220).any(|x| is_overlay(&out.annotated, x, 400)));
    assert!((420..=440).any(|x| is_overlay(&out.annotated, x, 400)));
    // Everything else is the dimmed original.
    assert_eq!(out.annotated.pixel(320, 100), &[48, 48, 48]);

    assert!(report.timings.stage_ms("hough").is_some());
    assert!(report.timings.total_ms >= 0.0);
}

#[test]
fn bottom_anchored_lines_mark_the_bottom_row() {
    init_logger();
    let mut detector = LaneDetector::new(LaneParams::default()).unwrap();
    let out = detector.process_with_report(&two_lane_road()).unwrap();
    let est = out.report.smoothed;
    assert_eq!((est.left.y1, est.left.y2), (480.0, 480.0));
    assert!((120..=140).any(|x| is_overlay(&out.annotated, x, HEIGHT - 1)));
    assert!((500..=520).any(|x| is_overlay(&out.annotated, x, HEIGHT - 1)));
    assert!(!is_overlay(&out.annotated, 210, 400));
}

#[test]
fn crossing_segments_terminate_on_the_bottom_row() {
    let segments = [
        LineSegment::new(200.0, 300.0, 210.0, 480.0),
        LineSegment::new(440.0, 300.0, 430.0, 480.0),
    ];
    let mut tracker =
        LaneTracker::new(AggregatorParams::default(), SmoothingParams::default()).unwrap();
    let update = tracker
        .update(&segments, FrameGeometry::for_frame(WIDTH, HEIGHT))
        .unwrap();
    let est = update.smoothed;

    assert!(update.crossing_corrected);
    assert_eq!(est.left.x1, est.right.x1);
    assert_abs_diff_eq!(est.left.y2, 480.0, epsilon = 1e-9);
    assert_abs_diff_eq!(est.right.y2, 480.0, epsilon = 1e-9);

    let detector = LaneDetector::new(LaneParams::default()).unwrap();
    let annotated = detector
        .render(&filled(WIDTH, HEIGHT, ASPHALT), &est)
        .unwrap();
    let lx = est.left.x2.round() as usize;
    let rx = est.right.x2.round() as usize;
    assert!(is_overlay(&annotated, lx, HEIGHT - 1));
    assert!(is_overlay(&annotated, rx, HEIGHT - 1));
    assert!(!is_overlay(&annotated, lx, HEIGHT - 10));
}

#[test]
fn batch_matches_sequential_processing() {
    init_logger();
    let frames = vec![
        two_lane_road(),
        shifted_road(12.0),
        left_only_road(),
        shifted_road(-8.0),
    ];

    let mut batch = LaneDetector::new(LaneParams::default()).unwrap();
    let batched = batch.process_batch(&frames);

    let mut sequential = LaneDetector::new(LaneParams::default()).unwrap();
    assert_eq!(batched.len(), frames.len());
    for (frame, result) in frames.iter().zip(&batched) {
        let expected = sequential.process_with_report(frame);
        match (result, expected) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.annotated, b.annotated);
                assert_eq!(a.report.smoothed, b.report.smoothed);
            }
            (Err(a), Err(b)) => assert_eq!(a, &b),
            (a, b) => panic!("batch and sequential disagree: {:?} vs {:?}", a.is_ok(), b.is_ok()),
        }
    }
    assert_eq!(
        batched[2].as_ref().err(),
        Some(&LaneError::NoLaneDetected(NoLaneReason::MissingRight))
    );
    assert_eq!(batch.last_estimate(), sequential.last_estimate());
}
