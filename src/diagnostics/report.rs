use super::timing::TimingBreakdown;
use crate::types::{LaneEstimate, LineSegment};
use serde::Serialize;

/// Per-frame trace returned by
/// [`LaneDetector::process_with_report`](crate::LaneDetector::process_with_report).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub width: usize,
    pub height: usize,
    /// Non-zero pixels of the ROI-masked edge map.
    pub edge_pixels: usize,
    /// Raw Hough output, in detection order.
    pub segments: Vec<LineSegment>,
    pub left_segments: usize,
    pub right_segments: usize,
    pub crossing_corrected: bool,
    pub first_frame: bool,
    pub raw: LaneEstimate,
    pub smoothed: LaneEstimate,
    pub timings: TimingBreakdown,
}
