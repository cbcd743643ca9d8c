//! Averaging of classified candidates into one line per side, extrapolation
//! to the frame bottom and crossing correction.
use super::classify::{split_by_slope, DEFAULT_SLOPE_THRESHOLD};
use crate::error::{LaneError, NoLaneReason};
use crate::roi::RoiTrapezoid;
use crate::types::{LaneEstimate, LineSegment};
use serde::{Deserialize, Serialize};

/// Where the upper endpoint of an extrapolated lane line is placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointMode {
    /// Both endpoints on the bottom row; only the crossing correction moves
    /// them apart.
    #[default]
    BottomAnchored,
    /// Upper endpoint on the ROI top edge, giving a visible segment.
    RoiSpan,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorParams {
    /// Minimum `|slope|` for a segment to be a lane candidate.
    pub slope_threshold: f64,
    pub endpoint_mode: EndpointMode,
}

impl Default for AggregatorParams {
    fn default() -> Self {
        Self {
            slope_threshold: DEFAULT_SLOPE_THRESHOLD,
            endpoint_mode: EndpointMode::BottomAnchored,
        }
    }
}

impl AggregatorParams {
    pub fn validate(&self) -> Result<(), LaneError> {
        if self.slope_threshold.is_finite() && self.slope_threshold >= 0.0 {
            Ok(())
        } else {
            Err(LaneError::InvalidParams(format!(
                "slope threshold must be finite and non-negative, got {}",
                self.slope_threshold
            )))
        }
    }
}

/// Rows the extrapolation targets for a given frame size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    /// Bottom row coordinate (frame height).
    pub height: f64,
    /// Upper edge of the region of interest.
    pub roi_top: f64,
}

impl FrameGeometry {
    pub fn for_frame(width: usize, height: usize) -> Self {
        let roi = RoiTrapezoid::for_frame(width, height);
        Self {
            height: roi.bottom_y(),
            roi_top: roi.top_y(),
        }
    }
}

/// Averaged line in point-slope form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeanLine {
    pub slope: f64,
    pub anchor: [f64; 2],
}

impl MeanLine {
    /// Mean slope and mean endpoint of `segments`; `None` for an empty set.
    pub fn fit(segments: &[LineSegment]) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        let n = segments.len() as f64;
        let slope = segments.iter().map(LineSegment::slope).sum::<f64>() / n;
        let (sx, sy) = segments.iter().fold((0.0, 0.0), |(sx, sy), s| {
            (sx + s.x1 + s.x2, sy + s.y1 + s.y2)
        });
        Some(Self {
            slope,
            anchor: [sx / (2.0 * n), sy / (2.0 * n)],
        })
    }

    pub fn x_at(&self, y: f64) -> f64 {
        (y - self.anchor[1]) / self.slope + self.anchor[0]
    }

    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * (x - self.anchor[0]) + self.anchor[1]
    }

    fn is_degenerate(&self) -> bool {
        self.slope == 0.0 || !self.slope.is_finite()
    }
}

/// Raw (unsmoothed) result of one aggregation step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aggregation {
    pub estimate: LaneEstimate,
    pub left_line: MeanLine,
    pub right_line: MeanLine,
    pub left_count: usize,
    pub right_count: usize,
    pub crossing_corrected: bool,
}

/// Reduce `segments` to one extrapolated line per side.
///
/// Each side's segment is stored bottom endpoint first: `(x1, y1)` lies on
/// the frame bottom, `(x2, y2)` is the upper endpoint chosen by `mode`.
pub fn aggregate(
    segments: &[LineSegment],
    geometry: FrameGeometry,
    params: &AggregatorParams,
) -> Result<Aggregation, LaneError> {
    let split = split_by_slope(segments, params.slope_threshold);
    let reason = match (split.left.is_empty(), split.right.is_empty()) {
        (true, true) => Some(NoLaneReason::MissingBoth),
        (true, false) => Some(NoLaneReason::MissingLeft),
        (false, true) => Some(NoLaneReason::MissingRight),
        (false, false) => None,
    };
    if let Some(reason) = reason {
        return Err(LaneError::NoLaneDetected(reason));
    }

    let (Some(left), Some(right)) = (MeanLine::fit(&split.left), MeanLine::fit(&split.right))
    else {
        return Err(LaneError::NoLaneDetected(NoLaneReason::MissingBoth));
    };
    if left.is_degenerate() || right.is_degenerate() {
        return Err(LaneError::NoLaneDetected(NoLaneReason::DegenerateSlope));
    }

    let mut l = extrapolate(&left, geometry, params.endpoint_mode);
    let mut r = extrapolate(&right, geometry, params.endpoint_mode);

    let crossing_corrected = l.x1 > r.x1;
    if crossing_corrected {
        let shared = (l.x1 + r.x1) / 2.0;
        l.x1 = shared;
        r.x1 = shared;
        l.y1 = left.y_at(shared);
        r.y1 = right.y_at(shared);
        l.y2 = left.y_at(l.x2);
        r.y2 = right.y_at(r.x2);
    }

    Ok(Aggregation {
        estimate: LaneEstimate { left: l, right: r },
        left_line: left,
        right_line: right,
        left_count: split.left.len(),
        right_count: split.right.len(),
        crossing_corrected,
    })
}

fn extrapolate(line: &MeanLine, geometry: FrameGeometry, mode: EndpointMode) -> LineSegment {
    let bottom_y = geometry.height;
    let top_y = match mode {
        EndpointMode::BottomAnchored => geometry.height,
        EndpointMode::RoiSpan => geometry.roi_top,
    };
    LineSegment::new(line.x_at(bottom_y), bottom_y, line.x_at(top_y), top_y)
}
