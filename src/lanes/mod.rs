//! Lane aggregation and temporal smoothing.
//!
//! Raw Hough segments are split by slope sign into left and right
//! candidates, averaged into one line per side, extrapolated to the bottom
//! row and, when the two lines cross inside the frame, pulled to a shared
//! bottom x. The result is blended with the previous frame's estimate by an
//! exponential filter.
//!
//! [`LaneTracker`] holds the only state that survives between frames. A
//! frame that fails aggregation leaves that state exactly as it was.

pub mod aggregate;
pub mod classify;
pub mod smoothing;

pub use aggregate::{aggregate, AggregatorParams, Aggregation, EndpointMode, FrameGeometry, MeanLine};
pub use classify::{classify, split_by_slope, Classified, Side, DEFAULT_SLOPE_THRESHOLD};
pub use smoothing::{SmoothingParams, SmoothingState};

use crate::error::LaneError;
use crate::types::{LaneEstimate, LineSegment};
use log::debug;

/// Outcome of a successful tracker update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneUpdate {
    pub raw: LaneEstimate,
    pub smoothed: LaneEstimate,
    pub left_count: usize,
    pub right_count: usize,
    pub crossing_corrected: bool,
}

/// Aggregator plus smoothing filter for one stream of frames.
#[derive(Clone, Debug)]
pub struct LaneTracker {
    aggregator: AggregatorParams,
    smoothing: SmoothingParams,
    state: SmoothingState,
}

impl LaneTracker {
    pub fn new(aggregator: AggregatorParams, smoothing: SmoothingParams) -> Result<Self, LaneError> {
        aggregator.validate()?;
        smoothing.validate()?;
        Ok(Self {
            aggregator,
            smoothing,
            state: SmoothingState::new(),
        })
    }

    /// Aggregate `segments` and fold the result into the smoothing state.
    pub fn update(
        &mut self,
        segments: &[LineSegment],
        geometry: FrameGeometry,
    ) -> Result<LaneUpdate, LaneError> {
        let agg = aggregate(segments, geometry, &self.aggregator)?;
        let first = self.state.is_first_frame();
        let smoothed = self.state.update(&agg.estimate, self.smoothing.alpha);
        debug!(
            "lanes: left={} right={} crossing={} first_frame={}",
            agg.left_count, agg.right_count, agg.crossing_corrected, first
        );
        Ok(LaneUpdate {
            raw: agg.estimate,
            smoothed,
            left_count: agg.left_count,
            right_count: agg.right_count,
            crossing_corrected: agg.crossing_corrected,
        })
    }

    pub fn state(&self) -> &SmoothingState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }
}
