#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod compose;
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod draw;
pub mod error;
pub mod image;
pub mod lanes;
pub mod types;

// Stage modules – public so tools can run stages in isolation.
pub mod edges;
pub mod filters;
pub mod hough;
pub mod isolate;
pub mod roi;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector, sessions and results.
pub use crate::detector::{LaneDetector, LaneParams, LaneSessions, ProcessedFrame, SessionHandle};
pub use crate::error::{LaneError, NoLaneReason};
pub use crate::image::Frame;
pub use crate::types::{LaneEstimate, LineSegment};

// Per-frame diagnostics returned by the detector.
pub use crate::diagnostics::FrameReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lane_detector::prelude::*;
///
/// # fn main() -> Result<(), LaneError> {
/// let (w, h) = (640usize, 480usize);
/// let frame = Frame::from_raw(w, h, 3, vec![0u8; w * h * 3])?;
///
/// let mut sessions = LaneSessions::new(LaneParams::default())?;
/// let handle = sessions.open();
/// match sessions.process_frame(handle, &frame) {
///     Ok(annotated) => println!("annotated {}x{}", annotated.width(), annotated.height()),
///     Err(err) => println!("skipped: {err}"),
/// }
/// sessions.close(handle)?;
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::Frame;
    pub use crate::{LaneDetector, LaneError, LaneEstimate, LaneParams, LaneSessions, SessionHandle};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::compose::{blend, BlendParams};
    pub use crate::draw::{draw_lane_overlay, draw_segment, DrawParams};
    pub use crate::edges::{canny, CannyParams};
    pub use crate::hough::{detect_segments, HoughParams};
    pub use crate::isolate::{edge_map, isolate_markings, IsolatorParams};
    pub use crate::lanes::{aggregate, AggregatorParams, FrameGeometry, LaneTracker, SmoothingParams};
    pub use crate::roi::{apply_roi, RoiTrapezoid};
}
