//! Per-frame lane pipeline and session registry.
//!
//! Overview
//! - [`LaneDetector`] owns one stream's smoothing state and runs the full
//!   pipeline on each frame: colour/edge isolation, ROI masking, Hough
//!   segments, aggregation with smoothing, overlay drawing and blending.
//! - [`LaneSessions`] hands out opaque [`SessionHandle`]s, each backed by an
//!   independent detector, for callers that multiplex several streams.
//!
//! Modules
//! - [`params`] – the aggregate [`LaneParams`] configuration.
//! - `pipeline` – the [`LaneDetector`] implementation.
//! - `session` – handle-based session registry.
//!
//! Key ideas
//! - The stages up to the Hough transform are pure, so
//!   [`LaneDetector::process_batch`] runs them in parallel and then folds the
//!   segments into the tracker strictly in input order.
//! - A session locks onto the shape of its first frame; any later frame of
//!   a different shape is rejected without touching the state.

pub mod params;
mod pipeline;
mod session;

pub use params::LaneParams;
pub use pipeline::{LaneDetector, ProcessedFrame};
pub use session::{LaneSessions, SessionHandle};
