//! Error type returned across the public pipeline API.
use crate::detector::SessionHandle;
use serde::Serialize;
use thiserror::Error;

/// Why a frame produced no lane estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NoLaneReason {
    /// No segment passed the left (negative slope) classification.
    MissingLeft,
    /// No segment passed the right (positive slope) classification.
    MissingRight,
    /// Neither side had a candidate.
    MissingBoth,
    /// A side's mean slope is zero or not finite, so it cannot be extrapolated.
    DegenerateSlope,
}

impl std::fmt::Display for NoLaneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            NoLaneReason::MissingLeft => "no left lane candidate",
            NoLaneReason::MissingRight => "no right lane candidate",
            NoLaneReason::MissingBoth => "no lane candidates",
            NoLaneReason::DegenerateSlope => "degenerate mean slope",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LaneError {
    /// Recoverable per-frame miss. Smoothing state is left untouched.
    #[error("no lane detected: {0}")]
    NoLaneDetected(NoLaneReason),
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },
    #[error("unknown or closed session {0:?}")]
    InvalidSession(SessionHandle),
    #[error("expected {expected} channel(s), got {actual}")]
    UnsupportedChannels { expected: usize, actual: usize },
    #[error("buffer of {len} bytes does not match {width}x{height}x{channels}")]
    InvalidBuffer {
        width: usize,
        height: usize,
        channels: usize,
        len: usize,
    },
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl LaneError {
    /// `true` for failures the caller can skip past frame by frame.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LaneError::NoLaneDetected(_))
    }
}
