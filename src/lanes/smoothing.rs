//! Exponential smoothing of lane estimates across frames.
use crate::error::LaneError;
use crate::types::LaneEstimate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    /// Weight of the current frame, in `(0, 1]`. `1.0` disables smoothing.
    pub alpha: f64,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self { alpha: 0.2 }
    }
}

impl SmoothingParams {
    pub fn validate(&self) -> Result<(), LaneError> {
        if self.alpha.is_finite() && self.alpha > 0.0 && self.alpha <= 1.0 {
            Ok(())
        } else {
            Err(LaneError::InvalidParams(format!(
                "smoothing alpha must be in (0, 1], got {}",
                self.alpha
            )))
        }
    }
}

/// Per-session filter memory. A fresh state is in its "first frame" phase
/// until the first successful update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SmoothingState {
    previous: Option<LaneEstimate>,
}

impl SmoothingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_first_frame(&self) -> bool {
        self.previous.is_none()
    }

    /// Last smoothed estimate, if any.
    pub fn previous(&self) -> Option<&LaneEstimate> {
        self.previous.as_ref()
    }

    /// Blend `raw` into the state and return the new smoothed estimate.
    ///
    /// `prev + alpha * (raw - prev)` equals `(1 - alpha) * prev + alpha * raw`
    /// and leaves `prev` untouched when `raw == prev`.
    pub fn update(&mut self, raw: &LaneEstimate, alpha: f64) -> LaneEstimate {
        let smoothed = match &self.previous {
            None => *raw,
            Some(prev) => {
                let p = prev.to_vector();
                LaneEstimate::from_vector(&(p + (raw.to_vector() - p) * alpha))
            }
        };
        self.previous = Some(smoothed);
        smoothed
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}
