//! Line segment detection with a progressive probabilistic Hough transform.
//!
//! The detector consumes the ROI-masked binary edge map and returns raw
//! segments; downstream logic treats their order as irrelevant. The voting
//! space is (θ, ρ) with `ρ = x cos θ + y sin θ`. Edge pixels are visited in a
//! random order drawn from a seeded generator, so a given edge map always
//! yields the same segments.
//!
//! For each visited pixel:
//! - vote into every θ bin; if the strongest bin stays below `threshold`,
//!   move on,
//! - otherwise walk from the pixel in both directions along the peak line,
//!   tolerating up to `max_line_gap` missing pixels,
//! - clear the walked pixels from the edge set (un-voting them when the line
//!   is accepted) and emit the segment when it spans at least
//!   `min_line_length` along either axis.

mod probabilistic;

use crate::error::LaneError;
use crate::image::GrayImageU8;
use crate::types::LineSegment;
use serde::{Deserialize, Serialize};

pub use probabilistic::hough_lines_probabilistic;

/// Parameters of the probabilistic Hough transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Distance resolution of the accumulator in pixels.
    pub rho: f64,
    /// Angle resolution of the accumulator in radians.
    pub theta: f64,
    /// Minimum accumulator votes before a line is traced.
    pub threshold: u32,
    /// Minimum segment extent (pixels, along x or y).
    pub min_line_length: u32,
    /// Maximum run of missing pixels bridged while tracing.
    pub max_line_gap: u32,
    /// Seed for the pixel visiting order.
    pub seed: u64,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho: 4.0,
            theta: std::f64::consts::PI / 180.0,
            threshold: 30,
            min_line_length: 100,
            max_line_gap: 180,
            seed: 0x1a2e,
        }
    }
}

impl HoughParams {
    pub fn validate(&self) -> Result<(), LaneError> {
        if !(self.rho.is_finite() && self.rho > 0.0) {
            return Err(LaneError::InvalidParams(format!(
                "hough rho must be positive, got {}",
                self.rho
            )));
        }
        if !(self.theta.is_finite() && self.theta > 0.0 && self.theta <= std::f64::consts::PI) {
            return Err(LaneError::InvalidParams(format!(
                "hough theta must be in (0, pi], got {}",
                self.theta
            )));
        }
        if self.threshold == 0 {
            return Err(LaneError::InvalidParams(
                "hough threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Detect line segments in a binary edge map (non-zero pixels are edges).
pub fn detect_segments(edges: &GrayImageU8, params: &HoughParams) -> Vec<LineSegment> {
    hough_lines_probabilistic(edges, params)
}
