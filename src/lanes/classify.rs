//! Slope-based split of raw segments into left/right lane candidates.
//!
//! Image y grows downward, so the left boundary of a lane seen from the
//! driver's seat rises to the right and has a negative slope.
use crate::types::LineSegment;

/// Default minimum `|slope|` for a segment to count as a lane candidate.
pub const DEFAULT_SLOPE_THRESHOLD: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Side of `segment`, or `None` when it is too shallow or vertical.
pub fn classify(segment: &LineSegment, threshold: f64) -> Option<Side> {
    let slope = segment.slope();
    if !slope.is_finite() {
        return None;
    }
    if slope < -threshold {
        Some(Side::Left)
    } else if slope > threshold {
        Some(Side::Right)
    } else {
        None
    }
}

/// Candidates per side, in input order.
#[derive(Clone, Debug, Default)]
pub struct Classified {
    pub left: Vec<LineSegment>,
    pub right: Vec<LineSegment>,
    pub discarded: usize,
}

pub fn split_by_slope(segments: &[LineSegment], threshold: f64) -> Classified {
    let mut out = Classified::default();
    for seg in segments {
        match classify(seg, threshold) {
            Some(Side::Left) => out.left.push(*seg),
            Some(Side::Right) => out.right.push(*seg),
            None => out.discarded += 1,
        }
    }
    out
}
