use nalgebra::SVector;
use serde::{Deserialize, Serialize};

/// Line segment in frame pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineSegment {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// `(y2 − y1) / (x2 − x1)`; infinite or NaN for vertical segments.
    pub fn slope(&self) -> f64 {
        (self.y2 - self.y1) / (self.x2 - self.x1)
    }
}

/// The two lane boundaries estimated for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneEstimate {
    pub left: LineSegment,
    pub right: LineSegment,
}

impl LaneEstimate {
    /// Flatten to `[x1_l, y1_l, x2_l, y2_l, x1_r, y1_r, x2_r, y2_r]`.
    pub fn to_vector(&self) -> SVector<f64, 8> {
        let (l, r) = (&self.left, &self.right);
        SVector::<f64, 8>::from([l.x1, l.y1, l.x2, l.y2, r.x1, r.y1, r.x2, r.y2])
    }

    /// Inverse of [`LaneEstimate::to_vector`].
    pub fn from_vector(v: &SVector<f64, 8>) -> Self {
        Self {
            left: LineSegment::new(v[0], v[1], v[2], v[3]),
            right: LineSegment::new(v[4], v[5], v[6], v[7]),
        }
    }
}
