//! Region-of-interest masking with a fixed-ratio trapezoid.
//!
//! The trapezoid assumes a forward-facing camera with the horizon near
//! mid-frame and markings converging toward the centre. Vertices in image
//! coordinates (origin top-left) for a `W × H` frame:
//!
//! - lower-left  `(W/9, H)`
//! - upper-left  `(W/2 − W/8, H/2 + H/10)`
//! - upper-right `(W/2 + W/8, H/2 + H/10)`
//! - lower-right `(W − W/9, H)`
//!
//! The ratios are not adaptive; a different camera geometry needs different
//! constants, not a different algorithm.
use crate::image::{GrayImageU8, ImageView, ImageViewMut};
use serde::Serialize;

/// Trapezoid vertices in pixel coordinates, ordered
/// lower-left, upper-left, upper-right, lower-right.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RoiTrapezoid {
    pub vertices: [[f64; 2]; 4],
}

impl RoiTrapezoid {
    /// Trapezoid for a frame of `width × height` pixels.
    pub fn for_frame(width: usize, height: usize) -> Self {
        let w = width as f64;
        let h = height as f64;
        let top = h / 2.0 + h / 10.0;
        Self {
            vertices: [
                [w / 9.0, h],
                [w / 2.0 - w / 8.0, top],
                [w / 2.0 + w / 8.0, top],
                [w - w / 9.0, h],
            ],
        }
    }

    /// y of the upper edge (the horizon cut).
    pub fn top_y(&self) -> f64 {
        self.vertices[1][1]
    }

    /// y of the lower edge.
    pub fn bottom_y(&self) -> f64 {
        self.vertices[0][1]
    }

    /// Horizontal extent `[left, right]` of the trapezoid at row `y`, or
    /// `None` when the row lies outside it.
    pub fn span_at(&self, y: f64) -> Option<(f64, f64)> {
        let top = self.top_y();
        let bottom = self.bottom_y();
        if y < top || y > bottom {
            return None;
        }
        let t = if bottom > top {
            (y - top) / (bottom - top)
        } else {
            1.0
        };
        let [ll, ul, ur, lr] = self.vertices;
        let left = ul[0] + t * (ll[0] - ul[0]);
        let right = ur[0] + t * (lr[0] - ur[0]);
        Some((left, right))
    }

    /// Rasterised mask (255 inside, boundary included).
    pub fn mask(&self, width: usize, height: usize) -> GrayImageU8 {
        let mut mask = GrayImageU8::new(width, height);
        if width == 0 {
            return mask;
        }
        let max_x = (width - 1) as f64;
        for y in 0..height {
            let Some((left, right)) = self.span_at(y as f64) else {
                continue;
            };
            let x0 = left.ceil().max(0.0);
            let x1 = right.floor().min(max_x);
            if x1 < x0 {
                continue;
            }
            mask.row_mut(y)[x0 as usize..=x1 as usize].fill(255);
        }
        mask
    }
}

/// Zero every pixel of `edges` outside the frame's trapezoid.
pub fn apply_roi(edges: &GrayImageU8) -> GrayImageU8 {
    let (w, h) = (edges.width(), edges.height());
    let mask = RoiTrapezoid::for_frame(w, h).mask(w, h);
    let mut out = GrayImageU8::new(w, h);
    for y in 0..h {
        let src = edges.row(y);
        let keep = mask.row(y);
        for ((dst, &v), &m) in out.row_mut(y).iter_mut().zip(src).zip(keep) {
            *dst = if m != 0 { v } else { 0 };
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_follow_fixed_ratios() {
        let roi = RoiTrapezoid::for_frame(720, 480);
        assert_eq!(roi.vertices[0], [80.0, 480.0]);
        assert_eq!(roi.vertices[1], [270.0, 288.0]);
        assert_eq!(roi.vertices[2], [450.0, 288.0]);
        assert_eq!(roi.vertices[3], [640.0, 480.0]);
        assert_eq!(roi.top_y(), 288.0);
    }

    #[test]
    fn mask_excludes_sky_and_corners() {
        let (w, h) = (720, 480);
        let mask = RoiTrapezoid::for_frame(w, h).mask(w, h);
        assert_eq!(mask.get(360, 100), 0);
        assert_eq!(mask.get(360, 287), 0);
        assert_eq!(mask.get(360, 288), 255);
        assert_eq!(mask.get(270, 288), 255);
        assert_eq!(mask.get(269, 288), 0);
        assert_eq!(mask.get(5, 479), 0);
        assert_eq!(mask.get(715, 479), 0);
        assert_eq!(mask.get(360, 479), 255);
    }

    #[test]
    fn apply_roi_keeps_only_inside_pixels() {
        let (w, h) = (90, 60);
        let mut edges = GrayImageU8::new(w, h);
        edges.set(45, 50, 255);
        edges.set(2, 2, 255);
        edges.set(1, 59, 255);
        let masked = apply_roi(&edges);
        assert_eq!(masked.get(45, 50), 255);
        assert_eq!(masked.count_nonzero(), 1);
    }
}
