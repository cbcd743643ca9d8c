//! Rasterisation of lane lines onto an overlay frame.
use crate::image::Frame;
use crate::types::{LaneEstimate, LineSegment};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawParams {
    /// Line colour in RGB order.
    pub color: [u8; 3],
    /// Stroke width in pixels.
    pub thickness: u32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            thickness: 6,
        }
    }
}

/// Paint every pixel whose centre lies within `thickness / 2` of the
/// segment. Ends are round; a zero-length segment becomes a disk.
/// Non-finite coordinates draw nothing.
pub fn draw_segment(frame: &mut Frame, seg: &LineSegment, color: [u8; 3], thickness: u32) {
    let coords = [seg.x1, seg.y1, seg.x2, seg.y2];
    if thickness == 0 || coords.iter().any(|v| !v.is_finite()) {
        return;
    }
    let (w, h) = (frame.width(), frame.height());
    if w == 0 || h == 0 {
        return;
    }
    let radius = thickness as f64 / 2.0;
    let clip = |v: f64, max: usize| v.clamp(0.0, (max - 1) as f64) as usize;
    let x_lo = seg.x1.min(seg.x2) - radius;
    let x_hi = seg.x1.max(seg.x2) + radius;
    let y_lo = seg.y1.min(seg.y2) - radius;
    let y_hi = seg.y1.max(seg.y2) + radius;
    if x_hi < 0.0 || y_hi < 0.0 || x_lo > (w - 1) as f64 || y_lo > (h - 1) as f64 {
        return;
    }
    let (x0, x1) = (clip(x_lo.floor(), w), clip(x_hi.ceil(), w));
    let (y0, y1) = (clip(y_lo.floor(), h), clip(y_hi.ceil(), h));

    let channels = frame.channels();
    let r2 = radius * radius;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if distance_sq(seg, x as f64, y as f64) <= r2 {
                let px = frame.pixel_mut(x, y);
                px.copy_from_slice(&color[..channels]);
            }
        }
    }
}

fn distance_sq(seg: &LineSegment, px: f64, py: f64) -> f64 {
    let (dx, dy) = (seg.x2 - seg.x1, seg.y2 - seg.y1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((px - seg.x1) * dx + (py - seg.y1) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (seg.x1 + t * dx, seg.y1 + t * dy);
    (px - cx).powi(2) + (py - cy).powi(2)
}

/// Zero frame of `width × height` with both lane lines drawn.
pub fn draw_lane_overlay(
    width: usize,
    height: usize,
    estimate: &LaneEstimate,
    params: &DrawParams,
) -> Frame {
    let mut overlay = Frame::black_rgb(width, height);
    for seg in [&estimate.left, &estimate.right] {
        draw_segment(&mut overlay, seg, params.color, params.thickness);
    }
    overlay
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_stroke_covers_half_thickness() {
        let mut f = Frame::black_rgb(40, 20);
        draw_segment(&mut f, &LineSegment::new(5.0, 10.0, 30.0, 10.0), [255, 0, 0], 6);
        assert_eq!(f.pixel(15, 7), &[255, 0, 0]);
        assert_eq!(f.pixel(15, 13), &[255, 0, 0]);
        assert_eq!(f.pixel(15, 6), &[0, 0, 0]);
        assert_eq!(f.pixel(15, 14), &[0, 0, 0]);
        // Round cap.
        assert_eq!(f.pixel(2, 10), &[255, 0, 0]);
        assert_eq!(f.pixel(2, 7), &[0, 0, 0]);
    }

    #[test]
    fn zero_length_segment_is_a_disk() {
        let mut f = Frame::black_rgb(20, 20);
        draw_segment(&mut f, &LineSegment::new(10.0, 10.0, 10.0, 10.0), [0, 255, 0], 6);
        assert_eq!(f.pixel(13, 10), &[0, 255, 0]);
        assert_eq!(f.pixel(10, 7), &[0, 255, 0]);
        assert_eq!(f.pixel(13, 13), &[0, 0, 0]);
        assert_eq!(f.pixel(14, 10), &[0, 0, 0]);
    }

    #[test]
    fn segments_outside_or_invalid_draw_nothing() {
        let mut f = Frame::black_rgb(10, 10);
        draw_segment(&mut f, &LineSegment::new(50.0, 50.0, 80.0, 90.0), [255, 0, 0], 6);
        draw_segment(&mut f, &LineSegment::new(f64::NAN, 0.0, 5.0, 5.0), [255, 0, 0], 6);
        assert!(f.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn segment_ending_on_bottom_row_paints_last_rows() {
        let est = LaneEstimate {
            left: LineSegment::new(320.0, 2460.0, 430.0, 480.0),
            right: LineSegment::new(320.0, 2460.0, 210.0, 480.0),
        };
        let overlay = draw_lane_overlay(640, 480, &est, &DrawParams::default());
        assert_eq!(overlay.pixel(430, 479), &[255, 0, 0]);
        assert_eq!(overlay.pixel(210, 479), &[255, 0, 0]);
        assert_eq!(overlay.pixel(320, 479), &[0, 0, 0]);
        assert_eq!(overlay.pixel(430, 470), &[0, 0, 0]);
    }
}
