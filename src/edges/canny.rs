//! Canny edge detector on a float intensity image.
use super::grad::{sobel_gradients, GradientNorm};
use super::nms::suppress_non_maxima;
use crate::image::{GrayImageU8, ImageF32, ImageView};
use serde::{Deserialize, Serialize};

/// Hysteresis thresholds (on the 8-bit intensity scale) and gradient norm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    pub low_threshold: f32,
    pub high_threshold: f32,
    pub norm: GradientNorm,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
            norm: GradientNorm::L1,
        }
    }
}

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Binary edge map (0 / 255) of `l`.
pub fn canny(l: &ImageF32, params: &CannyParams) -> GrayImageU8 {
    let (w, h) = (l.w, l.h);
    let mut edges = GrayImageU8::new(w, h);
    if w < 3 || h < 3 {
        return edges;
    }
    // Thresholds are symmetric; accept them in either order.
    let low = params.low_threshold.min(params.high_threshold);
    let high = params.low_threshold.max(params.high_threshold);

    let grad = sobel_gradients(l, params.norm);
    let thin = suppress_non_maxima(&grad);

    let mut stack: Vec<(usize, usize)> = Vec::new();
    for y in 1..h - 1 {
        let row = thin.row(y);
        for x in 1..w - 1 {
            if row[x] > high && edges.get(x, y) == 0 {
                edges.set(x, y, 255);
                stack.push((x, y));
                grow(&thin, low, &mut edges, &mut stack);
            }
        }
    }
    edges
}

fn grow(thin: &ImageF32, low: f32, edges: &mut GrayImageU8, stack: &mut Vec<(usize, usize)>) {
    let (w, h) = (thin.w as isize, thin.h as isize);
    while let Some((x, y)) = stack.pop() {
        for (dx, dy) in NEIGH_OFFSETS {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 1 || ny < 1 || nx >= w - 1 || ny >= h - 1 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if edges.get(nx, ny) == 0 && thin.get(nx, ny) > low {
                edges.set(nx, ny, 255);
                stack.push((nx, ny));
            }
        }
    }
}
