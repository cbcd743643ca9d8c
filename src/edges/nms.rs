//! Non-maximum suppression on gradient magnitude with direction alignment.
//!
//! For each interior pixel the gradient direction is quantised into one of
//! four bins (0°, 45°, 90°, 135°) and the magnitude is compared against the
//! two neighbours along that direction. A pixel survives when it is strictly
//! greater than the "previous" neighbour and not smaller than the "next"
//! one, which keeps exactly one pixel of a two-pixel plateau.
use crate::edges::grad::Grad;
use crate::image::{ImageF32, ImageView, ImageViewMut};

const TAN_22_5_DEG: f32 = 0.414_213_57;

/// Return the magnitude map with non-maximal responses zeroed.
pub fn suppress_non_maxima(grad: &Grad) -> ImageF32 {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut out = ImageF32::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let dst = out.row_mut(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= 0.0 {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (before, after) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                (mag_row[x - 1], mag_row[x + 1])
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            if mag > before && mag >= after {
                dst[x] = mag;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::grad::{sobel_gradients, GradientNorm};

    #[test]
    fn step_edge_is_thinned_to_single_column() {
        let mut img = ImageF32::new(10, 6);
        for y in 0..6 {
            for x in 5..10 {
                img.set(x, y, 255.0);
            }
        }
        let grad = sobel_gradients(&img, GradientNorm::L1);
        let thin = suppress_non_maxima(&grad);
        for y in 1..5 {
            let kept: Vec<usize> = (0..10).filter(|&x| thin.get(x, y) > 0.0).collect();
            assert_eq!(kept.len(), 1, "row {y} kept {kept:?}");
        }
    }
}
