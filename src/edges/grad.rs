//! Sobel image gradients with selectable magnitude norm.
//!
//! - Convolves the 3×3 Sobel pair with border clamping.
//! - Outputs per-pixel `gx`, `gy` and the magnitude under the chosen norm.
//!
//! Complexity: O(W·H); memory: three float buffers.
use crate::image::{ImageF32, ImageView, ImageViewMut};
use serde::{Deserialize, Serialize};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Norm used to combine `gx` and `gy` into a magnitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientNorm {
    /// `|gx| + |gy|`
    #[default]
    L1,
    /// `sqrt(gx^2 + gy^2)`
    L2,
}

/// Per-pixel gradient buffers.
#[derive(Clone, Debug, Default)]
pub struct Grad {
    /// Horizontal derivative
    pub gx: ImageF32,
    /// Vertical derivative
    pub gy: ImageF32,
    /// Magnitude under the requested norm
    pub mag: ImageF32,
}

/// Compute Sobel gradients on a single-channel float image.
pub fn sobel_gradients(l: &ImageF32, norm: GradientNorm) -> Grad {
    let w = l.w;
    let h = l.h;
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        let out_gx = gx.row_mut(y);
        let out_gy = gy.row_mut(y);
        let out_mag = mag.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, yy_row) in rows.iter().enumerate() {
                let kx_row = &SOBEL_KERNEL_X[ky];
                let ky_row = &SOBEL_KERNEL_Y[ky];
                for (k, &xx) in x_idx.iter().enumerate() {
                    sum_x += yy_row[xx] * kx_row[k];
                    sum_y += yy_row[xx] * ky_row[k];
                }
            }

            out_gx[x] = sum_x;
            out_gy[x] = sum_y;
            out_mag[x] = match norm {
                GradientNorm::L1 => sum_x.abs() + sum_y.abs(),
                GradientNorm::L2 => (sum_x * sum_x + sum_y * sum_y).sqrt(),
            };
        }
    }

    Grad { gx, gy, mag }
}
