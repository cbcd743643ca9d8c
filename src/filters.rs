//! Separable smoothing filters.
//!
//! The isolator blurs the masked grayscale image with a normalised 5-tap
//! binomial kernel (the classic 5×5 Gaussian approximation) before edge
//! detection. Border samples clamp to the image extents.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl Default for StaticSeparableFilter {
    fn default() -> Self {
        GAUSSIAN_5TAP
    }
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Normalised 5-tap Gaussian filter `[1, 4, 6, 4, 1] / 16`.
pub const GAUSSIAN_5TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[0.0625, 0.25, 0.375, 0.25, 0.0625]);

/// Normalised 3-tap Gaussian filter `[1, 2, 1] / 4`.
pub const GAUSSIAN_3TAP: StaticSeparableFilter = StaticSeparableFilter::new(&[0.25, 0.5, 0.25]);

/// Convolve `src` with `filter` horizontally then vertically.
pub fn blur(filter: &dyn SeparableFilter, src: &ImageF32) -> ImageF32 {
    let taps = filter.taps();
    if src.w == 0 || src.h == 0 || taps.is_empty() {
        return src.clone();
    }
    let radius = (taps.len() / 2) as isize;

    let mut horiz = ImageF32::new(src.w, src.h);
    for y in 0..src.h {
        filter_row(src.row(y), horiz.row_mut(y), taps, radius);
    }

    let mut out = ImageF32::new(src.w, src.h);
    let mut rows: Vec<&[f32]> = Vec::with_capacity(taps.len());
    for y in 0..src.h {
        rows.clear();
        for k in 0..taps.len() {
            let sy = clamp_index(y as isize + k as isize - radius, src.h);
            rows.push(horiz.row(sy));
        }
        let dst = out.row_mut(y);
        for (x, dst_px) in dst.iter_mut().enumerate() {
            *dst_px = taps.iter().zip(&rows).map(|(t, r)| t * r[x]).sum();
        }
    }
    out
}

fn filter_row(row: &[f32], out: &mut [f32], taps: &[f32], radius: isize) {
    let len = row.len();
    for (x, dst_px) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (k, &tap) in taps.iter().enumerate() {
            let idx = clamp_index(x as isize + k as isize - radius, len);
            acc += tap * row[idx];
        }
        *dst_px = acc;
    }
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 {
        return 0;
    }
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_preserves_constant_image() {
        let mut img = ImageF32::new(7, 5);
        img.data.iter_mut().for_each(|v| *v = 200.0);
        let out = blur(&GAUSSIAN_5TAP, &img);
        assert!(out.data.iter().all(|&v| (v - 200.0).abs() < 1e-3));
    }

    #[test]
    fn blur_spreads_impulse_with_binomial_weights() {
        let mut img = ImageF32::new(9, 9);
        img.set(4, 4, 256.0);
        let out = blur(&GAUSSIAN_5TAP, &img);
        assert!((out.get(4, 4) - 36.0).abs() < 1e-3);
        assert!((out.get(3, 4) - 24.0).abs() < 1e-3);
        assert!((out.get(2, 2) - 1.0).abs() < 1e-3);
        assert_eq!(out.get(0, 0), 0.0);
        let total: f32 = out.data.iter().sum();
        assert!((total - 256.0).abs() < 1e-2);
    }
}
