//! Colour conversions on the 8-bit scale used by the lane isolator.
//!
//! Hue follows the common 8-bit convention of `[0, 180)` (degrees halved) so
//! that yellow sits around 25-30; saturation and value span `[0, 255]`.

/// Fixed-point BT.601 luma: `0.299 R + 0.587 G + 0.114 B`, rounded.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    ((r as u32 * R + g as u32 * G + b as u32 * B + (1 << 13)) >> 14) as u8
}

/// RGB -> HSV with `h ∈ [0, 180)`, `s, v ∈ [0, 255]`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let v = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = v - min;

    let s = if v > 0.0 { 255.0 * delta / v } else { 0.0 };

    let mut h = if delta == 0.0 {
        0.0
    } else if v == rf {
        60.0 * (gf - bf) / delta
    } else if v == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }
    let h = (h / 2.0).round();
    let h = if h >= 180.0 { h - 180.0 } else { h };

    [h as u8, s.round() as u8, v as u8]
}

/// Inclusive per-channel range test.
#[inline]
pub fn in_range<const N: usize>(px: [u8; N], lower: [u8; N], upper: [u8; N]) -> bool {
    px.iter()
        .zip(lower.iter().zip(upper.iter()))
        .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_yellow_has_hue_30() {
        assert_eq!(rgb_to_hsv(255, 255, 0), [30, 255, 255]);
    }

    #[test]
    fn road_yellow_falls_in_lane_band() {
        let hsv = rgb_to_hsv(230, 190, 40);
        assert!(in_range(hsv, [20, 100, 100], [30, 255, 255]), "{hsv:?}");
    }

    #[test]
    fn gray_levels_have_zero_saturation() {
        assert_eq!(rgb_to_hsv(128, 128, 128), [0, 0, 128]);
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
    }

    #[test]
    fn luma_matches_bt601() {
        assert_eq!(rgb_to_gray(255, 255, 255), 255);
        assert_eq!(rgb_to_gray(0, 0, 0), 0);
        assert_eq!(rgb_to_gray(255, 0, 0), 76);
        assert_eq!(rgb_to_gray(0, 255, 0), 150);
        assert_eq!(rgb_to_gray(255, 255, 0), 226);
    }
}
