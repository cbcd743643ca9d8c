//! Colour/edge isolator: reduces an RGB frame to a binary edge map of likely
//! lane-marking pixels.
//!
//! Stages
//! - Grayscale (BT.601 luma) and HSV conversion per pixel.
//! - Yellow mask from HSV bounds, white mask from a grayscale band; the union
//!   gates the grayscale image (pixels outside either mask become 0).
//! - Separable Gaussian blur to suppress high-frequency noise.
//! - Canny edge detection with hysteresis thresholds.
//!
//! An all-black or uniformly coloured frame yields an empty edge map; callers
//! downstream must tolerate zero segments.

pub mod color;

use crate::edges::{canny, CannyParams};
use crate::error::LaneError;
use crate::filters::{blur, GAUSSIAN_3TAP, GAUSSIAN_5TAP};
use crate::image::{Frame, GrayImageU8, ImageF32};
use color::{in_range, rgb_to_gray, rgb_to_hsv};
use serde::{Deserialize, Serialize};

/// Smoothing kernel applied before edge detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurKernel {
    /// No smoothing.
    None,
    Gaussian3,
    #[default]
    Gaussian5,
}

/// Colour bounds and edge thresholds for the isolator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsolatorParams {
    /// Inclusive lower HSV bound for yellow markings (`h` on a 0-180 scale).
    pub yellow_lower: [u8; 3],
    /// Inclusive upper HSV bound for yellow markings.
    pub yellow_upper: [u8; 3],
    /// Inclusive grayscale band treated as white paint.
    pub white_lower: u8,
    pub white_upper: u8,
    pub blur: BlurKernel,
    pub canny: CannyParams,
}

impl Default for IsolatorParams {
    fn default() -> Self {
        Self {
            yellow_lower: [20, 100, 100],
            yellow_upper: [30, 255, 255],
            white_lower: 200,
            white_upper: 255,
            blur: BlurKernel::Gaussian5,
            canny: CannyParams::default(),
        }
    }
}

/// Grayscale image restricted to white/yellow pixels, plus the union mask.
pub struct IsolatedMarkings {
    pub gray: GrayImageU8,
    pub mask: GrayImageU8,
}

/// Gate the grayscale frame by the union of the yellow and white masks.
pub fn isolate_markings(frame: &Frame, params: &IsolatorParams) -> Result<IsolatedMarkings, LaneError> {
    frame.ensure_rgb()?;
    let (w, h) = (frame.width(), frame.height());
    let mut gray = GrayImageU8::new(w, h);
    let mut mask = GrayImageU8::new(w, h);

    for (i, px) in frame.data().chunks_exact(3).enumerate() {
        let (r, g, b) = (px[0], px[1], px[2]);
        let luma = rgb_to_gray(r, g, b);
        let white = luma >= params.white_lower && luma <= params.white_upper;
        let yellow = !white && in_range(rgb_to_hsv(r, g, b), params.yellow_lower, params.yellow_upper);
        if white || yellow {
            let (x, y) = (i % w, i / w);
            mask.set(x, y, 255);
            gray.set(x, y, luma);
        }
    }

    Ok(IsolatedMarkings { gray, mask })
}

/// Full isolator stage: colour gating, blur and Canny.
pub fn edge_map(frame: &Frame, params: &IsolatorParams) -> Result<GrayImageU8, LaneError> {
    let IsolatedMarkings { gray, .. } = isolate_markings(frame, params)?;
    let intensity = ImageF32::from_gray(&gray);
    let smoothed = match params.blur {
        BlurKernel::None => intensity,
        BlurKernel::Gaussian3 => blur(&GAUSSIAN_3TAP, &intensity),
        BlurKernel::Gaussian5 => blur(&GAUSSIAN_5TAP, &intensity),
    };
    Ok(canny(&smoothed, &params.canny))
}
