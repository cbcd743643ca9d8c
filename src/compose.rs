//! Weighted blend of the lane overlay over the original frame.
use crate::error::LaneError;
use crate::image::Frame;
use serde::{Deserialize, Serialize};

/// `out = original_weight * original + overlay_weight * overlay + gamma`,
/// rounded and saturated to `[0, 255]` per channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendParams {
    pub original_weight: f64,
    pub overlay_weight: f64,
    pub gamma: f64,
}

impl Default for BlendParams {
    fn default() -> Self {
        Self {
            original_weight: 0.8,
            overlay_weight: 1.0,
            gamma: 0.0,
        }
    }
}

impl BlendParams {
    pub fn validate(&self) -> Result<(), LaneError> {
        if [self.original_weight, self.overlay_weight, self.gamma]
            .iter()
            .all(|v| v.is_finite())
        {
            Ok(())
        } else {
            Err(LaneError::InvalidParams(
                "blend weights must be finite".to_string(),
            ))
        }
    }
}

pub fn blend(original: &Frame, overlay: &Frame, params: &BlendParams) -> Result<Frame, LaneError> {
    if original.shape() != overlay.shape() {
        return Err(LaneError::DimensionMismatch {
            expected: original.shape(),
            actual: overlay.shape(),
        });
    }
    let mut out = original.zeros_like();
    for ((dst, &a), &b) in out
        .data_mut()
        .iter_mut()
        .zip(original.data())
        .zip(overlay.data())
    {
        let v = params.original_weight * a as f64 + params.overlay_weight * b as f64 + params.gamma;
        *dst = v.round().clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_dim_original_and_add_overlay() {
        let original = Frame::from_raw(2, 1, 3, vec![100, 200, 255, 10, 20, 30]).unwrap();
        let overlay = Frame::from_raw(2, 1, 3, vec![255, 0, 0, 0, 0, 0]).unwrap();
        let out = blend(&original, &overlay, &BlendParams::default()).unwrap();
        assert_eq!(out.data(), &[255, 160, 204, 8, 16, 24]);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let a = Frame::black_rgb(4, 4);
        let b = Frame::black_rgb(4, 5);
        assert_eq!(
            blend(&a, &b, &BlendParams::default()).err(),
            Some(LaneError::DimensionMismatch {
                expected: (4, 4, 3),
                actual: (4, 5, 3)
            })
        );
    }
}
