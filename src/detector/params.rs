//! Parameter bundle for the full lane pipeline.
//!
//! Every field has a serde default, so a JSON config only needs to name the
//! knobs it changes:
//!
//! ```json
//! { "hough": { "threshold": 40 }, "smoothing": { "alpha": 0.3 } }
//! ```

use crate::compose::BlendParams;
use crate::draw::DrawParams;
use crate::error::LaneError;
use crate::hough::HoughParams;
use crate::isolate::IsolatorParams;
use crate::lanes::{AggregatorParams, SmoothingParams};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneParams {
    /// Colour gating, blur and Canny thresholds.
    pub isolator: IsolatorParams,
    pub hough: HoughParams,
    /// Slope classification and endpoint placement.
    pub aggregator: AggregatorParams,
    pub smoothing: SmoothingParams,
    pub draw: DrawParams,
    pub blend: BlendParams,
}

impl LaneParams {
    /// Check every stage's parameters for values outside their domain.
    pub fn validate(&self) -> Result<(), LaneError> {
        let canny = &self.isolator.canny;
        if !(canny.low_threshold.is_finite()
            && canny.high_threshold.is_finite()
            && canny.low_threshold >= 0.0
            && canny.low_threshold <= canny.high_threshold)
        {
            return Err(LaneError::InvalidParams(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {} / {}",
                canny.low_threshold, canny.high_threshold
            )));
        }
        self.hough.validate()?;
        self.aggregator.validate()?;
        self.smoothing.validate()?;
        self.blend.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lanes::EndpointMode;

    #[test]
    fn partial_json_keeps_defaults() {
        let params: LaneParams = serde_json::from_str(
            r#"{ "hough": { "threshold": 40 }, "aggregator": { "endpoint_mode": "roi_span" } }"#,
        )
        .unwrap();
        assert_eq!(params.hough.threshold, 40);
        assert_eq!(params.hough.min_line_length, 100);
        assert_eq!(params.aggregator.endpoint_mode, EndpointMode::RoiSpan);
        assert_eq!(params.smoothing.alpha, 0.2);
        assert_eq!(params.draw.color, [255, 0, 0]);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn inverted_canny_thresholds_are_rejected() {
        let mut params = LaneParams::default();
        params.isolator.canny.low_threshold = 200.0;
        assert!(matches!(params.validate(), Err(LaneError::InvalidParams(_))));
    }

    #[test]
    fn non_positive_rho_is_rejected() {
        let mut params = LaneParams::default();
        params.hough.rho = 0.0;
        assert!(params.validate().is_err());
    }
}
