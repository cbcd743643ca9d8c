use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock time spent in one pipeline stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Stage timings of one processed frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Record the time elapsed since `start` under `label`.
    pub fn push_since(&mut self, label: impl Into<String>, start: Instant) {
        self.push(label, elapsed_ms(start));
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_looked_up_by_label() {
        let mut t = TimingBreakdown::with_total(3.0);
        t.push("hough", 1.5);
        t.push("compose", 0.25);
        assert_eq!(t.stage_ms("compose"), Some(0.25));
        assert_eq!(t.stage_ms("isolate"), None);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"elapsedMs\":1.5"));
        assert!(json.contains("\"totalMs\":3.0"));
    }
}
