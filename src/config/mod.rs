//! JSON configuration of the command-line tools.
use crate::detector::LaneParams;
use crate::hough::HoughParams;
use crate::isolate::IsolatorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Frame extensions picked up when scanning an input directory.
const FRAME_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// What `lane_overlay` writes for a frame with no lane estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingLanePolicy {
    /// Write the input frame unchanged.
    #[default]
    PassThrough,
    /// Redraw the last successful estimate over the current frame.
    HoldLast,
}

#[derive(Debug, Deserialize)]
pub struct LaneToolConfig {
    /// Explicit frame paths, processed in the listed order.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    /// Directory whose image files are appended, sorted by file name.
    #[serde(default)]
    pub input_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Optional JSON report with one entry per frame.
    #[serde(default)]
    pub report: Option<PathBuf>,
    #[serde(default)]
    pub missing_lane_policy: MissingLanePolicy,
    /// Frames handed to the detector per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub detector: LaneParams,
}

fn default_batch_size() -> usize {
    8
}

impl LaneToolConfig {
    /// Ordered list of frames to process.
    pub fn frame_paths(&self) -> Result<Vec<PathBuf>, String> {
        let mut paths = self.inputs.clone();
        if let Some(dir) = &self.input_dir {
            paths.extend(list_frames(dir)?);
        }
        if paths.is_empty() {
            return Err("No input frames configured".to_string());
        }
        Ok(paths)
    }
}

#[derive(Debug, Deserialize)]
pub struct EdgeDebugConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub isolator: IsolatorParams,
    #[serde(default)]
    pub hough: HoughParams,
}

fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|e| format!("Failed to read input dir {}: {e}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| format!("Failed to list {}: {e}", dir.display()))?
            .path();
        let is_frame = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if path.is_file() && is_frame {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn load_config<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: LaneToolConfig =
            serde_json::from_str(r#"{ "inputs": ["a.png"], "output_dir": "out" }"#).unwrap();
        assert_eq!(cfg.missing_lane_policy, MissingLanePolicy::PassThrough);
        assert_eq!(cfg.batch_size, 8);
        assert_eq!(cfg.detector, LaneParams::default());
        assert_eq!(cfg.frame_paths().unwrap(), vec![PathBuf::from("a.png")]);
    }

    #[test]
    fn policy_and_detector_overrides_parse() {
        let cfg: LaneToolConfig = serde_json::from_str(
            r#"{
                "inputs": [],
                "output_dir": "out",
                "missing_lane_policy": "hold_last",
                "detector": { "smoothing": { "alpha": 0.5 } }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.missing_lane_policy, MissingLanePolicy::HoldLast);
        assert_eq!(cfg.detector.smoothing.alpha, 0.5);
        assert!(cfg.frame_paths().is_err());
    }
}
