use lane_detector::config::{load_config, LaneToolConfig, MissingLanePolicy};
use lane_detector::diagnostics::FrameReport;
use lane_detector::image::io::{load_frame, save_frame, write_json_file};
use lane_detector::{LaneDetector, LaneEstimate, LaneParams};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: LaneToolConfig = load_config(Path::new(&config_path))?;
    let paths = config.frame_paths()?;
    let mut detector = LaneDetector::new(config.detector.clone())
        .map_err(|e| format!("Invalid detector parameters: {e}"))?;

    let start = Instant::now();
    let mut entries = Vec::with_capacity(paths.len());
    let mut last_estimate: Option<LaneEstimate> = None;
    let mut index = 0usize;

    for chunk in paths.chunks(config.batch_size.max(1)) {
        let frames = chunk
            .iter()
            .map(|p| load_frame(p))
            .collect::<Result<Vec<_>, _>>()?;
        let results = detector.process_batch(&frames);

        for ((path, frame), result) in chunk.iter().zip(&frames).zip(results) {
            let output = output_path(&config.output_dir, path, index);
            index += 1;
            let (image, entry) = match result {
                Ok(processed) => {
                    last_estimate = Some(processed.report.smoothed);
                    let entry = FrameEntry {
                        input: path.clone(),
                        output: output.clone(),
                        detected: true,
                        error: None,
                        report: Some(processed.report),
                    };
                    (processed.annotated, entry)
                }
                Err(err) if err.is_recoverable() => {
                    let image = match (config.missing_lane_policy, &last_estimate) {
                        (MissingLanePolicy::HoldLast, Some(est)) => detector
                            .render(frame, est)
                            .map_err(|e| format!("Failed to render {}: {e}", path.display()))?,
                        _ => frame.clone(),
                    };
                    let entry = FrameEntry {
                        input: path.clone(),
                        output: output.clone(),
                        detected: false,
                        error: Some(err.to_string()),
                        report: None,
                    };
                    (image, entry)
                }
                Err(err) => return Err(format!("Failed to process {}: {err}", path.display())),
            };
            save_frame(&image, &output)?;
            entries.push(entry);
        }
    }

    let detected = entries.iter().filter(|e| e.detected).count();
    let summary = RunSummary {
        frames: entries.len(),
        detected,
        skipped: entries.len() - detected,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        params: config.detector.clone(),
        entries,
    };

    if let Some(report_path) = &config.report {
        write_json_file(report_path, &summary)?;
        println!("Saved report to {}", report_path.display());
    }
    println!(
        "Processed {} frames ({} with lanes, {} skipped) into {} in {:.1} ms",
        summary.frames,
        summary.detected,
        summary.skipped,
        config.output_dir.display(),
        summary.elapsed_ms
    );
    Ok(())
}

fn output_path(dir: &Path, input: &Path, index: usize) -> PathBuf {
    let name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| format!("{s}.png"))
        .unwrap_or_else(|| format!("frame_{index:05}.png"));
    dir.join(name)
}

fn usage() -> String {
    "Usage: lane_overlay <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameEntry {
    input: PathBuf,
    output: PathBuf,
    detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<FrameReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary {
    frames: usize,
    detected: usize,
    skipped: usize,
    elapsed_ms: f64,
    params: LaneParams,
    entries: Vec<FrameEntry>,
}
