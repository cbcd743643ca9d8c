use lane_detector::config::{load_config, EdgeDebugConfig};
use lane_detector::hough::detect_segments;
use lane_detector::image::io::{load_frame, save_gray_u8, write_json_file};
use lane_detector::isolate::{edge_map, isolate_markings};
use lane_detector::roi::{apply_roi, RoiTrapezoid};
use lane_detector::LineSegment;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: EdgeDebugConfig = load_config(Path::new(&config_path))?;
    let frame = load_frame(&config.input)?;
    let (w, h) = (frame.width(), frame.height());

    let isolated = isolate_markings(&frame, &config.isolator).map_err(|e| e.to_string())?;
    let edges = edge_map(&frame, &config.isolator).map_err(|e| e.to_string())?;
    let roi = RoiTrapezoid::for_frame(w, h);
    let masked = apply_roi(&edges);
    let segments = detect_segments(&masked, &config.hough);

    let out = &config.output_dir;
    save_gray_u8(&isolated.mask, &out.join("color_mask.png"))?;
    save_gray_u8(&isolated.gray, &out.join("isolated.png"))?;
    save_gray_u8(&edges, &out.join("edges.png"))?;
    save_gray_u8(&roi.mask(w, h), &out.join("roi.png"))?;
    save_gray_u8(&masked, &out.join("edges_roi.png"))?;

    let summary = EdgeDebugSummary {
        width: w,
        height: h,
        marking_pixels: isolated.mask.count_nonzero(),
        edge_pixels: edges.count_nonzero(),
        roi_edge_pixels: masked.count_nonzero(),
        roi,
        segments,
    };
    let summary_path = out.join("summary.json");
    write_json_file(&summary_path, &summary)?;

    println!(
        "Saved debug maps to {} ({} edge pixels in ROI, {} segments)",
        out.display(),
        summary.roi_edge_pixels,
        summary.segments.len()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: edge_debug <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EdgeDebugSummary {
    width: usize,
    height: usize,
    marking_pixels: usize,
    edge_pixels: usize,
    roi_edge_pixels: usize,
    roi: RoiTrapezoid,
    segments: Vec<LineSegment>,
}
