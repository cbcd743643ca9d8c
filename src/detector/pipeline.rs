//! [`LaneDetector`]: one stream's lane pipeline with its smoothing state.
//!
//! Typical usage:
//! ```no_run
//! use lane_detector::{Frame, LaneDetector, LaneError, LaneParams};
//!
//! # fn example(frames: Vec<Frame>) -> Result<(), LaneError> {
//! let mut detector = LaneDetector::new(LaneParams::default())?;
//! for frame in &frames {
//!     match detector.process(frame) {
//!         Ok(annotated) => println!("{}x{}", annotated.width(), annotated.height()),
//!         Err(err) if err.is_recoverable() => continue,
//!         Err(err) => return Err(err),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
use super::params::LaneParams;
use crate::compose::blend;
use crate::diagnostics::{FrameReport, TimingBreakdown};
use crate::draw::draw_lane_overlay;
use crate::error::LaneError;
use crate::hough::detect_segments;
use crate::image::Frame;
use crate::isolate::edge_map;
use crate::lanes::{FrameGeometry, LaneTracker};
use crate::roi::apply_roi;
use crate::types::{LaneEstimate, LineSegment};
use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::time::Instant;

/// Annotated frame plus the trace of how it was produced.
#[derive(Clone, Debug)]
pub struct ProcessedFrame {
    pub annotated: Frame,
    pub report: FrameReport,
}

/// Output of the stateless stages (isolation, ROI, Hough).
struct Detection {
    edge_pixels: usize,
    segments: Vec<LineSegment>,
    timings: TimingBreakdown,
}

/// Lane pipeline bound to a single frame stream.
#[derive(Clone, Debug)]
pub struct LaneDetector {
    params: LaneParams,
    tracker: LaneTracker,
    frame_shape: Option<(usize, usize, usize)>,
}

impl LaneDetector {
    /// Create a detector in its first-frame state.
    pub fn new(params: LaneParams) -> Result<Self, LaneError> {
        params.validate()?;
        let tracker = LaneTracker::new(params.aggregator, params.smoothing)?;
        Ok(Self {
            params,
            tracker,
            frame_shape: None,
        })
    }

    pub fn params(&self) -> &LaneParams {
        &self.params
    }

    /// `(width, height, channels)` of the first accepted frame.
    pub fn frame_shape(&self) -> Option<(usize, usize, usize)> {
        self.frame_shape
    }

    /// Run the pipeline on `frame` and return the annotated copy.
    pub fn process(&mut self, frame: &Frame) -> Result<Frame, LaneError> {
        self.process_with_report(frame).map(|out| out.annotated)
    }

    /// Like [`LaneDetector::process`], also returning estimates, segment
    /// counts and stage timings.
    pub fn process_with_report(&mut self, frame: &Frame) -> Result<ProcessedFrame, LaneError> {
        self.check_shape(frame)?;
        let detection = self.detect(frame)?;
        self.complete(frame, detection)
    }

    /// Process an ordered run of frames. Detection runs in parallel when the
    /// `parallel` feature is enabled; smoothing always follows input order.
    pub fn process_batch(&mut self, frames: &[Frame]) -> Vec<Result<ProcessedFrame, LaneError>> {
        #[cfg(feature = "parallel")]
        let detections: Vec<_> = frames.par_iter().map(|f| self.detect(f)).collect();
        #[cfg(not(feature = "parallel"))]
        let detections: Vec<_> = frames.iter().map(|f| self.detect(f)).collect();

        frames
            .iter()
            .zip(detections)
            .map(|(frame, detection)| {
                self.check_shape(frame)?;
                self.complete(frame, detection?)
            })
            .collect()
    }

    /// Draw `estimate` over `frame` with the configured style and blend.
    pub fn render(&self, frame: &Frame, estimate: &LaneEstimate) -> Result<Frame, LaneError> {
        frame.ensure_rgb()?;
        let overlay = draw_lane_overlay(frame.width(), frame.height(), estimate, &self.params.draw);
        blend(frame, &overlay, &self.params.blend)
    }

    /// Most recent smoothed estimate, if any frame succeeded since the last
    /// reset.
    pub fn last_estimate(&self) -> Option<&LaneEstimate> {
        self.tracker.state().previous()
    }

    /// Drop the smoothing state and the frame-shape lock.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.frame_shape = None;
    }

    fn check_shape(&mut self, frame: &Frame) -> Result<(), LaneError> {
        frame.ensure_rgb()?;
        let actual = frame.shape();
        match self.frame_shape {
            None => {
                self.frame_shape = Some(actual);
                Ok(())
            }
            Some(expected) if expected != actual => {
                Err(LaneError::DimensionMismatch { expected, actual })
            }
            Some(_) => Ok(()),
        }
    }

    fn detect(&self, frame: &Frame) -> Result<Detection, LaneError> {
        let mut timings = TimingBreakdown::default();

        let start = Instant::now();
        let edges = edge_map(frame, &self.params.isolator)?;
        timings.push_since("isolate", start);

        let start = Instant::now();
        let masked = apply_roi(&edges);
        timings.push_since("roi", start);

        let start = Instant::now();
        let segments = detect_segments(&masked, &self.params.hough);
        timings.push_since("hough", start);

        let edge_pixels = masked.count_nonzero();
        debug!(
            "LaneDetector::detect {}x{} edges={} segments={}",
            frame.width(),
            frame.height(),
            edge_pixels,
            segments.len()
        );
        Ok(Detection {
            edge_pixels,
            segments,
            timings,
        })
    }

    fn complete(&mut self, frame: &Frame, detection: Detection) -> Result<ProcessedFrame, LaneError> {
        let Detection {
            edge_pixels,
            segments,
            mut timings,
        } = detection;
        let geometry = FrameGeometry::for_frame(frame.width(), frame.height());
        let first_frame = self.tracker.state().is_first_frame();

        let start = Instant::now();
        let update = self.tracker.update(&segments, geometry).map_err(|err| {
            warn!("frame skipped: {err}");
            err
        })?;
        timings.push_since("aggregate", start);

        let start = Instant::now();
        let annotated = self.render(frame, &update.smoothed)?;
        timings.push_since("compose", start);

        timings.total_ms = timings.stages.iter().map(|s| s.elapsed_ms).sum();
        debug!("LaneDetector::process total_ms={:.3}", timings.total_ms);

        Ok(ProcessedFrame {
            annotated,
            report: FrameReport {
                width: frame.width(),
                height: frame.height(),
                edge_pixels,
                segments,
                left_segments: update.left_count,
                right_segments: update.right_count,
                crossing_corrected: update.crossing_corrected,
                first_frame,
                raw: update.raw,
                smoothed: update.smoothed,
                timings,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoLaneReason;

    fn detector() -> LaneDetector {
        LaneDetector::new(LaneParams::default()).unwrap()
    }

    #[test]
    fn black_frame_reports_missing_lanes() {
        let mut det = detector();
        let err = det.process(&Frame::black_rgb(64, 48)).err();
        assert_eq!(err, Some(LaneError::NoLaneDetected(NoLaneReason::MissingBoth)));
        assert!(det.last_estimate().is_none());
        assert_eq!(det.frame_shape(), Some((64, 48, 3)));
    }

    #[test]
    fn frame_size_is_locked_until_reset() {
        let mut det = detector();
        let _ = det.process(&Frame::black_rgb(64, 48));
        let err = det.process(&Frame::black_rgb(32, 48)).err();
        assert_eq!(
            err,
            Some(LaneError::DimensionMismatch {
                expected: (64, 48, 3),
                actual: (32, 48, 3)
            })
        );
        det.reset();
        assert!(matches!(
            det.process(&Frame::black_rgb(32, 48)),
            Err(LaneError::NoLaneDetected(_))
        ));
    }

    #[test]
    fn gray_frames_are_rejected_without_locking() {
        let mut det = detector();
        let gray = Frame::from_raw(8, 8, 1, vec![0; 64]).unwrap();
        assert_eq!(
            det.process(&gray).err(),
            Some(LaneError::UnsupportedChannels {
                expected: 3,
                actual: 1
            })
        );
        assert_eq!(det.frame_shape(), None);
    }

    #[test]
    fn render_blends_overlay_over_frame() {
        let det = detector();
        let frame = Frame::from_raw(40, 40, 3, vec![100; 40 * 40 * 3]).unwrap();
        let est = LaneEstimate {
            left: LineSegment::new(5.0, 39.0, 5.0, 39.0),
            right: LineSegment::new(30.0, 39.0, 30.0, 39.0),
        };
        let out = det.render(&frame, &est).unwrap();
        assert_eq!(out.pixel(5, 39), &[255, 80, 80]);
        assert_eq!(out.pixel(20, 20), &[80, 80, 80]);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut params = LaneParams::default();
        params.smoothing.alpha = -1.0;
        assert!(matches!(LaneDetector::new(params), Err(LaneError::InvalidParams(_))));
    }
}
