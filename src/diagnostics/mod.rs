//! Serializable per-frame diagnostics emitted by the detector and the tools.

pub mod report;
pub mod timing;

pub use report::FrameReport;
pub use timing::{StageTiming, TimingBreakdown};
