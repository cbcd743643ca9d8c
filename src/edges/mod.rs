//! Edge processing: Sobel gradients, non-maximum suppression and Canny
//! hysteresis.
//!
//! The isolator turns the blurred lane-marking image into a binary edge map
//! with the classic Canny chain:
//!
//! - Sobel gradients (`gx`, `gy`) with a per-pixel magnitude (L1 by default,
//!   optionally L2).
//! - Direction-aligned non-maximum suppression that thins ridges to one
//!   pixel. Ties are broken asymmetrically so a plateau keeps one side.
//! - Double-threshold hysteresis: pixels above `high` seed edges, pixels
//!   above `low` are kept when 8-connected to a seed.
//!
//! Borders are handled by clamping in the gradient pass; the outermost pixel
//! frame never becomes an edge.

pub mod canny;
pub mod grad;
pub mod nms;

pub use canny::{canny, CannyParams};
pub use grad::{sobel_gradients, Grad, GradientNorm};
pub use nms::suppress_non_maxima;
