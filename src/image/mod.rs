//! Image buffers used by the lane pipeline.
//!
//! - [`Frame`]: owned interleaved 8-bit buffer with 1 or 3 channels. Colour
//!   frames are RGB.
//! - [`GrayImageU8`]: owned single-channel 8-bit map (masks, edge maps).
//! - [`ImageF32`]: owned single-channel float buffer for filtering and
//!   gradients.
pub mod f32;
pub mod frame;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::frame::Frame;
pub use self::traits::{ImageView, ImageViewMut};
pub use self::u8::GrayImageU8;
