//! I/O helpers for frames, gray maps and JSON.
//!
//! - `load_frame`: read a PNG/JPEG into an owned RGB [`Frame`].
//! - `save_frame`: write a gray or RGB [`Frame`] to disk.
//! - `save_gray_u8`: write an 8-bit map (mask, edge map) to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Frame, GrayImageU8};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to an 8-bit RGB frame.
pub fn load_frame(path: &Path) -> Result<Frame, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Frame::from_raw(width, height, 3, img.into_raw())
        .map_err(|e| format!("Failed to wrap {}: {e}", path.display()))
}

/// Save a 1- or 3-channel frame.
pub fn save_frame(frame: &Frame, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let (w, h) = (frame.width() as u32, frame.height() as u32);
    let data = frame.data().to_vec();
    let image = if frame.channels() == 3 {
        let buf: RgbImage = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(w, h, data)
            .ok_or_else(|| "Failed to create RGB buffer".to_string())?;
        DynamicImage::ImageRgb8(buf)
    } else {
        let buf: GrayImage = ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(w, h, data)
            .ok_or_else(|| "Failed to create gray buffer".to_string())?;
        DynamicImage::ImageLuma8(buf)
    };
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save an 8-bit single-channel map to a PNG.
pub fn save_gray_u8(buffer: &GrayImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image: GrayImage = ImageBuffer::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.data().to_vec(),
    )
    .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
