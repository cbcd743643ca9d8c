use crate::error::LaneError;

/// Owned interleaved 8-bit frame with 1 (gray) or 3 (RGB) channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap a raw interleaved buffer.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, LaneError> {
        if !matches!(channels, 1 | 3) || data.len() != width * height * channels {
            return Err(LaneError::InvalidBuffer {
                width,
                height,
                channels,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Zero-filled RGB frame.
    pub fn black_rgb(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            channels: 3,
            data: vec![0; width * height * 3],
        }
    }

    /// Zero-filled frame with the same shape as `self`.
    pub fn zeros_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: vec![0; self.data.len()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// `(width, height, channels)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.channels)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at (x, y) as a channel slice.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let i = (y * self.width + x) * self.channels;
        &self.data[i..i + self.channels]
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [u8] {
        let i = (y * self.width + x) * self.channels;
        &mut self.data[i..i + self.channels]
    }

    /// Fail unless the frame is 3-channel RGB.
    pub fn ensure_rgb(&self) -> Result<(), LaneError> {
        if self.channels != 3 {
            return Err(LaneError::UnsupportedChannels {
                expected: 3,
                actual: self.channels,
            });
        }
        Ok(())
    }
}
