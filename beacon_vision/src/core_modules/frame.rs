// THEORY:
// A `Frame` is what the capture collaborator hands us: a rectangular buffer of
// packed pixels with a declared width, height and encoding. It is a "dumb" data
// container plus the input contract. The pipeline never writes into it; label
// scratch lives in a separately typed buffer owned by the locator, so pixel-format
// semantics and label-ID semantics never alias under one storage type.
//
// The encoding is declared rather than inferred. Only packed RGB565 is processed;
// the other formats exist so a mis-declared buffer can be rejected up front with a
// descriptive error instead of being silently misread.

use crate::core_modules::pixel::pixel::{BYTES_PER_PIXEL, ByteOrder, Packed, Pixel};
use crate::error::{LocateError, LocateResult};
use std::fmt;

/// The declared encoding of a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 16-bit packed 5/6/5 RGB in the given byte order. The only accepted format.
    Rgb565(ByteOrder),
    Rgb888,
    Rgba8888,
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Rgb565(ByteOrder::Little) => write!(f, "RGB565 (little-endian)"),
            PixelFormat::Rgb565(ByteOrder::Big) => write!(f, "RGB565 (big-endian)"),
            PixelFormat::Rgb888 => write!(f, "RGB888"),
            PixelFormat::Rgba8888 => write!(f, "RGBA8888"),
        }
    }
}

/// A single captured frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The width of the frame in pixels.
    pub width: u32,
    /// The height of the frame in pixels.
    pub height: u32,
    /// The declared encoding of `data`.
    pub format: PixelFormat,
    /// Row-major pixel bytes.
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format,
            data,
        }
    }

    /// Builds an RGB565 frame from already packed words.
    pub fn rgb565(width: u32, height: u32, order: ByteOrder, packed: &[Packed]) -> Self {
        let mut data = Vec::with_capacity(packed.len() * BYTES_PER_PIXEL);
        for &word in packed {
            data.extend_from_slice(&order.write(word));
        }
        Self::new(width, height, PixelFormat::Rgb565(order), data)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Checks the input contract. Returns the byte order on success.
    pub fn validate(&self) -> LocateResult<ByteOrder> {
        if self.width == 0 || self.height == 0 || self.data.is_empty() {
            return Err(LocateError::EmptyFrame {
                width: self.width,
                height: self.height,
                len: self.data.len(),
            });
        }

        let order = match self.format {
            PixelFormat::Rgb565(order) => order,
            other => return Err(LocateError::UnsupportedEncoding(other.to_string())),
        };

        // Dimensions near u32::MAX overflow usize on 32-bit targets.
        let expected = (self.width as u64)
            .checked_mul(self.height as u64)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL as u64))
            .and_then(|bytes| usize::try_from(bytes).ok());
        match expected {
            Some(expected) if expected == self.data.len() => {}
            _ => {
                return Err(LocateError::BufferSizeMismatch {
                    expected: expected.unwrap_or(usize::MAX),
                    actual: self.data.len(),
                });
            }
        }

        Ok(order)
    }

    /// Iterates the packed words in raster order. Call `validate` first; a
    /// non-RGB565 frame yields its bytes reinterpreted as little-endian pairs.
    pub fn packed_pixels(&self) -> impl Iterator<Item = Packed> + '_ {
        let order = match self.format {
            PixelFormat::Rgb565(order) => order,
            _ => ByteOrder::Little,
        };
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(move |pair| order.read([pair[0], pair[1]]))
    }

    /// Decoded pixel at (x, y), if inside the frame.
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let pair = self.data.get(index..index + BYTES_PER_PIXEL)?;
        let order = match self.format {
            PixelFormat::Rgb565(order) => order,
            _ => return None,
        };
        Some(Pixel::from_packed(order.read([pair[0], pair[1]])))
    }
}
