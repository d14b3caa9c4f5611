//! Core types for frame encoding.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame::FourCc;

/// Errors that can occur while encoding a frame.
///
/// Both kinds indicate that the encode cannot be completed; neither is worth
/// retrying with the same input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The source frame declares a pixel layout the CPU encoder cannot read.
    #[error("Unsupported input format for CPU encoder: {0}")]
    UnsupportedFormat(FourCc),

    /// An intermediate buffer or the destination frame could not grow.
    #[error("Out of memory during encoding")]
    OutOfMemory,
}

impl From<EncodeError> for io::Error {
    fn from(err: EncodeError) -> Self {
        let kind = match err {
            EncodeError::UnsupportedFormat(_) => io::ErrorKind::InvalidInput,
            EncodeError::OutOfMemory => io::ErrorKind::OutOfMemory,
        };
        io::Error::new(kind, err)
    }
}

/// Allocate a zero-filled buffer, reporting allocation failure instead of
/// aborting.
pub(crate) fn try_alloc_zeroed(len: usize) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| EncodeError::OutOfMemory)?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Default JPEG quality, a good balance for live MJPEG streams.
pub const DEFAULT_QUALITY: u8 = 80;

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// JPEG quality (0-100, higher is larger and more faithful)
    pub quality: u8,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

impl EncoderConfig {
    /// Create a config, capping quality at 100.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.min(100),
        }
    }
}

/// Colour space of the scanlines handed to the compressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorSpace {
    /// Three 8-bit components per pixel, R G B.
    #[default]
    Rgb,
}

impl ColorSpace {
    /// Number of input components per pixel.
    pub fn components(self) -> usize {
        match self {
            ColorSpace::Rgb => 3,
        }
    }

    /// Convert to the image crate's colour type.
    pub fn to_color_type(self) -> image::ExtendedColorType {
        match self {
            ColorSpace::Rgb => image::ExtendedColorType::Rgb8,
        }
    }
}

/// Compressor configuration for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressParams {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels (number of scanlines to feed).
    pub height: u32,
    /// Input colour space; fixes the component count at 3.
    pub color_space: ColorSpace,
    /// Requested quality, 0-100. Clamped to 1-100 by the compressor.
    pub quality: u8,
}

impl CompressParams {
    /// Parameters for an RGB image.
    pub fn rgb(width: u32, height: u32, quality: u8) -> Self {
        Self {
            width,
            height,
            color_space: ColorSpace::Rgb,
            quality,
        }
    }

    /// Number of input components per pixel.
    pub fn input_components(&self) -> usize {
        self.color_space.components()
    }

    /// Bytes in one input scanline.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.input_components()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::fourcc;

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::UnsupportedFormat(fourcc::JPEG);
        assert_eq!(err.to_string(), "Unsupported input format for CPU encoder: JPEG");

        let err = EncodeError::OutOfMemory;
        assert_eq!(err.to_string(), "Out of memory during encoding");
    }

    #[test]
    fn test_encode_error_into_io_error() {
        let io_err: io::Error = EncodeError::OutOfMemory.into();
        assert_eq!(io_err.kind(), io::ErrorKind::OutOfMemory);

        let inner = io_err
            .get_ref()
            .and_then(|e| e.downcast_ref::<EncodeError>());
        assert_eq!(inner, Some(&EncodeError::OutOfMemory));
    }

    #[test]
    fn test_try_alloc_zeroed() {
        let buf = try_alloc_zeroed(4096).unwrap();
        assert_eq!(buf.len(), 4096);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_try_alloc_zeroed_reports_oom() {
        assert_eq!(try_alloc_zeroed(usize::MAX), Err(EncodeError::OutOfMemory));
    }

    #[test]
    fn test_encoder_config_default_and_clamp() {
        assert_eq!(EncoderConfig::default().quality, 80);
        assert_eq!(EncoderConfig::new(250).quality, 100);
        assert_eq!(EncoderConfig::new(0).quality, 0);
    }

    #[test]
    fn test_compress_params_row_bytes() {
        let params = CompressParams::rgb(640, 480, 90);
        assert_eq!(params.input_components(), 3);
        assert_eq!(params.row_bytes(), 1920);
        assert_eq!(params.color_space.to_color_type(), image::ExtendedColorType::Rgb8);
    }
}
