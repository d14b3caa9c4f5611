//! Four-character pixel format codes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A four-character code identifying a pixel layout, packed little-endian
/// into a `u32` the same way V4L2 does it.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; 4]);

/// YUYV 4:2:2 packed (`Y0 U Y1 V`)
pub const YUYV: FourCc = FourCc(*b"YUYV");

/// UYVY 4:2:2 packed (`U Y0 V Y1`)
pub const UYVY: FourCc = FourCc(*b"UYVY");

/// RGB565, one little-endian 16-bit word per pixel
pub const RGBP: FourCc = FourCc(*b"RGBP");

/// RGB 24-bit (8 bits per channel, no alpha)
pub const RGB3: FourCc = FourCc(*b"RGB3");

/// BGR 24-bit (8 bits per channel, no alpha)
pub const BGR3: FourCc = FourCc(*b"BGR3");

/// NV12 4:2:0 semi-planar (Y plane, interleaved UV plane)
pub const NV12: FourCc = FourCc(*b"NV12");

/// NV16 4:2:2 semi-planar
pub const NV16: FourCc = FourCc(*b"NV16");

/// NV24 4:4:4 semi-planar
pub const NV24: FourCc = FourCc(*b"NV24");

/// Baseline JPEG bytestream
pub const JPEG: FourCc = FourCc(*b"JPEG");

impl FourCc {
    pub const fn from_u32(code: u32) -> Self {
        Self(code.to_le_bytes())
    }

    pub const fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

impl From<u32> for FourCc {
    fn from(code: u32) -> Self {
        Self::from_u32(code)
    }
}

impl From<FourCc> for u32 {
    fn from(fourcc: FourCc) -> Self {
        fourcc.to_u32()
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '?'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc({self})")
    }
}

/// Error returned when a string is not a valid four-character code.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("FourCC must be exactly four ASCII characters, got {0:?}")]
pub struct ParseFourCcError(pub String);

impl FromStr for FourCc {
    type Err = ParseFourCcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 4] = s
            .as_bytes()
            .try_into()
            .map_err(|_| ParseFourCcError(s.to_string()))?;
        if !bytes.is_ascii() {
            return Err(ParseFourCcError(s.to_string()));
        }
        Ok(Self(bytes))
    }
}
