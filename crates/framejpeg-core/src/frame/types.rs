//! Core frame types: pixel layouts and the frame buffer itself.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::fourcc::{self, FourCc};
use crate::encode::EncodeError;

/// Chroma subsampling ratio of a semi-planar layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChromaSubsampling {
    /// One UV pair per 2x2 luma block.
    Yuv420,
    /// One UV pair per 2x1 luma block.
    Yuv422,
    /// One UV pair per luma sample.
    Yuv444,
}

impl ChromaSubsampling {
    /// Horizontal luma samples sharing one UV pair.
    #[inline]
    pub fn horizontal(self) -> usize {
        match self {
            ChromaSubsampling::Yuv420 | ChromaSubsampling::Yuv422 => 2,
            ChromaSubsampling::Yuv444 => 1,
        }
    }

    /// Vertical luma samples sharing one UV pair.
    #[inline]
    pub fn vertical(self) -> usize {
        match self {
            ChromaSubsampling::Yuv420 => 2,
            ChromaSubsampling::Yuv422 | ChromaSubsampling::Yuv444 => 1,
        }
    }
}

/// Source pixel layouts accepted by the CPU encoder.
///
/// The set is closed: anything else arriving as a [`FourCc`] is rejected
/// with [`EncodeError::UnsupportedFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// Packed 4:2:2, `Y0 U Y1 V`
    Yuyv,
    /// Packed 4:2:2, `U Y0 V Y1`
    Uyvy,
    /// 16-bit little-endian RGB 5:6:5
    Rgb565,
    /// 8-bit R G B
    Rgb24,
    /// 8-bit B G R
    Bgr24,
    /// Semi-planar 4:2:0
    Nv12,
    /// Semi-planar 4:2:2
    Nv16,
    /// Semi-planar 4:4:4
    Nv24,
}

impl PixelFormat {
    /// Every supported layout, in declaration order.
    pub const ALL: [PixelFormat; 8] = [
        PixelFormat::Yuyv,
        PixelFormat::Uyvy,
        PixelFormat::Rgb565,
        PixelFormat::Rgb24,
        PixelFormat::Bgr24,
        PixelFormat::Nv12,
        PixelFormat::Nv16,
        PixelFormat::Nv24,
    ];

    /// The FourCC the capture layer tags this layout with.
    pub fn fourcc(self) -> FourCc {
        match self {
            PixelFormat::Yuyv => fourcc::YUYV,
            PixelFormat::Uyvy => fourcc::UYVY,
            PixelFormat::Rgb565 => fourcc::RGBP,
            PixelFormat::Rgb24 => fourcc::RGB3,
            PixelFormat::Bgr24 => fourcc::BGR3,
            PixelFormat::Nv12 => fourcc::NV12,
            PixelFormat::Nv16 => fourcc::NV16,
            PixelFormat::Nv24 => fourcc::NV24,
        }
    }

    /// Bytes per pixel within one row. For semi-planar formats this is the
    /// luma plane only.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Yuyv | PixelFormat::Uyvy | PixelFormat::Rgb565 => 2,
            PixelFormat::Rgb24 | PixelFormat::Bgr24 => 3,
            PixelFormat::Nv12 | PixelFormat::Nv16 | PixelFormat::Nv24 => 1,
        }
    }

    /// Chroma subsampling for semi-planar formats, `None` for packed ones.
    pub fn chroma_subsampling(self) -> Option<ChromaSubsampling> {
        match self {
            PixelFormat::Nv12 => Some(ChromaSubsampling::Yuv420),
            PixelFormat::Nv16 => Some(ChromaSubsampling::Yuv422),
            PixelFormat::Nv24 => Some(ChromaSubsampling::Yuv444),
            _ => None,
        }
    }

    /// Whether rows are made of 4-byte pixel pairs sharing one chroma pair.
    /// Frames in these layouts must have an even width.
    pub fn is_packed_422(self) -> bool {
        matches!(self, PixelFormat::Yuyv | PixelFormat::Uyvy)
    }

    /// Minimum buffer size in bytes for a frame of this format with the given
    /// row stride (`stride` already includes any padding).
    pub fn frame_size(self, width: u32, height: u32, stride: usize) -> usize {
        let height = height as usize;
        let stride = stride.max(width as usize * self.bytes_per_pixel());
        match self.chroma_subsampling() {
            None => stride * height,
            Some(cs) => {
                let chroma_pitch = stride.div_ceil(cs.horizontal()) * 2;
                let chroma_rows = height.div_ceil(cs.vertical());
                stride * height + chroma_pitch * chroma_rows
            }
        }
    }
}

impl TryFrom<FourCc> for PixelFormat {
    type Error = EncodeError;

    fn try_from(code: FourCc) -> Result<Self, Self::Error> {
        PixelFormat::ALL
            .into_iter()
            .find(|format| format.fourcc() == code)
            .ok_or(EncodeError::UnsupportedFormat(code))
    }
}

/// A video frame: raw capture input or encoded output.
///
/// `data.len()` is the number of valid bytes (`used`), `data.capacity()` is
/// what has been allocated so far. Destination frames keep their allocation
/// across encodes and only grow.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Pixel or compressed data. Length is the `used` byte count.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel layout tag.
    pub format: FourCc,
    /// Bytes per row including padding; 0 means tightly packed.
    pub stride: usize,
    /// Whether the capture source was delivering real frames.
    pub online: bool,
    /// Whether this frame is a key frame.
    pub key: bool,
    /// When the frame was grabbed from the capture device.
    pub grab_ts: Option<Instant>,
    /// When encoding into this frame started.
    pub encode_begin_ts: Option<Instant>,
    /// When encoding into this frame finished.
    pub encode_end_ts: Option<Instant>,
}

impl Frame {
    /// Create an empty frame, typically used as an encode destination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty frame with preallocated data capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Wrap raw captured bytes as a source frame.
    ///
    /// # Arguments
    ///
    /// * `format` - Pixel layout of `data`
    /// * `width` - Width in pixels
    /// * `height` - Height in pixels
    /// * `stride` - Bytes per row including padding, or 0 when rows are packed
    /// * `data` - The pixel bytes
    pub fn from_raw(format: FourCc, width: u32, height: u32, stride: usize, data: Vec<u8>) -> Self {
        Self {
            data,
            width,
            height,
            format,
            stride,
            online: true,
            ..Self::default()
        }
    }

    /// Number of valid bytes in `data`.
    #[inline]
    pub fn used(&self) -> usize {
        self.data.len()
    }

    /// Bytes currently allocated for `data`.
    #[inline]
    pub fn allocated(&self) -> usize {
        self.data.capacity()
    }

    /// Bytes per row as laid out in `data`.
    ///
    /// Falls back to the packed row size when `stride` is unset. Formats
    /// without a per-pixel size (such as JPEG) report 0.
    pub fn row_stride(&self) -> usize {
        self.stride.max(self.packed_row_size())
    }

    /// Padding bytes the capture source appended after each pixel row.
    pub fn padding(&self) -> usize {
        self.row_stride() - self.packed_row_size()
    }

    fn packed_row_size(&self) -> usize {
        PixelFormat::try_from(self.format)
            .map(|format| self.width as usize * format.bytes_per_pixel())
            .unwrap_or(0)
    }

    /// Append bytes, growing the buffer on demand.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::OutOfMemory`] when the buffer cannot grow.
    pub fn append_data(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.data
            .try_reserve(bytes.len())
            .map_err(|_| EncodeError::OutOfMemory)?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Prepare `dest` to receive an encoding of `src` in `format`.
    ///
    /// Copies the frame metadata, resets `used` to 0 (the allocation is kept)
    /// and stamps the encode start time.
    pub fn encoding_begin(src: &Frame, dest: &mut Frame, format: FourCc) {
        debug_assert!(src.used() > 0, "source frame holds no data");
        dest.width = src.width;
        dest.height = src.height;
        dest.online = src.online;
        dest.key = src.key;
        dest.grab_ts = src.grab_ts;
        dest.format = format;
        dest.stride = 0;
        dest.data.clear();
        dest.encode_begin_ts = Some(Instant::now());
        dest.encode_end_ts = None;
    }

    /// Stamp the encode end time on a finished destination frame.
    pub fn encoding_end(&mut self) {
        debug_assert!(self.used() > 0, "encoder produced no data");
        self.encode_end_ts = Some(Instant::now());
    }

    /// Time spent encoding into this frame, once both stamps are present.
    pub fn encode_duration(&self) -> Option<Duration> {
        match (self.encode_begin_ts, self.encode_end_ts) {
            (Some(begin), Some(end)) => Some(end.saturating_duration_since(begin)),
            _ => None,
        }
    }
}
