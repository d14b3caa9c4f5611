//! Frame compression: dispatch on the source layout, convert to RGB, feed the
//! JPEG compressor, and fill in the destination frame.

use tracing::debug;

use super::engine::JpegCompressor;
use super::sink::{FrameSink, Sink};
use super::types::{try_alloc_zeroed, CompressParams, EncodeError, EncoderConfig};
use crate::convert::{
    bgr24_row_to_rgb24, nv12_to_rgb24, nv16_to_rgb24, nv24_to_rgb24, rgb565_row_to_rgb24,
    uyvy_row_to_rgb24, yuyv_row_to_rgb24, PlaneConverter, RowConverter,
};
use crate::frame::{fourcc, Frame, PixelFormat};

/// Compress `src` into `dest` as a baseline JPEG.
///
/// `dest` receives the source's dimensions and metadata, the `JPEG` format
/// code, and the compressed bytes. Its allocation is reused across calls.
///
/// # Panics
///
/// Panics if the source format is not supported or memory runs out. Use
/// [`try_compress`] to handle those cases. Also panics, like
/// [`try_compress`], on a packed 4:2:2 frame with an odd width.
pub fn compress(src: &Frame, dest: &mut Frame, quality: u8) {
    if let Err(err) = try_compress(src, dest, quality) {
        panic!("CPU JPEG encoder failed: {err}");
    }
}

/// Compress `src` into `dest`, reporting failures instead of panicking.
///
/// An unsupported source format is detected before `dest` is touched. After
/// an out-of-memory failure `dest` holds partial output and must not be used.
///
/// # Panics
///
/// Panics if `src` is YUYV or UYVY with an odd width. Those layouts carry
/// whole pixel pairs, so an odd width cannot describe a valid row.
pub fn try_compress(src: &Frame, dest: &mut Frame, quality: u8) -> Result<(), EncodeError> {
    let format = PixelFormat::try_from(src.format)?;
    assert!(
        !format.is_packed_422() || src.width % 2 == 0,
        "{} frame width must be even, got {}",
        src.format,
        src.width
    );

    Frame::encoding_begin(src, dest, fourcc::JPEG);

    let flushes = {
        let mut sink = FrameSink::new(dest)?;
        let params = CompressParams::rgb(src.width, src.height, quality);
        let mut jpeg = JpegCompressor::start(params, &mut sink)?;

        match format {
            PixelFormat::Yuyv => write_converted_rows(&mut jpeg, src, format, yuyv_row_to_rgb24)?,
            PixelFormat::Uyvy => write_converted_rows(&mut jpeg, src, format, uyvy_row_to_rgb24)?,
            PixelFormat::Rgb565 => {
                write_converted_rows(&mut jpeg, src, format, rgb565_row_to_rgb24)?
            }
            PixelFormat::Bgr24 => write_converted_rows(&mut jpeg, src, format, bgr24_row_to_rgb24)?,
            PixelFormat::Rgb24 => write_rows(&mut jpeg, src)?,
            PixelFormat::Nv12 => write_converted_plane(&mut jpeg, src, nv12_to_rgb24)?,
            PixelFormat::Nv16 => write_converted_plane(&mut jpeg, src, nv16_to_rgb24)?,
            PixelFormat::Nv24 => write_converted_plane(&mut jpeg, src, nv24_to_rgb24)?,
        }

        jpeg.finish()?;
        sink.flush_count()
    };

    dest.encoding_end();

    debug!(
        format = %src.format,
        width = src.width,
        height = src.height,
        quality,
        bytes = dest.used(),
        flushes,
        "frame compressed"
    );

    Ok(())
}

/// Packed layouts: convert each source row into a reusable line buffer.
fn write_converted_rows<S: Sink>(
    jpeg: &mut JpegCompressor<'_, '_, S>,
    frame: &Frame,
    format: PixelFormat,
    convert: RowConverter,
) -> Result<(), EncodeError> {
    let width = frame.width as usize;
    let row_bytes = width * format.bytes_per_pixel();
    let stride = frame.row_stride();
    let mut line = try_alloc_zeroed(width * 3)?;

    while jpeg.next_scanline() < frame.height {
        let start = jpeg.next_scanline() as usize * stride;
        convert(&frame.data[start..start + row_bytes], &mut line);
        jpeg.write_scanlines(&[&line])?;
    }
    Ok(())
}

/// RGB24: an unpadded frame is lent to the compressor as-is. Padded rows
/// have to be gathered into contiguous scanline storage first.
fn write_rows<'p, S: Sink>(
    jpeg: &mut JpegCompressor<'_, 'p, S>,
    frame: &'p Frame,
) -> Result<(), EncodeError> {
    if frame.padding() == 0 {
        jpeg.write_plane(frame.data.as_slice());
        return Ok(());
    }

    let row_bytes = frame.width as usize * 3;
    let stride = frame.row_stride();

    while jpeg.next_scanline() < frame.height {
        let start = jpeg.next_scanline() as usize * stride;
        jpeg.write_scanlines(&[&frame.data[start..start + row_bytes]])?;
    }
    Ok(())
}

/// Semi-planar layouts: convert the whole frame once, then hand the plane
/// over to the compressor as its scanline storage.
fn write_converted_plane<S: Sink>(
    jpeg: &mut JpegCompressor<'_, '_, S>,
    frame: &Frame,
    convert: PlaneConverter,
) -> Result<(), EncodeError> {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let mut rgb = try_alloc_zeroed(width * 3 * height)?;

    convert(&frame.data, width, height, frame.row_stride(), &mut rgb);

    jpeg.write_plane(rgb);
    Ok(())
}

/// A configured CPU encoder.
///
/// Holds no per-frame state, so one instance can be shared between threads
/// encoding disjoint frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuEncoder {
    config: EncoderConfig,
}

impl CpuEncoder {
    /// Create an encoder with the given settings.
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// The settings this encoder applies to every frame.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Compress with the configured quality. Panics on failure, like
    /// [`compress`].
    pub fn compress(&self, src: &Frame, dest: &mut Frame) {
        compress(src, dest, self.config.quality);
    }

    /// Compress with the configured quality, reporting failures.
    pub fn try_compress(&self, src: &Frame, dest: &mut Frame) -> Result<(), EncodeError> {
        try_compress(src, dest, self.config.quality)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
