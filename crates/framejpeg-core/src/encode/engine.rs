//! Scanline-fed JPEG compressor on top of the `image` crate's encoder.
//!
//! The `image` JPEG encoder consumes a whole image at once, so scanlines are
//! collected into image-scoped storage as they arrive and entropy coding runs
//! in [`JpegCompressor::finish`]. A caller that already holds the complete
//! RGB plane hands it over with [`JpegCompressor::write_plane`] instead, which
//! borrows or adopts the buffer without copying it. Compressed bytes go to a
//! [`Sink`] through a [`SinkWriter`].

use std::borrow::Cow;
use std::io;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageEncoder, ImageError};
use tracing::warn;

use super::sink::{Sink, SinkWriter};
use super::types::{CompressParams, EncodeError};

/// Baseline JPEG compressor accepting scanlines in top-to-bottom order.
///
/// `'p` is the lifetime of a plane lent through [`write_plane`](Self::write_plane).
pub struct JpegCompressor<'s, 'p, S: Sink> {
    params: CompressParams,
    sink: &'s mut S,
    samples: Cow<'p, [u8]>,
    image_len: usize,
    next_scanline: u32,
}

impl<'s, 'p, S: Sink> JpegCompressor<'s, 'p, S> {
    /// Configure a compressor and initialize `sink` for a new image.
    ///
    /// Scanline storage is reserved on the first [`write_scanlines`](Self::write_scanlines)
    /// call, so a plane handed over whole never pays for a second buffer.
    pub fn start(params: CompressParams, sink: &'s mut S) -> Result<Self, EncodeError> {
        debug_assert!(
            params.width > 0 && params.height > 0,
            "cannot compress a {}x{} image",
            params.width,
            params.height
        );

        let image_len = params
            .row_bytes()
            .checked_mul(params.height as usize)
            .ok_or(EncodeError::OutOfMemory)?;

        sink.initialize();

        Ok(Self {
            params,
            sink,
            samples: Cow::Owned(Vec::new()),
            image_len,
            next_scanline: 0,
        })
    }

    /// Number of scanlines accepted so far.
    pub fn next_scanline(&self) -> u32 {
        self.next_scanline
    }

    /// Scanline bytes accepted so far, tightly packed.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Feed scanlines. Each row must hold at least `width * 3` bytes;
    /// anything beyond that is ignored.
    ///
    /// Returns the number of rows consumed. Rows past the image height are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::OutOfMemory`] if the scanline storage cannot be
    /// reserved.
    pub fn write_scanlines(&mut self, rows: &[&[u8]]) -> Result<u32, EncodeError> {
        let remaining = (self.params.height - self.next_scanline) as usize;
        if rows.len() > remaining {
            warn!(
                supplied = rows.len(),
                remaining, "ignoring scanlines past the end of the image"
            );
        }
        if rows.is_empty() || remaining == 0 {
            return Ok(0);
        }

        let row_bytes = self.params.row_bytes();
        let samples = self.samples.to_mut();
        if samples.capacity() < self.image_len {
            samples
                .try_reserve_exact(self.image_len - samples.len())
                .map_err(|_| EncodeError::OutOfMemory)?;
        }

        let mut consumed = 0;
        for row in rows.iter().take(remaining) {
            // Capacity covers the whole image, so this never reallocates
            samples.extend_from_slice(&row[..row_bytes]);
            consumed += 1;
        }

        self.next_scanline += consumed;
        Ok(consumed)
    }

    /// Hand over the complete image as one tightly packed RGB plane.
    ///
    /// A borrowed plane is encoded in place; an owned one becomes the
    /// compressor's storage. Bytes past `width * 3 * height` are ignored.
    /// Returns the number of scanlines the plane supplied.
    ///
    /// # Panics
    ///
    /// Panics if scanlines were already written or the plane is too short.
    pub fn write_plane(&mut self, plane: impl Into<Cow<'p, [u8]>>) -> u32 {
        assert_eq!(
            self.next_scanline, 0,
            "a plane must supply every scanline of the image"
        );

        let plane = plane.into();
        assert!(
            plane.len() >= self.image_len,
            "plane holds {} bytes, the image needs {}",
            plane.len(),
            self.image_len
        );

        self.samples = match plane {
            Cow::Borrowed(bytes) => Cow::Borrowed(&bytes[..self.image_len]),
            Cow::Owned(mut bytes) => {
                bytes.truncate(self.image_len);
                Cow::Owned(bytes)
            }
        };
        self.next_scanline = self.params.height;
        self.next_scanline
    }

    /// Entropy-code the collected scanlines and finalize the sink.
    ///
    /// # Panics
    ///
    /// Panics if fewer than `height` scanlines were written, or if the engine
    /// rejects the configuration.
    pub fn finish(self) -> Result<(), EncodeError> {
        let Self {
            params,
            sink,
            samples,
            next_scanline,
            ..
        } = self;

        assert_eq!(
            next_scanline, params.height,
            "compression finished after {next_scanline} of {} scanlines",
            params.height
        );

        let quality = params.quality.clamp(1, 100);
        let encoder = JpegEncoder::new_with_quality(SinkWriter::new(&mut *sink), quality);
        encoder
            .write_image(
                &samples,
                params.width,
                params.height,
                params.color_space.to_color_type(),
            )
            .map_err(engine_error)?;

        sink.finalize()
    }
}

/// Map an engine failure onto [`EncodeError`].
///
/// Only sink failures surface as errors; anything else means the compressor
/// was driven outside its contract.
fn engine_error(err: ImageError) -> EncodeError {
    match err {
        ImageError::IoError(io_err) => {
            if let Some(inner) = io_err
                .get_ref()
                .and_then(|e| e.downcast_ref::<EncodeError>())
            {
                return *inner;
            }
            if io_err.kind() == io::ErrorKind::OutOfMemory {
                return EncodeError::OutOfMemory;
            }
            panic!("JPEG engine I/O failure: {io_err}");
        }
        other => panic!("JPEG engine rejected the image: {other}"),
    }
}
