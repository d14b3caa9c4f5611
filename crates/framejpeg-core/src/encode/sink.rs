//! Output sink: routes compressed bytes from the JPEG engine into a frame.
//!
//! The engine never writes to the destination frame directly. Bytes are staged
//! in a fixed block of [`STAGING_BLOCK_SIZE`] bytes; every time the block fills
//! it is drained onto the end of the destination, and at the end of the image
//! whatever is left in the block is appended.

use std::io;

use super::types::{try_alloc_zeroed, EncodeError};
use crate::frame::Frame;

/// Size of the staging block the engine writes into.
pub const STAGING_BLOCK_SIZE: usize = 4096;

/// Destination for compressed output.
///
/// Lifecycle: `initialize` once, `stage` any number of times (which calls
/// `flush` whenever the staging block is full), then `finalize` once.
pub trait Sink {
    /// Reset the staging block at the start of an image.
    fn initialize(&mut self);

    /// Append compressed bytes to the staging block.
    fn stage(&mut self, bytes: &[u8]) -> Result<(), EncodeError>;

    /// Drain the staging block into the destination.
    fn flush(&mut self) -> Result<(), EncodeError>;

    /// Append the bytes still staged at the end of the image.
    fn finalize(&mut self) -> Result<(), EncodeError>;
}

/// A [`Sink`] that appends to a [`Frame`]'s data buffer.
pub struct FrameSink<'f> {
    frame: &'f mut Frame,
    block: Vec<u8>,
    free_in_block: usize,
    flushes: usize,
}

impl<'f> FrameSink<'f> {
    /// Bind a sink to `frame`, discarding any bytes it currently holds.
    ///
    /// The frame's allocation is kept so repeated encodes reuse it.
    pub fn new(frame: &'f mut Frame) -> Result<Self, EncodeError> {
        let block = try_alloc_zeroed(STAGING_BLOCK_SIZE)?;
        frame.data.clear();
        Ok(Self {
            frame,
            block,
            free_in_block: STAGING_BLOCK_SIZE,
            flushes: 0,
        })
    }

    fn staged(&self) -> usize {
        STAGING_BLOCK_SIZE - self.free_in_block
    }

    /// Number of times a full staging block was drained.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    /// The destination frame.
    pub fn frame(&self) -> &Frame {
        self.frame
    }
}

impl Sink for FrameSink<'_> {
    fn initialize(&mut self) {
        self.free_in_block = STAGING_BLOCK_SIZE;
    }

    fn stage(&mut self, mut bytes: &[u8]) -> Result<(), EncodeError> {
        while !bytes.is_empty() {
            let start = self.staged();
            let n = bytes.len().min(self.free_in_block);
            self.block[start..start + n].copy_from_slice(&bytes[..n]);
            self.free_in_block -= n;
            bytes = &bytes[n..];

            if self.free_in_block == 0 {
                self.flush()?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), EncodeError> {
        // A full block when called from `stage`
        let staged = self.staged();
        self.frame.append_data(&self.block[..staged])?;
        self.free_in_block = STAGING_BLOCK_SIZE;
        self.flushes += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), EncodeError> {
        let staged = self.staged();
        self.frame.append_data(&self.block[..staged])?;
        self.free_in_block = STAGING_BLOCK_SIZE;
        Ok(())
    }
}

/// Adapts a [`Sink`] to [`io::Write`] so a push-style encoder can drive it.
///
/// `io::Write::flush` is a no-op: the staging block is drained when it fills
/// and on `finalize`, never on the writer's request.
pub struct SinkWriter<'s, S: Sink + ?Sized> {
    sink: &'s mut S,
}

impl<'s, S: Sink + ?Sized> SinkWriter<'s, S> {
    /// Wrap `sink` for the duration of one encode.
    pub fn new(sink: &'s mut S) -> Self {
        Self { sink }
    }
}

impl<S: Sink + ?Sized> io::Write for SinkWriter<'_, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.stage(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
