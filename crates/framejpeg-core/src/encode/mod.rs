//! JPEG encoding of raw camera frames.
//!
//! This module provides:
//! - [`compress`] / [`try_compress`]: encode a raw [`Frame`](crate::frame::Frame)
//!   into a JPEG destination frame
//! - [`CpuEncoder`]: the same operation bound to an [`EncoderConfig`]
//! - The [`Sink`] seam that carries compressed bytes into the destination, and
//!   the scanline-fed [`JpegCompressor`] that writes to it
//!
//! # Architecture
//!
//! Every call is synchronous and owns all of its scratch memory (line buffer,
//! RGB plane, staging block, compressor storage). No state survives between
//! calls, so encodes of disjoint frames may run in parallel.
//!
//! # Examples
//!
//! ```ignore
//! use framejpeg_core::encode::compress;
//! use framejpeg_core::frame::{fourcc, Frame};
//!
//! let src = Frame::from_raw(fourcc::YUYV, 640, 480, 0, vec![128; 640 * 480 * 2]);
//! let mut dest = Frame::new();
//! compress(&src, &mut dest, 80);
//! println!("Encoded {} bytes", dest.used());
//! ```

mod compress;
mod engine;
mod sink;
mod types;

pub use compress::{compress, try_compress, CpuEncoder};
pub use engine::JpegCompressor;
pub use sink::{FrameSink, Sink, SinkWriter, STAGING_BLOCK_SIZE};
pub use types::{ColorSpace, CompressParams, EncodeError, EncoderConfig, DEFAULT_QUALITY};
