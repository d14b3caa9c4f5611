//! Frame model for the encoder.
//!
//! This module provides:
//! - [`FourCc`] pixel format codes as delivered by the capture layer
//! - [`PixelFormat`], the closed set of layouts the CPU encoder understands
//! - [`Frame`], used both for raw source frames and encoded output
//!
//! Frames are owned by the caller. Source frames are only read; destination
//! frames are grown through [`Frame::append_data`].

pub mod fourcc;
mod types;

pub use fourcc::{FourCc, ParseFourCcError};
pub use types::{ChromaSubsampling, Frame, PixelFormat};
