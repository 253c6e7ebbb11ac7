//! Error types for DDS decoding.

use thiserror::Error;

use crate::header::FourCC;

/// Errors that can occur when decoding DDS files.
///
/// Each condition that rejects an input gets its own variant, so callers can
/// distinguish a malformed container from a format this crate does not
/// decode.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] veles_common::Error),

    /// Input shorter than the fixed magic + header region.
    #[error("file too small for a DDS header: {len} bytes")]
    TooSmall { len: usize },

    /// Invalid DDS magic.
    #[error("not a DDS file: expected 'DDS ' magic, got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Header size field does not match the fixed layout.
    #[error("invalid DDS header size: expected 124, got {0}")]
    InvalidHeaderSize(u32),

    /// Header is missing one of the caps/width/height/pixel-format flags.
    #[error("DDS header missing required flags (got {flags:#010x})")]
    MissingHeaderFlags { flags: u32 },

    /// Surface caps do not include the texture capability.
    #[error("DDS caps do not describe a texture")]
    NotATexture,

    /// Compressed with a four-cc this crate does not decode.
    #[error("unsupported compression format: {0}")]
    UnsupportedFourCc(FourCC),

    /// Pixel format is not four-cc compressed (plain RGB, YUV, luminance).
    #[error("unsupported pixel format (flags {flags:#010x})")]
    UnsupportedPixelFormat { flags: u32 },

    /// Payload shorter than the block grid requires.
    #[error("compressed payload truncated: expected {expected} bytes, got {actual}")]
    TruncatedPayload { expected: usize, actual: usize },
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
