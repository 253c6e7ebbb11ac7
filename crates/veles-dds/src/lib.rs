//! DDS texture file decoding.
//!
//! This crate parses DirectDraw Surface containers and decompresses
//! DXT5 (BC3) payloads into RGBA8 pixel buffers, for use as a
//! format-decoding backend in image viewers.
//!
//! # Example
//!
//! ```no_run
//! use veles_dds::DdsImage;
//!
//! let image = DdsImage::decode_file("texture.dds", false)?;
//! println!("{}x{}, {} bytes", image.width(), image.height(), image.pixels().len());
//! # Ok::<(), veles_dds::Error>(())
//! ```
//!
//! Header inspection without decoding goes through [`DdsFile::parse`], which
//! validates the container and exposes dimensions and format fields.

mod bc3;
mod decode;
mod error;
mod header;

pub use decode::{DdsFile, DdsImage, COMPONENTS};
pub use error::{Error, Result};
pub use header::{DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
