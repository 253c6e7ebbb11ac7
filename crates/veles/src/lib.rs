//! Veles - DDS texture decoding library.
//!
//! This crate provides a unified interface to the Veles library ecosystem
//! for turning DDS texture files into displayable pixel data.
//!
//! # Crates
//!
//! - [`veles_common`] - Common utilities (bounds-checked binary reading)
//! - [`veles_dds`] - DDS container parsing and DXT5 decompression
//!
//! # Example
//!
//! ```no_run
//! use veles::prelude::*;
//!
//! // Decode a DXT5-compressed texture, flipped for bottom-up consumers
//! let image = DdsImage::decode_file("texture.dds", true)?;
//! println!("{}x{} RGBA", image.width(), image.height());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use veles_common as common;
pub use veles_dds as dds;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use veles_common::BinaryReader;
    pub use veles_dds::{DdsFile, DdsHeader, DdsImage, DdsPixelFormat, FourCC};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
