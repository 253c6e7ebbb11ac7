//! Common utilities for Veles.
//!
//! This crate provides the foundational pieces shared by the Veles crates:
//!
//! - [`BinaryReader`] - Bounds-checked little-endian reading from byte slices
//! - [`Error`] / [`Result`] - Shared error vocabulary for binary parsing

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
