#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`](error::IoError) variants for file access and container
/// decoding/encoding failures.
pub mod error;

/// Uncompressed 24-bit BMP container.
///
/// Decode a BMP into an RGB image and write the processed pixels back while
/// keeping every header byte of the original file.
pub mod bmp;

/// High-level image reading and writing functions.
pub mod functional;

pub use crate::bmp::BmpImage;
pub use crate::error::IoError;
