#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Memory allocators for image buffers.
pub mod allocator;

/// Error types for the image module.
pub mod error;

/// image representation for computer vision purposes.
pub mod image;

/// Image operations that work on whole buffers.
pub mod ops;

pub use crate::allocator::{CpuAllocator, ImageAllocator};
pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
