//! Filter operations
//!
//! This module provides the fixed 3x3 filters and the interior-only traversal
//! that drives them.

/// Filter kernels
pub mod kernels;

/// Read-only 3x3 pixel neighborhoods
mod neighborhood;
pub use neighborhood::*;

/// Per-pixel kernel operations
mod pixel_ops;
pub use pixel_ops::*;

/// Interior convolution and filter dispatch
mod convolution;
pub use convolution::*;
