#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use convkit_image as image;

#[doc(inline)]
pub use convkit_imgproc as imgproc;

#[doc(inline)]
pub use convkit_io as io;

/// Error types for passes and pipelines.
pub mod error;

/// One filter applied to a BMP container in place.
pub mod pass;

/// Blur-then-sharpen pipeline producing two artifacts.
pub mod pipeline;

pub use crate::error::PipelineError;
pub use crate::pass::convolution_pass;
pub use crate::pipeline::{BlurMode, Pipeline, PipelineConfig};
