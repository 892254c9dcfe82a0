use convkit_image::ImageError;
use convkit_io::IoError;

/// An error type for convolution passes and pipelines.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The image violates a precondition of the filters or could not be allocated.
    #[error("Image error. {0}")]
    Image(#[from] ImageError),

    /// Reading or writing a container failed.
    #[error("I/O error. {0}")]
    Io(#[from] IoError),

    /// The blur mode could not be parsed.
    #[error("Unknown blur mode: {0}")]
    InvalidBlurMode(String),
}
