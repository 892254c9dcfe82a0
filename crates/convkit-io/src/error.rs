/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] convkit_image::ImageError),

    /// The BMP codec rejected the data.
    #[error("Failed to decode or encode the BMP image. {0}")]
    BmpCodecError(#[from] image::ImageError),

    /// The data ends before the header or the pixel array is complete.
    #[error("Truncated BMP data: needed {0} bytes, got {1}")]
    TruncatedBmp(usize, usize),

    /// The BMP uses a layout that is not an uncompressed 24-bit raster.
    #[error("Unsupported BMP: {0}")]
    UnsupportedBmp(String),

    /// The image to encode does not match the size of the container.
    #[error("Image size ({0}x{1}) does not match the BMP size ({2}x{3})")]
    ImageSizeMismatch(usize, usize, usize, usize),
}
