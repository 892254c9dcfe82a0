use std::path::Path;

use crate::bmp::{decode_bmp, BmpImage};
use crate::error::IoError;

/// Reads a BMP image from the given file path.
///
/// # Arguments
///
/// * `file_path` - The path to the BMP image.
///
/// # Returns
///
/// The BMP container, with its headers kept for writing results back.
///
/// # Example
///
/// ```no_run
/// use convkit_image::CpuAllocator;
/// use convkit_io::functional as F;
///
/// let bmp = F::read_image_bmp("image.bmp").unwrap();
/// let image = bmp.decode_rgb8(CpuAllocator).unwrap();
///
/// assert_eq!(image.num_channels(), 3);
/// ```
pub fn read_image_bmp(file_path: impl AsRef<Path>) -> Result<BmpImage, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists and is a BMP
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if file_path
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("bmp"))
    {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)?;
    let bmp = decode_bmp(&bytes)?;
    log::debug!("read {} from {}", bmp.size(), file_path.display());

    Ok(bmp)
}

/// Writes the given BMP container to the given file path.
///
/// # Arguments
///
/// * `file_path` - The path to the BMP image.
/// * `bmp` - The container holding the headers and pixels to write.
pub fn write_image_bmp(file_path: impl AsRef<Path>, bmp: &BmpImage) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    std::fs::write(file_path, bmp.to_bytes())?;
    log::debug!("wrote {} to {}", bmp.size(), file_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use convkit_image::{CpuAllocator, Image};

    #[test]
    fn read_write_bmp() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("dog.bmp");

        let image = Image::<u8, 3>::new(
            [4, 3].into(),
            (0..36).map(|v| v * 7).collect(),
            CpuAllocator,
        )?;
        write_image_bmp(&file_path, &BmpImage::from_rgb8(&image)?)?;

        let bmp = read_image_bmp(&file_path)?;
        assert_eq!(bmp.size().width, 4);
        assert_eq!(bmp.size().height, 3);
        assert_eq!(bmp.decode_rgb8(CpuAllocator)?, image);

        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_bmp("does/not/exist.bmp");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_wrong_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.png");
        std::fs::write(&file_path, b"not a png")?;

        let res = read_image_bmp(&file_path);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));

        Ok(())
    }

    #[test]
    fn read_uppercase_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("IMAGE.BMP");

        let image = Image::<u8, 3>::from_size_val([3, 3].into(), 9, CpuAllocator)?;
        write_image_bmp(&file_path, &BmpImage::from_rgb8(&image)?)?;
        assert_eq!(read_image_bmp(&file_path)?.size(), image.size());

        Ok(())
    }
}
