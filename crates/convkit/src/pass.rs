use convkit_image::{ImageAllocator, ImageError};
use convkit_imgproc::filter::{kernels::KERNEL_SIZE, Filter3};
use convkit_io::BmpImage;

use crate::error::PipelineError;

/// Apply one filter to a BMP container in place.
///
/// The pixels are decoded into a working image in the row order of the file, a
/// snapshot of it is taken as the read-only source, the filter overwrites the
/// interior of the working image and the result is encoded back into `bitmap`.
/// Border pixels keep their values and the container headers are left untouched.
///
/// Both scratch images are requested from `alloc` and dropped before returning.
///
/// # Arguments
///
/// * `bitmap` - The container to filter.
/// * `filter` - The filter to apply.
/// * `alloc` - The allocator for the scratch images.
///
/// # Errors
///
/// Fails if the raster is smaller than 3x3 or if a scratch image cannot be
/// allocated. In both cases `bitmap` is not modified.
pub fn convolution_pass<A: ImageAllocator>(
    bitmap: &mut BmpImage,
    filter: Filter3,
    alloc: A,
) -> Result<(), PipelineError> {
    let size = bitmap.size();
    if size.width < KERNEL_SIZE || size.height < KERNEL_SIZE {
        return Err(ImageError::ImageTooSmall(size.width, size.height, KERNEL_SIZE).into());
    }

    let mut working = bitmap.decode_rgb8_stored(alloc)?;
    let source = working.try_clone()?;

    filter.apply(&source, &mut working)?;
    bitmap.encode_rgb8_stored(&working)?;

    log::debug!("{filter} pass done on a {size} image");

    Ok(())
}
