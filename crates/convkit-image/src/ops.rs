use crate::{allocator::ImageAllocator, Image, ImageError};

/// Copy every pixel of `src` into `dst`.
///
/// The whole `width * height` buffer is duplicated, borders included. This is
/// how a destination image is seeded before an operation that only writes part
/// of it.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
///
/// PRECONDITION: `src` and `dst` must have the same size.
///
/// Example:
///
/// ```
/// use convkit_image::{CpuAllocator, Image, ImageSize};
/// use convkit_image::ops::copy_from;
///
/// let src = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![1u8, 2, 3, 4, 5, 6],
///     CpuAllocator,
/// )
/// .unwrap();
///
/// let mut dst = Image::from_size_val(src.size(), 0u8, CpuAllocator).unwrap();
///
/// copy_from(&src, &mut dst).unwrap();
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
pub fn copy_from<T, const C: usize, A1: ImageAllocator, A2: ImageAllocator>(
    src: &Image<T, C, A1>,
    dst: &mut Image<T, C, A2>,
) -> Result<(), ImageError>
where
    T: Clone,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    dst.as_slice_mut().clone_from_slice(src.as_slice());

    Ok(())
}
