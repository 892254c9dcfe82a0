use convkit_image::{Image, ImageAllocator, ImageError};

use super::kernels::KERNEL_SIZE;
use super::pixel_ops::{blur_filtered_pixel, blur_pixel, sharpen_pixel};

/// The 3x3 filters that can be applied to an RGB image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter3 {
    /// Box blur, the mean of the 9 samples.
    Blur,
    /// Box blur that drops the darkest and brightest samples and averages the other 7.
    BlurFiltered,
    /// Laplacian sharpen, saturated to the channel range.
    Sharpen,
}

impl Filter3 {
    /// Apply the filter to the interior of `src`, writing into `dst`.
    ///
    /// The border pixels of `dst` are not written. See [`convolve3_interior`].
    pub fn apply<A1: ImageAllocator, A2: ImageAllocator>(
        &self,
        src: &Image<u8, 3, A1>,
        dst: &mut Image<u8, 3, A2>,
    ) -> Result<(), ImageError> {
        log::debug!("applying {} filter to a {} image", self, src.size());
        match self {
            Filter3::Blur => convolve3_interior(src, dst, blur_pixel),
            Filter3::BlurFiltered => convolve3_interior(src, dst, blur_filtered_pixel),
            Filter3::Sharpen => convolve3_interior(src, dst, sharpen_pixel),
        }
    }
}

impl std::fmt::Display for Filter3 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Filter3::Blur => "blur",
            Filter3::BlurFiltered => "filtered blur",
            Filter3::Sharpen => "sharpen",
        };
        write!(f, "{name}")
    }
}

/// Check that an image can hold at least one full 3x3 neighborhood.
///
/// # Errors
///
/// Returns [`ImageError::ImageTooSmall`] if the width or height is below 3.
pub fn check_min_size<T, const C: usize, A: ImageAllocator>(
    image: &Image<T, C, A>,
) -> Result<(), ImageError> {
    if image.width() < KERNEL_SIZE || image.height() < KERNEL_SIZE {
        return Err(ImageError::ImageTooSmall(
            image.width(),
            image.height(),
            KERNEL_SIZE,
        ));
    }
    Ok(())
}

/// Apply a per-pixel 3x3 operation to every interior pixel of an image.
///
/// Rows `1..height - 1` and columns `1..width - 1` are visited exactly once in
/// row-major order and `op(src, row, col)` is written to the same coordinate of
/// `dst`. Row 0, row `height - 1`, column 0 and column `width - 1` of `dst` are
/// never written, so `dst` must already hold the desired border, typically a
/// copy of `src`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
/// * `op` - The operation computing one output pixel from an interior coordinate.
///
/// PRECONDITION: `src` and `dst` must have the same shape, of at least 3x3.
///
/// # Example
///
/// ```
/// use convkit_image::{CpuAllocator, Image, ImageSize};
/// use convkit_imgproc::filter::{blur_pixel, convolve3_interior};
///
/// let src = Image::<u8, 3>::from_size_val(ImageSize { width: 4, height: 4 }, 90, CpuAllocator).unwrap();
/// let mut dst = src.clone();
///
/// convolve3_interior(&src, &mut dst, blur_pixel).unwrap();
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
pub fn convolve3_interior<A1, A2, F>(
    src: &Image<u8, 3, A1>,
    dst: &mut Image<u8, 3, A2>,
    op: F,
) -> Result<(), ImageError>
where
    A1: ImageAllocator,
    A2: ImageAllocator,
    F: Fn(&Image<u8, 3, A1>, usize, usize) -> [u8; 3],
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    check_min_size(src)?;

    let rows = src.rows();
    let cols = src.cols();

    dst.as_slice_mut()
        .chunks_exact_mut(cols * 3)
        .enumerate()
        .skip(1)
        .take(rows - 2)
        .for_each(|(row, dst_row)| {
            dst_row
                .chunks_exact_mut(3)
                .enumerate()
                .skip(1)
                .take(cols - 2)
                .for_each(|(col, dst_pixel)| {
                    dst_pixel.copy_from_slice(&op(src, row, col));
                });
        });

    Ok(())
}

/// Blur an image with the 3x3 box filter.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
///
/// PRECONDITION: `src` and `dst` must have the same shape. Only the interior of
/// `dst` is written.
pub fn box_blur3<A1: ImageAllocator, A2: ImageAllocator>(
    src: &Image<u8, 3, A1>,
    dst: &mut Image<u8, 3, A2>,
) -> Result<(), ImageError> {
    Filter3::Blur.apply(src, dst)
}

/// Blur an image with the 3x3 box filter, ignoring the darkest and brightest sample.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
///
/// PRECONDITION: `src` and `dst` must have the same shape. Only the interior of
/// `dst` is written.
pub fn box_blur3_filtered<A1: ImageAllocator, A2: ImageAllocator>(
    src: &Image<u8, 3, A1>,
    dst: &mut Image<u8, 3, A2>,
) -> Result<(), ImageError> {
    Filter3::BlurFiltered.apply(src, dst)
}

/// Sharpen an image with the 3x3 Laplacian kernel.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
///
/// PRECONDITION: `src` and `dst` must have the same shape. Only the interior of
/// `dst` is written.
pub fn sharpen3<A1: ImageAllocator, A2: ImageAllocator>(
    src: &Image<u8, 3, A1>,
    dst: &mut Image<u8, 3, A2>,
) -> Result<(), ImageError> {
    Filter3::Sharpen.apply(src, dst)
}
