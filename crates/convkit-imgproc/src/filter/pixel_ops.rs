use convkit_image::{Image, ImageAllocator};

use super::neighborhood::Neighborhood;

/// Divisor of the box blur: all 9 samples.
const BLUR_DIVISOR: i32 = 9;

/// Divisor of the filtered blur: the 7 samples left after dropping the extremes.
const BLUR_FILTERED_DIVISOR: i32 = 7;

/// Sum of one channel over a neighborhood where every sample is saturated.
const SATURATED_SUM: i32 = 9 * 255;

#[inline]
fn saturate(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Compute the box blur of the pixel at `(row, col)`.
///
/// Each channel is the integer mean of the 9 samples, truncated toward zero.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `row` - The row of an interior pixel.
/// * `col` - The column of an interior pixel.
///
/// # Returns
///
/// The blurred RGB pixel.
///
/// # Panics
///
/// Panics on a border coordinate.
#[inline]
pub fn blur_pixel<A: ImageAllocator>(src: &Image<u8, 3, A>, row: usize, col: usize) -> [u8; 3] {
    let sums = Neighborhood::gather(src, row, col).channel_sums();
    sums.map(|s| saturate(s / BLUR_DIVISOR))
}

/// Compute the outlier-rejecting blur of the pixel at `(row, col)`.
///
/// The samples with the lowest and highest intensity (`r + g + b`) are dropped
/// and the remaining 7 are averaged per channel, truncating toward zero. See
/// [`Neighborhood::extreme_indices`] for how ties between samples are resolved.
///
/// A block that is entirely white or entirely black is returned as is, without
/// searching for the extremes.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `row` - The row of an interior pixel.
/// * `col` - The column of an interior pixel.
///
/// # Returns
///
/// The filtered RGB pixel.
///
/// # Panics
///
/// Panics on a border coordinate.
pub fn blur_filtered_pixel<A: ImageAllocator>(
    src: &Image<u8, 3, A>,
    row: usize,
    col: usize,
) -> [u8; 3] {
    blur_filtered_neighborhood(&Neighborhood::gather(src, row, col))
}

/// Outlier-rejecting blur of an already gathered neighborhood.
pub fn blur_filtered_neighborhood(nb: &Neighborhood) -> [u8; 3] {
    let sums = nb.channel_sums();

    if sums == [SATURATED_SUM; 3] {
        return [255, 255, 255];
    }
    if sums == [0; 3] {
        return [0, 0, 0];
    }

    let (min_idx, max_idx) = nb.extreme_indices();
    let min_px = nb.samples()[min_idx];
    let max_px = nb.samples()[max_idx];

    // both extremes are subtracted even if they are the same sample
    let mut out = [0u8; 3];
    for (ch, out_ch) in out.iter_mut().enumerate() {
        let kept = sums[ch] - min_px[ch] as i32 - max_px[ch] as i32;
        *out_ch = saturate(kept / BLUR_FILTERED_DIVISOR);
    }

    out
}

/// Compute the sharpened value of the pixel at `(row, col)`.
///
/// Each channel is `9 * center - sum(8 neighbors)`, saturated to `[0, 255]`.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `row` - The row of an interior pixel.
/// * `col` - The column of an interior pixel.
///
/// # Returns
///
/// The sharpened RGB pixel.
///
/// # Panics
///
/// Panics on a border coordinate.
#[inline]
pub fn sharpen_pixel<A: ImageAllocator>(src: &Image<u8, 3, A>, row: usize, col: usize) -> [u8; 3] {
    let nb = Neighborhood::gather(src, row, col);
    let sums = nb.channel_sums();
    let center = nb.center();

    let mut out = [0u8; 3];
    for (ch, out_ch) in out.iter_mut().enumerate() {
        let c = center[ch] as i32;
        let neighbors = sums[ch] - c;
        *out_ch = saturate(9 * c - neighbors);
    }

    out
}
