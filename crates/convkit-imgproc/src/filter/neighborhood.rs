use convkit_image::{Image, ImageAllocator};

/// Number of samples in a 3x3 neighborhood.
pub const NEIGHBORHOOD_LEN: usize = 9;

/// The 9 RGB samples around an interior pixel.
///
/// Samples are stored in scan order: top row left to right, then the middle row,
/// then the bottom row. Index 4 is the center pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    samples: [[u8; 3]; NEIGHBORHOOD_LEN],
}

impl Neighborhood {
    /// Gather the neighborhood centered at `(row, col)`.
    ///
    /// # Arguments
    ///
    /// * `src` - The source image.
    /// * `row` - The center row, in `1..=height - 2`.
    /// * `col` - The center column, in `1..=width - 2`.
    ///
    /// # Panics
    ///
    /// Panics if the 3x3 window does not fit inside the image. The traversal in
    /// [`crate::filter::convolve3_interior`] only produces coordinates that fit.
    #[inline]
    pub fn gather<A: ImageAllocator>(src: &Image<u8, 3, A>, row: usize, col: usize) -> Self {
        let data = src.as_slice();
        let row_stride = src.cols() * 3;
        let mut samples = [[0u8; 3]; NEIGHBORHOOD_LEN];

        for (dy, window_row) in samples.chunks_exact_mut(3).enumerate() {
            let start = (row + dy - 1) * row_stride + (col - 1) * 3;
            let src_row = &data[start..start + 9];
            for (dst, px) in window_row.iter_mut().zip(src_row.chunks_exact(3)) {
                dst.copy_from_slice(px);
            }
        }

        Self { samples }
    }

    /// Build a neighborhood from explicit samples in scan order.
    pub fn from_samples(samples: [[u8; 3]; NEIGHBORHOOD_LEN]) -> Self {
        Self { samples }
    }

    /// The samples in scan order.
    pub fn samples(&self) -> &[[u8; 3]; NEIGHBORHOOD_LEN] {
        &self.samples
    }

    /// The center sample.
    pub fn center(&self) -> [u8; 3] {
        self.samples[4]
    }

    /// Per channel sum of the 9 samples.
    #[inline]
    pub fn channel_sums(&self) -> [i32; 3] {
        self.samples.iter().fold([0i32; 3], |mut acc, px| {
            acc[0] += px[0] as i32;
            acc[1] += px[1] as i32;
            acc[2] += px[2] as i32;
            acc
        })
    }

    /// Combined intensity `r + g + b` of every sample.
    #[inline]
    pub fn intensities(&self) -> [i32; NEIGHBORHOOD_LEN] {
        self.samples
            .map(|px| px[0] as i32 + px[1] as i32 + px[2] as i32)
    }

    /// Indices of the minimum and maximum intensity samples, as `(min, max)`.
    ///
    /// Both start at sample 0 and the remaining samples are scanned in order. A
    /// sample replaces the maximum only when strictly greater; otherwise it
    /// replaces the minimum when less than or equal, so ties resolve to the
    /// first maximum and the last minimum. A sample that becomes the new maximum
    /// is not compared against the minimum in the same step.
    pub fn extreme_indices(&self) -> (usize, usize) {
        let intensities = self.intensities();

        let (mut min_idx, mut max_idx) = (0, 0);
        let (mut min_val, mut max_val) = (intensities[0], intensities[0]);

        for (idx, &val) in intensities.iter().enumerate().skip(1) {
            if val > max_val {
                max_val = val;
                max_idx = idx;
            } else if val <= min_val {
                min_val = val;
                min_idx = idx;
            }
        }

        (min_idx, max_idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convkit_image::{CpuAllocator, ImageError};

    fn gray(v: u8) -> [u8; 3] {
        [v, v, v]
    }

    #[test]
    fn test_gather_scan_order() -> Result<(), ImageError> {
        // 4x3 image where every channel of pixel (row, col) holds row * 10 + col
        let data = (0..3)
            .flat_map(|row| (0..4).flat_map(move |col| [row * 10 + col; 3]))
            .collect::<Vec<u8>>();
        let image = Image::<u8, 3>::new([4, 3].into(), data, CpuAllocator)?;

        let nb = Neighborhood::gather(&image, 1, 2);
        let expected = [1, 2, 3, 11, 12, 13, 21, 22, 23].map(gray);
        assert_eq!(nb.samples(), &expected);
        assert_eq!(nb.center(), gray(12));

        Ok(())
    }

    #[test]
    fn test_channel_sums_and_intensities() {
        let mut samples = [[0u8; 3]; NEIGHBORHOOD_LEN];
        samples[0] = [255, 255, 255];
        samples[8] = [1, 2, 3];
        let nb = Neighborhood::from_samples(samples);

        assert_eq!(nb.channel_sums(), [256, 257, 258]);
        let intensities = nb.intensities();
        assert_eq!(intensities[0], 765);
        assert_eq!(intensities[8], 6);
    }

    #[test]
    fn test_extreme_indices_unique() {
        let nb = Neighborhood::from_samples([10, 20, 90, 40, 5, 60, 70, 80, 30].map(gray));
        assert_eq!(nb.extreme_indices(), (4, 2));
    }

    #[test]
    fn test_extreme_indices_ties() {
        // all equal: the maximum never moves, the minimum slides to the last sample
        let nb = Neighborhood::from_samples([gray(128); NEIGHBORHOOD_LEN]);
        assert_eq!(nb.extreme_indices(), (8, 0));

        // first of the tied maxima, last of the tied minima
        let nb = Neighborhood::from_samples([50, 200, 10, 200, 10, 100, 10, 200, 60].map(gray));
        assert_eq!(nb.extreme_indices(), (6, 1));
    }

    #[test]
    fn test_extreme_indices_new_max_skips_min() {
        // increasing intensities: every sample is a new maximum, so sample 0 stays the minimum
        let nb = Neighborhood::from_samples([1, 2, 3, 4, 5, 6, 7, 8, 9].map(gray));
        assert_eq!(nb.extreme_indices(), (0, 8));
    }
}
