use crate::allocator::{CpuAllocator, ImageAllocator};
use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use convkit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major with interleaved channels, so the element at
/// `(row, col, ch)` lives at `(row * width + col) * CHANNELS + ch`. There is no
/// row padding.
pub struct Image<T, const CHANNELS: usize, A: ImageAllocator = CpuAllocator> {
    size: ImageSize,
    data: Vec<T>,
    alloc: A,
}

impl<T, const CHANNELS: usize, A: ImageAllocator> Image<T, CHANNELS, A> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    /// * `alloc` - The allocator used for buffers derived from this image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use convkit_image::{CpuAllocator, Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    ///     CpuAllocator,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>, alloc: A) -> Result<Self, ImageError> {
        let expected = size.num_pixels() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data, alloc })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// The buffer is requested from `alloc`, so an allocation failure is reported
    /// as [`ImageError::AllocationError`].
    ///
    /// # Examples
    ///
    /// ```
    /// use convkit_image::{CpuAllocator, Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     0u8,
    ///     CpuAllocator,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.as_slice().len(), 10 * 20 * 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T, alloc: A) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = alloc.alloc(size.num_pixels() * CHANNELS, val)?;
        Ok(Self { size, data, alloc })
    }

    /// Create a new image by copying the given pixel data into a fresh buffer.
    pub fn from_size_slice(size: ImageSize, data: &[T], alloc: A) -> Result<Self, ImageError>
    where
        T: Clone + Default,
    {
        let expected = size.num_pixels() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        let mut image = Self::from_size_val(size, T::default(), alloc)?;
        image.data.clone_from_slice(data);

        Ok(image)
    }

    /// Duplicate the image into a buffer obtained from the same allocator.
    ///
    /// Unlike `Clone`, allocation failure is reported instead of aborting.
    pub fn try_clone(&self) -> Result<Self, ImageError>
    where
        T: Clone + Default,
    {
        let mut dst = Self::from_size_val(self.size, T::default(), self.alloc.clone())?;
        crate::ops::copy_from(self, &mut dst)?;
        Ok(dst)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get a reference to an element by its `[row, col, channel]` index.
    pub fn get(&self, index: [usize; 3]) -> Option<&T> {
        let [row, col, ch] = index;
        if row >= self.height() || col >= self.width() || ch >= CHANNELS {
            return None;
        }
        self.data.get((row * self.width() + col) * CHANNELS + ch)
    }

    /// Get all the channels of the pixel at column `x` and row `y`.
    ///
    /// # Errors
    ///
    /// If the coordinates are outside the image, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<[T; CHANNELS], ImageError>
    where
        T: Copy + Default,
    {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        let offset = (y * self.width() + x) * CHANNELS;
        let mut pixel = [T::default(); CHANNELS];
        pixel.copy_from_slice(&self.data[offset..offset + CHANNELS]);

        Ok(pixel)
    }

    /// Overwrite all the channels of the pixel at column `x` and row `y`.
    ///
    /// # Errors
    ///
    /// If the coordinates are outside the image, an error is returned.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: [T; CHANNELS]) -> Result<(), ImageError>
    where
        T: Copy,
    {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        let offset = (y * self.width() + x) * CHANNELS;
        self.data[offset..offset + CHANNELS].copy_from_slice(&pixel);

        Ok(())
    }
}

impl<T: Clone, const CHANNELS: usize, A: ImageAllocator> Clone for Image<T, CHANNELS, A> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            data: self.data.clone(),
            alloc: self.alloc.clone(),
        }
    }
}

impl<T: PartialEq, const CHANNELS: usize, A: ImageAllocator> PartialEq for Image<T, CHANNELS, A> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.data == other.data
    }
}

impl<T, const CHANNELS: usize, A: ImageAllocator> std::fmt::Debug for Image<T, CHANNELS, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("size", &self.size)
            .field("channels", &CHANNELS)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::allocator::CpuAllocator;
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.num_pixels(), 200);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
            CpuAllocator,
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_invalid_data_len() {
        let res = Image::<u8, 3>::new([2, 2].into(), vec![0u8; 11], CpuAllocator);
        assert_eq!(res.unwrap_err(), ImageError::InvalidChannelShape(11, 12));
    }

    #[test]
    fn image_get_row_major() -> Result<(), ImageError> {
        // 2 columns x 3 rows, one channel per pixel index
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            (0..18).collect(),
            CpuAllocator,
        )?;
        assert_eq!(image.get([0, 1, 0]), Some(&3));
        assert_eq!(image.get([2, 0, 2]), Some(&14));
        assert_eq!(image.get([3, 0, 0]), None);
        assert_eq!(image.get([0, 0, 3]), None);
        assert_eq!(image.get_pixel(1, 2)?, [15, 16, 17]);

        Ok(())
    }

    #[test]
    fn image_set_pixel() -> Result<(), ImageError> {
        let mut image = Image::<u8, 3>::from_size_val([3, 3].into(), 255, CpuAllocator)?;
        image.set_pixel(1, 1, [0, 1, 2])?;
        assert_eq!(image.get_pixel(1, 1)?, [0, 1, 2]);
        assert_eq!(image.get_pixel(0, 1)?, [255, 255, 255]);

        let res = image.set_pixel(3, 0, [0, 0, 0]);
        assert_eq!(res, Err(ImageError::PixelIndexOutOfBounds(3, 0, 3, 3)));

        Ok(())
    }

    #[test]
    fn image_try_clone() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_slice(
            [2, 1].into(),
            &[1, 2, 3, 4, 5, 6],
            CpuAllocator,
        )?;
        let cloned = image.try_clone()?;
        assert_eq!(cloned, image);
        assert_ne!(cloned.as_slice().as_ptr(), image.as_slice().as_ptr());

        Ok(())
    }
}
