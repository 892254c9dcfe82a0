use std::io::Cursor;

use convkit_image::{Image, ImageAllocator, ImageSize};
use image::codecs::bmp::{BmpDecoder, BmpEncoder};
use image::{ColorType, ExtendedColorType, ImageDecoder};

use crate::error::IoError;

const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: usize = 40;
const BITS_PER_PIXEL: u16 = 24;
const BI_RGB: u32 = 0;

/// Bytes per row of 24-bit pixels, padded to a multiple of 4.
pub fn row_stride(width: usize) -> usize {
    (width * 3 + 3) & !3
}

fn le_u16(bytes: &[u8], offset: usize) -> Result<u16, IoError> {
    bytes
        .get(offset..offset + 2)
        .and_then(|b| b.try_into().ok())
        .map(u16::from_le_bytes)
        .ok_or(IoError::TruncatedBmp(offset + 2, bytes.len()))
}

fn le_u32(bytes: &[u8], offset: usize) -> Result<u32, IoError> {
    bytes
        .get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or(IoError::TruncatedBmp(offset + 4, bytes.len()))
}

fn le_i32(bytes: &[u8], offset: usize) -> Result<i32, IoError> {
    le_u32(bytes, offset).map(|v| v as i32)
}

// swap rows `i` and `n - 1 - i` of a packed buffer
fn flip_rows(data: &mut [u8], row_len: usize) {
    let rows = data.len() / row_len;
    for row in 0..rows / 2 {
        let (top, bottom) = data.split_at_mut((rows - 1 - row) * row_len);
        top[row * row_len..(row + 1) * row_len].swap_with_slice(&mut bottom[..row_len]);
    }
}

/// An uncompressed 24-bit BMP file held in memory.
///
/// The bytes in front of the pixel array (file header, info header and anything
/// the writer put between them) and the bytes after it are kept verbatim, so
/// writing the container back only changes pixel content.
#[derive(Clone, Debug, PartialEq)]
pub struct BmpImage {
    bytes: Vec<u8>,
    pixel_offset: usize,
    size: ImageSize,
    top_down: bool,
}

/// Decode a BMP file from raw bytes.
///
/// The headers are validated by the `image` BMP decoder; on top of that the
/// container must hold an info header of at least 40 bytes, 24 bits per pixel
/// and no compression, so pixels can later be written back in place.
///
/// # Arguments
///
/// * `bytes` - The complete contents of a BMP file.
///
/// # Returns
///
/// The parsed container.
pub fn decode_bmp(bytes: &[u8]) -> Result<BmpImage, IoError> {
    BmpImage::parse(bytes.to_vec())
}

impl BmpImage {
    fn parse(bytes: Vec<u8>) -> Result<Self, IoError> {
        let (width, height) = {
            let decoder = BmpDecoder::new(Cursor::new(bytes.as_slice()))?;
            if decoder.color_type() != ColorType::Rgb8 {
                return Err(IoError::UnsupportedBmp(format!(
                    "{:?} pixels",
                    decoder.color_type()
                )));
            }
            decoder.dimensions()
        };

        let pixel_offset = le_u32(&bytes, 10)? as usize;
        let info_len = le_u32(&bytes, 14)? as usize;
        if info_len < INFO_HEADER_LEN {
            return Err(IoError::UnsupportedBmp(format!(
                "info header of {info_len} bytes"
            )));
        }

        let bits_per_pixel = le_u16(&bytes, 28)?;
        let compression = le_u32(&bytes, 30)?;
        if bits_per_pixel != BITS_PER_PIXEL || compression != BI_RGB {
            return Err(IoError::UnsupportedBmp(format!(
                "{bits_per_pixel} bits per pixel with compression method {compression}"
            )));
        }
        if pixel_offset < FILE_HEADER_LEN + info_len {
            return Err(IoError::UnsupportedBmp(format!(
                "pixel data offset {pixel_offset} inside the headers"
            )));
        }

        let size = ImageSize {
            width: width as usize,
            height: height as usize,
        };
        let pixels_end = row_stride(size.width)
            .checked_mul(size.height)
            .and_then(|len| len.checked_add(pixel_offset))
            .ok_or_else(|| IoError::UnsupportedBmp(format!("dimensions {size}")))?;
        if bytes.len() < pixels_end {
            return Err(IoError::TruncatedBmp(pixels_end, bytes.len()));
        }

        let top_down = le_i32(&bytes, 22)? < 0;
        log::debug!(
            "decoded BMP header: {size}, {} rows",
            if top_down { "top-down" } else { "bottom-up" }
        );

        Ok(Self {
            bytes,
            pixel_offset,
            size,
            top_down,
        })
    }

    /// Create a new bottom-up 24-bit BMP holding the pixels of an RGB image.
    ///
    /// # Arguments
    ///
    /// * `image` - The RGB image to store, top row first.
    ///
    /// # Errors
    ///
    /// Fails if the image dimensions do not fit in the BMP header fields.
    pub fn from_rgb8<A: ImageAllocator>(image: &Image<u8, 3, A>) -> Result<Self, IoError> {
        let size = image.size();
        let too_large = || IoError::UnsupportedBmp(format!("image too large: {size}"));
        let width = u32::try_from(size.width).map_err(|_| too_large())?;
        let height = u32::try_from(size.height).map_err(|_| too_large())?;

        let mut bytes = Vec::new();
        BmpEncoder::new(&mut bytes).encode(
            image.as_slice(),
            width,
            height,
            ExtendedColorType::Rgb8,
        )?;

        Self::parse(bytes)
    }

    /// The size of the raster in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Whether the rows are stored top to bottom (negative height in the header).
    pub fn is_top_down(&self) -> bool {
        self.top_down
    }

    /// The raw bytes in front of the pixel array.
    pub fn header(&self) -> &[u8] {
        &self.bytes[..self.pixel_offset]
    }

    /// Decode the pixel array into an RGB image for display, top row first.
    ///
    /// # Arguments
    ///
    /// * `alloc` - The allocator for the image buffer.
    ///
    /// # Errors
    ///
    /// Fails if the image buffer cannot be allocated.
    pub fn decode_rgb8<A: ImageAllocator>(&self, alloc: A) -> Result<Image<u8, 3, A>, IoError> {
        let mut image = Image::from_size_val(self.size, 0u8, alloc)?;
        let decoder = BmpDecoder::new(Cursor::new(self.bytes.as_slice()))?;
        decoder.read_image(image.as_slice_mut())?;
        Ok(image)
    }

    /// Decode the pixel array into an RGB image keeping the stored row order.
    ///
    /// Row 0 of the image is the first row of the pixel array, which is the
    /// bottom row of a bottom-up file. Filters that scan neighborhoods must run
    /// on this order to resolve ties the same way for every file.
    ///
    /// # Arguments
    ///
    /// * `alloc` - The allocator for the image buffer.
    pub fn decode_rgb8_stored<A: ImageAllocator>(
        &self,
        alloc: A,
    ) -> Result<Image<u8, 3, A>, IoError> {
        let mut image = self.decode_rgb8(alloc)?;
        if !self.top_down {
            flip_rows(image.as_slice_mut(), self.size.width * 3);
        }
        Ok(image)
    }

    /// Replace the pixel array with the pixels of an RGB image, top row first.
    ///
    /// Only pixel bytes are written; headers, row padding and trailing bytes keep
    /// their original values.
    ///
    /// # Arguments
    ///
    /// * `image` - An RGB image with rows in visual order.
    ///
    /// # Errors
    ///
    /// Fails if the image size differs from the container size.
    pub fn encode_rgb8<A: ImageAllocator>(&mut self, image: &Image<u8, 3, A>) -> Result<(), IoError> {
        self.write_rows(image, self.top_down)
    }

    /// Replace the pixel array with the pixels of an RGB image in stored row order.
    ///
    /// The inverse of [`BmpImage::decode_rgb8_stored`].
    pub fn encode_rgb8_stored<A: ImageAllocator>(
        &mut self,
        image: &Image<u8, 3, A>,
    ) -> Result<(), IoError> {
        self.write_rows(image, true)
    }

    fn write_rows<A: ImageAllocator>(
        &mut self,
        image: &Image<u8, 3, A>,
        stored_order: bool,
    ) -> Result<(), IoError> {
        if image.size() != self.size {
            return Err(IoError::ImageSizeMismatch(
                image.width(),
                image.height(),
                self.size.width,
                self.size.height,
            ));
        }

        let height = self.size.height;
        let row_len = self.size.width * 3;
        let stride = row_stride(self.size.width);
        let pixels = &mut self.bytes[self.pixel_offset..];

        for (row, src_row) in image.as_slice().chunks_exact(row_len).enumerate() {
            let file_row = if stored_order { row } else { height - 1 - row };
            let dst_row = &mut pixels[file_row * stride..file_row * stride + row_len];
            for (bgr, src) in dst_row.chunks_exact_mut(3).zip(src_row.chunks_exact(3)) {
                bgr[0] = src[2];
                bgr[1] = src[1];
                bgr[2] = src[0];
            }
        }

        Ok(())
    }

    /// Serialize the container back into the bytes of a BMP file.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}
