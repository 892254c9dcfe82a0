use thiserror::Error;

/// An error type for image allocator operations.
#[derive(Debug, Error, PartialEq)]
pub enum AllocatorError {
    /// The allocator could not provide the requested number of bytes.
    #[error("Out of memory while allocating {0} bytes")]
    OutOfMemory(usize),

    /// The requested buffer length overflows `usize` bytes.
    #[error("Requested buffer size overflows")]
    CapacityOverflow,
}

/// A trait for allocating the pixel buffers backing an image.
///
/// Allocation is fallible: implementors report failure through [`AllocatorError`]
/// instead of aborting, so callers can give up before touching any output.
///
/// # Methods
///
/// * `alloc` - Allocates a buffer of `len` elements, each initialized to `value`.
pub trait ImageAllocator: Clone {
    /// Allocates a buffer of `len` elements initialized to `value`.
    fn alloc<T: Clone>(&self, len: usize, value: T) -> Result<Vec<T>, AllocatorError>;
}

/// An image allocator that uses the system allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuAllocator;

impl ImageAllocator for CpuAllocator {
    /// Allocates a buffer with the system allocator.
    ///
    /// # Arguments
    ///
    /// * `len` - The number of elements.
    /// * `value` - The initial value of every element.
    ///
    /// # Returns
    ///
    /// The initialized buffer, or an error if the memory could not be reserved.
    fn alloc<T: Clone>(&self, len: usize, value: T) -> Result<Vec<T>, AllocatorError> {
        let num_bytes = len
            .checked_mul(std::mem::size_of::<T>())
            .ok_or(AllocatorError::CapacityOverflow)?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| AllocatorError::OutOfMemory(num_bytes))?;
        buf.resize(len, value);

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_allocator() -> Result<(), AllocatorError> {
        let buf = CpuAllocator.alloc(1024, 7u8)?;
        assert_eq!(buf.len(), 1024);
        assert!(buf.iter().all(|&v| v == 7));
        Ok(())
    }

    #[test]
    fn test_cpu_allocator_overflow() {
        let res = CpuAllocator.alloc(usize::MAX, 0u32);
        assert_eq!(res, Err(AllocatorError::CapacityOverflow));
    }
}
