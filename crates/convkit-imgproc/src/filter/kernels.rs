/// Side length of every kernel in this crate.
pub const KERNEL_SIZE: usize = 3;

/// Create the 3x3 box blur kernel.
///
/// # Returns
///
/// The unnormalized weights, all ones.
pub fn box_kernel3() -> [[i32; KERNEL_SIZE]; KERNEL_SIZE] {
    [[1, 1, 1], [1, 1, 1], [1, 1, 1]]
}

/// Create the 3x3 sharpen kernel.
///
/// # Returns
///
/// The Laplacian sharpen weights: 9 in the center, -1 everywhere else.
pub fn sharpen_kernel3() -> [[i32; KERNEL_SIZE]; KERNEL_SIZE] {
    [[-1, -1, -1], [-1, 9, -1], [-1, -1, -1]]
}

/// The 3x3 kernels known to the filters.
///
/// The pixel operations are hand-specialized for these weights; a kernel is the
/// weighted-sum form they must agree with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kernel3 {
    /// All-ones averaging kernel.
    Box,
    /// Center-weighted Laplacian sharpen kernel.
    Sharpen,
}

impl Kernel3 {
    /// The 3x3 integer weights of the kernel.
    pub fn weights(&self) -> [[i32; KERNEL_SIZE]; KERNEL_SIZE] {
        match self {
            Kernel3::Box => box_kernel3(),
            Kernel3::Sharpen => sharpen_kernel3(),
        }
    }

    /// The normalization divisor applied to the weighted sum.
    pub fn scale(&self) -> i32 {
        self.weights().iter().flatten().sum()
    }
}
