use pixfilt_image::ImageError;

/// A square convolution kernel with an odd side length.
///
/// The weights are stored row-major. The center weight sits at `(radius, radius)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    data: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from its side length and row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidKernel`] if `size` is zero or even, or if `data`
    /// does not hold `size * size` weights.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixfilt_imgproc::filter::Kernel;
    ///
    /// let kernel = Kernel::new(3, vec![0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0]).unwrap();
    /// assert_eq!(kernel.radius(), 1);
    /// assert_eq!(kernel.get(1, 1), -4.0);
    /// ```
    pub fn new(size: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        check_kernel_size(size)?;
        if data.len() != size * size {
            return Err(ImageError::InvalidKernel(format!(
                "expected {} weights for a {size}x{size} kernel, got {}",
                size * size,
                data.len()
            )));
        }
        Ok(Self { size, data })
    }

    /// Create a kernel from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidKernel`] if the rows do not form a square with an
    /// odd side length.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, ImageError> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(ImageError::InvalidKernel(format!(
                "kernel is not square: {size} rows but a row has {} weights",
                row.len()
            )));
        }
        Self::new(size, rows.concat())
    }

    /// Side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Maximum offset from the center on each axis.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// The row-major weights of the kernel.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Weight at the given kernel row and column.
    ///
    /// PRECONDITION: `row` and `col` are smaller than [`Kernel::size`].
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.size + col]
    }
}

impl TryFrom<Vec<Vec<f32>>> for Kernel {
    type Error = ImageError;

    fn try_from(rows: Vec<Vec<f32>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

pub(crate) fn check_kernel_size(size: usize) -> Result<(), ImageError> {
    if size == 0 || size % 2 == 0 {
        return Err(ImageError::InvalidKernel(format!(
            "kernel size must be odd and positive, got {size}"
        )));
    }
    Ok(())
}

/// Create the 1x1 identity kernel `[[1]]`.
pub fn identity() -> Kernel {
    Kernel {
        size: 1,
        data: vec![1.0],
    }
}

/// Create an unnormalized box kernel where every weight is one.
///
/// # Arguments
///
/// * `kernel_size` - The side length of the kernel, odd.
pub fn box_kernel(kernel_size: usize) -> Result<Kernel, ImageError> {
    Kernel::new(kernel_size, vec![1.0; kernel_size * kernel_size])
}

/// Create the 3x3 sobel kernel responding to horizontal edges.
pub fn sobel_x() -> Kernel {
    Kernel {
        size: 3,
        data: vec![1.0, 2.0, 1.0, 0.0, 0.0, 0.0, -1.0, -2.0, -1.0],
    }
}

/// Create the 3x3 sobel kernel responding to vertical edges.
pub fn sobel_y() -> Kernel {
    Kernel {
        size: 3,
        data: vec![1.0, 0.0, -1.0, 2.0, 0.0, -2.0, 1.0, 0.0, -1.0],
    }
}
