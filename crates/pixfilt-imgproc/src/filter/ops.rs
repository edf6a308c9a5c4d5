use std::ops::Range;

use pixfilt_image::{Image, ImageError};

use super::kernels::{self, check_kernel_size, Kernel};
use crate::{enhance, parallel};

/// How the neighborhood sum of a box blur is turned into the output sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlurNormalization {
    /// Divide by `radius^2` regardless of how many neighbors were summed.
    ///
    /// This reproduces the reference blur outputs: with a 3x3 neighborhood the divisor is 1,
    /// so the output is the plain neighborhood sum.
    #[default]
    RadiusSquared,

    /// Divide by the number of in-bounds neighbors, a true area average.
    NeighborCount,
}

/// The in-bounds part of a square neighborhood around one pixel.
struct Window {
    rows: Range<usize>,
    cols: Range<usize>,
}

impl Window {
    fn len(&self) -> usize {
        self.rows.len() * self.cols.len()
    }
}

// clip [center - radius, center + radius] to [0, len)
fn axis_range(center: usize, radius: usize, len: usize) -> Range<usize> {
    center.saturating_sub(radius)..center.saturating_add(radius).saturating_add(1).min(len)
}

// Allocate the output and fill every pixel from its neighborhood window in the source.
fn map_windows(
    src: &Image,
    radius: usize,
    f: impl Fn(&Window, usize, usize, &mut [f32]) + Send + Sync,
) -> Result<Image, ImageError> {
    let (rows, cols, channels) = (src.rows(), src.cols(), src.num_channels());
    let mut dst = Image::zeros(src.size(), channels)?;

    parallel::par_iter_rows_indexed(&mut dst, |row, dst_row| {
        let window_rows = axis_range(row, radius, rows);
        dst_row
            .chunks_exact_mut(channels)
            .enumerate()
            .for_each(|(col, dst_pixel)| {
                let window = Window {
                    rows: window_rows.clone(),
                    cols: axis_range(col, radius, cols),
                };
                f(&window, row, col, dst_pixel);
            });
    });

    Ok(dst)
}

/// Blur an image with the reference box blur.
///
/// For every pixel and channel the in-bounds samples of the `kernel_size x kernel_size`
/// neighborhood are summed and divided by `radius^2`, with `radius = kernel_size / 2`.
/// Samples outside the image are left out of the sum, so border pixels accumulate fewer
/// neighbors. A `kernel_size` of 1 has a radius of 0 and returns a copy of the image.
///
/// See [`blur_with`] for an area-normalized variant.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_size` - The full side length of the neighborhood, odd.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernel`] if `kernel_size` is zero or even.
///
/// # Examples
///
/// ```
/// use pixfilt_image::Image;
/// use pixfilt_imgproc::filter::blur;
///
/// let image = Image::from_size_val([3, 3].into(), 1, 1.0).unwrap();
/// let blurred = blur(&image, 3).unwrap();
///
/// assert_eq!(blurred.get([1, 1, 0]), Some(&9.0));
/// assert_eq!(blurred.get([0, 0, 0]), Some(&4.0));
/// ```
pub fn blur(src: &Image, kernel_size: usize) -> Result<Image, ImageError> {
    blur_with(src, kernel_size, BlurNormalization::RadiusSquared)
}

/// Blur an image with a box blur using the given normalization.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel_size` - The full side length of the neighborhood, odd.
/// * `normalization` - How the neighborhood sum is divided.
///
/// # Errors
///
/// Returns [`ImageError::InvalidKernel`] if `kernel_size` is zero or even.
pub fn blur_with(
    src: &Image,
    kernel_size: usize,
    normalization: BlurNormalization,
) -> Result<Image, ImageError> {
    check_kernel_size(kernel_size)?;

    let radius = kernel_size / 2;
    let channels = src.num_channels();
    let (cols, src_data) = (src.cols(), src.as_slice());

    log::debug!(
        "blur {}x{}x{} with kernel size {kernel_size} ({normalization:?})",
        src.rows(),
        cols,
        channels
    );

    let radius_sq = (radius as f32).powi(2).max(1.0);

    map_windows(src, radius, |window, _, _, dst_pixel| {
        let divisor = match normalization {
            BlurNormalization::RadiusSquared => radius_sq,
            BlurNormalization::NeighborCount => window.len() as f32,
        };
        for (ch, dst_sample) in dst_pixel.iter_mut().enumerate() {
            let mut total = 0.0;
            for ri in window.rows.clone() {
                for ci in window.cols.clone() {
                    total += src_data[(ri * cols + ci) * channels + ch];
                }
            }
            *dst_sample = total / divisor;
        }
    })
}

/// Convolve an image with a square kernel.
///
/// For every output pixel `(row, col)` and channel `c` the result is
///
/// dst(row,col,c) = sum src(ri,ci,c) * kernel(ri - row + r, ci - col + r)
///
/// over the in-bounds positions `(ri, ci)` of the neighborhood with radius `r`. The kernel
/// is not flipped, positions outside the image are dropped rather than padded and no
/// divisor is applied, so kernels that should average must be normalized by the caller.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel` - The square kernel, odd-sized.
///
/// # Returns
///
/// A new image with the same shape as `src`.
pub fn convolve(src: &Image, kernel: &Kernel) -> Result<Image, ImageError> {
    let radius = kernel.radius();
    let channels = src.num_channels();
    let (cols, src_data) = (src.cols(), src.as_slice());

    log::debug!(
        "convolve {}x{}x{} with {}x{} kernel",
        src.rows(),
        cols,
        channels,
        kernel.size(),
        kernel.size()
    );

    map_windows(src, radius, |window, row, col, dst_pixel| {
        for (ch, dst_sample) in dst_pixel.iter_mut().enumerate() {
            let mut total = 0.0;
            for ri in window.rows.clone() {
                let kr = ri + radius - row;
                for ci in window.cols.clone() {
                    let kc = ci + radius - col;
                    total += src_data[(ri * cols + ci) * channels + ch] * kernel.get(kr, kc);
                }
            }
            *dst_sample = total;
        }
    })
}

/// Compute the sobel edge magnitude of an image.
///
/// The image is convolved with [`kernels::sobel_x`] and [`kernels::sobel_y`] and the two
/// responses are merged with [`enhance::merge`].
pub fn sobel_magnitude(src: &Image) -> Result<Image, ImageError> {
    let gx = convolve(src, &kernels::sobel_x())?;
    let gy = convolve(src, &kernels::sobel_y())?;
    enhance::merge(&gx, &gy)
}
