use pixfilt_image::{Image, ImageError};

use crate::parallel;

/// Scale the brightness of an image.
///
/// The formula used is:
///
/// dst(x,y,c) = src(x,y,c) * factor
///
/// A factor below 1 darkens the image, above 1 brightens it and 1 leaves it unchanged.
/// The result is not clipped; clipping happens when the image is encoded.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `factor` - The scale applied to each sample, expected to be positive.
///
/// # Returns
///
/// A new image with the same shape as `src`.
///
/// # Examples
///
/// ```
/// use pixfilt_image::Image;
/// use pixfilt_imgproc::enhance::brighten;
///
/// let image = Image::from_size_val([1, 1].into(), 1, 0.5).unwrap();
/// let bright = brighten(&image, 2.0).unwrap();
///
/// assert_eq!(bright.as_slice(), &[1.0]);
/// ```
pub fn brighten(src: &Image, factor: f32) -> Result<Image, ImageError> {
    let mut dst = Image::zeros(src.size(), src.num_channels())?;

    parallel::par_iter_rows_val(src, &mut dst, |&src_sample, dst_sample| {
        *dst_sample = src_sample * factor;
    });

    Ok(dst)
}

/// Adjust the contrast of an image around a midpoint.
///
/// The formula used is:
///
/// dst(x,y,c) = (src(x,y,c) - midpoint) * factor + midpoint
///
/// A factor above 1 stretches the distance to `midpoint` (more contrast), a factor
/// between 0 and 1 compresses it (less contrast) and 1 leaves the image unchanged.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `factor` - The contrast factor.
/// * `midpoint` - The pivot value, typically 0.5 for samples in `[0, 1]`.
///
/// # Returns
///
/// A new image with the same shape as `src`.
pub fn contrast(src: &Image, factor: f32, midpoint: f32) -> Result<Image, ImageError> {
    let mut dst = Image::zeros(src.size(), src.num_channels())?;

    parallel::par_iter_rows_val(src, &mut dst, |&src_sample, dst_sample| {
        *dst_sample = (src_sample - midpoint) * factor + midpoint;
    });

    Ok(dst)
}

/// Combine two images with the root of the sum of squares.
///
/// The formula used is:
///
/// dst(x,y,c) = sqrt(src1(x,y,c)^2 + src2(x,y,c)^2)
///
/// This is typically used to merge the horizontal and vertical responses of an edge
/// detector into a single edge magnitude image.
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `src2` - The second input image.
///
/// # Errors
///
/// Returns [`ImageError::DimensionMismatch`] if the shapes of `src1` and `src2` differ.
pub fn merge(src1: &Image, src2: &Image) -> Result<Image, ImageError> {
    if !src1.same_shape(src2) {
        return Err(ImageError::DimensionMismatch(src1.shape(), src2.shape()));
    }

    let mut dst = Image::zeros(src1.size(), src1.num_channels())?;

    parallel::par_iter_rows_val_two(src1, src2, &mut dst, |&a, &b, dst_sample| {
        *dst_sample = (a * a + b * b).sqrt();
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pixfilt_image::{Image, ImageError, ImageSize};

    fn ramp(size: ImageSize, channels: usize) -> Result<Image, ImageError> {
        let len = size.width * size.height * channels;
        let data = (0..len).map(|i| i as f32 / len as f32).collect();
        Image::new(size, channels, data)
    }

    #[test]
    fn test_brighten() -> Result<(), ImageError> {
        let image = Image::from_size_val([1, 1].into(), 1, 0.5)?;
        let bright = super::brighten(&image, 2.0)?;
        assert_eq!(bright.as_slice(), &[1.0]);

        let src = ramp([4, 3].into(), 3)?;
        let dark = super::brighten(&src, 0.3)?;
        assert_eq!(dark.shape(), src.shape());
        for (d, s) in dark.as_slice().iter().zip(src.as_slice()) {
            assert_eq!(*d, *s * 0.3);
        }

        Ok(())
    }

    #[test]
    fn test_brighten_does_not_clip() -> Result<(), ImageError> {
        let image = Image::from_size_val([2, 2].into(), 3, 0.8)?;
        let bright = super::brighten(&image, 1.7)?;
        assert!(bright.as_slice().iter().all(|&v| v > 1.0));
        Ok(())
    }

    #[test]
    fn test_identity_factors() -> Result<(), ImageError> {
        let src = ramp([5, 4].into(), 3)?;
        assert_eq!(super::brighten(&src, 1.0)?, src);

        for midpoint in [0.0, 0.5, 0.123] {
            let same = super::contrast(&src, 1.0, midpoint)?;
            assert_eq!(same.shape(), src.shape());
            for (v, s) in same.as_slice().iter().zip(src.as_slice()) {
                assert_relative_eq!(*v, *s, epsilon = 1e-6);
            }
        }
        Ok(())
    }

    #[test]
    fn test_contrast() -> Result<(), ImageError> {
        let src = Image::new([3, 1].into(), 1, vec![0.25, 0.5, 0.75])?;

        let more = super::contrast(&src, 2.0, 0.5)?;
        assert_eq!(more.as_slice(), &[0.0, 0.5, 1.0]);

        let less = super::contrast(&src, 0.5, 0.5)?;
        assert_eq!(less.as_slice(), &[0.375, 0.5, 0.625]);

        let pivot = super::contrast(&src, 3.0, 0.0)?;
        assert_eq!(pivot.as_slice(), &[0.75, 1.5, 2.25]);

        Ok(())
    }

    #[test]
    fn test_merge() -> Result<(), ImageError> {
        let a = Image::new([2, 1].into(), 2, vec![3.0, 0.0, -1.0, 5.0])?;
        let b = Image::new([2, 1].into(), 2, vec![4.0, 2.0, 1.0, 12.0])?;

        let ab = super::merge(&a, &b)?;
        let expected = [5.0, 2.0, 2.0f32.sqrt(), 13.0];
        for (v, e) in ab.as_slice().iter().zip(expected.iter()) {
            assert_relative_eq!(*v, *e, epsilon = 1e-6);
        }

        assert_eq!(ab, super::merge(&b, &a)?);

        Ok(())
    }

    #[test]
    fn test_merge_dimension_mismatch() -> Result<(), ImageError> {
        let a = Image::zeros([2, 2].into(), 3)?;
        let b = Image::zeros([2, 2].into(), 1)?;
        assert_eq!(
            super::merge(&a, &b),
            Err(ImageError::DimensionMismatch([2, 2, 3], [2, 2, 1]))
        );

        let c = Image::zeros([3, 2].into(), 3)?;
        assert_eq!(
            super::merge(&a, &c),
            Err(ImageError::DimensionMismatch([2, 2, 3], [2, 3, 3]))
        );

        Ok(())
    }
}
