/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when one of the image dimensions is zero or their product overflows.
    #[error("Invalid image dimensions: height={0}, width={1}, channels={2}")]
    InvalidDimensions(usize, usize, usize),

    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images that must share a shape do not.
    #[error("Image shapes do not match: {0:?} vs {1:?}")]
    DimensionMismatch([usize; 3], [usize; 3]),

    /// Error when a convolution kernel is not square or not odd-sized.
    #[error("Invalid kernel: {0}")]
    InvalidKernel(String),

    /// Error when the pixel index is out of bounds.
    #[error("Pixel index ({0}, {1}) out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds {1}")]
    ChannelIndexOutOfBounds(usize, usize),
}
