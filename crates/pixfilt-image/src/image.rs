use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use pixfilt_image::ImageSize;
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

/// Represents an image with floating point samples.
///
/// The samples are stored contiguously with shape (H, W, C), where H is the height of the image,
/// W the width and C the number of channels. The shape is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    size: ImageSize,
    channels: usize,
    data: Vec<f32>,
}

impl Image {
    /// Create a new image from decoded sample data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The number of channels per pixel.
    /// * `data` - The samples of the image in (H, W, C) order.
    ///
    /// # Errors
    ///
    /// If any dimension is zero, the number of samples overflows `usize`, or the length of
    /// the data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixfilt_image::{Image, ImageSize};
    ///
    /// let image = Image::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    3,
    ///    vec![0.0f32; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, channels: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        let expected = sample_count(size, channels)?;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self {
            size,
            channels,
            data,
        })
    }

    /// Create a new image with the given size where every sample is `val`.
    ///
    /// # Errors
    ///
    /// If any dimension is zero or the number of samples overflows `usize`, an error is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixfilt_image::{Image, ImageSize};
    ///
    /// let image = Image::from_size_val([4, 2].into(), 1, 0.5).unwrap();
    ///
    /// assert_eq!(image.get([1, 3, 0]), Some(&0.5));
    /// ```
    pub fn from_size_val(size: ImageSize, channels: usize, val: f32) -> Result<Self, ImageError> {
        let data = vec![val; sample_count(size, channels)?];
        Image::new(size, channels, data)
    }

    /// Create a zero-filled image with the given size and number of channels.
    ///
    /// # Errors
    ///
    /// If any dimension is zero or the number of samples overflows `usize`, an error is
    /// returned.
    pub fn zeros(size: ImageSize, channels: usize) -> Result<Self, ImageError> {
        Self::from_size_val(size, channels, 0.0)
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
        self.channels
    }

    /// Get the shape of the image as `[height, width, channels]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.size.height, self.size.width, self.channels]
    }

    /// Whether both images have the same height, width and number of channels.
    pub fn same_shape(&self, other: &Image) -> bool {
        self.shape() == other.shape()
    }

    /// Get the samples of the image as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get the samples of the image as a mutable slice.
    ///
    /// The length of the slice is fixed, so the shape of the image cannot change.
    pub fn as_slice_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the image and return its samples.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Get a sample by its `[row, col, channel]` index.
    ///
    /// Returns `None` if the index is out of bounds.
    pub fn get(&self, index: [usize; 3]) -> Option<&f32> {
        let [row, col, ch] = index;
        if row >= self.height() || col >= self.width() || ch >= self.channels {
            return None;
        }
        self.data.get((row * self.width() + col) * self.channels + ch)
    }

    /// Get the sample at the given coordinates.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate (column) of the pixel.
    /// * `y` - The y-coordinate (row) of the pixel.
    /// * `ch` - The channel index of the pixel.
    ///
    /// # Errors
    ///
    /// If the pixel or channel index is out of bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<f32, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= self.channels {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, self.channels));
        }

        Ok(self.data[(y * self.width() + x) * self.channels + ch])
    }
}

// number of samples of a (height, width, channels) buffer, all dimensions non-zero
fn sample_count(size: ImageSize, channels: usize) -> Result<usize, ImageError> {
    let invalid = ImageError::InvalidDimensions(size.height, size.width, channels);
    if size.width == 0 || size.height == 0 || channels == 0 {
        return Err(invalid);
    }
    size.width
        .checked_mul(size.height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or(invalid)
}
