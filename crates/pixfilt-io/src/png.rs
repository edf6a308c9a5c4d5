use std::{
    fs::File,
    io::{BufReader, BufWriter, Read},
    path::Path,
};

use pixfilt_image::{Image, ImageSize};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};

use crate::{error::IoError, gamma};

/// Read a PNG image as linear `f32` samples.
///
/// Grayscale images yield one channel and RGB images three. Palette and low bit depth
/// images are expanded to 8 bits first. Samples are normalized to `[0, 1]` by the maximum
/// value of the bit depth and then gamma decoded with `sample ^ gamma`.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
/// * `gamma` - The gamma exponent, typically [`gamma::DEFAULT_GAMMA`].
///
/// # Errors
///
/// Fails if the file is missing, is not a `.png` file, cannot be decoded, or carries an
/// alpha channel.
pub fn read_image_png_f32(file_path: impl AsRef<Path>, gamma: f32) -> Result<Image, IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    match file_path.extension() {
        Some(extension) if extension.eq_ignore_ascii_case("png") => {}
        _ => return Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }

    let file = BufReader::new(File::open(file_path)?);
    let image = decode_png_impl(file, gamma)?;

    log::debug!(
        "read {} ({}x{}x{})",
        file_path.display(),
        image.width(),
        image.height(),
        image.num_channels()
    );

    Ok(image)
}

/// Decode a PNG image from raw bytes as linear `f32` samples.
///
/// See [`read_image_png_f32`] for the supported layouts.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the png file.
/// * `gamma` - The gamma exponent, typically [`gamma::DEFAULT_GAMMA`].
pub fn decode_image_png_f32(bytes: &[u8], gamma: f32) -> Result<Image, IoError> {
    decode_png_impl(bytes, gamma)
}

/// Write an image as an 8-bit PNG file.
///
/// Samples are clipped to `[0, 1]`, gamma encoded with `sample ^ (1 / gamma)`, scaled to
/// `[0, 255]` and rounded. One channel images are written as grayscale, three channel
/// images as RGB.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG image.
/// * `image` - The image with linear samples.
/// * `gamma` - The gamma exponent, typically [`gamma::DEFAULT_GAMMA`].
pub fn write_image_png_f32(
    file_path: impl AsRef<Path>,
    image: &Image,
    gamma: f32,
) -> Result<(), IoError> {
    let color_type = match image.num_channels() {
        1 => ColorType::Grayscale,
        3 => ColorType::Rgb,
        channels => return Err(IoError::UnsupportedChannels(channels)),
    };

    let mut samples = image.as_slice().to_vec();
    gamma::encode_gamma(&mut samples, gamma);
    let image_data = samples
        .iter()
        .map(|s| (s * 255.0).round() as u8)
        .collect::<Vec<_>>();

    let file_path = file_path.as_ref();
    write_png_impl(file_path, &image_data, image.size(), color_type)?;

    log::debug!(
        "wrote {} ({}x{}x{})",
        file_path.display(),
        image.width(),
        image.height(),
        image.num_channels()
    );

    Ok(())
}

fn decode_png_impl<R: Read>(reader: R, gamma: f32) -> Result<Image, IoError> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);

    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let channels = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::Rgb => 3,
        other => return Err(IoError::UnsupportedColorType(format!("{other:?}"))),
    };

    let mut samples = match info.bit_depth {
        BitDepth::Eight => buf.iter().map(|&b| b as f32 / 255.0).collect::<Vec<_>>(),
        BitDepth::Sixteen => buf
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]) as f32 / 65535.0)
            .collect::<Vec<_>>(),
        other => {
            return Err(IoError::PngDecodeError(format!(
                "unexpected bit depth after expansion: {other:?}"
            )))
        }
    };
    gamma::decode_gamma(&mut samples, gamma);

    let size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };

    Ok(Image::new(size, channels, samples)?)
}

fn write_png_impl(
    file_path: &Path,
    image_data: &[u8],
    image_size: ImageSize,
    color_type: ColorType,
) -> Result<(), IoError> {
    let file = BufWriter::new(File::create(file_path)?);

    let mut encoder = Encoder::new(file, image_size.width as u32, image_size.height as u32);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs::{create_dir_all, read, write};

    fn encode_raw(
        width: u32,
        height: u32,
        color_type: ColorType,
        depth: BitDepth,
        data: &[u8],
    ) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = Encoder::new(&mut bytes, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        bytes
    }

    #[test]
    fn read_write_png_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        create_dir_all(tmp_dir.path())?;

        let data = (0..4 * 3 * 3).map(|i| i as f32 / 35.0).collect();
        let image = Image::new([4, 3].into(), 3, data)?;

        let file_path = tmp_dir.path().join("rgb.png");
        write_image_png_f32(&file_path, &image, gamma::DEFAULT_GAMMA)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_png_f32(&file_path, gamma::DEFAULT_GAMMA)?;
        assert_eq!(image_back.cols(), 4);
        assert_eq!(image_back.rows(), 3);
        assert_eq!(image_back.num_channels(), 3);

        for (a, b) in image_back.as_slice().iter().zip(image.as_slice()) {
            assert_relative_eq!(*a, *b, epsilon = 5e-3);
        }

        Ok(())
    }

    #[test]
    fn write_png_clips() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");

        let image = Image::new([3, 1].into(), 1, vec![-2.0, 0.5, 9.0])?;
        write_image_png_f32(&file_path, &image, 1.0)?;

        let image_back = read_image_png_f32(&file_path, 1.0)?;
        assert_eq!(image_back.num_channels(), 1);
        assert_eq!(image_back.get([0, 0, 0]), Some(&0.0));
        assert_relative_eq!(image_back.as_slice()[1], 128.0 / 255.0, epsilon = 1e-6);
        assert_eq!(image_back.get([0, 2, 0]), Some(&1.0));

        Ok(())
    }

    #[test]
    fn decode_png_gray16() -> Result<(), IoError> {
        let data = [0x00, 0x00, 0xff, 0xff, 0x80, 0x00];
        let bytes = encode_raw(3, 1, ColorType::Grayscale, BitDepth::Sixteen, &data);

        let image = decode_image_png_f32(&bytes, 1.0)?;
        assert_eq!(image.shape(), [1, 3, 1]);
        assert_eq!(image.get([0, 0, 0]), Some(&0.0));
        assert_eq!(image.get([0, 1, 0]), Some(&1.0));
        assert_relative_eq!(image.as_slice()[2], 32768.0 / 65535.0, epsilon = 1e-6);

        Ok(())
    }

    #[test]
    fn decode_png_applies_gamma() -> Result<(), IoError> {
        let bytes = encode_raw(1, 1, ColorType::Rgb, BitDepth::Eight, &[255, 0, 51]);
        let image = decode_image_png_f32(&bytes, 2.0)?;
        assert_eq!(image.as_slice()[0], 1.0);
        assert_eq!(image.as_slice()[1], 0.0);
        assert_relative_eq!(image.as_slice()[2], 0.04, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn decode_png_rgba_unsupported() {
        let bytes = encode_raw(1, 1, ColorType::Rgba, BitDepth::Eight, &[1, 2, 3, 4]);
        let res = decode_image_png_f32(&bytes, gamma::DEFAULT_GAMMA);
        assert!(matches!(res, Err(IoError::UnsupportedColorType(_))));
    }

    #[test]
    fn read_png_missing_file() {
        let res = read_image_png_f32("does/not/exist.png", gamma::DEFAULT_GAMMA);
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_png_invalid_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.jpg");
        write(&file_path, [0u8; 4])?;

        let res = read_image_png_f32(&file_path, gamma::DEFAULT_GAMMA);
        assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
        Ok(())
    }

    #[test]
    fn write_png_unsupported_channels() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("rgba.png");

        let image = Image::zeros([2, 2].into(), 4)?;
        let res = write_image_png_f32(&file_path, &image, gamma::DEFAULT_GAMMA);
        assert!(matches!(res, Err(IoError::UnsupportedChannels(4))));
        assert!(!file_path.exists());
        Ok(())
    }

    #[test]
    fn decode_matches_read() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("pixel.png");

        let image = Image::new([2, 1].into(), 1, vec![0.2, 0.8])?;
        write_image_png_f32(&file_path, &image, gamma::DEFAULT_GAMMA)?;

        let bytes = read(&file_path)?;
        let decoded = decode_image_png_f32(&bytes, gamma::DEFAULT_GAMMA)?;
        let from_file = read_image_png_f32(&file_path, gamma::DEFAULT_GAMMA)?;
        assert_eq!(decoded, from_file);
        Ok(())
    }
}
