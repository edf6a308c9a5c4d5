#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access and PNG encoding/decoding failures.
pub mod error;

/// Gamma decoding and encoding of samples.
///
/// Converts between encoded sample values and linear values at the file boundary.
pub mod gamma;

/// PNG image encoding and decoding.
///
/// Read 8 or 16-bit grayscale and RGB PNG files into `f32` images and write them back.
pub mod png;

pub use crate::error::IoError;
pub use crate::gamma::DEFAULT_GAMMA;
pub use crate::png::{decode_image_png_f32, read_image_png_f32, write_image_png_f32};
