#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use pixfilt_image as image;

#[doc(inline)]
pub use pixfilt_imgproc as imgproc;

#[doc(inline)]
pub use pixfilt_io as io;
