//! Filter operations
//!
//! This module provides neighborhood filters for image processing.

/// Filter kernels
pub mod kernels;
pub use kernels::Kernel;

/// Filter operations
mod ops;
pub use ops::*;
