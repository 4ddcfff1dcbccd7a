//! Stereogram Core - Pixel buffers and depth sampling
//!
//! This crate provides the data structures shared by the stereogram
//! synthesis engines and the image source/sink:
//!
//! - [`Pix`] / [`PixMut`] - 8-bit RGB(A) pixel buffer (immutable / mutable)
//! - [`Channels`] - Samples per pixel
//! - [`DepthMap`] - Green-channel depth image and the depth sampler
//! - [`Error`] - Buffer and access errors

pub mod depth;
pub mod error;
pub mod pix;

pub use depth::{DepthMap, normalize_depth};
pub use error::{Error, Result};
pub use pix::{Channels, Pix, PixMut, copy_row_pixel};

