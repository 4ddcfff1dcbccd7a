//! PIX - The pixel buffer container
//!
//! `Pix` is the image type shared by the depth sampler, both synthesis
//! engines and the PNG source/sink.
//!
//! # Pixel layout
//!
//! - Samples are 8 bits per channel, interleaved
//! - Rows are stored top to bottom with no padding
//! - A pixel is 3 bytes (RGB) or 4 bytes (RGBA); alpha is carried but
//!   never read by the engines
//!
//! so `data.len() == width * height * channels` always holds.
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`. `to_mut` always
//! allocates, so an output primed from a background never aliases it.

mod access;
mod compare;

pub use access::copy_row_pixel;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Samples per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Channels {
    /// Red, green, blue
    #[default]
    Rgb = 3,
    /// Red, green, blue, alpha
    Rgba = 4,
}

impl Channels {
    /// Create `Channels` from a raw sample count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannels`] if `count` is not 3 or 4.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            _ => Err(Error::InvalidChannels(count)),
        }
    }

    /// Number of bytes per pixel.
    #[inline]
    pub fn count(self) -> u32 {
        self as u32
    }

    /// Whether the fourth (alpha) sample is present.
    #[inline]
    pub fn has_alpha(self) -> bool {
        self == Channels::Rgba
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel
    channels: Channels,
    /// Interleaved samples, row-major
    data: Vec<u8>,
}

impl PixData {
    fn zeroed(width: u32, height: u32, channels: Channels) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyBuffer { width, height });
        }
        let len = Self::data_len(width, height, channels);
        Ok(PixData {
            width,
            height,
            channels,
            data: vec![0u8; len],
        })
    }

    /// Number of bytes needed for the given geometry.
    ///
    /// # Panics
    ///
    /// Panics if the buffer would not fit in `usize`.
    #[inline]
    fn data_len(width: u32, height: u32, channels: Channels) -> usize {
        let len = u64::from(width) * u64::from(height) * u64::from(channels.count());
        usize::try_from(len).unwrap_or_else(|_| {
            panic!("pixel buffer too large: {width}x{height} with {channels:?}")
        })
    }

    #[inline]
    fn row_stride(&self) -> usize {
        self.width as usize * self.channels.count() as usize
    }

    #[inline]
    fn row_range(&self, y: u32) -> std::ops::Range<usize> {
        let stride = self.row_stride();
        let start = y as usize * stride;
        start..start + stride
    }
}

/// PIX - Immutable pixel buffer
///
/// # Examples
///
/// ```
/// use stereogram_core::{Channels, Pix};
///
/// let pix = Pix::new(640, 480, Channels::Rgb).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// assert_eq!(pix.data().len(), 640 * 480 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new buffer with every sample set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBuffer`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::zeroed(width, height, channels)?),
        })
    }

    /// Wrap existing interleaved sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBuffer`] for a zero dimension and
    /// [`Error::InvalidDataLength`] if `data.len()` is not
    /// `width * height * channels`.
    pub fn from_raw(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyBuffer { width, height });
        }
        let expected = PixData::data_len(width, height, channels);
        if data.len() != expected {
            return Err(Error::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                channels,
                data,
            }),
        })
    }

    /// Build an RGB buffer by evaluating `f` at every pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBuffer`] if width or height is 0.
    pub fn from_rgb_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> (u8, u8, u8),
    {
        let mut pix_mut = PixMut::new(width, height, Channels::Rgb)?;
        for y in 0..height {
            let row = pix_mut.row_data_mut(y);
            for (x, px) in row.chunks_exact_mut(3).enumerate() {
                let (r, g, b) = f(x as u32, y);
                px.copy_from_slice(&[r, g, b]);
            }
        }
        Ok(pix_mut.into())
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Bytes per row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.inner.row_stride()
    }

    /// Get raw access to the interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u8] {
        &self.inner.data[self.inner.row_range(y)]
    }

    /// Check if two buffers have the same width and height.
    ///
    /// Channel counts may differ: a depth map only needs matching geometry.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Require `other` to have the same width and height as `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] with `self` as the expected size.
    pub fn check_same_size(&self, other: &Pix) -> Result<()> {
        if self.sizes_equal(other) {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            })
        }
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        self.to_mut().into()
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new allocation that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: PixData {
                width: self.inner.width,
                height: self.inner.height,
                channels: self.inner.channels,
                data: self.inner.data.clone(),
            },
        }
    }

    /// Copy the pixels out as packed 8-bit RGB, dropping alpha.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        match self.inner.channels {
            Channels::Rgb => self.inner.data.clone(),
            Channels::Rgba => self
                .inner
                .data
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zeroed mutable buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBuffer`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::zeroed(width, height, channels)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Bytes per row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.inner.row_stride()
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u8] {
        &self.inner.data[self.inner.row_range(y)]
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u8] {
        let range = self.inner.row_range(y);
        &mut self.inner.data[range]
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}
