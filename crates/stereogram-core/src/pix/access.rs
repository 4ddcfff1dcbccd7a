//! Pixel access functions
//!
//! Checked getters and setters for individual pixels, plus the row-slice
//! helper the synthesis engines use in their inner loops. RGB buffers
//! report an alpha of 255.

use super::{Channels, Pix, PixData, PixMut};
use crate::error::{Error, Result};

impl PixData {
    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let spp = self.channels.count() as usize;
        Some((y as usize * self.width as usize + x as usize) * spp)
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> Error {
        Error::OutOfBounds {
            x: i64::from(x),
            y: i64::from(y),
            width: self.width,
            height: self.height,
        }
    }

    fn rgba_at(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        let i = self.offset(x, y)?;
        let px = &self.data[i..i + self.channels.count() as usize];
        let a = if self.channels.has_alpha() { px[3] } else { 255 };
        Some((px[0], px[1], px[2], a))
    }
}

impl Pix {
    /// Get RGB values at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_rgba(x, y).map(|(r, g, b, _)| (r, g, b))
    }

    /// Get RGBA values at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.inner.rgba_at(x, y)
    }

    /// Get the green sample at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn green_unchecked(&self, x: u32, y: u32) -> u8 {
        let spp = self.inner.channels.count() as usize;
        self.row_data(y)[x as usize * spp + 1]
    }
}

impl PixMut {
    /// Get RGB values at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.inner.rgba_at(x, y).map(|(r, g, b, _)| (r, g, b))
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// Leaves the alpha sample of RGBA buffers untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        let i = self
            .inner
            .offset(x, y)
            .ok_or_else(|| self.inner.out_of_bounds(x, y))?;
        self.inner.data[i..i + 3].copy_from_slice(&[r, g, b]);
        Ok(())
    }

    /// Set an RGBA pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        self.set_rgb(x, y, r, g, b)?;
        if self.inner.channels == Channels::Rgba
            && let Some(i) = self.inner.offset(x, y)
        {
            self.inner.data[i + 3] = a;
        }
        Ok(())
    }
}

/// Copy pixel `src` onto pixel `dst` within one row of interleaved samples.
///
/// `spp` is the number of bytes per pixel.
///
/// # Panics
///
/// Panics if either pixel lies outside `row`.
#[inline]
pub fn copy_row_pixel(row: &mut [u8], spp: usize, src: usize, dst: usize) {
    let s = src * spp;
    row.copy_within(s..s + spp, dst * spp);
}
