//! Depth maps and the depth sampler
//!
//! A depth map is an ordinary [`Pix`] whose green channel carries depth.
//! Sample values 0..=255 map linearly onto 0.0..=1.0, larger values being
//! nearer to the viewer. Red and blue are ignored, so grayscale maps
//! decoded into RGB work unchanged.

use crate::error::{Error, Result};
use crate::pix::Pix;

/// Largest raw depth sample.
pub const MAX_DEPTH_SAMPLE: f32 = 255.0;

/// Normalize a raw green sample to [0, 1].
#[inline]
pub fn normalize_depth(sample: u8) -> f32 {
    f32::from(sample) / MAX_DEPTH_SAMPLE
}

/// Read-only view of a depth image.
///
/// Cloning is cheap: the underlying [`Pix`] shares its storage.
#[derive(Debug, Clone)]
pub struct DepthMap {
    pix: Pix,
}

impl DepthMap {
    /// Wrap a buffer as a depth map.
    pub fn new(pix: Pix) -> Self {
        DepthMap { pix }
    }

    /// Wrap `pix` after checking it matches the background's geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] with the background size as the
    /// expected size.
    pub fn paired_with(background: &Pix, pix: Pix) -> Result<Self> {
        background.check_same_size(&pix)?;
        Ok(DepthMap { pix })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pix.width()
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pix.height()
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pix.dimensions()
    }

    /// The underlying buffer.
    #[inline]
    pub fn as_pix(&self) -> &Pix {
        &self.pix
    }

    /// Unwrap into the underlying buffer.
    pub fn into_pix(self) -> Pix {
        self.pix
    }

    /// Normalized depth at (x, y).
    ///
    /// Callers guarantee the coordinates are in range.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> f32 {
        normalize_depth(self.pix.green_unchecked(x, y))
    }

    /// Normalized depth at (x, y), for coordinates that may be out of range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for coordinates outside the map.
    pub fn try_sample(&self, x: i64, y: i64) -> Result<f32> {
        let (w, h) = self.dimensions();
        if x < 0 || y < 0 || x >= i64::from(w) || y >= i64::from(h) {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: w,
                height: h,
            });
        }
        Ok(self.sample(x as u32, y as u32))
    }

    /// Fill `out` with the normalized depths of row `y`.
    ///
    /// `out` is cleared first so one allocation can serve every row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_depths(&self, y: u32, out: &mut Vec<f32>) {
        let spp = self.pix.channels().count() as usize;
        out.clear();
        out.extend(
            self.pix
                .row_data(y)
                .chunks_exact(spp)
                .map(|px| normalize_depth(px[1])),
        );
    }
}

impl From<Pix> for DepthMap {
    fn from(pix: Pix) -> Self {
        DepthMap::new(pix)
    }
}
