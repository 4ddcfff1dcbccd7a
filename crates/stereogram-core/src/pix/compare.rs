//! Buffer comparison

use super::Pix;

impl Pix {
    /// Check whether two buffers hold the same RGB content.
    ///
    /// Geometry must match; alpha and channel layout are ignored, so an RGBA
    /// buffer equals its RGB counterpart.
    pub fn equals(&self, other: &Pix) -> bool {
        self.count_differing_pixels(other) == Some(0)
    }

    /// Count pixels whose RGB values differ.
    ///
    /// Returns `None` when the dimensions do not match.
    pub fn count_differing_pixels(&self, other: &Pix) -> Option<u64> {
        if !self.sizes_equal(other) {
            return None;
        }
        let a = self.channels().count() as usize;
        let b = other.channels().count() as usize;
        let diff = self
            .data()
            .chunks_exact(a)
            .zip(other.data().chunks_exact(b))
            .filter(|(p, q)| p[..3] != q[..3])
            .count();
        Some(diff as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Channels, PixMut};

    #[test]
    fn test_equals_ignores_alpha() {
        let rgb = Pix::from_raw(1, 1, Channels::Rgb, vec![1, 2, 3]).unwrap();
        let rgba = Pix::from_raw(1, 1, Channels::Rgba, vec![1, 2, 3, 0]).unwrap();
        assert!(rgb.equals(&rgba));
    }

    #[test]
    fn test_count_differing_pixels() {
        let a = Pix::new(5, 5, Channels::Rgb).unwrap();
        let mut b = a.to_mut();
        b.set_rgb(0, 0, 1, 0, 0).unwrap();
        b.set_rgb(4, 4, 0, 0, 1).unwrap();
        let b: Pix = b.into();
        assert_eq!(a.count_differing_pixels(&b), Some(2));
        assert!(!a.equals(&b));

        let c: Pix = PixMut::new(4, 5, Channels::Rgb).unwrap().into();
        assert_eq!(a.count_differing_pixels(&c), None);
    }
}
