//! stereogram-synth - Autostereogram synthesis
//!
//! This crate turns a background texture and a depth map of the same size
//! into a single-image stereogram. Two independent engines are provided:
//!
//! - [`tiw_synthesize`] - Thimbleby-Inglis-Witten constraint linking with
//!   hidden-surface removal
//! - [`shift_synthesize`] - Tiled background panels shifted by depth
//!
//! Both are deterministic, leave their inputs untouched and return a
//! freshly allocated buffer.

mod error;
pub mod params;
pub mod shift;
pub mod tiw;

pub use error::{SynthError, SynthResult};
pub use params::{ShiftParams, TiwParams};
pub use shift::{shift_amount, shift_synthesize, shift_synthesize_default, tile_panels};
pub use tiw::{separation, tiw_synthesize, tiw_synthesize_default};

use stereogram_core::{DepthMap, Error, Pix};

/// Check the input contract shared by both engines.
///
/// The background and depth map must have the same, non-zero size.
fn check_inputs(background: &Pix, depth: &DepthMap) -> SynthResult<()> {
    let (width, height) = background.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::EmptyBuffer { width, height }.into());
    }
    background.check_same_size(depth.as_pix())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stereogram_core::Channels;

    #[test]
    fn test_check_inputs_mismatch() {
        let bg = Pix::new(100, 100, Channels::Rgb).unwrap();
        let depth = DepthMap::new(Pix::new(50, 50, Channels::Rgb).unwrap());
        let err = check_inputs(&bg, &depth).unwrap_err();
        assert!(err.is_dimension_mismatch());
    }

    #[test]
    fn test_check_inputs_mixed_channels() {
        let bg = Pix::new(8, 8, Channels::Rgba).unwrap();
        let depth = DepthMap::new(Pix::new(8, 8, Channels::Rgb).unwrap());
        assert!(check_inputs(&bg, &depth).is_ok());
    }
}
