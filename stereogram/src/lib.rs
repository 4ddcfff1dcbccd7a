//! Stereogram - Single-image stereogram synthesis for Rust
//!
//! Turns a background texture and a grayscale depth map into an
//! autostereogram that shows the depth map in 3D when viewed wall-eyed.
//!
//! # Overview
//!
//! - Pixel buffers and depth maps ([`Pix`], [`DepthMap`])
//! - Thimbleby-Inglis-Witten synthesis with hidden-surface removal
//!   ([`synth::tiw_synthesize`])
//! - Panel-shifting synthesis ([`synth::shift_synthesize`])
//! - PNG input and output ([`io::read_image`], [`io::write_image`])
//!
//! # Example
//!
//! ```
//! use stereogram::{Channels, DepthMap, Pix};
//! use stereogram::synth::{TiwParams, tiw_synthesize};
//!
//! let background = Pix::from_rgb_fn(320, 40, |x, y| ((x * 7) as u8, (y * 5) as u8, 90)).unwrap();
//! let depth = DepthMap::new(Pix::new(320, 40, Channels::Rgb).unwrap());
//! let out = tiw_synthesize(&background, &depth, &TiwParams::default()).unwrap();
//! assert_eq!(out.dimensions(), (320, 40));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use stereogram_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use stereogram_io as io;
pub use stereogram_synth as synth;
