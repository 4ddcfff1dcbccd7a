//! Panel-shifting stereogram synthesis
//!
//! The background's first `panel_size` columns are tiled across the image,
//! then every column past the first panel repeats a pixel from
//! `panel_size - z * panel_size * shift_range` columns to its left. Near
//! points repeat with a shorter period and appear to float in front of the
//! far plane.
//!
//! Each column reads a column already written in the same output row, so
//! columns are scanned strictly left to right. Rows never read each other
//! and run in parallel.

use crate::{ShiftParams, SynthResult, check_inputs};
use rayon::prelude::*;
use stereogram_core::{DepthMap, Pix, copy_row_pixel};
use tracing::debug;

/// Horizontal repeat distance for normalized depth `z`.
///
/// `floor(panel_size - z * panel_size * shift_range)`; equals `panel_size`
/// on the far plane.
pub fn shift_amount(z: f32, params: &ShiftParams) -> u32 {
    let panel = params.panel_size as f32;
    (panel - z * panel * params.shift_range).floor().max(0.0) as u32
}

/// Tile one row in place with its first `panel_size` pixels.
fn tile_row(row: &mut [u8], spp: usize, panel_size: usize) {
    let width = row.len() / spp;
    for x in panel_size..width {
        copy_row_pixel(row, spp, x % panel_size, x);
    }
}

/// Repeat the first panel of `background` across its full width.
///
/// Column `x` of the result equals column `x % panel_size` of the
/// background for every row. Panels that run past the right edge are
/// clipped; a panel at least as wide as the image leaves it unchanged.
///
/// # Errors
///
/// Returns [`SynthError::InvalidParameters`](crate::SynthError::InvalidParameters)
/// if `panel_size` is 0.
pub fn tile_panels(background: &Pix, panel_size: u32) -> SynthResult<Pix> {
    ShiftParams::with_panel_size(panel_size).validate()?;

    let spp = background.channels().count() as usize;
    let mut tiled = background.to_mut();
    let stride = tiled.row_stride();
    tiled
        .data_mut()
        .par_chunks_mut(stride)
        .for_each(|row| tile_row(row, spp, panel_size as usize));
    Ok(tiled.into())
}

/// Apply the depth-dependent shift to one tiled row.
///
/// Columns up to and including `panel_size` have nothing to repeat yet and
/// are left as tiled.
fn shift_row(row: &mut [u8], spp: usize, depths: &[f32], params: &ShiftParams) {
    let panel_size = params.panel_size as usize;
    for (x, &z) in depths.iter().enumerate().skip(panel_size + 1) {
        let shift = shift_amount(z, params) as usize;
        copy_row_pixel(row, spp, x - shift, x);
    }
}

/// Synthesize an autostereogram by shifting a tiled background.
///
/// # Arguments
/// * `background` - Texture whose first panel is repeated
/// * `depth` - Depth map with the same width and height
/// * `params` - Panel width and shift range
///
/// # Returns
/// A new buffer with the background's size and channel layout.
///
/// # Errors
/// * [`SynthError::InvalidParameters`](crate::SynthError::InvalidParameters)
///   if `params` fails validation
/// * [`SynthError::Core`](crate::SynthError::Core) wrapping
///   `DimensionMismatch` if the buffers differ in size
///
/// # Example
/// ```
/// use stereogram_core::{Channels, DepthMap, Pix};
/// use stereogram_synth::{ShiftParams, shift_synthesize};
///
/// let background = Pix::from_rgb_fn(256, 10, |x, y| (x as u8, y as u8, 0)).unwrap();
/// let depth = DepthMap::new(Pix::new(256, 10, Channels::Rgb).unwrap());
/// let out = shift_synthesize(&background, &depth, &ShiftParams::default()).unwrap();
/// assert_eq!(out.get_rgb(200, 3), Some((200 % 64, 3, 0)));
/// ```
pub fn shift_synthesize(
    background: &Pix,
    depth: &DepthMap,
    params: &ShiftParams,
) -> SynthResult<Pix> {
    params.validate()?;
    check_inputs(background, depth)?;

    let (width, height) = background.dimensions();
    debug!(
        width,
        height,
        panel_size = params.panel_size,
        shift_range = params.shift_range,
        "shift synthesis"
    );

    let spp = background.channels().count() as usize;
    let mut out = tile_panels(background, params.panel_size)?
        .try_into_mut()
        .unwrap_or_else(|tiled| tiled.to_mut());
    let stride = out.row_stride();

    out.data_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each_init(
            || Vec::<f32>::with_capacity(width as usize),
            |depths, (y, row)| {
                depth.row_depths(y as u32, depths);
                shift_row(row, spp, depths, params);
            },
        );

    Ok(out.into())
}

/// [`shift_synthesize`] with the default parameters (64 px panels, 0.3 range).
pub fn shift_synthesize_default(background: &Pix, depth: &DepthMap) -> SynthResult<Pix> {
    shift_synthesize(background, depth, &ShiftParams::default())
}
