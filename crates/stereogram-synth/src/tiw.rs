//! Thimbleby-Inglis-Witten stereogram synthesis
//!
//! Implements the algorithm from Thimbleby, Inglis and Witten, "Displaying
//! 3D images: algorithms for single-image random-dot stereograms",
//! Computer 27(10), 1994.
//!
//! # Algorithm
//!
//! Each row is handled on its own:
//!
//! 1. For every column `x`, the depth `z` gives the stereo separation
//!    `sep = round((1 - mu*z) * E / (2 - mu*z))` between the two points the
//!    eyes see for that surface point (`E` is the eye separation in pixels).
//! 2. Points hidden from one eye by nearer geometry are skipped.
//! 3. The two columns `left` and `right = left + sep` are recorded as equal
//!    in a row-local link array, where `links[x]` always points at `x`
//!    itself or a column to its right.
//! 4. A right-to-left pass copies each constrained column from its link
//!    target, which has already been resolved.
//!
//! Unconstrained columns keep the background colour.
//!
//! The output is a full copy of the background made before any row is
//! processed; rows are then independent and run in parallel.

use crate::{SynthResult, TiwParams, check_inputs};
use rayon::prelude::*;
use stereogram_core::{DepthMap, Pix, copy_row_pixel};
use tracing::debug;

/// Stereo separation in pixels for normalized depth `z`.
///
/// Non-increasing in `z`: nearer points need less separation.
pub fn separation(z: f32, params: &TiwParams) -> i32 {
    let mu_z = params.mu * z;
    ((1.0 - mu_z) * params.eye_sep() / (2.0 - mu_z)).round() as i32
}

/// Columns seen by the left and right eye for a point at column `x`.
///
/// The rounding of odd separations alternates with row parity so the
/// error does not line up into vertical bands.
#[inline]
fn eye_columns(x: i64, sep: i64, y: u32) -> (i64, i64) {
    let bias = sep & i64::from(y) & 1;
    let left = x - (sep + bias) / 2;
    (left, left + sep)
}

/// Hidden-surface test for the point at column `x` with depth `z`.
///
/// Walks outward from `x`, comparing the neighbours on both sides with the
/// height of the ray towards each eye. The point is visible when the rays
/// reach the near plane before either neighbour rises above them. Columns
/// outside the row read as the far plane.
fn is_visible(depths: &[f32], x: usize, z: f32, params: &TiwParams) -> bool {
    let mu = params.mu;
    let eye_sep = params.eye_sep();
    let depth_at = |i: Option<usize>| i.and_then(|i| depths.get(i)).copied().unwrap_or(0.0);

    let mut t = 1usize;
    loop {
        let zt = z + 2.0 * (2.0 - mu * z) * t as f32 / (mu * eye_sep);
        let clear = depth_at(x.checked_sub(t)) < zt && depth_at(x.checked_add(t)) < zt;
        if !clear {
            return false;
        }
        if zt >= 1.0 {
            return true;
        }
        t += 1;
    }
}

/// Record that columns `left` and `right` must share a colour.
///
/// Follows the existing chain from `left` so the links stay sorted
/// rightward and acyclic.
fn link(links: &mut [u32], mut left: u32, mut right: u32) {
    loop {
        let k = links[left as usize];
        if k == left || k == right {
            break;
        }
        if k < right {
            left = k;
        } else {
            left = right;
            right = k;
        }
    }
    links[left as usize] = right;
}

/// Build the constraint links for one row.
///
/// `depths` holds the normalized depths of row `y`; `links` is resized to
/// the row width and reset to the identity before linking, so one
/// allocation can serve every row.
///
/// On return `links[x] >= x` for every column.
pub fn row_links(depths: &[f32], y: u32, params: &TiwParams, links: &mut Vec<u32>) {
    let width = depths.len();
    links.clear();
    links.extend(0..width as u32);

    for (x, &z) in depths.iter().enumerate() {
        let sep = separation(z, params);
        let (left, right) = eye_columns(x as i64, i64::from(sep), y);
        if left < 0 || right as usize >= width {
            continue;
        }
        if is_visible(depths, x, z, params) {
            link(links, left as u32, right as u32);
        }
    }
}

/// Resolve a row from its links, right to left.
///
/// `row` holds the interleaved samples of the row with `spp` bytes per
/// pixel.
pub fn propagate_row(row: &mut [u8], spp: usize, links: &[u32]) {
    for x in (0..links.len()).rev() {
        let target = links[x] as usize;
        if target != x {
            copy_row_pixel(row, spp, target, x);
        }
    }
}

/// Synthesize an autostereogram with the Thimbleby-Inglis-Witten algorithm.
///
/// # Arguments
/// * `background` - Texture the stereogram is painted with
/// * `depth` - Depth map with the same width and height
/// * `params` - Resolution, eye separation and depth of field
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
/// Both are reported before any output is allocated.
///
/// # Example
/// ```
/// use stereogram_core::{Channels, DepthMap, Pix};
/// use stereogram_synth::{TiwParams, tiw_synthesize};
///
/// let background = Pix::from_rgb_fn(300, 4, |x, _| ((x * 37) as u8, 0, 0)).unwrap();
/// let depth = DepthMap::new(Pix::new(300, 4, Channels::Rgb).unwrap());
/// let out = tiw_synthesize(&background, &depth, &TiwParams::default()).unwrap();
/// assert_eq!(out.dimensions(), (300, 4));
/// ```
pub fn tiw_synthesize(background: &Pix, depth: &DepthMap, params: &TiwParams) -> SynthResult<Pix> {
    params.validate()?;
    check_inputs(background, depth)?;

    let (width, height) = background.dimensions();
    debug!(
        width,
        height,
        eye_sep = params.eye_sep(),
        mu = params.mu,
        "TIW synthesis"
    );

    let spp = background.channels().count() as usize;
    let mut out = background.to_mut();
    let stride = out.row_stride();

    out.data_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each_init(
            || {
                (
                    Vec::<f32>::with_capacity(width as usize),
                    Vec::<u32>::with_capacity(width as usize),
                )
            },
            |(depths, links), (y, row)| {
                let y = y as u32;
                depth.row_depths(y, depths);
                row_links(depths, y, params, links);
                propagate_row(row, spp, links);
            },
        );

    Ok(out.into())
}

/// [`tiw_synthesize`] with the default parameters (72 dpi, mu = 1/3).
pub fn tiw_synthesize_default(background: &Pix, depth: &DepthMap) -> SynthResult<Pix> {
    tiw_synthesize(background, depth, &TiwParams::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stereogram_core::Channels;

    fn flat(width: usize, z: f32) -> Vec<f32> {
        vec![z; width]
    }

    #[test]
    fn test_separation_flat_is_half_eye_sep() {
        let params = TiwParams::default();
        assert_eq!(separation(0.0, &params), 90);
        // (1 - 1/3) * 180 / (2 - 1/3) = 72
        assert_eq!(separation(1.0, &params), 72);
    }

    #[test]
    fn test_separation_monotonic() {
        let params = TiwParams::default();
        let mut prev = separation(0.0, &params);
        for i in 1..=255u8 {
            let sep = separation(f32::from(i) / 255.0, &params);
            assert!(sep <= prev, "sep rose from {prev} to {sep} at sample {i}");
            prev = sep;
        }
    }

    #[test]
    fn test_eye_columns_parity() {
        // Even separation: no bias on any row
        assert_eq!(eye_columns(100, 90, 0), (55, 145));
        assert_eq!(eye_columns(100, 90, 1), (55, 145));
        // Odd separation: odd rows round the other way
        assert_eq!(eye_columns(100, 75, 0), (63, 138));
        assert_eq!(eye_columns(100, 75, 1), (62, 137));
        // Saturated separations stay in range
        let (left, right) = eye_columns(0, i64::from(i32::MAX), 1);
        assert_eq!(right - left, i64::from(i32::MAX));
    }

    #[test]
    fn test_flat_is_visible() {
        let depths = flat(300, 0.0);
        assert!(is_visible(&depths, 150, 0.0, &TiwParams::default()));
    }

    #[test]
    fn test_occluded_by_nearer_neighbour() {
        let mut depths = flat(300, 0.0);
        depths[152] = 1.0;
        assert!(!is_visible(&depths, 150, 0.0, &TiwParams::default()));
        // The raised column itself is on the near plane
        assert!(is_visible(&depths, 152, 1.0, &TiwParams::default()));
    }

    #[test]
    fn test_link_merges_chains_rightward() {
        let mut links: Vec<u32> = (0..10).collect();
        link(&mut links, 2, 4);
        assert_eq!(links[2], 4);
        // 2 -> 4 exists; linking 2 with 6 extends the chain from 4
        link(&mut links, 2, 6);
        assert_eq!(links[2], 4);
        assert_eq!(links[4], 6);
        // 2 -> 4 -> 6 exists; linking 2 with 5 joins 5 onto 6
        link(&mut links, 2, 5);
        assert_eq!(links[4], 6);
        assert_eq!(links[5], 6);
        // already linked through the chain
        link(&mut links, 4, 5);
        assert_eq!(links[4], 6);
        assert_eq!(links[5], 6);
        for (x, &k) in links.iter().enumerate() {
            assert!(k as usize >= x);
        }
    }

    #[test]
    fn test_row_links_flat_period() {
        let depths = flat(300, 0.0);
        let mut links = Vec::new();
        row_links(&depths, 0, &TiwParams::default(), &mut links);
        assert_eq!(links.len(), 300);
        for (x, &k) in links.iter().enumerate() {
            if x + 90 < 300 {
                assert_eq!(k as usize, x + 90, "column {x}");
            } else {
                assert_eq!(k as usize, x, "column {x}");
            }
        }
    }

    #[test]
    fn test_row_links_resets_between_rows() {
        let params = TiwParams::default();
        let mut links = Vec::new();
        row_links(&flat(300, 0.0), 0, &params, &mut links);
        row_links(&flat(50, 0.0), 1, &params, &mut links);
        // too narrow for any pair to fit
        assert_eq!(links, (0..50).collect::<Vec<u32>>());
    }

    #[test]
    fn test_propagate_row() {
        let mut row = vec![10, 11, 12, 20, 21, 22, 30, 31, 32];
        propagate_row(&mut row, 3, &[2, 2, 2]);
        assert_eq!(row, vec![30, 31, 32, 30, 31, 32, 30, 31, 32]);
    }

    #[test]
    fn test_narrow_image_copies_background() {
        let bg = Pix::from_rgb_fn(40, 3, |x, y| (x as u8, y as u8, 1)).unwrap();
        let depth = DepthMap::new(Pix::new(40, 3, Channels::Rgb).unwrap());
        let out = tiw_synthesize_default(&bg, &depth).unwrap();
        assert!(out.equals(&bg));
    }
}
