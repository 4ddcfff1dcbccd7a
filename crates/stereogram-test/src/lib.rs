//! stereogram-test - Regression test framework for stereogram-rs
//!
//! Provides [`RegParams`], which counts checks and collects failures
//! without panicking, plus builders for the synthetic backgrounds and
//! depth maps the regression tests feed the engines. Three modes are
//! supported:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use stereogram_test::{RegParams, flat_depth, stripe_background};
//!
//! let mut rp = RegParams::new("tiw");
//! let bg = stripe_background(300, 1).unwrap();
//! let depth = flat_depth(300, 1, 0).unwrap();
//! // ...
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use stereogram_core::{DepthMap, Pix};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // stereogram-test is at crates/stereogram-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Background whose columns all differ within any 256-pixel window.
///
/// Red is `x mod 256`, green `y mod 256` and blue a coarser `x / 7`
/// ramp, so copied columns are easy to trace.
pub fn stripe_background(width: u32, height: u32) -> TestResult<Pix> {
    Ok(Pix::from_rgb_fn(width, height, |x, y| {
        (x as u8, y as u8, (x / 7) as u8)
    })?)
}

/// Depth map with the same sample everywhere.
pub fn flat_depth(width: u32, height: u32, sample: u8) -> TestResult<DepthMap> {
    let pix = Pix::from_rgb_fn(width, height, |_, _| (sample, sample, sample))?;
    Ok(DepthMap::new(pix))
}

/// Far-plane depth map with a raised rectangle.
///
/// Pixels with `x0 <= x < x1` and `y0 <= y < y1` hold `sample`, everything
/// else 0.
pub fn raised_rect_depth(
    width: u32,
    height: u32,
    (x0, y0, x1, y1): (u32, u32, u32, u32),
    sample: u8,
) -> TestResult<DepthMap> {
    let pix = Pix::from_rgb_fn(width, height, |x, y| {
        let g = if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
            sample
        } else {
            0
        };
        (g, g, g)
    })?;
    Ok(DepthMap::new(pix))
}
