//! Panel-shifting engine regression test
//!
//! Checks tiling, the untouched first panel and the depth-dependent
//! repeat distance of `shift_synthesize`.

use stereogram_synth::{
    ShiftParams, SynthError, shift_amount, shift_synthesize, shift_synthesize_default, tile_panels,
};
use stereogram_test::{RegParams, flat_depth, raised_rect_depth, stripe_background};

/// A flat far-plane scene is exactly the tiled background.
#[test]
fn shift_reg_flat_equals_tiling() {
    let mut rp = RegParams::new("shift_flat");

    let bg = stripe_background(256, 10).unwrap();
    let depth = flat_depth(256, 10, 0).unwrap();

    let tiled = tile_panels(&bg, 64).unwrap();
    let tiling_ok = (0..10u32).all(|y| (0..256u32).all(|x| tiled.get_rgb(x, y) == bg.get_rgb(x % 64, y)));
    rp.check(tiling_ok, "column x equals background column x mod 64");

    let out = shift_synthesize_default(&bg, &depth).unwrap();
    rp.compare_pix(&tiled, &out);

    rp.write_pix_and_check(&out).unwrap();
    assert!(rp.cleanup());
}

/// Columns up to and including the panel width are never shifted.
#[test]
fn shift_reg_first_panel_untouched() {
    let mut rp = RegParams::new("shift_boundary");

    let bg = stripe_background(256, 10).unwrap();
    let depth = raised_rect_depth(256, 10, (0, 0, 256, 10), 255).unwrap();
    let out = shift_synthesize_default(&bg, &depth).unwrap();
    let tiled = tile_panels(&bg, 64).unwrap();

    for y in 0..10 {
        let kept = (0..=64u32).all(|x| out.get_rgb(x, y) == tiled.get_rgb(x, y));
        rp.check(kept, &format!("row {y} keeps columns 0..=64"));
    }

    // Past the first panel every column repeats the one 44 to its left
    let near = ShiftParams::default();
    rp.compare_values(44.0, f64::from(shift_amount(1.0, &near)), 0.0);
    let repeated = (65..256u32).all(|x| out.get_rgb(x, 5) == out.get_rgb(x - 44, 5));
    rp.check(repeated, "near plane repeats every 44 columns");

    assert!(rp.cleanup());
}

/// A raised rectangle only affects its own rows.
#[test]
fn shift_reg_raised_rect() {
    let mut rp = RegParams::new("shift_rect");

    let bg = stripe_background(320, 60).unwrap();
    let depth = raised_rect_depth(320, 60, (120, 20, 220, 40), 200).unwrap();
    let out = shift_synthesize_default(&bg, &depth).unwrap();
    let tiled = tile_panels(&bg, 64).unwrap();

    let outside = (0..20).chain(40..60).all(|y| out.row_data(y) == tiled.row_data(y));
    rp.check(outside, "rows outside the rectangle are plain tiling");
    let inside = (20..40).all(|y| out.row_data(y) != tiled.row_data(y));
    rp.check(inside, "rows through the rectangle are shifted");

    rp.write_pix_and_check(&out).unwrap();
    assert!(rp.cleanup());
}

#[test]
fn shift_reg_params() {
    let bg = stripe_background(100, 4).unwrap();
    let depth = flat_depth(100, 4, 255).unwrap();

    let err = shift_synthesize(&bg, &depth, &ShiftParams::with_panel_size(0)).unwrap_err();
    assert!(matches!(err, SynthError::InvalidParameters(_)));
    let err = shift_synthesize(&bg, &depth, &ShiftParams::default().shift_range(1.5)).unwrap_err();
    assert!(matches!(err, SynthError::InvalidParameters(_)));

    // A panel wider than the image leaves the background as it is
    let wide = shift_synthesize(&bg, &depth, &ShiftParams::with_panel_size(128)).unwrap();
    assert!(wide.equals(&bg));

    // Zero range means depth has no effect
    let flat = shift_synthesize(&bg, &depth, &ShiftParams::default().shift_range(0.0)).unwrap();
    assert!(flat.equals(&tile_panels(&bg, 64).unwrap()));
}
