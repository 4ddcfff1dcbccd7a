//! Pixel buffer regression test
//!
//! Exercises the shared/unique ownership model of `Pix`, per-pixel access
//! and the depth map view used by the synthesis engines.

use stereogram_core::{Channels, DepthMap, Error, Pix, PixMut};
use stereogram_test::RegParams;

#[test]
fn pix_reg_sharing_and_copy_on_write() {
    let mut rp = RegParams::new("pix_sharing");

    let pix = Pix::from_rgb_fn(16, 8, |x, y| (x as u8 * 10, y as u8 * 20, 7)).unwrap();
    let shared = pix.clone();
    rp.compare_values(2.0, pix.ref_count() as f64, 0.0);

    // A shared buffer cannot be taken over; editing goes through a copy
    let shared = match shared.try_into_mut() {
        Ok(_) => panic!("buffer is shared"),
        Err(p) => p,
    };
    let mut edited = shared.to_mut();
    edited.set_rgb(3, 3, 1, 2, 3).unwrap();
    let edited: Pix = edited.into();

    rp.check(pix.get_rgb(3, 3) == Some((30, 60, 7)), "original untouched");
    rp.check(edited.get_rgb(3, 3) == Some((1, 2, 3)), "copy edited");
    rp.compare_values(1.0, pix.count_differing_pixels(&edited).unwrap() as f64, 0.0);

    drop(shared);
    rp.check(pix.try_into_mut().is_ok(), "sole owner can mutate in place");

    assert!(rp.cleanup());
}

#[test]
fn pix_reg_access_and_bounds() {
    let mut rp = RegParams::new("pix_access");

    let mut pm = PixMut::new(5, 4, Channels::Rgba).unwrap();
    pm.set_rgba(4, 3, 9, 8, 7, 6).unwrap();
    pm.set_rgba(0, 0, 1, 2, 3, 4).unwrap();
    let err = pm.set_rgb(5, 0, 0, 0, 0).unwrap_err();
    rp.check(matches!(err, Error::OutOfBounds { x: 5, .. }), "set out of range");

    let pix: Pix = pm.into();
    rp.check(pix.get_rgba(4, 3) == Some((9, 8, 7, 6)), "rgba read back");
    rp.check(
        pix.get_rgba(0, 0) == Some((1, 2, 3, 4)),
        "first pixel read back",
    );
    rp.check(pix.get_rgb(0, 4).is_none(), "row out of range");
    rp.compare_values(20.0, pix.row_stride() as f64, 0.0);

    // RGB comparison ignores alpha and channel layout
    let rgb = Pix::from_raw(5, 4, Channels::Rgb, pix.to_rgb_bytes()).unwrap();
    rp.check(rgb.equals(&pix), "rgb view equals rgba buffer");

    assert!(rp.cleanup());
}

#[test]
fn pix_reg_depth_map() {
    let mut rp = RegParams::new("pix_depth");

    let bg = Pix::new(6, 3, Channels::Rgb).unwrap();
    // Only green carries depth
    let depth_pix = Pix::from_rgb_fn(6, 3, |x, _| (255, (x * 51) as u8, 255)).unwrap();
    let depth = DepthMap::paired_with(&bg, depth_pix).unwrap();

    rp.compare_values(0.0, f64::from(depth.sample(0, 0)), 0.0);
    rp.compare_values(1.0, f64::from(depth.sample(5, 2)), 1e-6);
    rp.compare_values(0.4, f64::from(depth.sample(2, 1)), 1e-6);

    let mut row = Vec::new();
    depth.row_depths(1, &mut row);
    rp.compare_values(6.0, row.len() as f64, 0.0);
    rp.check(row.windows(2).all(|w| w[0] < w[1]), "ramp increases");

    rp.check(depth.try_sample(-1, 0).is_err(), "negative x rejected");
    rp.check(depth.try_sample(0, 3).is_err(), "y past bottom rejected");

    let other = Pix::new(5, 3, Channels::Rgb).unwrap();
    let err = DepthMap::paired_with(&bg, other).unwrap_err();
    rp.check(
        matches!(
            err,
            Error::DimensionMismatch {
                expected: (6, 3),
                actual: (5, 3)
            }
        ),
        "mismatched depth map rejected",
    );

    assert!(rp.cleanup());
}
