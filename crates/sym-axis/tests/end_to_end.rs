mod common;

use common::synthetic::{tilted_pattern, upright_pattern};
use sym_axis::{
    AngleSweep, PivotMode, SearchConfig, SymmetrySearch, find_symmetry_angles, summarize,
};
use sym_core::{Error, Image, Pivot, Volume};
use sym_mask::compute_mask;

const SIZE: usize = 100;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Empty slice, upright pattern, shifted pattern tilted by 30 degrees.
fn three_slice_volume() -> Volume<f32> {
    Volume::from_slices(vec![
        Image::new_fill(SIZE, SIZE, 0.0),
        upright_pattern(SIZE, SIZE, 49.5, 49.5),
        tilted_pattern(SIZE, SIZE, 59.5, 44.5, 30.0),
    ])
    .expect("valid volume")
}

fn near_zero_mod_180(angle: f32, tol: f32) -> bool {
    angle <= tol || angle >= 180.0 - tol
}

#[test]
fn finds_axis_per_slice() {
    init_logger();
    let results =
        find_symmetry_angles(three_slice_volume(), AngleSweep::half_turn(5.0)).expect("valid input");
    assert_eq!(results.len(), 3);

    let empty = &results[0];
    assert_eq!(empty.index, 0);
    assert_eq!(empty.angle_deg, 0.0);
    assert_eq!(empty.peak_score, 0.0);
    assert_eq!(empty.pivot, Pivot::new(50, 50));
    assert!(empty.pivot_fallback);

    let upright = &results[1];
    assert!(
        near_zero_mod_180(upright.angle_deg, 5.0),
        "upright slice picked {} deg",
        upright.angle_deg
    );
    assert_eq!(upright.pivot, Pivot::new(49, 49));
    assert!(!upright.pivot_fallback);
    // 60 disk rows, each an exact mirror about column 49.5.
    assert!(upright.peak_score >= 60.0 - 1e-9, "peak {}", upright.peak_score);

    let tilted = &results[2];
    assert!(
        (tilted.angle_deg - 30.0).abs() <= 5.0,
        "tilted slice picked {} deg",
        tilted.angle_deg
    );
    assert!((tilted.pivot.x - 59).abs() <= 1, "pivot {:?}", tilted.pivot);
    assert!((tilted.pivot.y - 44).abs() <= 1, "pivot {:?}", tilted.pivot);
}

#[test]
fn summary_averages_the_slice_results() {
    init_logger();
    let cfg = SearchConfig {
        sweep: AngleSweep::half_turn(10.0),
        parallel: false,
        ..SearchConfig::default()
    };
    let results = SymmetrySearch::new(cfg)
        .run(three_slice_volume())
        .expect("valid input");
    let summary = summarize(&results).expect("three slices");

    assert_eq!(summary.slices, 3);
    let mean_angle = results.iter().map(|r| r.angle_deg).sum::<f32>() / 3.0;
    assert!((summary.mean_angle_deg - mean_angle).abs() < 1e-4);
    let mean_x = results.iter().map(|r| r.pivot.x as f32).sum::<f32>() / 3.0;
    assert!((summary.mean_pivot.x - mean_x).abs() < 1e-4);
}

#[test]
fn slice_centroid_mode_keeps_the_mirror_column() {
    init_logger();
    let volume = Volume::from_slices(vec![upright_pattern(SIZE, SIZE, 49.5, 49.5)])
        .expect("valid volume");
    let cfg = SearchConfig {
        sweep: AngleSweep::range(0.0, 20.0, 5.0),
        pivot_mode: PivotMode::Slice,
        ..SearchConfig::default()
    };
    let results = SymmetrySearch::new(cfg).run(volume).expect("valid input");

    assert!(results[0].angle_deg <= 5.0, "picked {} deg", results[0].angle_deg);
    assert_eq!(results[0].pivot.x, 49);
    // The intensity ramp pulls the weighted centre below the disk centre.
    assert!(results[0].pivot.y >= 49);
}

#[test]
fn invalid_input_leaves_data_untouched() {
    let mut slice = upright_pattern(SIZE, SIZE, 49.5, 49.5);
    *slice.get_mut(3, 7).expect("in bounds") = f32::INFINITY;
    let volume = Volume::from_slices(vec![slice]).expect("valid volume");
    let before = volume.clone();

    let err = compute_mask(&volume).unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(volume, before);

    let err = find_symmetry_angles(volume, AngleSweep::half_turn(5.0)).unwrap_err();
    assert!(matches!(err, Error::NonFiniteIntensity { .. }), "{err}");

    let ragged = Volume::from_slices(vec![
        Image::new_fill(SIZE, SIZE, 1.0f32),
        Image::new_fill(SIZE, SIZE - 1, 1.0f32),
    ])
    .unwrap_err();
    assert!(ragged.is_invalid_input());

    let err = find_symmetry_angles(three_slice_volume(), AngleSweep::range(10.0, 5.0, 1.0))
        .unwrap_err();
    assert_eq!(err, Error::InvalidAngleRange { low: 10.0, high: 5.0 });
}
