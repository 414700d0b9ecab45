//! Pivot estimation and rotation resampling of single slices.
//!
//! Rotations follow the usual image-processing matrix
//! `[[a, b, (1-a)cx - b cy], [-b, a, b cx + (1-a) cy]]` with `a = cos`,
//! `b = sin` and unit scale. The output grid always equals the input grid;
//! destination pixels are filled by inverse mapping, so each output pixel is
//! produced by exactly one interpolation.
//!
//! Pivots are integer `(column, row)` points. A centroid pivot is truncated
//! toward zero; a field with zero mass falls back to the grid centre and the
//! fallback is both logged and reported in [`PivotEstimate::fallback`].

mod pivot;
mod resample;
mod rotate;

pub use pivot::{PivotEstimate, centroid_pivot};
pub use resample::{PivotSource, resample_at_angle, resample_at_angle_into};
pub use rotate::{WarpConfig, rotate_about, rotate_about_into, warp_inverse_into};
