//! Row-wise mirror-symmetry scoring.
//!
//! For every interior column `w` of a `cols`-wide field the mirror window is
//! `[0, 2w)` when `2w < cols` and `[2w - cols, cols)` otherwise. Both forms
//! are even-length, lie inside the field and reflect about `w - 0.5`.
//!
//! Each row segment `a` is compared with its reversal `b` through
//! `(Σ|a+b| - Σ|a-b|) / (Σ|a+b| + Σ|a-b|)`: 1 for an exact mirror, falling
//! toward 0 (or below, for anti-symmetric content) as the halves diverge.
//! An all-zero segment scores 0.

use sym_core::{Image, ImageView};

/// Mirror window `[lo, hi)` for candidate column `w` in a `cols`-wide row.
pub fn mirror_window(w: usize, cols: usize) -> (usize, usize) {
    if 2 * w < cols {
        (0, 2 * w)
    } else {
        (2 * w - cols, cols)
    }
}

/// Symmetry index of `row[lo..hi]` against its own reversal.
pub fn segment_score(segment: &[f32]) -> f32 {
    let half = segment.len() / 2;
    let mut sum_abs = 0.0f64;
    let mut diff_abs = 0.0f64;
    // Pair j and its mirror contribute identical terms, so half the window
    // carries the full ratio.
    for (&a, &b) in segment[..half].iter().zip(segment.iter().rev()) {
        let (a, b) = (a as f64, b as f64);
        sum_abs += (a + b).abs();
        diff_abs += (a - b).abs();
    }
    let total = sum_abs + diff_abs;
    if total == 0.0 {
        return 0.0;
    }
    ((sum_abs - diff_abs) / total) as f32
}

/// Sum over rows of the best score in each row of `map`.
pub fn peak_score(map: &ImageView<'_, f32>) -> f64 {
    map.rows()
        .map(|row| row.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64)
        .filter(|v| v.is_finite())
        .sum()
}

/// Scores resampled slices, reusing its score map between calls.
#[derive(Debug, Clone)]
pub struct SymmetryScorer {
    map: Image<f32>,
}

impl Default for SymmetryScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SymmetryScorer {
    pub fn new() -> Self {
        Self {
            map: Image::new_fill(0, 0, 0.0),
        }
    }

    /// Fills the score map for `rot` and returns its peak score.
    ///
    /// Columns `0` and `cols - 1` have no mirror window and stay 0, which
    /// also floors every row maximum at 0.
    pub fn score(&mut self, rot: &ImageView<'_, f32>) -> f64 {
        let (cols, rows) = (rot.width(), rot.height());
        self.map.ensure_shape(cols, rows, 0.0);
        self.map.data_mut().fill(0.0);

        if cols >= 3 {
            for y in 0..rows {
                let src = rot.row(y);
                let dst = self.map.row_mut(y);
                for (w, out) in dst.iter_mut().enumerate().take(cols - 1).skip(1) {
                    let (lo, hi) = mirror_window(w, cols);
                    *out = segment_score(&src[lo..hi]);
                }
            }
        }

        peak_score(&self.map.as_view())
    }

    /// Score map of the last scored field.
    pub fn score_map(&self) -> &Image<f32> {
        &self.map
    }
}
