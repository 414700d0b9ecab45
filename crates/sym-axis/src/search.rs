use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use sym_core::{Error, Image, ImageView, Pivot, Volume};
use sym_mask::{ThresholdConfig, mask_volume};
use sym_warp::{PivotSource, WarpConfig, resample_at_angle_into};

use crate::angles::{AngleSet, AngleSweep};
use crate::score::SymmetryScorer;

/// Field the per-slice pivot is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotMode {
    /// Centroid of the slice's foreground mask.
    #[default]
    Mask,
    /// Intensity centroid of the masked slice.
    Slice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub sweep: AngleSweep,
    pub threshold: ThresholdConfig,
    pub warp: WarpConfig,
    pub pivot_mode: PivotMode,
    /// Run one rayon task per slice.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sweep: AngleSweep::default(),
            threshold: ThresholdConfig::default(),
            warp: WarpConfig::default(),
            pivot_mode: PivotMode::Mask,
            parallel: true,
        }
    }
}

/// Best axis found for one slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceResult {
    pub index: usize,
    pub angle_deg: f32,
    pub pivot: Pivot,
    pub peak_score: f64,
    /// The pivot is the grid centre because the slice had no foreground.
    pub pivot_fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleScore {
    pub angle_deg: f32,
    pub peak_score: f64,
}

/// Selected result plus the score of every candidate angle, in sweep order.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceSearch {
    pub result: SliceResult,
    pub scores: Vec<AngleScore>,
}

/// Sweeps `angles` over one slice and keeps the first angle with the
/// highest peak score.
///
/// The pivot is resolved from `initial` at the first angle and reused as an
/// explicit pivot for the rest of the sweep.
pub fn search_slice(
    index: usize,
    slice: &ImageView<'_, f32>,
    initial: PivotSource<'_>,
    angles: &AngleSet,
    warp: &WarpConfig,
) -> SliceSearch {
    let mut scorer = SymmetryScorer::new();
    let mut rot = Image::new_fill(slice.width(), slice.height(), 0.0f32);
    let mut source = initial;
    let mut estimate = None;
    let mut scores = Vec::with_capacity(angles.len());
    let mut best = AngleScore {
        angle_deg: angles.first(),
        peak_score: f64::NEG_INFINITY,
    };

    for angle_deg in angles.iter() {
        let used = resample_at_angle_into(slice, angle_deg, source, warp, &mut rot);
        if estimate.is_none() {
            estimate = Some(used);
            source = PivotSource::Explicit(used.pivot);
        }
        let peak_score = scorer.score(&rot.as_view());
        let scored = AngleScore {
            angle_deg,
            peak_score,
        };
        if peak_score > best.peak_score {
            best = scored;
        }
        scores.push(scored);
    }

    // AngleSet is never empty, so the loop ran at least once.
    let estimate = estimate.unwrap_or_else(|| initial.resolve(slice));
    debug!(
        "slice {index}: best angle {:.2} deg (peak {:.4}) about ({}, {})",
        best.angle_deg, best.peak_score, estimate.pivot.x, estimate.pivot.y
    );

    SliceSearch {
        result: SliceResult {
            index,
            angle_deg: best.angle_deg,
            pivot: estimate.pivot,
            peak_score: best.peak_score,
            pivot_fallback: estimate.fallback,
        },
        scores,
    }
}

/// Volume-level symmetry axis search.
#[derive(Debug, Clone, Default)]
pub struct SymmetrySearch {
    cfg: SearchConfig,
}

impl SymmetrySearch {
    pub fn new(cfg: SearchConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    /// Masks `volume`, zeroes its background and returns the best axis of
    /// every slice in slice order.
    pub fn run(&self, volume: Volume<f32>) -> Result<Vec<SliceResult>, Error> {
        self.run_cancellable(volume, &AtomicBool::new(false))
    }

    /// [`run`](Self::run) that stops with [`Error::Cancelled`] once `cancel`
    /// is raised. The flag is checked before each slice.
    pub fn run_cancellable(
        &self,
        volume: Volume<f32>,
        cancel: &AtomicBool,
    ) -> Result<Vec<SliceResult>, Error> {
        let angles = self.cfg.sweep.angles()?;
        let (masked, mask) = mask_volume(volume, &self.cfg.threshold)?;
        debug!(
            "searching {} slices of {}x{} over {} angles",
            masked.depth(),
            masked.width(),
            masked.height(),
            angles.len()
        );

        let run_one = |z: usize| -> Result<SliceResult, Error> {
            if cancel.load(Ordering::Relaxed) {
                return Err(Error::Cancelled);
            }
            let slice = masked.slices()[z].as_view();
            let source = match self.cfg.pivot_mode {
                PivotMode::Mask => PivotSource::MaskCentroid(mask.slices()[z].as_view()),
                PivotMode::Slice => PivotSource::SliceCentroid,
            };
            Ok(search_slice(z, &slice, source, &angles, &self.cfg.warp).result)
        };

        if self.cfg.parallel {
            use rayon::prelude::*;
            (0..masked.depth()).into_par_iter().map(run_one).collect()
        } else {
            (0..masked.depth()).map(run_one).collect()
        }
    }
}

/// Runs the default search with `sweep` over `volume`.
pub fn find_symmetry_angles(
    volume: Volume<f32>,
    sweep: AngleSweep,
) -> Result<Vec<SliceResult>, Error> {
    SymmetrySearch::new(SearchConfig {
        sweep,
        ..SearchConfig::default()
    })
    .run(volume)
}
