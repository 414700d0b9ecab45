//! Per-slice mirror-symmetry axis search.
//!
//! Every slice of a masked volume is rotated about its foreground centroid
//! through a sweep of candidate angles. Each rotated slice is scored row by
//! row against mirrored copies of itself ([`SymmetryScorer`]); the angle with
//! the highest peak score wins, the first one on ties.
//!
//! ```no_run
//! use sym_axis::{AngleSweep, find_symmetry_angles, summarize};
//! # fn demo(volume: sym_core::Volume<f32>) -> Result<(), sym_core::Error> {
//! let results = find_symmetry_angles(volume, AngleSweep::half_turn(1.0))?;
//! if let Some(summary) = summarize(&results) {
//!     println!("mean axis {:.1} deg", summary.mean_angle_deg);
//! }
//! # Ok(())
//! # }
//! ```

mod angles;
mod score;
mod search;
mod summary;

pub use angles::{AngleSet, AngleSweep};
pub use score::{SymmetryScorer, mirror_window, peak_score, segment_score};
pub use search::{
    AngleScore, PivotMode, SearchConfig, SliceResult, SliceSearch, SymmetrySearch,
    find_symmetry_angles, search_slice,
};
pub use summary::{SymmetrySummary, summarize};
