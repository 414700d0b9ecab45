//! Foreground masks from global volume statistics.
//!
//! The threshold is anchored to the bulk intensity range rather than the
//! absolute extremes: with a 100-bin histogram, `lo` is edge 5 and `hi` is
//! the fifth edge from the end, and the threshold sits 5% of the way from
//! `lo` to `hi`. A voxel is foreground iff its intensity is strictly greater
//! than the threshold.
//!
//! Masking is an explicit transform: [`apply_mask`] consumes the volume and
//! returns it with background voxels set to zero.

mod histogram;

use log::debug;
use sym_core::{Error, Volume};

pub use histogram::Histogram;

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdConfig {
    pub bins: usize,
    /// Index of the lower anchor edge, counted from the first edge.
    pub low_edge: usize,
    /// Index of the upper anchor edge, counted back from the last edge.
    pub high_edge_from_end: usize,
    /// Position of the threshold between the two anchors.
    pub fraction: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            bins: 100,
            low_edge: 5,
            high_edge_from_end: 4,
            fraction: 0.05,
        }
    }
}

impl ThresholdConfig {
    /// Checks that the anchors are ordered and the fraction is usable.
    pub fn validate(&self) -> Result<(), Error> {
        if self.bins == 0 {
            return Err(Error::InvalidThreshold("bins must be positive"));
        }
        if self.low_edge.saturating_add(self.high_edge_from_end) >= self.bins {
            return Err(Error::InvalidThreshold(
                "low anchor edge must lie below the high anchor edge",
            ));
        }
        if !self.fraction.is_finite() || !(0.0..=1.0).contains(&self.fraction) {
            return Err(Error::InvalidThreshold("fraction must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// Threshold placed on the edges of an already built histogram.
pub fn histogram_threshold(hist: &Histogram, cfg: &ThresholdConfig) -> Result<f64, Error> {
    cfg.validate()?;
    if hist.bins() != cfg.bins {
        return Err(Error::SizeMismatch {
            expected: cfg.bins,
            actual: hist.bins(),
        });
    }
    let edges = hist.edges();
    let lo = edges[cfg.low_edge];
    let hi = edges[cfg.bins - cfg.high_edge_from_end];
    let threshold = lo + cfg.fraction * (hi - lo);
    debug!("foreground threshold {threshold:.6} (anchors {lo:.6}..{hi:.6})");
    Ok(threshold)
}

/// Global foreground threshold of `volume`.
pub fn foreground_threshold(volume: &Volume<f32>, cfg: &ThresholdConfig) -> Result<f64, Error> {
    cfg.validate()?;
    let hist = Histogram::build(volume.voxels().copied(), cfg.bins)?;
    histogram_threshold(&hist, cfg)
}

/// Voxels strictly above `threshold`.
pub fn threshold_mask(volume: &Volume<f32>, threshold: f64) -> Volume<bool> {
    volume.map(|&v| v as f64 > threshold)
}

/// Foreground mask with the default threshold rule.
pub fn compute_mask(volume: &Volume<f32>) -> Result<Volume<bool>, Error> {
    compute_mask_with(volume, &ThresholdConfig::default()).map(|(mask, _)| mask)
}

/// Foreground mask and the threshold it was cut at.
pub fn compute_mask_with(
    volume: &Volume<f32>,
    cfg: &ThresholdConfig,
) -> Result<(Volume<bool>, f64), Error> {
    let threshold = foreground_threshold(volume, cfg)?;
    Ok((threshold_mask(volume, threshold), threshold))
}

/// Zeroes every voxel whose mask entry is `false`.
pub fn apply_mask(mut volume: Volume<f32>, mask: &Volume<bool>) -> Result<Volume<f32>, Error> {
    if volume.shape() != mask.shape() {
        let (w, h, d) = mask.shape();
        return Err(Error::SizeMismatch {
            expected: w * h * d,
            actual: volume.voxel_count(),
        });
    }

    for (slice, keep) in volume.slices_mut().iter_mut().zip(mask.slices()) {
        for (v, &k) in slice.data_mut().iter_mut().zip(keep.data()) {
            if !k {
                *v = 0.0;
            }
        }
    }
    Ok(volume)
}

/// Computes the mask and applies it in one step.
pub fn mask_volume(
    volume: Volume<f32>,
    cfg: &ThresholdConfig,
) -> Result<(Volume<f32>, Volume<bool>), Error> {
    let (mask, _) = compute_mask_with(&volume, cfg)?;
    let masked = apply_mask(volume, &mask)?;
    Ok((masked, mask))
}
