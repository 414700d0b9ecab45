//! Candidate angle sweeps.
//!
//! A mirror axis repeats every 180 degrees, so the default sweep covers the
//! half turn `[0, 180)`. Explicit ranges are half-open as well: `[low, high)`
//! is sampled at `low + i * step` for `i < ceil((high - low) / step)`.

use sym_core::Error;

/// Relative slack that keeps exact multiples of the step from rounding up
/// into an extra sample.
const COUNT_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleSweep {
    /// `step * i` for `i` in `[0, floor(180 / step))`.
    HalfTurn { step: f32 },
    /// `low + step * i` over `[low, high)`.
    Range { low: f32, high: f32, step: f32 },
}

impl Default for AngleSweep {
    fn default() -> Self {
        Self::HalfTurn { step: 1.0 }
    }
}

impl AngleSweep {
    pub fn half_turn(step: f32) -> Self {
        Self::HalfTurn { step }
    }

    pub fn range(low: f32, high: f32, step: f32) -> Self {
        Self::Range { low, high, step }
    }

    pub fn step(&self) -> f32 {
        match *self {
            Self::HalfTurn { step } | Self::Range { step, .. } => step,
        }
    }

    /// Materializes the sweep, validating step and bounds.
    pub fn angles(&self) -> Result<AngleSet, Error> {
        let step = self.step();
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::InvalidAngleStep(step));
        }
        let step64 = step as f64;

        let (low, count) = match *self {
            Self::HalfTurn { .. } => {
                let n = 180.0 / step64;
                (0.0, (n + n * COUNT_SLACK).floor())
            }
            Self::Range { low, high, .. } => {
                if !low.is_finite() || !high.is_finite() || high <= low {
                    return Err(Error::InvalidAngleRange { low, high });
                }
                let n = (high as f64 - low as f64) / step64;
                (low as f64, (n - n * COUNT_SLACK).ceil())
            }
        };

        // A step below the f32 spacing at the far end of the sweep cannot
        // produce increasing angles; reject it before allocating.
        let far = low.abs().max((low + count * step64).abs()) as f32;
        if far + step <= far {
            return Err(Error::InvalidAngleStep(step));
        }

        let count = count.max(0.0) as usize;
        let angles: Vec<f32> = (0..count)
            .map(|i| (low + i as f64 * step64) as f32)
            .collect();

        if angles.is_empty() {
            return Err(Error::EmptyAngleSweep);
        }
        if angles.windows(2).any(|w| w[1] <= w[0]) {
            // The step vanished in f32 at this magnitude.
            return Err(Error::InvalidAngleStep(step));
        }
        Ok(AngleSet { angles })
    }
}

/// Non-empty, strictly increasing list of angles in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleSet {
    angles: Vec<f32>,
}

impl AngleSet {
    pub fn as_slice(&self) -> &[f32] {
        &self.angles
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> f32 {
        self.angles[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.angles.iter().copied()
    }
}
