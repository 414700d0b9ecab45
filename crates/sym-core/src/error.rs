use core::fmt;

/// Errors shared by every crate of the workspace.
///
/// All variants except [`Error::Cancelled`] describe invalid caller input and
/// are reported before any data is modified.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    ShapeMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    EmptyVolume,
    EmptyImage,
    NonFiniteIntensity {
        index: usize,
    },
    InvalidAngleStep(f32),
    InvalidAngleRange {
        low: f32,
        high: f32,
    },
    EmptyAngleSweep,
    /// Histogram threshold settings that cannot place a threshold.
    InvalidThreshold(&'static str),
    Cancelled,
}

impl Error {
    /// True for every variant caused by malformed input.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::ShapeMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "slice {index} has shape {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::EmptyVolume => write!(f, "volume has no slices"),
            Self::EmptyImage => write!(f, "image has zero width or height"),
            Self::NonFiniteIntensity { index } => {
                write!(f, "non-finite intensity at voxel {index}")
            }
            Self::InvalidAngleStep(step) => {
                write!(f, "angle step must be finite and positive, got {step}")
            }
            Self::InvalidAngleRange { low, high } => {
                write!(f, "invalid angle range [{low}, {high})")
            }
            Self::EmptyAngleSweep => write!(f, "angle sweep has no samples"),
            Self::InvalidThreshold(reason) => write!(f, "invalid threshold settings: {reason}"),
            Self::Cancelled => write!(f, "search cancelled"),
        }
    }
}

impl std::error::Error for Error {}
