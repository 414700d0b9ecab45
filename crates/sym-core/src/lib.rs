//! Foundational primitives for slice symmetry analysis.
//!
//! ## Images and Volumes
//! [`Image`] is an owned row-major field and [`ImageView`] a borrowed one.
//! A [`Volume`] is a non-empty stack of equally-shaped slices.
//!
//! ## Coordinates
//! `x` is the column and `y` the row; integer coordinates are pixel centres.
//! [`Pivot`] uses the same convention, so a pivot can be handed straight to
//! [`Affine2::rotation_about`].
//!
//! ## Sampling
//! Nearest-neighbour rounds to the closest pixel centre; bilinear uses the
//! floor-based 2x2 neighbourhood. Taps outside the grid follow [`BorderMode`].

mod error;
mod geom;
mod image;
mod moments;
mod sample;
mod volume;

pub use error::Error;
pub use geom::{Affine2, Pivot, Point2f, sin_cos_deg};
pub use image::{Image, ImageView};
pub use moments::Moments;
pub use sample::{BorderMode, Interpolation, sample, sample_bilinear};
pub use volume::Volume;
