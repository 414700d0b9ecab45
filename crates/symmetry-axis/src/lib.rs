//! Umbrella crate for the `symmetry-axis` workspace.
//!
//! Re-exports the containers and primitives of `sym-core`, the threshold
//! mask of `sym-mask`, the rotation resampler of `sym-warp` and the angle
//! search of `sym-axis`.

pub use sym_axis::*;
pub use sym_core::*;
pub use sym_mask::*;
pub use sym_warp::*;
