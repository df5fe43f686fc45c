//! Element-wise operations on vector time series.

pub mod cross;
pub mod interpolate;
pub mod normalize;

pub use cross::{cross, cross_vectors, cross_with_axis};
pub use interpolate::{interpolate, interpolate_onto, INTERPOLATED_SUFFIX};
pub use normalize::{normalize, normalize_vectors};
