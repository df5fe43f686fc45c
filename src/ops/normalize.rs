//! Per-sample normalization of vector series.

use nalgebra::Vector3;

use crate::{
    error::{FacError, FacResult},
    series::TimeSeries,
};

/// Divides each sample by its Euclidean norm.
///
/// Zero-length samples come out as NaN rather than failing the whole series.
pub fn normalize_vectors(vectors: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
    vectors.iter().map(|v| v / v.norm()).collect()
}

/// Returns a new series of unit vectors on the same timestamps as `series`.
pub fn normalize(series: &TimeSeries) -> FacResult<TimeSeries> {
    let vectors = series
        .as_vectors()
        .ok_or_else(|| FacError::NotVector("normalize input".to_string()))?;

    TimeSeries::vector(series.times().to_vec(), normalize_vectors(vectors))
}
