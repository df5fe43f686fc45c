//! Applies per-sample rotation matrices to a vector series.

use tracing::debug;

use crate::{
    error::{FacError, FacResult},
    ops::interpolate,
    series::{TimeSeries, VariableStore},
};

/// Suffix appended to the vector name by [`rotate_vectors`].
pub const ROTATED_SUFFIX: &str = "_fac";

/// `matrices[i] * vectors[i]` on the matrix timestamps.
///
/// Vectors sampled on a different grid are linearly interpolated onto the
/// matrix timestamps first.
pub fn rotate(matrices: &TimeSeries, vectors: &TimeSeries) -> FacResult<TimeSeries> {
    let rotations = matrices
        .as_matrices()
        .ok_or_else(|| FacError::NotMatrix("rotation".to_string()))?;

    let aligned;
    let vectors = if vectors.times() == matrices.times() {
        vectors
    } else {
        debug!(
            from = vectors.len(),
            to = matrices.len(),
            "interpolating vectors onto rotation timestamps"
        );
        aligned = interpolate(vectors, matrices.times())?;
        &aligned
    };

    let values = vectors
        .as_vectors()
        .ok_or_else(|| FacError::NotVector("rotation input".to_string()))?;

    let rotated = rotations.iter().zip(values).map(|(m, v)| m * v).collect();

    TimeSeries::vector(matrices.times().to_vec(), rotated)
}

/// Rotates the stored vector variable by the stored matrix variable.
///
/// The result is stored as `output`, or `<vector_name>_fac` when not given.
pub fn rotate_vectors<S: VariableStore>(
    store: &mut S,
    matrix_name: &str,
    vector_name: &str,
    output: Option<&str>,
) -> FacResult<String> {
    let matrices = store
        .get(matrix_name)
        .ok_or_else(|| FacError::MissingVariable(matrix_name.to_string()))?;
    let vectors = store
        .get(vector_name)
        .ok_or_else(|| FacError::MissingVariable(vector_name.to_string()))?;

    let rotated = rotate(matrices, vectors)?;
    let new_name = match output {
        Some(name) => name.to_string(),
        None => format!("{}{}", vector_name, ROTATED_SUFFIX),
    };
    store.set(&new_name, rotated);

    Ok(new_name)
}
