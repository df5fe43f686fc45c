//! Per-sample cross products of co-indexed vector series.

use nalgebra::Vector3;

use crate::{
    error::{FacError, FacResult},
    series::TimeSeries,
};

/// Right-hand-rule cross product, component by component.
fn cross_one(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// `a[i] x b[i]` for every sample. Results are not renormalized.
pub fn cross_vectors(a: &[Vector3<f64>], b: &[Vector3<f64>]) -> FacResult<Vec<Vector3<f64>>> {
    if a.len() != b.len() {
        return Err(FacError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    Ok(a.iter().zip(b).map(|(a, b)| cross_one(a, b)).collect())
}

/// `a[i] x axis` for every sample, with a constant right-hand operand.
pub fn cross_with_axis(a: &[Vector3<f64>], axis: &Vector3<f64>) -> Vec<Vector3<f64>> {
    a.iter().map(|a| cross_one(a, axis)).collect()
}

/// Cross product of two series already aligned on the same timestamps.
pub fn cross(a: &TimeSeries, b: &TimeSeries) -> FacResult<TimeSeries> {
    let left = a
        .as_vectors()
        .ok_or_else(|| FacError::NotVector("cross product left operand".to_string()))?;
    let right = b
        .as_vectors()
        .ok_or_else(|| FacError::NotVector("cross product right operand".to_string()))?;

    TimeSeries::vector(a.times().to_vec(), cross_vectors(left, right)?)
}
