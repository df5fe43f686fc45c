//! Packs a basis triple into one rotation matrix per sample.

use nalgebra::Matrix3;

use crate::{error::FacResult, series::TimeSeries};

use super::Basis;

/// Stacks the basis vectors as matrix rows: row 0 = x, row 1 = y, row 2 = z.
///
/// Each matrix rotates an original-frame vector into field-aligned
/// components.
pub fn assemble(basis: &Basis) -> FacResult<TimeSeries> {
    let matrices = basis
        .x
        .iter()
        .zip(&basis.y)
        .zip(&basis.z)
        .map(|((x, y), z)| Matrix3::from_rows(&[x.transpose(), y.transpose(), z.transpose()]))
        .collect();

    TimeSeries::matrix(basis.times.clone(), matrices)
}
