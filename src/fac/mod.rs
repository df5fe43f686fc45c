//! Field-aligned coordinate (FAC) transformation matrices.
//!
//! The z axis of the field-aligned frame follows the magnetic field at every
//! sample. The second axis comes from [`SecondAxis`]: X of the ambient frame,
//! or the spacecraft position (which must be in GEI coordinates). The result
//! is stored as one 3x3 matrix per sample whose rows are the x, y and z basis
//! vectors expressed in the original frame.

pub mod assemble;
pub mod rotate;
pub mod strategy;

use tracing::{info, warn};

use crate::{
    error::{FacError, FacResult},
    series::VariableStore,
};

pub use assemble::assemble;
pub use rotate::{rotate, rotate_vectors, ROTATED_SUFFIX};
pub use strategy::{build_basis, Basis, SecondAxis, POSITION_FRAME};

/// Suffix appended to the field name when no output name is given.
pub const MATRIX_SUFFIX: &str = "_fac_mat";

/// Options for [`fac_matrix_make`].
#[derive(Debug, Clone, Default)]
pub struct FacOptions {
    pub second_axis: SecondAxis,
    /// Spacecraft position variable, needed by the position-based axes
    pub position: Option<String>,
    /// Output variable name, defaults to `<field>_fac_mat`
    pub output: Option<String>,
}

impl FacOptions {
    pub fn new(second_axis: SecondAxis) -> Self {
        FacOptions {
            second_axis,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, name: &str) -> Self {
        self.position = Some(name.to_string());
        self
    }

    pub fn with_output(mut self, name: &str) -> Self {
        self.output = Some(name.to_string());
        self
    }
}

/// Builds the FAC matrices for the field variable `mag_name` and stores them.
///
/// Returns the name of the stored variable. An existing variable of that
/// name is replaced. Nothing is stored when the inputs are missing or the
/// position is in the wrong frame.
pub fn fac_matrix_make<S: VariableStore>(
    store: &mut S,
    mag_name: &str,
    options: &FacOptions,
) -> FacResult<String> {
    let field = store
        .get(mag_name)
        .ok_or_else(|| FacError::MissingVariable(mag_name.to_string()))?;

    let position = match (&options.position, options.second_axis.needs_position()) {
        (Some(name), true) => Some(
            store
                .get(name)
                .ok_or_else(|| FacError::MissingVariable(name.clone()))?,
        ),
        _ => None,
    };

    let basis = build_basis(field, options.second_axis, position).map_err(|e| {
        match (e, &options.position) {
            (FacError::WrongCoordinateFrame { expected, found, .. }, Some(name)) => {
                FacError::WrongCoordinateFrame {
                    name: name.clone(),
                    expected,
                    found,
                }
            }
            (e, _) => e,
        }
    })?;
    let matrices = assemble(&basis)?;

    let invalid = matrices.invalid_count();
    if invalid > 0 {
        warn!(
            variable = mag_name,
            invalid,
            samples = matrices.len(),
            "degenerate samples in FAC matrices"
        );
    }

    let new_name = options
        .output
        .clone()
        .unwrap_or_else(|| format!("{}{}", mag_name, MATRIX_SUFFIX));

    info!(
        variable = mag_name,
        second_axis = %options.second_axis,
        output = new_name.as_str(),
        samples = matrices.len(),
        "created FAC matrices"
    );
    store.set(&new_name, matrices);

    Ok(new_name)
}

// -- Tests -------------------------------------------------------------------
