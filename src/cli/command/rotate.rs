//! Rotate the magnetic field into the field-aligned frame and save it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fac_frame::{fac::rotate_vectors, parquet, VariableStore};
use tracing::info;

use super::{make_parquet_file_name, matrix::build};
use crate::cli::{create_spinner, MatrixArgs};

/// Saves the matrices next to the rotated field and returns both file names.
pub fn rotate(args: &MatrixArgs, output_dir: Option<&Path>) -> Result<(String, String)> {
    let mut built = build(args)?;

    let rotated_name = rotate_vectors(
        &mut built.store,
        &built.matrix_name,
        &built.mag_name,
        None,
    )?;

    let (matrix_path, rotated_path) = match &args.output {
        Some(path) => (sibling(path, "mat"), path.clone()),
        None => (
            make_parquet_file_name(&built.matrix_name, output_dir)?,
            make_parquet_file_name(&rotated_name, output_dir)?,
        ),
    };

    let bar = create_spinner("Saving...".to_string());
    let matrices = built
        .store
        .get(&built.matrix_name)
        .context("Matrices missing from store")?;
    parquet::save_matrices(matrices, &matrix_path)?;

    let rotated = built
        .store
        .get(&rotated_name)
        .context("Rotated field missing from store")?;
    parquet::save_vectors(rotated, &rotated_path)?;
    bar.finish_and_clear();

    info!(variable = %rotated_name, file = %rotated_path.display(), "saved rotated field");

    Ok((
        matrix_path.to_string_lossy().to_string(),
        rotated_path.to_string_lossy().to_string(),
    ))
}

/// `out.parquet` becomes `out_mat.parquet`.
fn sibling(path: &Path, tag: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, tag, ext.to_string_lossy()),
        None => format!("{}_{}", stem, tag),
    };

    path.with_file_name(file_name)
}

// -- Tests -------------------------------------------------------------------
