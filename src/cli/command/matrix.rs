//! Build FAC matrices from sample files and save them to disk.

use std::path::Path;

use anyhow::{Context, Result};
use fac_frame::{
    fac_matrix_make, parquet, reading::load_vectors, FacOptions, MemoryStore, VariableStore,
};
use tracing::info;

use super::{make_parquet_file_name, variable_name};
use crate::cli::{create_spinner, MatrixArgs};

/// Loaded inputs and the stored matrices.
pub struct Built {
    pub store: MemoryStore,
    pub mag_name: String,
    pub matrix_name: String,
}

/// Loads the sample files named in `args` and runs `fac_matrix_make`.
pub fn build(args: &MatrixArgs) -> Result<Built> {
    let mut store = MemoryStore::new();

    let bar = create_spinner("Loading samples...".to_string());
    let mag_name = variable_name(&args.mag, "mag");
    store.set(&mag_name, load_vectors(&args.mag)?);

    let mut options = FacOptions::new(args.other_dim);
    if let Some(pos) = &args.pos {
        let mut pos_name = variable_name(pos, "pos");
        if pos_name == mag_name {
            pos_name = "pos".to_string();
        }
        let mut series = load_vectors(pos)?;
        series.set_coords(args.pos_coords.clone());
        store.set(&pos_name, series);
        options = options.with_position(&pos_name);
    }
    bar.finish_with_message("Samples loaded");

    let matrix_name = fac_matrix_make(&mut store, &mag_name, &options)
        .with_context(|| format!("Failed to build FAC matrices from `{}`", args.mag.display()))?;

    Ok(Built {
        store,
        mag_name,
        matrix_name,
    })
}

pub fn matrix(args: &MatrixArgs, output_dir: Option<&Path>) -> Result<String> {
    let built = build(args)?;

    let file_path = match &args.output {
        Some(path) => path.clone(),
        None => make_parquet_file_name(&built.matrix_name, output_dir)?,
    };

    let bar = create_spinner(format!("Saving `{}`...", built.matrix_name));
    let series = built
        .store
        .get(&built.matrix_name)
        .context("Matrices missing from store")?;
    parquet::save_matrices(series, &file_path)?;
    bar.finish_and_clear();

    info!(variable = %built.matrix_name, file = %file_path.display(), "saved matrices");

    Ok(file_path.to_string_lossy().to_string())
}

// -- Tests -------------------------------------------------------------------
