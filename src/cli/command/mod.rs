pub mod matrix;
pub mod rotate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
pub use matrix::matrix;
pub use rotate::rotate;

pub fn make_parquet_file_name(kind: &str, output_dir: Option<&Path>) -> Result<PathBuf> {
    let today = Local::now();
    let file_name = format!(
        "fac-{}-{}-{:02}-{:02}.parquet",
        kind,
        today.year(),
        today.month(),
        today.day()
    );

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::home_dir().context("No home directory, set --output-dir")?,
    };

    Ok(dir.join(file_name))
}

/// Variable name for a sample file, taken from its stem.
pub fn variable_name(file_path: &Path, fallback: &str) -> String {
    file_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_place_dated_file_in_output_dir() {
        let path = make_parquet_file_name("mag_fac_mat", Some(Path::new("/tmp/out"))).unwrap();

        assert_eq!(path.parent(), Some(Path::new("/tmp/out")));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("fac-mag_fac_mat-"));
        assert!(name.ends_with(".parquet"));
    }

    #[test]
    fn should_name_variable_after_file_stem() {
        assert_eq!(variable_name(Path::new("data/el_b_fgs.csv"), "mag"), "el_b_fgs");
        assert_eq!(variable_name(Path::new(""), "mag"), "mag");
    }
}
