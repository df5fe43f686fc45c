//! Loads a sample file from the file system into a vector time series.

use std::{
    fs::File,
    io::{self, BufRead},
    path::Path,
};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::series::TimeSeries;

use super::{parse_time, Reading, VectorReading};

/// Reads `time,x,y,z` lines into a vector series.
///
/// Blank lines and `#` comments are skipped, and so is the first remaining
/// line when its first field is not a timestamp.
/// Readings with a missing component are dropped.
pub fn load_vectors(file_path: &Path) -> Result<TimeSeries> {
    let file = File::open(file_path)
        .with_context(|| format!("Failed to open `{}`", file_path.display()))?;
    let reader = io::BufReader::new(file);

    let mut times = Vec::new();
    let mut vectors = Vec::new();
    let mut dropped = 0usize;
    let mut first = true;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if std::mem::take(&mut first) && is_header(line) {
            debug!(header = line, "skipping header line");
            continue;
        }

        let reading = VectorReading::from_line(line)
            .with_context(|| format!("Line {} of `{}`", index + 1, file_path.display()))?;

        match reading.vector() {
            Some(vector) if reading.is_valid() => {
                times.push(reading.time);
                vectors.push(vector);
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(file = %file_path.display(), dropped, "dropped incomplete readings");
    }

    TimeSeries::vector(times, vectors)
        .with_context(|| format!("Invalid samples in `{}`", file_path.display()))
}

/// A header line has a first field that is not a timestamp.
fn is_header(line: &str) -> bool {
    let first = line.split(',').next().unwrap_or_default();
    parse_time(first).is_err()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use nalgebra::Vector3;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn should_load_file_with_header_and_comments() {
        let file = write_file(
            "time,bx,by,bz\n# fgs survey\n2015-10-16T13:00:00Z,1,2,3\n\n2015-10-16T13:00:01Z,4,5,6\n",
        );

        let series = load_vectors(file.path()).unwrap();

        assert_eq!(series.times(), &[1_445_000_400.0, 1_445_000_401.0]);
        assert_eq!(series.as_vectors().unwrap()[1], Vector3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn should_skip_header_after_leading_comment() {
        let file = write_file("# el_b_fgs\n\ntime,bx,by,bz\n0,1,2,3\n");

        let series = load_vectors(file.path()).unwrap();

        assert_eq!(series.times(), &[0.0]);
    }

    #[test]
    fn should_report_bad_first_data_line() {
        let file = write_file("0,1,2\n1,1,2,3\n");

        let error = load_vectors(file.path()).unwrap_err();

        assert!(format!("{:#}", error).contains("Line 1"));
    }

    #[test]
    fn should_only_skip_one_header() {
        let file = write_file("time,bx,by,bz\ntime,bx,by,bz\n0,1,2,3\n");

        let error = load_vectors(file.path()).unwrap_err();

        assert!(format!("{:#}", error).contains("Line 2"));
    }

    #[test]
    fn should_drop_incomplete_readings() {
        let file = write_file("0,1,2,3\n1,,2,3\n2,1,2,3\n");

        let series = load_vectors(file.path()).unwrap();

        assert_eq!(series.times(), &[0.0, 2.0]);
    }

    #[test]
    fn should_report_bad_line() {
        let file = write_file("0,1,2,3\nnot,a,line\n");

        let error = load_vectors(file.path()).unwrap_err();

        assert!(format!("{:#}", error).contains("Line 2"));
    }

    #[test]
    fn should_reject_unordered_samples() {
        let file = write_file("1,1,2,3\n0,1,2,3\n");
        assert!(load_vectors(file.path()).is_err());
    }
}
