//! Save a vector series to a parquet file.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::{Error, Result};
use arrow::{
    array::{ArrayRef, Float64Array},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use parquet::arrow::ArrowWriter;

use crate::series::TimeSeries;

use super::{time_column, time_field, writer_properties};

/// Writes `time, x, y, z`, one row per sample.
pub fn save_vectors(series: &TimeSeries, file_path: &Path) -> Result<()> {
    let vectors = series
        .as_vectors()
        .ok_or_else(|| Error::msg("Series does not hold 3-vectors"))?;

    let schema = Arc::new(Schema::new(vec![
        time_field(),
        Field::new("x", DataType::Float64, false),
        Field::new("y", DataType::Float64, false),
        Field::new("z", DataType::Float64, false),
    ]));

    let component = |i: usize| -> ArrayRef {
        Arc::new(vectors.iter().map(|v| Some(v[i])).collect::<Float64Array>())
    };
    let columns = vec![time_column(series.times()), component(0), component(1), component(2)];

    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let file = File::create(file_path)?;
    let mut writer = ArrowWriter::try_new(file, schema, Some(writer_properties()))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector3;
    use parquet::file::reader::{FileReader, SerializedFileReader};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn should_write_one_row_per_sample() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("b_fac.parquet");
        let series = TimeSeries::vector(
            vec![0.0, 1.0, 2.0],
            vec![Vector3::x(), Vector3::y(), Vector3::new(f64::NAN, 0.0, 1.0)],
        )
        .unwrap();

        save_vectors(&series, &path).unwrap();

        let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
        let metadata = reader.metadata();
        assert_eq!(metadata.file_metadata().num_rows(), 3);
        assert_eq!(metadata.file_metadata().schema_descr().num_columns(), 4);
    }
}
