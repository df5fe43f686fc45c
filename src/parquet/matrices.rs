//! Save a matrix series to a parquet file.

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

/// Writes one row per sample: `time` then the nine elements `m00..m22` in
/// row-major order.
pub fn save_matrices(series: &TimeSeries, file_path: &Path) -> Result<()> {
    let matrices = series
        .as_matrices()
        .ok_or_else(|| Error::msg("Series does not hold 3x3 matrices"))?;

    let mut fields = vec![time_field()];
    let mut columns: Vec<ArrayRef> = vec![time_column(series.times())];

    for row in 0..3 {
        for col in 0..3 {
            fields.push(Field::new(format!("m{}{}", row, col), DataType::Float64, false));
            let values: Float64Array = matrices.iter().map(|m| Some(m[(row, col)])).collect();
            columns.push(Arc::new(values));
        }
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let file = File::create(file_path)?;
    let mut writer = ArrowWriter::try_new(file, schema, Some(writer_properties()))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------
