//! Handles serialising and saving time series to disk in the _parquet_ file format.

pub mod matrices;
pub mod vectors;

use std::sync::Arc;

use arrow::{
    array::{ArrayRef, TimestampMicrosecondArray},
    datatypes::{DataType, Field, TimeUnit},
};
use parquet::{basic::Compression, file::properties::WriterProperties};

pub use matrices::save_matrices;
pub use vectors::save_vectors;

fn time_field() -> Field {
    Field::new(
        "time",
        DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
        false,
    )
}

/// Epoch seconds to a UTC microsecond timestamp column.
fn time_column(times: &[f64]) -> ArrayRef {
    let micros: Vec<i64> = times.iter().map(|t| (t * 1e6).round() as i64).collect();
    Arc::new(TimestampMicrosecondArray::from(micros).with_timezone("UTC"))
}

fn writer_properties() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}
