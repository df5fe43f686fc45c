//! Parsing of plain-text sample files into time series.

pub mod load;
pub mod time;
pub mod vector;

use anyhow::Result;

pub use load::load_vectors;
pub use time::parse_time;
pub use vector::VectorReading;

// Define a trait for deserializing a line into a reading
pub trait Reading: Sized {
    fn from_line(line: &str) -> Result<Self>;
    fn is_valid(&self) -> bool;
}
