//! Field-aligned coordinate matrices and particle spectra for space-physics
//! time series.
//!
//! Loaders place named time series in a [`VariableStore`]. Processing steps
//! read them, derive new series and store the results under new names:
//!
//! - [`fac::fac_matrix_make`] builds one rotation matrix per magnetic-field
//!   sample into the field-aligned frame.
//! - [`fac::rotate_vectors`] applies those matrices to a vector series.
//! - [`epd::energy_spectra`] and [`epd::pitch_angle_spectra`] reduce ELFIN EPD
//!   level-2 flux.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the caller.

pub mod epd;
pub mod error;
pub mod fac;
pub mod ops;
pub mod parquet;
pub mod reading;
pub mod series;

pub use error::{FacError, FacResult};
pub use fac::{fac_matrix_make, FacOptions, SecondAxis};
pub use series::{CoordinateFrame, MemoryStore, SeriesData, TimeSeries, VariableStore};
