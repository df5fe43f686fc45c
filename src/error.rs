//! Library error type.

use thiserror::Error;

use crate::series::CoordinateFrame;

/// Result type for library operations.
pub type FacResult<T> = Result<T, FacError>;

/// Errors raised while building, aligning or reducing time series.
///
/// Degenerate samples (zero-length vectors, out-of-range interpolation) are
/// not errors: they surface as NaN values in the output series.
#[derive(Debug, Error)]
pub enum FacError {
    /// Second-axis name not in the supported set
    #[error("Unknown second axis `{0}` (expected xgse, mrgeo or rgeo)")]
    UnknownStrategy(String),

    /// The chosen second axis needs a position series and none was given
    #[error("Second axis `{0}` requires a position variable")]
    MissingPosition(String),

    /// Position series exists but is expressed in the wrong frame
    #[error("Variable `{name}` must be in {expected} coordinates, found {}", display_frame(.found))]
    WrongCoordinateFrame {
        name: String,
        expected: CoordinateFrame,
        found: Option<CoordinateFrame>,
    },

    /// Named variable not present in the store
    #[error("Variable not found: {0}")]
    MissingVariable(String),

    /// Timestamps not strictly increasing, or value count does not match
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Variable `{0}` does not hold 3-vectors")]
    NotVector(String),

    #[error("Variable `{0}` does not hold 3x3 matrices")]
    NotMatrix(String),

    #[error("Length mismatch: {left} samples vs {right} samples")]
    LengthMismatch { left: usize, right: usize },

    /// Interpolation needs at least two source samples
    #[error("Need at least 2 samples to interpolate, got {0}")]
    TooFewSamples(usize),

    /// Array dimensions do not agree
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Spectrogram name says neither half-spin nor full-spin resolution
    #[error("Cannot infer spin sectors from variable name `{0}`")]
    UnknownSectorLayout(String),
}

fn display_frame(frame: &Option<CoordinateFrame>) -> String {
    match frame {
        Some(frame) => frame.to_string(),
        None => "no coordinate tag".to_string(),
    }
}
