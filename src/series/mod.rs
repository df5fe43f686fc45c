//! Time series held in the named-variable store.

pub mod frame;
pub mod store;

use nalgebra::{Matrix3, Vector3};
use ndarray::{Array1, Array2, Array3};

use crate::error::{FacError, FacResult};

pub use frame::CoordinateFrame;
pub use store::{MemoryStore, VariableStore};

/// Values of a time series, one entry per timestamp along the first axis.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    Scalar(Vec<f64>),
    Vector(Vec<Vector3<f64>>),
    /// One 3x3 matrix per sample
    Matrix(Vec<Matrix3<f64>>),
    /// time x bin, e.g. an energy or pitch-angle spectrum
    Spectrum { values: Array2<f64>, bins: Bins },
    /// time x pitch angle x energy particle flux
    Spectrogram {
        flux: Array3<f64>,
        pitch_angles: Array2<f64>,
        energies: Array1<f64>,
    },
}

/// Bin centres of a spectrum.
#[derive(Debug, Clone, PartialEq)]
pub enum Bins {
    Fixed(Array1<f64>),
    PerSample(Array2<f64>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Scalar(v) => v.len(),
            SeriesData::Vector(v) => v.len(),
            SeriesData::Matrix(v) => v.len(),
            SeriesData::Spectrum { values, .. } => values.nrows(),
            SeriesData::Spectrogram { flux, .. } => flux.dim().0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kind(&self) -> &'static str {
        match self {
            SeriesData::Scalar(_) => "scalar",
            SeriesData::Vector(_) => "vector",
            SeriesData::Matrix(_) => "matrix",
            SeriesData::Spectrum { .. } => "spectrum",
            SeriesData::Spectrogram { .. } => "spectrogram",
        }
    }
}

/// A sampled quantity: strictly increasing timestamps (seconds since the Unix
/// epoch) with one value per timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    times: Vec<f64>,
    data: SeriesData,
    coords: Option<CoordinateFrame>,
}

impl TimeSeries {
    pub fn new(times: Vec<f64>, data: SeriesData) -> FacResult<Self> {
        if times.len() != data.len() {
            return Err(FacError::InvalidSeries(format!(
                "{} timestamps for {} {} samples",
                times.len(),
                data.len(),
                data.kind()
            )));
        }

        if let Some(i) = times.windows(2).position(|w| !(w[0] < w[1])) {
            return Err(FacError::InvalidSeries(format!(
                "timestamps not strictly increasing at index {}",
                i + 1
            )));
        }

        Ok(TimeSeries {
            times,
            data,
            coords: None,
        })
    }

    pub fn vector(times: Vec<f64>, values: Vec<Vector3<f64>>) -> FacResult<Self> {
        Self::new(times, SeriesData::Vector(values))
    }

    pub fn scalar(times: Vec<f64>, values: Vec<f64>) -> FacResult<Self> {
        Self::new(times, SeriesData::Scalar(values))
    }

    pub fn matrix(times: Vec<f64>, values: Vec<Matrix3<f64>>) -> FacResult<Self> {
        Self::new(times, SeriesData::Matrix(values))
    }

    /// Particle flux over time x pitch angle x energy.
    ///
    /// `pitch_angles` is time x pitch angle, `energies` has one entry per
    /// energy channel.
    pub fn spectrogram(
        times: Vec<f64>,
        flux: Array3<f64>,
        pitch_angles: Array2<f64>,
        energies: Array1<f64>,
    ) -> FacResult<Self> {
        let (n_times, n_pitch, n_energy) = flux.dim();
        if pitch_angles.dim() != (n_times, n_pitch) || energies.len() != n_energy {
            return Err(FacError::InvalidShape(format!(
                "flux is {:?}, pitch angles {:?}, energies {}",
                flux.dim(),
                pitch_angles.dim(),
                energies.len()
            )));
        }

        Self::new(
            times,
            SeriesData::Spectrogram {
                flux,
                pitch_angles,
                energies,
            },
        )
    }

    pub fn spectrum(times: Vec<f64>, values: Array2<f64>, bins: Bins) -> FacResult<Self> {
        let bins_fit = match &bins {
            Bins::Fixed(b) => b.len() == values.ncols(),
            Bins::PerSample(b) => b.dim() == values.dim(),
        };
        if !bins_fit {
            return Err(FacError::InvalidShape(format!(
                "bins do not match spectrum of shape {:?}",
                values.dim()
            )));
        }

        Self::new(times, SeriesData::Spectrum { values, bins })
    }

    /// Tags the series with the frame its components are expressed in.
    pub fn with_coords(mut self, coords: CoordinateFrame) -> Self {
        self.coords = Some(coords);
        self
    }

    pub fn set_coords(&mut self, coords: Option<CoordinateFrame>) {
        self.coords = coords;
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn data(&self) -> &SeriesData {
        &self.data
    }

    pub fn coords(&self) -> Option<&CoordinateFrame> {
        self.coords.as_ref()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn as_vectors(&self) -> Option<&[Vector3<f64>]> {
        match &self.data {
            SeriesData::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_matrices(&self) -> Option<&[Matrix3<f64>]> {
        match &self.data {
            SeriesData::Matrix(v) => Some(v),
            _ => None,
        }
    }

    /// Number of samples with at least one non-finite component.
    pub fn invalid_count(&self) -> usize {
        let valid = match &self.data {
            SeriesData::Scalar(v) => v.iter().filter(|x| x.is_finite()).count(),
            SeriesData::Vector(v) => v.iter().filter(|x| x.iter().all(|c| c.is_finite())).count(),
            SeriesData::Matrix(v) => v.iter().filter(|x| x.iter().all(|c| c.is_finite())).count(),
            SeriesData::Spectrum { values, .. } => values
                .rows()
                .into_iter()
                .filter(|row| row.iter().all(|c| c.is_finite()))
                .count(),
            SeriesData::Spectrogram { flux, .. } => flux
                .outer_iter()
                .filter(|sample| sample.iter().all(|c| c.is_finite()))
                .count(),
        };

        self.len() - valid
    }

    /// Fraction of samples whose every component is finite, 1.0 when empty.
    pub fn valid_fraction(&self) -> f64 {
        if self.is_empty() {
            return 1.0;
        }

        1.0 - self.invalid_count() as f64 / self.len() as f64
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_unordered_times() {
        let result = TimeSeries::scalar(vec![0.0, 2.0, 1.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(FacError::InvalidSeries(_))));
    }

    #[test]
    fn should_reject_duplicate_times() {
        let result = TimeSeries::scalar(vec![0.0, 1.0, 1.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(FacError::InvalidSeries(_))));
    }

    #[test]
    fn should_reject_length_mismatch() {
        let result = TimeSeries::vector(vec![0.0, 1.0], vec![Vector3::x()]);
        assert!(matches!(result, Err(FacError::InvalidSeries(_))));
    }

    #[test]
    fn should_count_valid_samples() {
        let series = TimeSeries::vector(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![
                Vector3::x(),
                Vector3::new(f64::NAN, 0.0, 0.0),
                Vector3::y(),
                Vector3::z(),
            ],
        )
        .unwrap();

        assert_eq!(series.invalid_count(), 1);
        assert_eq!(series.valid_fraction(), 0.75);
    }

    #[test]
    fn should_reject_mismatched_spectrogram_axes() {
        let result = TimeSeries::spectrogram(
            vec![0.0, 1.0],
            Array3::zeros((2, 4, 3)),
            Array2::zeros((2, 5)),
            Array1::zeros(3),
        );
        assert!(matches!(result, Err(FacError::InvalidShape(_))));
    }

    #[test]
    fn should_reject_mismatched_spectrum_bins() {
        let result = TimeSeries::spectrum(
            vec![0.0],
            Array2::zeros((1, 4)),
            Bins::Fixed(Array1::zeros(3)),
        );
        assert!(matches!(result, Err(FacError::InvalidShape(_))));
    }

    #[test]
    fn should_carry_coordinate_tag() {
        let series = TimeSeries::vector(vec![0.0], vec![Vector3::x()])
            .unwrap()
            .with_coords(CoordinateFrame::Gei);

        assert_eq!(series.coords(), Some(&CoordinateFrame::Gei));
        assert!(series.as_vectors().is_some());
        assert!(series.as_matrices().is_none());
    }
}
