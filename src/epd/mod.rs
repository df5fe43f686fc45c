//! ELFIN Energetic Particle Detector (EPD) level-2 spectra.
//!
//! Level-2 flux comes as a spectrogram over time x pitch angle x energy. The
//! functions here collapse it either over pitch angle (energy spectra for
//! omni, field-aligned, anti-field-aligned and perpendicular directions) or
//! over groups of energy channels (pitch-angle spectra).

pub mod energy;
pub mod pitch;

use ndarray::{Array1, Array2, Array3};

use crate::{
    error::{FacError, FacResult},
    series::{SeriesData, TimeSeries},
};

pub use energy::{energy_spectra, EnergySpectra, SpectraTolerances};
pub use pitch::{pitch_angle_spectra, sort_pitch_angles, EnergyChannels};

/// Half of the detector field of view, degrees.
pub const HALF_FIELD_OF_VIEW: f64 = 11.0;

/// Lower edges of the 16 EPD energy channels, keV.
pub const ENERGY_MINS: [f64; 16] = [
    50.000008, 79.999962, 120.00005, 159.99998, 210.00015, 269.99973, 345.00043, 429.99945,
    630.00061, 899.99890, 1300.0013, 1799.9985, 2500.0022, 3349.9990, 4150.0034, 5800.0000,
];

/// Upper edges of the 16 EPD energy channels, keV.
pub const ENERGY_MAXS: [f64; 16] = [
    79.999962, 120.00005, 159.99998, 210.00015, 269.99973, 345.00043, 429.99945, 630.00061,
    899.99890, 1300.0013, 1799.9985, 2500.0022, 3349.9990, 4150.0034, 5800.0000, 7200.0000,
];

/// Borrowed view of a flux spectrogram.
struct Spectrogram<'a> {
    times: &'a [f64],
    flux: &'a Array3<f64>,
    pitch_angles: &'a Array2<f64>,
    energies: &'a Array1<f64>,
}

fn spectrogram<'a>(series: &'a TimeSeries, name: &str) -> FacResult<Spectrogram<'a>> {
    match series.data() {
        SeriesData::Spectrogram {
            flux,
            pitch_angles,
            energies,
        } => Ok(Spectrogram {
            times: series.times(),
            flux,
            pitch_angles,
            energies,
        }),
        _ => Err(FacError::InvalidShape(format!(
            "`{}` is not a time x pitch angle x energy spectrogram",
            name
        ))),
    }
}

/// Output prefix: the flux name without its `Epat_` marker.
fn output_prefix(flux_name: &str) -> String {
    flux_name.replace("Epat_", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_strip_epat_marker() {
        assert_eq!(output_prefix("ela_pef_hs_Epat_eflux"), "ela_pef_hs_eflux");
        assert_eq!(output_prefix("elb_pif_fs_nflux"), "elb_pif_fs_nflux");
    }

    #[test]
    fn should_have_contiguous_channel_edges() {
        for i in 1..ENERGY_MINS.len() {
            assert_eq!(ENERGY_MINS[i], ENERGY_MAXS[i - 1]);
        }
    }
}
