//! Energy spectra: flux averaged over pitch angle, weighted by solid angle.

use std::f64::consts::PI;

use ndarray::Array2;
use tracing::info;

use crate::{
    error::{FacError, FacResult},
    series::{Bins, SeriesData, TimeSeries, VariableStore},
};

use super::{output_prefix, spectrogram, Spectrogram, HALF_FIELD_OF_VIEW};

/// Pitch-angle tolerances, degrees.
///
/// `None` uses the instrument defaults: half the field of view plus half a
/// spin sector for the field-aligned directions, minus half the field of view
/// for the perpendicular one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpectraTolerances {
    /// Positive values shrink the loss cone and anti-loss cone
    pub field_aligned: Option<f64>,
    /// Negative values widen the perpendicular band
    pub perpendicular: Option<f64>,
}

/// Names of the four stored energy spectra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnergySpectra {
    pub omni: String,
    pub para: String,
    pub anti: String,
    pub perp: String,
}

/// Number of spin sectors implied by the variable name and pitch-angle count.
///
/// Half-spin (`hs`) products fold two sectors into each pitch-angle bin;
/// full-spin (`fs`) products have one. The two edge bins are padding.
fn spin_sectors(flux_name: &str, n_pitch: usize) -> FacResult<f64> {
    if n_pitch < 3 {
        return Err(FacError::InvalidShape(format!(
            "need at least 3 pitch-angle bins, got {}",
            n_pitch
        )));
    }

    if flux_name.contains("hs") {
        Ok(((n_pitch - 2) * 2) as f64)
    } else if flux_name.contains("fs") {
        Ok((n_pitch - 2) as f64)
    } else {
        Err(FacError::UnknownSectorLayout(flux_name.to_string()))
    }
}

/// Solid angle covered by each pitch-angle bin; the edge bins are NaN.
fn solid_angles(pitch_angles: &Array2<f64>, sectors: f64) -> Array2<f64> {
    let half_sector = 360.0 / sectors / 2.0;
    let polar = (PI / sectors) * (PI / sectors).sin();

    let mut domega = pitch_angles.mapv(|pa| {
        if pa < half_sector || pa > 180.0 - half_sector {
            polar
        } else {
            (2.0 * PI / sectors) * (PI * pa / 180.0).sin()
        }
    });

    let last = domega.ncols() - 1;
    domega.column_mut(0).fill(f64::NAN);
    domega.column_mut(last).fill(f64::NAN);

    domega
}

/// `nansum(flux * domega * mask) / nansum(domega * mask)` over pitch angle.
fn weighted_average<F>(data: &Spectrogram, domega: &Array2<f64>, mask: F) -> Array2<f64>
where
    F: Fn(usize, f64) -> bool,
{
    let (n_times, n_pitch, n_energy) = data.flux.dim();
    let mut spectrum = Array2::<f64>::zeros((n_times, n_energy));

    for t in 0..n_times {
        for e in 0..n_energy {
            let mut numerator = 0.0;
            let mut denominator = 0.0;
            for j in 0..n_pitch {
                let allowed = if mask(t, data.pitch_angles[[t, j]]) { 1.0 } else { 0.0 };
                let weight = domega[[t, j]] * allowed;
                let term = data.flux[[t, j, e]] * weight;
                if !term.is_nan() {
                    numerator += term;
                }
                if !weight.is_nan() {
                    denominator += weight;
                }
            }
            spectrum[[t, e]] = numerator / denominator;
        }
    }

    spectrum
}

/// Omni, field-aligned, anti-field-aligned and perpendicular energy spectra.
///
/// `loss_cone_name` holds the loss-cone angle per sample (degrees). Each
/// spectrum is stored as `<flux name without Epat_>_<direction>` with the
/// energy channels as bins.
pub fn energy_spectra<S: VariableStore>(
    store: &mut S,
    flux_name: &str,
    loss_cone_name: &str,
    tolerances: &SpectraTolerances,
) -> FacResult<EnergySpectra> {
    let series = store
        .get(flux_name)
        .ok_or_else(|| FacError::MissingVariable(flux_name.to_string()))?;
    let loss_cone = store
        .get(loss_cone_name)
        .ok_or_else(|| FacError::MissingVariable(loss_cone_name.to_string()))?;

    let data = spectrogram(series, flux_name)?;
    let (n_times, n_pitch, _) = data.flux.dim();

    let loss_cone = match loss_cone.data() {
        SeriesData::Scalar(values) => values,
        _ => {
            return Err(FacError::InvalidShape(format!(
                "`{}` is not a scalar series",
                loss_cone_name
            )))
        }
    };
    if loss_cone.len() != n_times {
        return Err(FacError::LengthMismatch {
            left: n_times,
            right: loss_cone.len(),
        });
    }

    let sectors = spin_sectors(flux_name, n_pitch)?;
    let half_sector = 360.0 / sectors / 2.0;
    let aligned_tol = tolerances
        .field_aligned
        .unwrap_or(HALF_FIELD_OF_VIEW + half_sector);
    let perp_tol = tolerances.perpendicular.unwrap_or(-HALF_FIELD_OF_VIEW);

    // loss-cone edge folded into the northern-hemisphere convention
    let edge: Vec<f64> = loss_cone
        .iter()
        .map(|&lc| if lc < 90.0 { lc } else { 180.0 - lc })
        .collect();

    let domega = solid_angles(data.pitch_angles, sectors);

    let omni = weighted_average(&data, &domega, |_, _| true);
    let para = weighted_average(&data, &domega, |t, pa| pa < edge[t] - aligned_tol);
    let anti = weighted_average(&data, &domega, |t, pa| pa > 180.0 + aligned_tol - edge[t]);
    let perp = weighted_average(&data, &domega, |t, pa| {
        pa < 180.0 - perp_tol - edge[t] && pa > perp_tol + edge[t]
    });

    let times = data.times.to_vec();
    let energies = data.energies.clone();
    let coords = series.coords().cloned();
    let prefix = output_prefix(flux_name);

    info!(
        variable = flux_name,
        sectors,
        aligned_tol,
        perp_tol,
        "created EPD energy spectra"
    );

    let mut save = |direction: &str, values: Array2<f64>| -> FacResult<String> {
        let name = format!("{}_{}", prefix, direction);
        let mut spectrum = TimeSeries::spectrum(times.clone(), values, Bins::Fixed(energies.clone()))?;
        spectrum.set_coords(coords.clone());
        store.set(&name, spectrum);
        Ok(name)
    };

    Ok(EnergySpectra {
        omni: save("omni", omni)?,
        para: save("para", para)?,
        anti: save("anti", anti)?,
        perp: save("perp", perp)?,
    })
}
