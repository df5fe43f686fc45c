//! Pitch-angle spectra: flux averaged over groups of energy channels.

use ndarray::{s, Array2, Array3};
use tracing::info;

use crate::{
    error::{FacError, FacResult},
    series::{Bins, TimeSeries, VariableStore},
};

use super::{output_prefix, spectrogram, ENERGY_MAXS, ENERGY_MINS};

/// Energy channel groups, one pitch-angle spectrum per group.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnergyChannels {
    /// Channels 0-2, 3-5, 6-8 and 9-15
    #[default]
    Default,
    /// Inclusive channel index ranges
    Bins(Vec<(usize, usize)>),
    /// Energy ranges in keV, matched against the channel centres
    Energies(Vec<(f64, f64)>),
}

const DEFAULT_CHANNELS: [(usize, usize); 4] = [(0, 2), (3, 5), (6, 8), (9, 15)];

impl EnergyChannels {
    /// Inclusive channel index ranges against the given channel centres.
    fn resolve(&self, centres: &[f64]) -> FacResult<Vec<(usize, usize)>> {
        let ranges = match self {
            EnergyChannels::Default => DEFAULT_CHANNELS.to_vec(),
            EnergyChannels::Bins(bins) => bins.clone(),
            EnergyChannels::Energies(energies) => energies
                .iter()
                .map(|&(min, max)| {
                    let lo = centres.partition_point(|&c| c < min);
                    let above = centres.partition_point(|&c| c <= max);
                    if above == 0 {
                        return Err(FacError::InvalidShape(format!(
                            "no energy channel between {} and {} keV",
                            min, max
                        )));
                    }
                    Ok((lo, above - 1))
                })
                .collect::<FacResult<Vec<_>>>()?,
        };

        for &(lo, hi) in &ranges {
            if lo > hi || hi >= centres.len() {
                return Err(FacError::InvalidShape(format!(
                    "channel range {}-{} outside 0-{}",
                    lo,
                    hi,
                    centres.len() - 1
                )));
            }
        }

        Ok(ranges)
    }
}

/// Flips every time row whose pitch angles run from high to low, so each
/// row ascends. The flux rows are flipped along with them.
pub fn sort_pitch_angles(flux: &mut Array3<f64>, pitch_angles: &mut Array2<f64>) -> FacResult<()> {
    let (n_times, n_pitch, _) = flux.dim();
    if pitch_angles.dim() != (n_times, n_pitch) {
        return Err(FacError::InvalidShape(format!(
            "pitch angles {:?} do not match flux {:?}",
            pitch_angles.dim(),
            flux.dim()
        )));
    }

    for t in 0..n_times {
        let row = pitch_angles.row(t);
        let descending = row.iter().zip(row.iter().skip(1)).all(|(a, b)| a >= b);
        if !descending {
            continue;
        }

        let flipped = pitch_angles.slice(s![t, ..;-1]).to_owned();
        pitch_angles.row_mut(t).assign(&flipped);
        let flipped = flux.slice(s![t, ..;-1, ..]).to_owned();
        flux.slice_mut(s![t, .., ..]).assign(&flipped);
    }

    Ok(())
}

/// Builds one pitch-angle spectrum per energy channel group.
///
/// Within a group the flux is averaged with the channel widths as weights.
/// The edge pitch-angle bins are NaN. Spectra are stored as
/// `<flux name without Epat_>_ch<i>` with the sorted pitch angles as bins.
pub fn pitch_angle_spectra<S: VariableStore>(
    store: &mut S,
    flux_name: &str,
    channels: &EnergyChannels,
) -> FacResult<Vec<String>> {
    let series = store
        .get(flux_name)
        .ok_or_else(|| FacError::MissingVariable(flux_name.to_string()))?;
    let data = spectrogram(series, flux_name)?;

    let (n_times, n_pitch, n_energy) = data.flux.dim();
    if n_pitch < 3 {
        return Err(FacError::InvalidShape(format!(
            "need at least 3 pitch-angle bins, got {}",
            n_pitch
        )));
    }
    if n_energy != ENERGY_MINS.len() {
        return Err(FacError::InvalidShape(format!(
            "expected {} energy channels, got {}",
            ENERGY_MINS.len(),
            n_energy
        )));
    }

    let centres = data.energies.to_vec();
    let ranges = channels.resolve(&centres)?;
    info!(variable = flux_name, channels = ?ranges, "building EPD pitch-angle spectra");

    let mut flux = data.flux.clone();
    let mut pitch_angles = data.pitch_angles.clone();
    sort_pitch_angles(&mut flux, &mut pitch_angles)?;

    let times = data.times.to_vec();
    let coords = series.coords().cloned();
    let prefix = output_prefix(flux_name);

    let mut names = Vec::with_capacity(ranges.len());
    for (i, &(lo, hi)) in ranges.iter().enumerate() {
        let widths: Vec<f64> = (lo..=hi).map(|e| ENERGY_MAXS[e] - ENERGY_MINS[e]).collect();
        let total: f64 = widths.iter().sum();

        let mut values = Array2::<f64>::zeros((n_times, n_pitch));
        for t in 0..n_times {
            for j in 0..n_pitch {
                let weighted: f64 = flux
                    .slice(s![t, j, lo..=hi])
                    .iter()
                    .zip(&widths)
                    .map(|(f, w)| f * w)
                    .filter(|v| !v.is_nan())
                    .sum();
                values[[t, j]] = weighted / total;
            }
        }
        values.column_mut(0).fill(f64::NAN);
        values.column_mut(n_pitch - 1).fill(f64::NAN);

        let name = format!("{}_ch{}", prefix, i);
        let mut spectrum = TimeSeries::spectrum(times.clone(), values, Bins::PerSample(pitch_angles.clone()))?;
        spectrum.set_coords(coords.clone());
        store.set(&name, spectrum);
        names.push(name);
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::{arr2, Array1};

    use super::*;
    use crate::series::{MemoryStore, SeriesData};

    const CENTRES: [f64; 16] = [
        63.2, 97.9, 138.5, 183.3, 238.1, 305.2, 385.1, 520.4, 752.9, 1081.6, 1529.7, 2121.3,
        2893.9, 3728.6, 4906.1, 6500.0,
    ];

    fn store(pitch_angles: Array2<f64>) -> MemoryStore {
        let mut flux = Array3::<f64>::zeros((1, 5, 16));
        for j in 0..5 {
            for e in 0..16 {
                flux[[0, j, e]] = (j * 100 + e) as f64;
            }
        }

        let mut store = MemoryStore::new();
        store.set(
            "elb_pef_hs_Epat_nflux",
            TimeSeries::spectrogram(vec![0.0], flux, pitch_angles, Array1::from(CENTRES.to_vec())).unwrap(),
        );
        store
    }

    fn spectrum<'a>(store: &'a MemoryStore, name: &str) -> (&'a Array2<f64>, &'a Bins) {
        match store.get(name).unwrap().data() {
            SeriesData::Spectrum { values, bins } => (values, bins),
            other => panic!("unexpected data {:?}", other),
        }
    }

    #[test]
    fn should_flip_descending_rows_only() {
        let mut pitch = arr2(&[[180.0, 90.0, 0.0], [0.0, 90.0, 180.0]]);
        let mut flux = Array3::<f64>::zeros((2, 3, 1));
        flux[[0, 0, 0]] = 1.0;
        flux[[1, 0, 0]] = 1.0;

        sort_pitch_angles(&mut flux, &mut pitch).unwrap();

        assert_eq!(pitch, arr2(&[[0.0, 90.0, 180.0], [0.0, 90.0, 180.0]]));
        assert_eq!(flux[[0, 2, 0]], 1.0);
        assert_eq!(flux[[1, 0, 0]], 1.0);
    }

    #[test]
    fn should_reject_mismatched_pitch_angles() {
        let mut pitch = Array2::<f64>::zeros((2, 4));
        let mut flux = Array3::<f64>::zeros((2, 3, 1));
        assert!(sort_pitch_angles(&mut flux, &mut pitch).is_err());
    }

    #[test]
    fn should_resolve_energy_ranges_by_bisection() {
        let channels = EnergyChannels::Energies(vec![(50.0, 160.0), (160.0, 345.0), (900.0, 7000.0)]);
        let ranges = channels.resolve(&CENTRES).unwrap();

        assert_eq!(ranges, vec![(0, 2), (3, 5), (9, 15)]);
    }

    #[test]
    fn should_reject_out_of_range_bins() {
        let channels = EnergyChannels::Bins(vec![(3, 16)]);
        assert!(channels.resolve(&CENTRES).is_err());
    }

    #[test]
    fn should_build_default_channel_spectra() {
        let mut store = store(arr2(&[[0.0, 45.0, 90.0, 135.0, 180.0]]));

        let names = pitch_angle_spectra(&mut store, "elb_pef_hs_Epat_nflux", &EnergyChannels::Default).unwrap();

        assert_eq!(
            names,
            vec![
                "elb_pef_hs_nflux_ch0",
                "elb_pef_hs_nflux_ch1",
                "elb_pef_hs_nflux_ch2",
                "elb_pef_hs_nflux_ch3"
            ]
        );

        let (values, _) = spectrum(&store, &names[0]);
        assert!(values[[0, 0]].is_nan());
        assert!(values[[0, 4]].is_nan());

        // width-weighted mean of channels 0-2 at pitch bin 2 (flux 200 + e)
        let widths: Vec<f64> = (0..3).map(|e| ENERGY_MAXS[e] - ENERGY_MINS[e]).collect();
        let expected = (0..3).map(|e| (200 + e) as f64 * widths[e]).sum::<f64>() / widths.iter().sum::<f64>();
        assert_relative_eq!(values[[0, 2]], expected, max_relative = 1e-12);
    }

    #[test]
    fn should_sort_before_averaging() {
        let mut store = store(arr2(&[[180.0, 135.0, 90.0, 45.0, 0.0]]));

        let names = pitch_angle_spectra(&mut store, "elb_pef_hs_Epat_nflux", &EnergyChannels::Bins(vec![(4, 4)])).unwrap();
        let (values, bins) = spectrum(&store, &names[0]);

        // pitch bin 1 now holds the original bin 3 (45 degrees)
        assert_relative_eq!(values[[0, 1]], 304.0, max_relative = 1e-12);
        assert_eq!(bins, &Bins::PerSample(arr2(&[[0.0, 45.0, 90.0, 135.0, 180.0]])));
    }

    #[test]
    fn should_require_sixteen_channels() {
        let mut store = MemoryStore::new();
        store.set(
            "elb_pef_hs_Epat_nflux",
            TimeSeries::spectrogram(
                vec![0.0],
                Array3::zeros((1, 5, 4)),
                Array2::zeros((1, 5)),
                Array1::zeros(4),
            )
            .unwrap(),
        );

        let result = pitch_angle_spectra(&mut store, "elb_pef_hs_Epat_nflux", &EnergyChannels::Default);
        assert!(matches!(result, Err(FacError::InvalidShape(_))));
    }
}
