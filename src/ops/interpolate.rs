//! Linear resampling of a series onto another series' timestamps.

use nalgebra::Vector3;
use tracing::debug;

use crate::{
    error::{FacError, FacResult},
    series::{SeriesData, TimeSeries, VariableStore},
};

/// Suffix appended to the source name by [`interpolate_onto`].
pub const INTERPOLATED_SUFFIX: &str = "-itrp";

/// Where a target timestamp falls on the source grid.
enum Bracket {
    Exact(usize),
    Between(usize, f64),
    Outside,
}

fn bracket(source: &[f64], t: f64) -> Bracket {
    // NaN or out-of-range targets never extrapolate
    if !(t >= source[0] && t <= source[source.len() - 1]) {
        return Bracket::Outside;
    }

    let upper = source.partition_point(|&s| s < t);
    if source[upper] == t {
        return Bracket::Exact(upper);
    }

    let lower = upper - 1;
    let fraction = (t - source[lower]) / (source[upper] - source[lower]);
    Bracket::Between(lower, fraction)
}

fn resample<T, F>(source_times: &[f64], values: &[T], target_times: &[f64], nan: T, lerp: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T, f64) -> T,
{
    target_times
        .iter()
        .map(|&t| match bracket(source_times, t) {
            Bracket::Exact(i) => values[i].clone(),
            Bracket::Between(i, fraction) => lerp(&values[i], &values[i + 1], fraction),
            Bracket::Outside => nan.clone(),
        })
        .collect()
}

/// Resamples `source` onto `target_times`, linearly in time and per component.
///
/// Targets outside the source time range yield NaN samples. The coordinate
/// tag of the source is kept.
pub fn interpolate(source: &TimeSeries, target_times: &[f64]) -> FacResult<TimeSeries> {
    if source.len() < 2 {
        return Err(FacError::TooFewSamples(source.len()));
    }

    let times = source.times();
    let data = match source.data() {
        SeriesData::Scalar(values) => SeriesData::Scalar(resample(
            times,
            values,
            target_times,
            f64::NAN,
            |a, b, f| a + (b - a) * f,
        )),
        SeriesData::Vector(values) => SeriesData::Vector(resample(
            times,
            values,
            target_times,
            Vector3::repeat(f64::NAN),
            |a, b, f| a + (b - a) * f,
        )),
        _ => {
            return Err(FacError::InvalidShape(
                "only scalar and vector series can be interpolated".to_string(),
            ))
        }
    };

    let mut aligned = TimeSeries::new(target_times.to_vec(), data)?;
    aligned.set_coords(source.coords().cloned());

    Ok(aligned)
}

/// Aligns the stored series `source_name` onto the timestamps of
/// `target_name` and stores the result as `<source_name>-itrp`.
pub fn interpolate_onto<S: VariableStore>(
    store: &mut S,
    source_name: &str,
    target_name: &str,
) -> FacResult<String> {
    let source = store
        .get(source_name)
        .ok_or_else(|| FacError::MissingVariable(source_name.to_string()))?;
    let target = store
        .get(target_name)
        .ok_or_else(|| FacError::MissingVariable(target_name.to_string()))?;

    let aligned = interpolate(source, target.times())?;
    let new_name = format!("{}{}", source_name, INTERPOLATED_SUFFIX);
    debug!(source = source_name, target = target_name, new_name, "interpolated variable");
    store.set(&new_name, aligned);

    Ok(new_name)
}
