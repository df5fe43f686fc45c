//! Choice of the second reference axis and the resulting orthonormal basis.

use std::{fmt, str::FromStr};

use nalgebra::Vector3;
use tracing::debug;

use crate::{
    error::{FacError, FacResult},
    ops::{cross_vectors, cross_with_axis, interpolate, normalize_vectors},
    series::{CoordinateFrame, TimeSeries},
};

/// Frame the position series must be in for the geocentric-radius axes.
pub const POSITION_FRAME: CoordinateFrame = CoordinateFrame::Gei;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Rule selecting the second axis of the field-aligned frame.
pub enum SecondAxis {
    /// X of the ambient frame (`xgse`)
    #[default]
    FixedX,
    /// Spacecraft position, crossed as `r x B` (`mrgeo`)
    MinusReferenceGeo,
    /// Spacecraft position, crossed as `B x r` (`rgeo`)
    ReferenceGeo,
}

impl SecondAxis {
    pub fn name(&self) -> &'static str {
        match self {
            SecondAxis::FixedX => "xgse",
            SecondAxis::MinusReferenceGeo => "mrgeo",
            SecondAxis::ReferenceGeo => "rgeo",
        }
    }

    pub fn needs_position(&self) -> bool {
        !matches!(self, SecondAxis::FixedX)
    }
}

impl FromStr for SecondAxis {
    type Err = FacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xgse" | "fixed-x" => Ok(SecondAxis::FixedX),
            "mrgeo" | "minus-reference-geo" => Ok(SecondAxis::MinusReferenceGeo),
            "rgeo" | "reference-geo" => Ok(SecondAxis::ReferenceGeo),
            _ => Err(FacError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for SecondAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Right-handed orthonormal triple per sample, co-indexed with `times`.
#[derive(Debug, Clone, PartialEq)]
pub struct Basis {
    pub times: Vec<f64>,
    pub x: Vec<Vector3<f64>>,
    pub y: Vec<Vector3<f64>>,
    pub z: Vec<Vector3<f64>>,
}

impl Basis {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Builds the field-aligned basis for every sample of `primary`.
///
/// z follows the primary vector. The second axis fixes y, and x completes the
/// right-handed set as `y x z`. Position-based axes need `position` tagged in
/// [`POSITION_FRAME`]; it is aligned onto the primary timestamps first.
pub fn build_basis(
    primary: &TimeSeries,
    second_axis: SecondAxis,
    position: Option<&TimeSeries>,
) -> FacResult<Basis> {
    let field = primary
        .as_vectors()
        .ok_or_else(|| FacError::NotVector("primary".to_string()))?;

    let reference = if second_axis.needs_position() {
        let position = position.ok_or_else(|| FacError::MissingPosition(second_axis.to_string()))?;
        Some(position_axis(primary, position)?)
    } else {
        None
    };

    let z = normalize_vectors(field);
    let y = match (second_axis, reference) {
        (SecondAxis::FixedX, _) => cross_with_axis(&z, &Vector3::x()),
        (SecondAxis::MinusReferenceGeo, Some(r)) => cross_vectors(&r, &z)?,
        (SecondAxis::ReferenceGeo, Some(r)) => cross_vectors(&z, &r)?,
        (_, None) => return Err(FacError::MissingPosition(second_axis.to_string())),
    };
    let y = normalize_vectors(&y);
    let x = cross_vectors(&y, &z)?;

    debug!(second_axis = %second_axis, samples = z.len(), "built field-aligned basis");

    Ok(Basis {
        times: primary.times().to_vec(),
        x,
        y,
        z,
    })
}

/// Unit position vectors on the primary's timestamps.
fn position_axis(primary: &TimeSeries, position: &TimeSeries) -> FacResult<Vec<Vector3<f64>>> {
    if position.coords() != Some(&POSITION_FRAME) {
        return Err(FacError::WrongCoordinateFrame {
            name: "position".to_string(),
            expected: POSITION_FRAME,
            found: position.coords().cloned(),
        });
    }

    let aligned = interpolate(position, primary.times())?;
    let vectors = aligned
        .as_vectors()
        .ok_or_else(|| FacError::NotVector("position".to_string()))?;

    Ok(normalize_vectors(vectors))
}

// -- Tests -------------------------------------------------------------------
