//! Coordinate-frame tags.

use std::{convert::Infallible, fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reference frame a vector series is expressed in. See the
/// [SPEDAS coordinate systems](http://spedas.org/wiki/index.php?title=Coordinate_systems)
/// for definitions.
pub enum CoordinateFrame {
    /// Geocentric equatorial inertial
    Gei,
    /// Geocentric solar ecliptic
    Gse,
    /// Geocentric solar magnetospheric
    Gsm,
    /// Geographic
    Geo,
    /// Solar magnetic
    Sm,
    /// Geomagnetic
    Mag,
    Other(String),
}

impl FromStr for CoordinateFrame {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let frame = match s.trim().to_lowercase().as_str() {
            "gei" => CoordinateFrame::Gei,
            "gse" => CoordinateFrame::Gse,
            "gsm" => CoordinateFrame::Gsm,
            "geo" => CoordinateFrame::Geo,
            "sm" => CoordinateFrame::Sm,
            "mag" => CoordinateFrame::Mag,
            other => CoordinateFrame::Other(other.to_string()),
        };

        Ok(frame)
    }
}

impl fmt::Display for CoordinateFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoordinateFrame::Gei => "gei",
            CoordinateFrame::Gse => "gse",
            CoordinateFrame::Gsm => "gsm",
            CoordinateFrame::Geo => "geo",
            CoordinateFrame::Sm => "sm",
            CoordinateFrame::Mag => "mag",
            CoordinateFrame::Other(name) => name,
        };
        f.write_str(name)
    }
}
