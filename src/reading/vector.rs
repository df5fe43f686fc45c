use anyhow::{Error, Result};
use nalgebra::Vector3;

use super::{parse_time, Reading};

#[derive(Debug, Clone)]
/// One `time,x,y,z` line of a vector sample file.
pub struct VectorReading {
    pub time: f64,
    pub components: [Option<f64>; 3],
}

impl VectorReading {
    pub fn vector(&self) -> Option<Vector3<f64>> {
        match self.components {
            [Some(x), Some(y), Some(z)] => Some(Vector3::new(x, y, z)),
            _ => None,
        }
    }
}

impl Reading for VectorReading {
    fn from_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(Error::msg(format!(
                "Expected 4 comma-separated fields, got {}: `{}`",
                fields.len(),
                line
            )));
        }

        let time = parse_time(fields[0])?;
        let components = [
            parse_component(fields[1]),
            parse_component(fields[2]),
            parse_component(fields[3]),
        ];

        Ok(VectorReading { time, components })
    }

    fn is_valid(&self) -> bool {
        self.time.is_finite() && self.vector().is_some()
    }
}

/// Empty fields and fill values are missing.
fn parse_component(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > -1e30)
}

// -- Tests ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_parse_line() {
        let reading = VectorReading::from_line("2015-10-16T13:00:00Z, 12.5, -3.0, 40.25").unwrap();

        assert_eq!(reading.time, 1_445_000_400.0);
        assert_eq!(reading.vector(), Some(Vector3::new(12.5, -3.0, 40.25)));
        assert!(reading.is_valid());
    }

    #[test]
    fn should_flag_missing_component() {
        let reading = VectorReading::from_line("1445000400,1.0,,2.0").unwrap();

        assert_eq!(reading.components[1], None);
        assert!(!reading.is_valid());
    }

    #[test]
    fn should_treat_fill_value_as_missing() {
        let reading = VectorReading::from_line("1445000400,1.0,-1.0e31,2.0").unwrap();
        assert!(!reading.is_valid());
    }

    #[test]
    fn should_reject_wrong_field_count() {
        assert!(VectorReading::from_line("1445000400,1.0,2.0").is_err());
    }
}
