//! Named summits and the fixed-column gazetteer format listing them.
//!
//! Each gazetteer line holds one summit:
//!
//! ```text
//!   7:59:48 45:56:13  4634  H1 C1 D0  MONTE ROSA
//! ```
//!
//! Longitude and latitude are `d:m:s` in columns 0..=8 and 9..=17, the
//! altitude in meters is in columns 19..=23 and the name runs from
//! column 36 to the end of the line.

use crate::PanoramaError;
use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    ops::RangeInclusive,
    path::Path,
};
use terrain::GeoPoint;

const LONGITUDE: RangeInclusive<usize> = 0..=8;
const LATITUDE: RangeInclusive<usize> = 9..=17;
const ELEVATION: RangeInclusive<usize> = 19..=23;
const NAME_START: usize = 36;

#[derive(Debug, Clone, PartialEq)]
pub struct Summit {
    name: String,
    position: GeoPoint,
    elevation: i32,
}

impl Summit {
    pub fn new(name: impl Into<String>, position: GeoPoint, elevation: i32) -> Self {
        Self {
            name: name.into(),
            position,
            elevation,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    /// Altitude in meters.
    pub fn elevation(&self) -> i32 {
        self.elevation
    }
}

impl fmt::Display for Summit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.position, self.elevation)
    }
}

/// Reads every summit of the gazetteer file at `path`.
pub fn read_summits_from<P: AsRef<Path>>(path: P) -> Result<Vec<Summit>, PanoramaError> {
    parse_summits(BufReader::new(File::open(path)?))
}

/// Parses a gazetteer, failing on the first malformed line.
pub fn parse_summits<R: BufRead>(reader: R) -> Result<Vec<Summit>, PanoramaError> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| {
            parse_summit(&line?).map_err(|reason| PanoramaError::Gazetteer {
                line: i + 1,
                reason,
            })
        })
        .collect()
}

fn parse_summit(line: &str) -> Result<Summit, &'static str> {
    let field = |range: RangeInclusive<usize>| {
        line.get(range).map(str::trim).ok_or("line is too short")
    };
    let longitude = parse_dms(field(LONGITUDE)?).ok_or("bad longitude")?;
    let latitude = parse_dms(field(LATITUDE)?).ok_or("bad latitude")?;
    let position =
        GeoPoint::from_degrees(longitude, latitude).map_err(|_| "position out of range")?;
    let elevation = field(ELEVATION)?.parse().map_err(|_| "bad elevation")?;
    let name = line.get(NAME_START..).ok_or("missing name")?;
    Ok(Summit::new(name, position, elevation))
}

/// Parses `d:m:s` into degrees. A leading minus sign on the degrees
/// applies to the whole angle.
fn parse_dms(dms: &str) -> Option<f64> {
    let mut parts = dms.split(':');
    let degrees = parts.next()?;
    let minutes: f64 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    let magnitude = degrees.parse::<f64>().ok()?.abs() + minutes / 60.0 + seconds / 3600.0;
    Some(if degrees.starts_with('-') {
        -magnitude
    } else {
        magnitude
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_dms, parse_summits, read_summits_from, Summit};
    use crate::PanoramaError;
    use approx::assert_relative_eq;
    use std::{
        f64::consts::{FRAC_PI_2, PI},
        io::Write,
    };
    use terrain::GeoPoint;

    const GAZETTEER: &str = concat!(
        "  7:59:48 45:56:13  4634  H1 C1 D0  MONTE ROSA\n",
        "  6:51:54 45:49:58  4808  H1 C1 D0  MONT BLANC\n",
        "  7:39:32 46:38:06  2362  H1 C1 D0  NIESEN\n",
    );

    #[test]
    fn test_display() {
        let summit = Summit::new(
            "Mont des cochons",
            GeoPoint::new(PI / 5.0, -FRAC_PI_2).unwrap(),
            4600,
        );
        assert_eq!(summit.to_string(), "Mont des cochons (36.0000,-90.0000) 4600");

        let summit = Summit::new(
            "EVEREST",
            GeoPoint::new(11.0 * PI / 17.0, FRAC_PI_2).unwrap(),
            1_905_394_928,
        );
        assert_eq!(summit.to_string(), "EVEREST (116.4706,90.0000) 1905394928");
    }

    #[test]
    fn test_parse_dms() {
        assert_relative_eq!(parse_dms("7:59:48").unwrap(), 7.996_666_666, epsilon = 1e-8);
        assert_relative_eq!(parse_dms("-1:30:00").unwrap(), -1.5);
        assert_relative_eq!(parse_dms("-0:30:00").unwrap(), -0.5);
        assert!(parse_dms("7:59").is_none());
        assert!(parse_dms("7:59:48:1").is_none());
        assert!(parse_dms("x:59:48").is_none());
    }

    #[test]
    fn test_parse_summits() {
        let summits = parse_summits(GAZETTEER.as_bytes()).unwrap();
        assert_eq!(summits.len(), 3);

        let rosa = &summits[0];
        assert_eq!(rosa.name(), "MONTE ROSA");
        assert_eq!(rosa.elevation(), 4634);
        assert_relative_eq!(
            rosa.position().longitude(),
            (7.0_f64 + 59.0 / 60.0 + 48.0 / 3600.0).to_radians(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            rosa.position().latitude(),
            (45.0_f64 + 56.0 / 60.0 + 13.0 / 3600.0).to_radians(),
            epsilon = 1e-12
        );
        assert_eq!(summits[2].name(), "NIESEN");
    }

    #[test]
    fn test_fixed_columns() {
        let line = " 10:05:30-45:30:00   812  H1 C1 D0  LE POINTU";
        assert_eq!(line.find("LE POINTU"), Some(36));
        let summits = parse_summits(line.as_bytes()).unwrap();
        let summit = &summits[0];
        assert_eq!(summit.name(), "LE POINTU");
        assert_eq!(summit.elevation(), 812);
        assert_relative_eq!(
            summit.position().longitude(),
            (10.0_f64 + 5.0 / 60.0 + 30.0 / 3600.0).to_radians(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            summit.position().latitude(),
            (-45.5_f64).to_radians(),
            epsilon = 1e-12
        );

        // Shifting the same line by one column breaks its fields.
        let shifted = line.trim_start();
        assert!(matches!(
            parse_summits(shifted.as_bytes()),
            Err(PanoramaError::Gazetteer { line: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_line_is_named() {
        let gazetteer = format!("{GAZETTEER}  7:39:32 46:38:06  23x2  H1 C1 D0  BROKEN\n");
        assert!(matches!(
            parse_summits(gazetteer.as_bytes()),
            Err(PanoramaError::Gazetteer { line: 4, .. })
        ));
        assert!(matches!(
            parse_summits("  7:39:32 46:38:06".as_bytes()),
            Err(PanoramaError::Gazetteer { line: 1, .. })
        ));
    }

    #[test]
    fn test_read_summits_from() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GAZETTEER.as_bytes()).unwrap();
        file.flush().unwrap();
        assert_eq!(read_summits_from(file.path()).unwrap().len(), 3);
        assert!(matches!(
            read_summits_from(file.path().with_extension("missing")),
            Err(PanoramaError::Io(_))
        ));
    }
}
