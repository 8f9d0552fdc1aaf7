use crate::PanoramaError;
use terrain::{
    azimuth::{canonicalize, is_canonical},
    math::{angular_distance, PI2},
    GeoPoint,
};

/// Rounding slack when checking that an angle lies within the field
/// of view, in radians.
const ANGLE_TOLERANCE: f64 = 1e-9;

/// Observer and pixel geometry of a panorama.
///
/// Pixel `(0, 0)` is the top-left corner. Columns sweep the horizontal
/// field of view clockwise and rows sweep altitudes from the top of
/// the vertical field of view down. Horizontal and vertical angular
/// spacing between adjacent pixels are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanoramaParameters {
    observer_position: GeoPoint,
    observer_elevation: i32,
    center_azimuth: f64,
    horizontal_field_of_view: f64,
    max_distance: i32,
    width: usize,
    height: usize,
    delta: f64,
    vertical_field_of_view: f64,
}

impl PanoramaParameters {
    pub fn new(
        observer_position: GeoPoint,
        observer_elevation: i32,
        center_azimuth: f64,
        horizontal_field_of_view: f64,
        max_distance: i32,
        width: usize,
        height: usize,
    ) -> Result<Self, PanoramaError> {
        if !is_canonical(center_azimuth) {
            return Err(PanoramaError::InvalidArgument("center azimuth is not canonical"));
        }
        if !(horizontal_field_of_view > 0.0 && horizontal_field_of_view <= PI2) {
            return Err(PanoramaError::InvalidArgument(
                "horizontal field of view must be in (0, 2π]",
            ));
        }
        if max_distance <= 0 || width <= 1 || height <= 1 {
            return Err(PanoramaError::InvalidArgument(
                "max distance must be positive and dimensions greater than 1",
            ));
        }
        #[allow(clippy::cast_precision_loss)]
        let delta = horizontal_field_of_view / (width - 1) as f64;
        #[allow(clippy::cast_precision_loss)]
        let vertical_field_of_view = delta * (height - 1) as f64;
        Ok(Self {
            observer_position,
            observer_elevation,
            center_azimuth,
            horizontal_field_of_view,
            max_distance,
            width,
            height,
            delta,
            vertical_field_of_view,
        })
    }

    pub fn observer_position(&self) -> GeoPoint {
        self.observer_position
    }

    /// Observer altitude in meters.
    pub fn observer_elevation(&self) -> i32 {
        self.observer_elevation
    }

    pub fn center_azimuth(&self) -> f64 {
        self.center_azimuth
    }

    pub fn horizontal_field_of_view(&self) -> f64 {
        self.horizontal_field_of_view
    }

    pub fn vertical_field_of_view(&self) -> f64 {
        self.vertical_field_of_view
    }

    /// Farthest visible terrain, in meters.
    pub fn max_distance(&self) -> i32 {
        self.max_distance
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the azimuth seen by column `x`, which may be fractional.
    pub fn azimuth_for_x(&self, x: f64) -> Result<f64, PanoramaError> {
        if !(0.0..=self.max_x()).contains(&x) {
            return Err(PanoramaError::InvalidArgument("x is outside of the panorama"));
        }
        let west = self.center_azimuth - 0.5 * self.horizontal_field_of_view;
        Ok(canonicalize(west + self.delta * x))
    }

    /// Returns the fractional column seeing `azimuth`.
    pub fn x_for_azimuth(&self, azimuth: f64) -> Result<f64, PanoramaError> {
        if !is_canonical(azimuth) {
            return Err(PanoramaError::InvalidArgument("azimuth is not canonical"));
        }
        let offset = angular_distance(self.center_azimuth, azimuth);
        if offset.abs() > 0.5 * self.horizontal_field_of_view + ANGLE_TOLERANCE {
            return Err(PanoramaError::InvalidArgument(
                "azimuth is outside of the field of view",
            ));
        }
        Ok((self.max_x() / 2.0 + offset / self.delta).clamp(0.0, self.max_x()))
    }

    /// Returns the altitude angle seen by row `y`, positive upwards.
    pub fn altitude_for_y(&self, y: f64) -> Result<f64, PanoramaError> {
        if !(0.0..=self.max_y()).contains(&y) {
            return Err(PanoramaError::InvalidArgument("y is outside of the panorama"));
        }
        Ok(0.5 * self.vertical_field_of_view - self.delta * y)
    }

    /// Returns the fractional row seeing `altitude`.
    pub fn y_for_altitude(&self, altitude: f64) -> Result<f64, PanoramaError> {
        if altitude.abs() > 0.5 * self.vertical_field_of_view + ANGLE_TOLERANCE {
            return Err(PanoramaError::InvalidArgument(
                "altitude is outside of the field of view",
            ));
        }
        let y = (0.5 * self.vertical_field_of_view - altitude) / self.delta;
        Ok(y.clamp(0.0, self.max_y()))
    }

    pub fn is_valid_sample_index(&self, x: i64, y: i64) -> bool {
        usize::try_from(x).map_or(false, |x| x < self.width)
            && usize::try_from(y).map_or(false, |y| y < self.height)
    }

    /// Returns the row-major index of pixel `(x, y)`.
    pub fn linear_sample_index(&self, x: usize, y: usize) -> usize {
        x + self.width * y
    }

    /// Number of pixels.
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    #[allow(clippy::cast_precision_loss)]
    fn max_x(&self) -> f64 {
        (self.width - 1) as f64
    }

    #[allow(clippy::cast_precision_loss)]
    fn max_y(&self) -> f64 {
        (self.height - 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::PanoramaParameters;
    use crate::PanoramaError;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use terrain::GeoPoint;

    /// 60° wide, centered 15° east of north, 8 x 8 pixels.
    fn pp() -> PanoramaParameters {
        let origin = GeoPoint::new(0.0, 0.0).unwrap();
        PanoramaParameters::new(origin, 1000, PI / 12.0, PI / 3.0, 100_000, 8, 8).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid() {
        let origin = GeoPoint::new(0.0, 0.0).unwrap();
        let bad = [
            PanoramaParameters::new(origin, 1000, 2.0 * PI, PI, 100, 8, 8),
            PanoramaParameters::new(origin, 1000, 0.0, 0.0, 100, 8, 8),
            PanoramaParameters::new(origin, 1000, 0.0, 2.0 * PI + 0.1, 100, 8, 8),
            PanoramaParameters::new(origin, 1000, 0.0, PI, 0, 8, 8),
            PanoramaParameters::new(origin, 1000, 0.0, PI, 100, 1, 8),
            PanoramaParameters::new(origin, 1000, 0.0, PI, 100, 8, 1),
        ];
        for result in bad {
            assert!(matches!(result, Err(PanoramaError::InvalidArgument(_))));
        }
        assert!(PanoramaParameters::new(origin, 1000, 0.0, 2.0 * PI, 100, 8, 8).is_ok());
    }

    #[test]
    fn test_vertical_field_of_view() {
        assert_relative_eq!(pp().vertical_field_of_view(), PI / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_x_for_azimuth_limits() {
        let pp = pp();
        assert_relative_eq!(pp.x_for_azimuth(23.0 * PI / 12.0).unwrap(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(pp.x_for_azimuth(PI / 12.0).unwrap(), 3.5, epsilon = 1e-10);
        assert_relative_eq!(
            pp.x_for_azimuth(2.999_999_999_999_999 * PI / 12.0).unwrap(),
            7.0,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            pp.x_for_azimuth(23.0 * PI / 12.0 + PI / 21.0).unwrap(),
            1.0,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_azimuth_for_x() {
        let pp = pp();
        assert_relative_eq!(pp.azimuth_for_x(0.0).unwrap(), 23.0 * PI / 12.0, epsilon = 1e-5);
        assert_relative_eq!(pp.azimuth_for_x(7.0).unwrap(), 3.0 * PI / 12.0, epsilon = 1e-5);
        assert_relative_eq!(
            pp.azimuth_for_x(1.0).unwrap(),
            23.0 * PI / 12.0 + PI / 21.0,
            epsilon = 1e-5
        );
        assert!(pp.azimuth_for_x(7.01).is_err());
        assert!(pp.azimuth_for_x(-2.0).is_err());
    }

    #[test]
    fn test_x_for_azimuth_rejects() {
        let pp = pp();
        for azimuth in [22.999_99 * PI / 12.0, 3.0 * PI / 12.0, 37.0 * PI / 12.0] {
            assert!(pp.x_for_azimuth(azimuth).is_err(), "{azimuth}");
        }
    }

    #[test]
    fn test_altitude_for_y() {
        let pp = pp();
        assert_relative_eq!(pp.altitude_for_y(0.0).unwrap(), PI / 6.0, epsilon = 1e-5);
        assert_relative_eq!(pp.altitude_for_y(3.5).unwrap(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(pp.altitude_for_y(7.0).unwrap(), -PI / 6.0, epsilon = 1e-5);
        assert_relative_eq!(pp.altitude_for_y(2.5).unwrap(), PI / 21.0, epsilon = 1e-5);
        assert_relative_eq!(pp.altitude_for_y(4.5).unwrap(), -PI / 21.0, epsilon = 1e-5);
        assert_relative_eq!(pp.altitude_for_y(6.0).unwrap(), -5.0 * PI / 42.0, epsilon = 1e-5);
        for y in [-0.0001, -1.0, 7.05] {
            assert!(pp.altitude_for_y(y).is_err(), "{y}");
        }
    }

    #[test]
    fn test_y_for_altitude() {
        let pp = pp();
        let half = pp.vertical_field_of_view() / 2.0;
        assert_relative_eq!(pp.y_for_altitude(0.0).unwrap(), 3.5, epsilon = 1e-5);
        assert_relative_eq!(pp.y_for_altitude(half).unwrap(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(pp.y_for_altitude(-half).unwrap(), 7.0, epsilon = 1e-5);
        assert_relative_eq!(pp.y_for_altitude(3.0 * PI / 42.0).unwrap(), 2.0, epsilon = 1e-5);
        assert_relative_eq!(pp.y_for_altitude(-3.0 * PI / 42.0).unwrap(), 5.0, epsilon = 1e-5);
        for altitude in [PI / 5.0, -PI / 5.0, PI] {
            assert!(pp.y_for_altitude(altitude).is_err(), "{altitude}");
        }
    }

    #[test]
    fn test_round_trips() {
        let origin = GeoPoint::new(0.0, 0.0).unwrap();
        let all = [
            pp(),
            PanoramaParameters::new(origin, 1000, 0.0, PI / 2.0, 100_000, 5, 3).unwrap(),
            PanoramaParameters::new(origin, 1000, 1.5 * PI, 2.0 * PI / 3.0, 1000, 101, 41)
                .unwrap(),
        ];
        for pp in all {
            for x in 0..pp.width() {
                let x = x as f64;
                let azimuth = pp.azimuth_for_x(x).unwrap();
                let back = pp.x_for_azimuth(azimuth);
                assert!(back.is_ok(), "width {} x {x}: {back:?}", pp.width());
                assert_relative_eq!(back.unwrap(), x, epsilon = 1e-9);
            }
            for y in 0..pp.height() {
                let y = y as f64;
                let altitude = pp.altitude_for_y(y).unwrap();
                assert_relative_eq!(pp.y_for_altitude(altitude).unwrap(), y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_sample_indices() {
        let pp = pp();
        assert!(pp.is_valid_sample_index(0, 0));
        assert!(pp.is_valid_sample_index(7, 7));
        assert!(!pp.is_valid_sample_index(8, 0));
        assert!(!pp.is_valid_sample_index(0, -1));
        assert_eq!(pp.linear_sample_index(3, 2), 19);
        assert_eq!(pp.size(), 64);
    }
}
