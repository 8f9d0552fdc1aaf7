use crate::{
    azimuth::{canonicalize, reflect},
    distance::to_meters,
    math::haversin,
    TerrainError,
};
use geo::geometry::Point;
use std::{
    f64::consts::{FRAC_PI_2, PI},
    fmt,
};

/// A point on the surface of the Earth, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude in [-π, π].
    longitude: f64,

    /// Latitude in [-π/2, π/2].
    latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, TerrainError> {
        if !(-PI..=PI).contains(&longitude) {
            return Err(TerrainError::InvalidArgument("longitude out of [-π, π]"));
        }
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&latitude) {
            return Err(TerrainError::InvalidArgument("latitude out of [-π/2, π/2]"));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Returns a point from coordinates in degrees.
    pub fn from_degrees(longitude: f64, latitude: f64) -> Result<Self, TerrainError> {
        Self::new(longitude.to_radians(), latitude.to_radians())
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the great-circle distance to `that`, in meters.
    pub fn distance_to(&self, that: &GeoPoint) -> f64 {
        let a = haversin(self.latitude - that.latitude)
            + self.latitude.cos() * that.latitude.cos() * haversin(self.longitude - that.longitude);
        to_meters(2.0 * a.sqrt().asin())
    }

    /// Returns the initial bearing from `self` to `that` as a
    /// canonical azimuth.
    pub fn azimuth_to(&self, that: &GeoPoint) -> f64 {
        let x = (self.longitude - that.longitude).sin() * that.latitude.cos();
        let y = self.latitude.cos() * that.latitude.sin()
            - self.latitude.sin() * that.latitude.cos() * (self.longitude - that.longitude).cos();
        reflect(canonicalize(x.atan2(y)))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.4},{:.4})",
            self.longitude.to_degrees(),
            self.latitude.to_degrees()
        )
    }
}

/// Converts to a `geo` point in degrees.
impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.longitude.to_degrees(), p.latitude.to_degrees())
    }
}
