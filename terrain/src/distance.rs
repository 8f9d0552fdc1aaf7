//! Conversions between distances on the Earth's surface and the
//! angles they subtend at its center.

/// Mean radius of the Earth, in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Converts a surface distance in meters to radians.
pub fn to_radians(distance_m: f64) -> f64 {
    distance_m / EARTH_RADIUS
}

/// Converts a central angle in radians to a surface distance in meters.
pub fn to_meters(distance_rad: f64) -> f64 {
    distance_rad * EARTH_RADIUS
}
