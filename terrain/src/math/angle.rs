use std::f64::consts::{PI, TAU};

/// A full turn, in radians.
pub const PI2: f64 = TAU;

pub fn sq(x: f64) -> f64 {
    x * x
}

/// Returns the remainder of the floored division of `x` by `y`.
///
/// Unlike `%`, the result has the sign of `y`.
pub fn floor_mod(x: f64, y: f64) -> f64 {
    x - y * (x / y).floor()
}

/// Returns the haversine of `x`: `sin²(x/2)`.
pub fn haversin(x: f64) -> f64 {
    sq((x / 2.0).sin())
}

/// Returns the signed angle in [-π, π) to turn from `a1` to `a2`.
pub fn angular_distance(a1: f64, a2: f64) -> f64 {
    floor_mod(a2 - a1 + PI, PI2) - PI
}
