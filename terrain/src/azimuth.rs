//! Azimuths: angles in radians measured clockwise from north, with
//! canonical range [0, 2π).

use crate::{
    math::{floor_mod, PI2},
    TerrainError,
};
use std::f64::consts::PI;

/// Returns `true` if `azimuth` lies in [0, 2π).
pub fn is_canonical(azimuth: f64) -> bool {
    (0.0..PI2).contains(&azimuth)
}

/// Returns the canonical equivalent of any angle.
pub fn canonicalize(azimuth: f64) -> f64 {
    let canonical = floor_mod(azimuth, PI2);
    // floor_mod can round up to exactly 2π for tiny negative input.
    if canonical >= PI2 {
        0.0
    } else {
        canonical
    }
}

/// Converts a canonical azimuth (clockwise) to a mathematical angle
/// (counter-clockwise).
pub fn to_math(azimuth: f64) -> Result<f64, TerrainError> {
    if is_canonical(azimuth) {
        Ok(reflect(azimuth))
    } else {
        Err(TerrainError::InvalidArgument("azimuth is not canonical"))
    }
}

/// Converts a canonical mathematical angle (counter-clockwise) to an
/// azimuth (clockwise).
pub fn from_math(angle: f64) -> Result<f64, TerrainError> {
    to_math(angle)
}

/// Returns the octant name of `azimuth`, built from the four cardinal
/// names. On the border between a cardinal and an intercardinal
/// octant the cardinal one wins.
pub fn to_octant_string(
    azimuth: f64,
    n: &str,
    e: &str,
    s: &str,
    w: &str,
) -> Result<String, TerrainError> {
    if !is_canonical(azimuth) {
        return Err(TerrainError::InvalidArgument("azimuth is not canonical"));
    }
    let mut octant = String::new();
    if azimuth <= 3.0 * PI / 8.0 || azimuth >= 13.0 * PI / 8.0 {
        octant.push_str(n);
    } else if (5.0 * PI / 8.0..=11.0 * PI / 8.0).contains(&azimuth) {
        octant.push_str(s);
    }
    if azimuth > PI / 8.0 && azimuth < 7.0 * PI / 8.0 {
        octant.push_str(e);
    } else if azimuth > 9.0 * PI / 8.0 && azimuth < 15.0 * PI / 8.0 {
        octant.push_str(w);
    }
    Ok(octant)
}

/// Reflection between the clockwise and counter-clockwise conventions,
/// keeping 0 fixed.
pub(crate) fn reflect(angle: f64) -> f64 {
    if angle == 0.0 {
        0.0
    } else {
        PI2 - angle
    }
}
