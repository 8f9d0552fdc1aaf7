//! Bracket-then-bisect root finding over fallible functions.
//!
//! The functions searched here are typically terrain lookups, which
//! can fail, so `f` returns a `Result` and any error aborts the search.

use crate::TerrainError;

/// Returns the lower bound of the first window `[x, x + dx]` in
/// `[min_x, max_x]` over which `f` changes sign (or touches zero),
/// scanning upwards from `min_x`.
///
/// The last window is truncated to `max_x`, so the returned window is
/// always `[x, min(x + dx, max_x)]`. Returns `f64::INFINITY` if no
/// window brackets a root.
pub fn first_interval_containing_root<F, E>(
    mut f: F,
    min_x: f64,
    max_x: f64,
    dx: f64,
) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<TerrainError>,
{
    if !(min_x < max_x) {
        return Err(TerrainError::InvalidArgument("search range is empty").into());
    }
    if !(dx > 0.0) {
        return Err(TerrainError::InvalidArgument("search step must be positive").into());
    }

    let mut x1 = min_x;
    let mut f1 = f(x1)?;
    loop {
        let x2 = (x1 + dx).min(max_x);
        let f2 = f(x2)?;
        if f1 * f2 <= 0.0 {
            return Ok(x1);
        }
        if x2 >= max_x {
            return Ok(f64::INFINITY);
        }
        x1 = x2;
        f1 = f2;
    }
}

/// Narrows `[x1, x2]`, which must bracket a root of `f`, by bisection
/// until it is at most `epsilon` wide, and returns its lower bound.
pub fn improve_root<F, E>(mut f: F, x1: f64, x2: f64, epsilon: f64) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<TerrainError>,
{
    let (mut small, mut big) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let mut f_big = f(big)?;
    if f(small)? * f_big > 0.0 {
        return Err(TerrainError::InvalidArgument("interval does not bracket a root").into());
    }

    while big - small > epsilon {
        let mid = 0.5 * (small + big);
        let f_mid = f(mid)?;
        if f_mid * f_big <= 0.0 {
            small = mid;
        } else {
            big = mid;
            f_big = f_mid;
        }
    }
    Ok(small)
}
