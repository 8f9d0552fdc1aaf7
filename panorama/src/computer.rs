use crate::{Builder, Panorama, PanoramaError, PanoramaParameters};
use log::{debug, trace};
use std::time::Instant;
use terrain::{
    distance::EARTH_RADIUS,
    math::{first_interval_containing_root, improve_root, sq},
    ContinuousElevationModel, DiscreteElevationModel, ElevationProfile, TerrainError,
};

/// Step used to bracket the first terrain hit along a ray, in meters.
const BRACKET_STEP: f64 = 64.0;

/// Bisection stops once the hit is known to within this many meters.
const HIT_EPSILON: f64 = 4.0;

/// Atmospheric refraction coefficient.
const REFRACTION: f64 = 0.13;

/// Combined earth curvature and refraction correction, applied as
/// `K * d²` to a ray's height above the terrain.
const CURVATURE: f64 = (1.0 - REFRACTION) / (2.0 * EARTH_RADIUS);

/// Casts one ray per pixel over a continuous elevation model.
pub struct PanoramaComputer<D> {
    cem: ContinuousElevationModel<D>,
}

impl<D: DiscreteElevationModel> PanoramaComputer<D> {
    pub fn new(cem: ContinuousElevationModel<D>) -> Self {
        Self { cem }
    }

    pub fn cem(&self) -> &ContinuousElevationModel<D> {
        &self.cem
    }

    pub fn compute(&self, parameters: PanoramaParameters) -> Result<Panorama, PanoramaError> {
        self.compute_with(parameters, |_| ())
    }

    /// Like [compute](Self::compute), calling `on_column` with the
    /// index of each column once it is done.
    pub fn compute_with<F>(
        &self,
        parameters: PanoramaParameters,
        mut on_column: F,
    ) -> Result<Panorama, PanoramaError>
    where
        F: FnMut(usize),
    {
        let now = Instant::now();
        let origin = parameters.observer_position();
        let observer_elevation = f64::from(parameters.observer_elevation());
        let max_distance = f64::from(parameters.max_distance());
        let mut builder = Builder::new(parameters);
        let mut hits = 0_usize;

        for x in 0..parameters.width() {
            #[allow(clippy::cast_precision_loss)]
            let azimuth = parameters.azimuth_for_x(x as f64)?;
            let profile = ElevationProfile::new(&self.cem, origin, azimuth, max_distance)?;

            // Rows are scanned bottom up. Terrain hidden by a lower row
            // cannot be seen higher up, so each search resumes at the
            // previous hit.
            let mut previous = 0.0;
            for y in (0..parameters.height()).rev() {
                if previous >= max_distance {
                    break;
                }
                #[allow(clippy::cast_precision_loss)]
                let altitude = parameters.altitude_for_y(y as f64)?;
                let ray = ray_to_ground(&profile, observer_elevation, altitude.tan());
                let start =
                    first_interval_containing_root(&ray, previous, max_distance, BRACKET_STEP)?;
                if start.is_infinite() {
                    trace!("column {x}: sky from row {y} up");
                    break;
                }
                let end = (start + BRACKET_STEP).min(max_distance);
                let distance = improve_root(&ray, start, end, HIT_EPSILON)?;
                write_hit(&mut builder, &profile, x, y, distance, altitude)?;
                previous = distance;
                hits += 1;
            }
            on_column(x);
        }

        debug!(
            "computed {}x{} panorama in {:?}, {hits} terrain hits",
            parameters.width(),
            parameters.height(),
            now.elapsed()
        );
        builder.build()
    }
}

/// Height of a ray above the terrain at horizontal distance `d`. The ray
/// leaves the observer at `elevation` with a slope of `slope` (the
/// tangent of its altitude), so its first root is the terrain hit.
fn ray_to_ground<'a, D: DiscreteElevationModel>(
    profile: &'a ElevationProfile<'a, D>,
    elevation: f64,
    slope: f64,
) -> impl Fn(f64) -> Result<f64, TerrainError> + 'a {
    move |d| Ok(elevation + slope * d - profile.elevation_at(d)? + CURVATURE * sq(d))
}

#[allow(clippy::cast_possible_truncation)]
fn write_hit<D: DiscreteElevationModel>(
    builder: &mut Builder,
    profile: &ElevationProfile<'_, D>,
    x: usize,
    y: usize,
    distance: f64,
    altitude: f64,
) -> Result<(), PanoramaError> {
    let position = profile.position_at(distance)?;
    builder
        .set_distance_at(x, y, (distance / altitude.cos()) as f32)?
        .set_longitude_at(x, y, position.longitude() as f32)?
        .set_latitude_at(x, y, position.latitude() as f32)?
        .set_elevation_at(x, y, profile.elevation_at(distance)? as f32)?
        .set_slope_at(x, y, profile.slope_at(distance)? as f32)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{PanoramaComputer, CURVATURE};
    use crate::PanoramaParameters;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;
    use terrain::{
        ContinuousElevationModel, DiscreteElevationModel, GeoPoint, Interval1D, Interval2D,
        TerrainError,
    };

    /// Covers 6°E..8°E, 45°N..47°N. Flat at 0 m, with a wall starting at
    /// sample index `wall` (if any) that rises 100 m per sample eastwards
    /// up to 2000 m.
    struct Plateau {
        wall: Option<i32>,
    }

    impl DiscreteElevationModel for Plateau {
        fn extent(&self) -> Interval2D {
            Interval2D::new(
                Interval1D::new(6 * 3600, 8 * 3600).unwrap(),
                Interval1D::new(45 * 3600, 47 * 3600).unwrap(),
            )
        }

        fn elevation_sample(&self, x: i32, _y: i32) -> Result<f64, TerrainError> {
            Ok(match self.wall {
                Some(wall) => (f64::from(x - wall) * 100.0).clamp(0.0, 2000.0),
                None => 0.0,
            })
        }
    }

    fn computer(wall: Option<i32>) -> PanoramaComputer<Plateau> {
        PanoramaComputer::new(ContinuousElevationModel::new(Plateau { wall }))
    }

    fn observer() -> GeoPoint {
        GeoPoint::from_degrees(7.0, 46.0).unwrap()
    }

    /// Horizontal distance at which a ray of slope `-dip` leaving 1000 m
    /// meets flat ground on a curved earth.
    fn flat_hit(dip: f64) -> f64 {
        let discriminant = sq(dip) - 4.0 * CURVATURE * 1000.0;
        (dip - discriminant.sqrt()) / (2.0 * CURVATURE)
    }

    fn sq(x: f64) -> f64 {
        x * x
    }

    #[test]
    fn test_flat_world() {
        // 0.05 rad between rows, altitudes 0.15 down to -0.15.
        let params = PanoramaParameters::new(observer(), 1000, 0.0, 0.2, 100_000, 5, 7).unwrap();
        let mut columns = Vec::new();
        let panorama = computer(None)
            .compute_with(params, |x| columns.push(x))
            .unwrap();
        assert_eq!(columns, [0, 1, 2, 3, 4]);

        for x in 0..5 {
            for y in 0..=3 {
                assert_eq!(panorama.distance_at(x, y).unwrap(), f32::INFINITY, "({x}, {y})");
                assert_eq!(panorama.elevation_at(x, y).unwrap(), 0.0);
            }
            let mut previous = f64::INFINITY;
            for y in 4..7 {
                let altitude = params.altitude_for_y(y as f64).unwrap();
                let distance = f64::from(panorama.distance_at(x, y).unwrap());
                let horizontal = distance * altitude.cos();
                assert!(horizontal < previous, "({x}, {y})");
                assert_relative_eq!(horizontal, flat_hit(-altitude.tan()), epsilon = 8.0);
                assert_relative_eq!(f64::from(panorama.elevation_at(x, y).unwrap()), 0.0);
                assert_relative_eq!(f64::from(panorama.slope_at(x, y).unwrap()), 0.0);
                previous = horizontal;
            }
        }

        // The central column looks due north.
        let longitude = f64::from(panorama.longitude_at(2, 6).unwrap());
        let latitude = f64::from(panorama.latitude_at(2, 6).unwrap());
        assert_relative_eq!(longitude, observer().longitude(), epsilon = 1e-6);
        assert!(latitude > observer().latitude());
    }

    #[test]
    fn test_nothing_within_reach() {
        let params = PanoramaParameters::new(observer(), 1000, 0.0, 0.2, 5_000, 5, 7).unwrap();
        let panorama = computer(None).compute(params).unwrap();
        assert!(panorama.distances().iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_wall() {
        let foot = GeoPoint::from_degrees(7.1, 46.0).unwrap();
        let top = GeoPoint::from_degrees(7.1 + 20.0 / 3600.0, 46.0).unwrap();
        let (foot, top) = (observer().distance_to(&foot), observer().distance_to(&top));
        // Altitudes between -0.05 and 0.05 rad, all of which meet the wall
        // before reaching the ground or passing over it.
        let params =
            PanoramaParameters::new(observer(), 1000, FRAC_PI_2, 0.02, 50_000, 3, 11).unwrap();
        let panorama = computer(Some(25_560)).compute(params).unwrap();

        for x in 0..3 {
            for y in 0..11 {
                let altitude = params.altitude_for_y(y as f64).unwrap();
                let distance = f64::from(panorama.distance_at(x, y).unwrap());
                let horizontal = distance * altitude.cos();
                assert!(
                    horizontal > foot - 50.0 && horizontal < top + 50.0,
                    "({x}, {y}): {horizontal}"
                );
                // The hit lies at most a few meters short of where the ray
                // meets the slope, which climbs about 5 m per meter.
                let ray = 1000.0 + altitude.tan() * horizontal + CURVATURE * sq(horizontal);
                let elevation = f64::from(panorama.elevation_at(x, y).unwrap());
                assert!(elevation <= ray + 1.0, "({x}, {y}): {elevation} above {ray}");
                assert!(ray - elevation < 50.0, "({x}, {y}): {elevation} below {ray}");
            }
        }
    }
}
