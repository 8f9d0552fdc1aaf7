use crate::{
    azimuth::{is_canonical, to_math},
    cem::ContinuousElevationModel,
    dem::DiscreteElevationModel,
    distance::to_radians,
    math::{floor_mod, lerp, PI2},
    GeoPoint, TerrainError,
};
use log::trace;
use std::f64::consts::PI;

/// Great-circle distance between two consecutive waypoints, in meters.
pub const WAYPOINT_SPACING: f64 = 4096.0;

/// Terrain along the great circle leaving `origin` towards `azimuth`.
///
/// Exact positions are computed every [WAYPOINT_SPACING] meters and
/// linearly interpolated in between.
pub struct ElevationProfile<'a, D> {
    cem: &'a ContinuousElevationModel<D>,
    length: f64,
    waypoints: Vec<GeoPoint>,
}

impl<'a, D: DiscreteElevationModel> ElevationProfile<'a, D> {
    pub fn new(
        cem: &'a ContinuousElevationModel<D>,
        origin: GeoPoint,
        azimuth: f64,
        length: f64,
    ) -> Result<Self, TerrainError> {
        if !is_canonical(azimuth) {
            return Err(TerrainError::InvalidArgument("azimuth is not canonical"));
        }
        if !(length > 0.0) {
            return Err(TerrainError::InvalidArgument("profile length must be positive"));
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (((length - 1.0) / WAYPOINT_SPACING).floor().max(0.0) as usize) + 2;
        let theta = to_math(azimuth)?;
        let waypoints = (0..count)
            .map(|i| waypoint(origin, theta, i as f64 * WAYPOINT_SPACING))
            .collect::<Result<Vec<_>, _>>()?;
        trace!(
            "profile from {origin} towards {:.2}°: {count} waypoints over {length} m",
            azimuth.to_degrees()
        );

        Ok(Self {
            cem,
            length,
            waypoints,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the position `x` meters from the origin.
    pub fn position_at(&self, x: f64) -> Result<GeoPoint, TerrainError> {
        self.check_distance(x)?;
        let pos = x / WAYPOINT_SPACING;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let i = (pos.floor() as usize).min(self.waypoints.len() - 2);
        let (p0, p1) = (self.waypoints[i], self.waypoints[i + 1]);
        let t = pos - i as f64;
        GeoPoint::new(
            lerp(p0.longitude(), p1.longitude(), t),
            lerp(p0.latitude(), p1.latitude(), t),
        )
    }

    /// Returns the terrain altitude `x` meters from the origin.
    pub fn elevation_at(&self, x: f64) -> Result<f64, TerrainError> {
        self.cem.elevation_at(self.position_at(x)?)
    }

    /// Returns the terrain slope `x` meters from the origin.
    pub fn slope_at(&self, x: f64) -> Result<f64, TerrainError> {
        self.cem.slope_at(self.position_at(x)?)
    }

    fn check_distance(&self, x: f64) -> Result<(), TerrainError> {
        if (0.0..=self.length).contains(&x) {
            Ok(())
        } else {
            Err(TerrainError::InvalidArgument("distance is outside of the profile"))
        }
    }
}

/// Returns the point `distance` meters from `origin` along the great
/// circle leaving it at mathematical angle `theta`.
fn waypoint(origin: GeoPoint, theta: f64, distance: f64) -> Result<GeoPoint, TerrainError> {
    let delta = to_radians(distance);
    let (lon, lat) = (origin.longitude(), origin.latitude());
    let lat2 = (lat.sin() * delta.cos() + lat.cos() * delta.sin() * theta.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lon2 = floor_mod(
        lon - (theta.sin() * delta.sin() / lat2.cos()).clamp(-1.0, 1.0).asin() + PI,
        PI2,
    ) - PI;
    GeoPoint::new(lon2, lat2)
}

#[cfg(test)]
mod tests {
    use super::{ElevationProfile, WAYPOINT_SPACING};
    use crate::{
        cem::ContinuousElevationModel,
        dem::{tests::FnDem, SAMPLES_PER_RADIAN},
        math::angular_distance,
        GeoPoint, TerrainError,
    };
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn ramp() -> ContinuousElevationModel<FnDem<impl Fn(i32, i32) -> f64>> {
        // Ten degrees square around (6°, 46°), rising eastwards.
        let x0 = 3600;
        let y0 = 41 * 3600;
        ContinuousElevationModel::new(FnDem::new(
            (x0, x0 + 10 * 3600),
            (y0, y0 + 10 * 3600),
            move |x, _| f64::from(x - x0) / 10.0,
        ))
    }

    fn origin() -> GeoPoint {
        GeoPoint::from_degrees(6.0, 46.0).unwrap()
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let cem = ramp();
        assert!(matches!(
            ElevationProfile::new(&cem, origin(), 2.0 * PI, 1000.0),
            Err(TerrainError::InvalidArgument(_))
        ));
        assert!(ElevationProfile::new(&cem, origin(), -0.1, 1000.0).is_err());
        assert!(ElevationProfile::new(&cem, origin(), 0.0, 0.0).is_err());
        assert!(ElevationProfile::new(&cem, origin(), 0.0, -5.0).is_err());
    }

    #[test]
    fn test_waypoint_count() {
        let cem = ramp();
        let expected = [
            (0.5, 2),
            (1.0, 2),
            (4096.0, 2),
            (4097.0, 3),
            (8193.0, 4),
            (100_000.0, 26),
        ];
        for (length, count) in expected {
            let profile = ElevationProfile::new(&cem, origin(), 0.0, length).unwrap();
            assert_eq!(profile.waypoints.len(), count, "length {length}");
        }
    }

    #[test]
    fn test_queries_are_range_checked() {
        let cem = ramp();
        let profile = ElevationProfile::new(&cem, origin(), 1.0, 10_000.0).unwrap();
        assert!(profile.position_at(0.0).is_ok());
        assert!(profile.elevation_at(10_000.0).is_ok());
        assert!(profile.slope_at(10_000.1).is_err());
        assert!(profile.position_at(-0.1).is_err());
    }

    #[test]
    fn test_starts_at_origin() {
        let cem = ramp();
        let profile = ElevationProfile::new(&cem, origin(), 0.7, 50_000.0).unwrap();
        let p = profile.position_at(0.0).unwrap();
        assert_relative_eq!(p.longitude(), origin().longitude(), epsilon = 1e-12);
        assert_relative_eq!(p.latitude(), origin().latitude(), epsilon = 1e-12);
    }

    #[test]
    fn test_positions_follow_great_circle() {
        let cem = ramp();
        for azimuth in [0.0, PI / 2.0, PI, 3.0 * PI / 2.0, 0.3, 4.0] {
            let profile = ElevationProfile::new(&cem, origin(), azimuth, 100_000.0).unwrap();
            for x in [0.0, WAYPOINT_SPACING, 3.5 * WAYPOINT_SPACING, 99_000.0] {
                let p = profile.position_at(x).unwrap();
                assert_relative_eq!(
                    origin().distance_to(&p),
                    x,
                    epsilon = 1e-6,
                    max_relative = 1e-3
                );
            }
            let p = profile.position_at(50_000.0).unwrap();
            let error = angular_distance(azimuth, origin().azimuth_to(&p));
            assert!(error.abs() < 1e-2, "azimuth {azimuth}: off by {error}");
        }
    }

    #[test]
    fn test_eastwards_moves_east() {
        let cem = ramp();
        let profile = ElevationProfile::new(&cem, origin(), PI / 2.0, 20_000.0).unwrap();
        let p = profile.position_at(20_000.0).unwrap();
        assert!(p.longitude() > origin().longitude());
        assert_relative_eq!(p.latitude(), origin().latitude(), epsilon = 1e-4);
    }

    #[test]
    fn test_elevation_and_slope() {
        let cem = ramp();
        let profile = ElevationProfile::new(&cem, origin(), PI / 2.0, 20_000.0).unwrap();
        let x = 12_345.0;
        let p = profile.position_at(x).unwrap();
        let expected = (p.longitude() * SAMPLES_PER_RADIAN - 3600.0) / 10.0;
        assert_relative_eq!(profile.elevation_at(x).unwrap(), expected, epsilon = 1e-6);
        assert_relative_eq!(profile.slope_at(x).unwrap(), cem.slope_at(p).unwrap());
        assert!(profile.elevation_at(20_000.0).unwrap() > profile.elevation_at(0.0).unwrap());
    }
}
