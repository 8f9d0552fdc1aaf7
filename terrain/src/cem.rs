use crate::{
    dem::{sample_index, DiscreteElevationModel, SAMPLES_PER_RADIAN},
    math::{bilerp, sq},
    GeoPoint, TerrainError,
};

/// Distance in meters between two adjacent samples along a meridian.
pub const DISTANCE_PER_SAMPLE: f64 = crate::distance::EARTH_RADIUS / SAMPLES_PER_RADIAN;

/// Altitude and slope at any point, interpolated from a discrete
/// model.
pub struct ContinuousElevationModel<D> {
    dem: D,
}

impl<D: DiscreteElevationModel> ContinuousElevationModel<D> {
    pub fn new(dem: D) -> Self {
        Self { dem }
    }

    pub fn dem(&self) -> &D {
        &self.dem
    }

    pub fn into_inner(self) -> D {
        self.dem
    }

    /// Returns the altitude at `p` in meters.
    pub fn elevation_at(&self, p: GeoPoint) -> Result<f64, TerrainError> {
        let (x, y) = (sample_index(p.longitude()), sample_index(p.latitude()));
        let (x0, y0) = (x.floor(), y.floor());
        #[allow(clippy::cast_possible_truncation)]
        let (ix, iy) = (x0 as i32, y0 as i32);
        Ok(bilerp(
            self.sample(ix, iy)?,
            self.sample(ix + 1, iy)?,
            self.sample(ix, iy + 1)?,
            self.sample(ix + 1, iy + 1)?,
            x - x0,
            y - y0,
        ))
    }

    /// Returns the terrain slope at `p` in radians, 0 being flat.
    pub fn slope_at(&self, p: GeoPoint) -> Result<f64, TerrainError> {
        let (x, y) = (sample_index(p.longitude()), sample_index(p.latitude()));
        let (x0, y0) = (x.floor(), y.floor());
        #[allow(clippy::cast_possible_truncation)]
        let (ix, iy) = (x0 as i32, y0 as i32);
        Ok(bilerp(
            self.sample_slope(ix, iy)?,
            self.sample_slope(ix + 1, iy)?,
            self.sample_slope(ix, iy + 1)?,
            self.sample_slope(ix + 1, iy + 1)?,
            x - x0,
            y - y0,
        ))
    }

    /// Samples outside of the discrete model are at sea level. Lookup
    /// failures inside its extent are errors.
    fn sample(&self, x: i32, y: i32) -> Result<f64, TerrainError> {
        if self.dem.extent().contains(x, y) {
            self.dem.elevation_sample(x, y)
        } else {
            Ok(0.0)
        }
    }

    fn sample_slope(&self, x: i32, y: i32) -> Result<f64, TerrainError> {
        let z = self.sample(x, y)?;
        let dx = self.sample(x + 1, y)? - z;
        let dy = self.sample(x, y + 1)? - z;
        let d = DISTANCE_PER_SAMPLE;
        Ok((d / (sq(dx) + sq(dy) + sq(d)).sqrt()).acos())
    }
}
