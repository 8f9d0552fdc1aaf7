//! Discrete elevation models: integer-indexed altitude grids.

mod composite;
mod tile;

pub use self::{composite::CompositeDem, tile::HgtDem};
use crate::{Interval2D, TerrainError};
use std::f64::consts::PI;

/// Number of samples per degree of longitude or latitude.
pub const SAMPLES_PER_DEGREE: i32 = 3600;

/// Number of samples per radian of longitude or latitude.
pub const SAMPLES_PER_RADIAN: f64 = SAMPLES_PER_DEGREE as f64 * (180.0 / PI);

/// Returns the fractional sample index of an angle in radians.
pub fn sample_index(angle: f64) -> f64 {
    angle * SAMPLES_PER_RADIAN
}

/// A grid of altitude samples covering a rectangular extent.
///
/// Sample `(x, y)` lies at longitude `x / SAMPLES_PER_RADIAN` and
/// latitude `y / SAMPLES_PER_RADIAN`, so `x` grows eastwards and `y`
/// northwards.
pub trait DiscreteElevationModel {
    /// Sample indices covered by this model.
    fn extent(&self) -> Interval2D;

    /// Returns the altitude in meters of sample `(x, y)`, or
    /// [TerrainError::OutOfBounds] if it lies outside of
    /// [extent](Self::extent).
    fn elevation_sample(&self, x: i32, y: i32) -> Result<f64, TerrainError>;

    /// Combines `self` and `that` into a single model. Lookups in
    /// the overlap are answered by `self`.
    fn union<D>(self, that: D) -> Result<CompositeDem<Self, D>, TerrainError>
    where
        Self: Sized,
        D: DiscreteElevationModel,
    {
        CompositeDem::new(self, that)
    }
}

/// Type-erased model, used when folding an unknown number of tiles.
pub type BoxedDem = Box<dyn DiscreteElevationModel + Send + Sync>;

impl<D: DiscreteElevationModel + ?Sized> DiscreteElevationModel for Box<D> {
    fn extent(&self) -> Interval2D {
        (**self).extent()
    }

    fn elevation_sample(&self, x: i32, y: i32) -> Result<f64, TerrainError> {
        (**self).elevation_sample(x, y)
    }
}

impl<D: DiscreteElevationModel + ?Sized> DiscreteElevationModel for &D {
    fn extent(&self) -> Interval2D {
        (**self).extent()
    }

    fn elevation_sample(&self, x: i32, y: i32) -> Result<f64, TerrainError> {
        (**self).elevation_sample(x, y)
    }
}
