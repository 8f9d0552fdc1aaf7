use super::DiscreteElevationModel;
use crate::{Interval2D, TerrainError};

/// Union of two models whose extents together form a rectangle.
///
/// Owns both children; dropping the composite releases them.
pub struct CompositeDem<A, B> {
    first: A,
    second: B,
    extent: Interval2D,
}

impl<A, B> CompositeDem<A, B>
where
    A: DiscreteElevationModel,
    B: DiscreteElevationModel,
{
    pub fn new(first: A, second: B) -> Result<Self, TerrainError> {
        let extent = first
            .extent()
            .union(&second.extent())
            .map_err(|_| TerrainError::InvalidArgument("model extents are not unionable"))?;
        Ok(Self {
            first,
            second,
            extent,
        })
    }

    /// Returns the children, consuming the composite.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> DiscreteElevationModel for CompositeDem<A, B>
where
    A: DiscreteElevationModel,
    B: DiscreteElevationModel,
{
    fn extent(&self) -> Interval2D {
        self.extent
    }

    fn elevation_sample(&self, x: i32, y: i32) -> Result<f64, TerrainError> {
        if self.first.extent().contains(x, y) {
            self.first.elevation_sample(x, y)
        } else if self.second.extent().contains(x, y) {
            self.second.elevation_sample(x, y)
        } else {
            Err(TerrainError::OutOfBounds {
                x,
                y,
                extent: self.extent,
            })
        }
    }
}
