use super::{DiscreteElevationModel, SAMPLES_PER_DEGREE};
use crate::{tiles::TileMode, Interval1D, Interval2D, TerrainError};
use hgt::Tile;
use std::path::Path;

/// A single one-degree HGT tile seen as a discrete elevation model.
pub struct HgtDem {
    tile: Tile,
    extent: Interval2D,
}

impl HgtDem {
    pub fn new(tile: Tile) -> Result<Self, TerrainError> {
        let sw = tile.sw_corner();
        let (lon, lat) = (i32::from(sw.x), i32::from(sw.y));
        let extent = Interval2D::new(
            Interval1D::new(lon * SAMPLES_PER_DEGREE, (lon + 1) * SAMPLES_PER_DEGREE)?,
            Interval1D::new(lat * SAMPLES_PER_DEGREE, (lat + 1) * SAMPLES_PER_DEGREE)?,
        );
        Ok(Self { tile, extent })
    }

    /// Loads the tile at `path`.
    pub fn open<P: AsRef<Path>>(path: P, mode: TileMode) -> Result<Self, TerrainError> {
        let tile = match mode {
            TileMode::InMem => Tile::load(path)?,
            TileMode::MemMap => Tile::memmap(path)?,
        };
        Self::new(tile)
    }

    pub fn tile(&self) -> &Tile {
        &self.tile
    }
}

impl DiscreteElevationModel for HgtDem {
    fn extent(&self) -> Interval2D {
        self.extent
    }

    fn elevation_sample(&self, x: i32, y: i32) -> Result<f64, TerrainError> {
        let out_of_bounds = || TerrainError::OutOfBounds {
            x,
            y,
            extent: self.extent,
        };
        if !self.extent.contains(x, y) {
            return Err(out_of_bounds());
        }
        #[allow(clippy::cast_sign_loss)]
        let local = (
            (x - self.extent.ix().included_from()) as usize,
            (y - self.extent.iy().included_from()) as usize,
        );
        self.tile
            .get_xy(local)
            .map(f64::from)
            .ok_or_else(out_of_bounds)
    }
}
