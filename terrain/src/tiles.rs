//! HGT tile directory loader.

use crate::{
    dem::{BoxedDem, DiscreteElevationModel, HgtDem},
    distance::to_radians,
    GeoPoint, TerrainError,
};
use geo::geometry::Coord;
use hgt::{file_name, HgtError, Tile};
use log::debug;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone)]
pub struct Tiles {
    /// Directory containing SRTM HGT tile files.
    tile_dir: PathBuf,

    /// How to load tiles (in-memory or mapped).
    tile_mode: TileMode,
}

impl Tiles {
    pub fn new(tile_dir: PathBuf, tile_mode: TileMode) -> Result<Self, TerrainError> {
        let mut has_height_files = false;

        // Fail early by checking that `tile_dir` holds at least one
        // `hgt` file.
        for entry in std::fs::read_dir(&tile_dir)? {
            let path = entry?.path();
            if Some("hgt") == path.extension().and_then(std::ffi::OsStr::to_str) {
                has_height_files = true;
                break;
            }
        }

        if has_height_files {
            Ok(Self {
                tile_dir,
                tile_mode,
            })
        } else {
            Err(TerrainError::Path(tile_dir))
        }
    }

    pub fn tile_dir(&self) -> &Path {
        &self.tile_dir
    }

    /// Returns the tile whose southwest corner is `sw_corner`.
    ///
    /// A tile missing from disk is replaced by one at sea level.
    pub fn get(&self, sw_corner: Coord<i16>) -> Result<HgtDem, TerrainError> {
        match self.load_tile(sw_corner) {
            Ok(tile) => HgtDem::new(tile),
            Err(TerrainError::Hgt(HgtError::Io(e))) if e.kind() == ErrorKind::NotFound => {
                HgtDem::new(Self::load_tombstone(sw_corner))
            }
            Err(e) => Err(e),
        }
    }

    /// Returns a single model made of every tile from `sw` to `ne`,
    /// both inclusive.
    pub fn covering(&self, sw: Coord<i16>, ne: Coord<i16>) -> Result<BoxedDem, TerrainError> {
        if sw.x > ne.x || sw.y > ne.y {
            return Err(TerrainError::InvalidArgument(
                "south-west tile is not south-west of north-east tile",
            ));
        }
        debug!(
            "assembling {} tiles from {sw:?} to {ne:?}",
            (i32::from(ne.x) - i32::from(sw.x) + 1) * (i32::from(ne.y) - i32::from(sw.y) + 1)
        );

        let row = |lat: i16| -> Result<BoxedDem, TerrainError> {
            let mut row: BoxedDem = Box::new(self.get(Coord { x: sw.x, y: lat })?);
            for lon in sw.x + 1..=ne.x {
                row = Box::new(row.union(self.get(Coord { x: lon, y: lat })?)?);
            }
            Ok(row)
        };

        let mut dem = row(sw.y)?;
        for lat in sw.y + 1..=ne.y {
            dem = Box::new(dem.union(row(lat)?)?);
        }
        Ok(dem)
    }

    /// Returns a single model covering every point within
    /// `max_distance` meters of `observer`.
    pub fn around(&self, observer: GeoPoint, max_distance: f64) -> Result<BoxedDem, TerrainError> {
        let (sw, ne) = covering_corners(observer, max_distance)?;
        self.covering(sw, ne)
    }
}

/// Private API.
impl Tiles {
    fn load_tile(&self, sw_corner: Coord<i16>) -> Result<Tile, TerrainError> {
        let tile_path = {
            let file_name = file_name(sw_corner);
            let mut tile_path: PathBuf = [&self.tile_dir, Path::new(&file_name)].iter().collect();
            if !tile_path.exists() {
                let file_name = file_name.to_lowercase();
                tile_path = [&self.tile_dir, Path::new(&file_name)].iter().collect();
            }
            tile_path
        };
        debug!("loading {tile_path:?}");
        match self.tile_mode {
            TileMode::InMem => Ok(Tile::load(tile_path)?),
            TileMode::MemMap => Ok(Tile::memmap(tile_path)?),
        }
    }

    fn load_tombstone(sw_corner: Coord<i16>) -> Tile {
        debug!("loading tombstone in lieu of missing tile for {sw_corner:?}");
        Tile::tombstone(sw_corner)
    }
}

/// How to handle tile.
///
/// The trade off between loading tile data into memory versus memory
/// mapping is not obvious, and you should measure both before
/// deciding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileMode {
    /// Parse tile and load into memory.
    ///
    /// Note that this can consume gigabytes of RAM when loading many
    /// tiles.
    InMem,

    /// Memory map file contents.
    MemMap,
}

/// Returns the south-west and north-east tile corners of the box
/// containing every point within `max_distance` of `observer`.
fn covering_corners(
    observer: GeoPoint,
    max_distance: f64,
) -> Result<(Coord<i16>, Coord<i16>), TerrainError> {
    if !(max_distance > 0.0) {
        return Err(TerrainError::InvalidArgument("max distance must be positive"));
    }
    let dlat = to_radians(max_distance).to_degrees();
    let lat = observer.latitude().to_degrees();
    let lon = observer.longitude().to_degrees();
    let (south, north) = ((lat - dlat).max(-90.0), (lat + dlat).min(90.0));

    // Meridians converge, so the widest span is at the parallel
    // closest to a pole.
    let widest = south.abs().max(north.abs()).to_radians().cos();
    let spread = dlat.to_radians().sin();
    let (west, east) = if widest > spread {
        let dlon = (spread / widest).asin().to_degrees();
        ((lon - dlon).max(-180.0), (lon + dlon).min(180.0))
    } else {
        (-180.0, 180.0)
    };

    #[allow(clippy::cast_possible_truncation)]
    let corner = |lon: f64, lat: f64| Coord {
        x: (lon.floor() as i16).min(179),
        y: (lat.floor() as i16).min(89),
    };
    Ok((corner(west, south), corner(east, north)))
}
