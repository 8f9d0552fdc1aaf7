pub mod azimuth;
pub mod distance;
pub mod math;
pub mod tiles;

mod cem;
mod dem;
mod error;
mod geo_point;
mod interval;
mod profile;

pub use crate::{
    cem::{ContinuousElevationModel, DISTANCE_PER_SAMPLE},
    dem::{
        sample_index, BoxedDem, CompositeDem, DiscreteElevationModel, HgtDem, SAMPLES_PER_DEGREE,
        SAMPLES_PER_RADIAN,
    },
    error::TerrainError,
    geo_point::GeoPoint,
    interval::{Interval1D, Interval2D},
    profile::{ElevationProfile, WAYPOINT_SPACING},
    tiles::{TileMode, Tiles},
};
pub use {geo, hgt};
