mod computer;
mod error;
mod panorama;
mod parameters;
mod summit;
pub mod user_parameters;

pub use crate::{
    computer::PanoramaComputer,
    error::PanoramaError,
    panorama::{Builder, Panorama},
    parameters::PanoramaParameters,
    summit::{parse_summits, read_summits_from, Summit},
    user_parameters::{preset, PanoramaUserParameters, UserParameter, PRESETS},
};
pub use terrain;
