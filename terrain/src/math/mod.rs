//! Numeric helpers shared by the elevation models and the panorama
//! computer.

mod angle;
mod interp;
mod root;

pub use {
    angle::{angular_distance, floor_mod, haversin, sq, PI2},
    interp::{bilerp, lerp},
    root::{first_interval_containing_root, improve_root},
};
