use crate::Interval2D;
use hgt::HgtError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("sample ({x}, {y}) is outside of {extent}")]
    OutOfBounds { x: i32, y: i32, extent: Interval2D },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("no height files in {0}")]
    Path(PathBuf),

    #[error("{0}")]
    Hgt(#[from] HgtError),
}
