use terrain::TerrainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanoramaError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("pixel ({x}, {y}) is outside of the panorama")]
    OutOfBounds { x: i64, y: i64 },

    #[error("panorama builder has already been built")]
    AlreadyBuilt,

    #[error("{0}")]
    Terrain(#[from] TerrainError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed summit entry, {reason}")]
    Gazetteer { line: usize, reason: &'static str },
}
