use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use panorama::{
    preset,
    user_parameters::{NIESEN, PRESETS},
    PanoramaUserParameters, UserParameter,
};
use std::{fs::File, io::BufReader, path::PathBuf};
use terrain::TileMode;

/// Compute the terrain panorama seen from a point.
///
/// Parameters start from a preset (niesen by default) or a JSON file,
/// and individual flags override them. Every value is clamped into
/// its allowed range.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Directory of 1 arc-second HGT tiles.
    #[arg(short, long)]
    pub tile_dir: PathBuf,

    /// How tiles are loaded.
    #[arg(long, value_enum, default_value_t = TileModeArg::MemMap)]
    pub tile_mode: TileModeArg,

    /// Named parameter preset.
    #[arg(short, long, conflicts_with = "params")]
    pub preset: Option<String>,

    /// JSON file of panorama parameters.
    #[arg(long)]
    pub params: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub cmd: Command,
}

impl Cli {
    pub fn user_parameters(&self) -> Result<PanoramaUserParameters> {
        let base = match (&self.preset, &self.params) {
            (Some(name), _) => preset(name).ok_or_else(|| {
                let names: Vec<&str> = PRESETS.iter().map(|(name, _)| *name).collect();
                anyhow!("unknown preset {name}, expected one of {}", names.join(", "))
            })?,
            (None, Some(path)) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
            (None, None) => NIESEN,
        };
        Ok(self.overrides.apply(base))
    }
}

/// Individual parameter overrides.
#[derive(Args, Debug, Clone)]
pub struct Overrides {
    /// Observer longitude, in 1/10 000 degree.
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<i32>,

    /// Observer latitude, in 1/10 000 degree.
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<i32>,

    /// Observer elevation, in meters.
    #[arg(long, allow_negative_numbers = true)]
    pub elevation: Option<i32>,

    /// Center azimuth, in degrees.
    #[arg(long)]
    pub azimuth: Option<i32>,

    /// Horizontal field of view, in degrees.
    #[arg(long)]
    pub fov: Option<i32>,

    /// Max distance, in km.
    #[arg(long)]
    pub max_distance: Option<i32>,

    /// Image width, in pixels.
    #[arg(long)]
    pub width: Option<i32>,

    /// Image height, in pixels.
    #[arg(long)]
    pub height: Option<i32>,

    /// Super-sampling exponent.
    #[arg(long)]
    pub super_sampling: Option<i32>,
}

impl Overrides {
    fn apply(&self, base: PanoramaUserParameters) -> PanoramaUserParameters {
        use UserParameter as P;
        [
            (P::ObserverLongitude, self.longitude),
            (P::ObserverLatitude, self.latitude),
            (P::ObserverElevation, self.elevation),
            (P::CenterAzimuth, self.azimuth),
            (P::HorizontalFieldOfView, self.fov),
            (P::MaxDistance, self.max_distance),
            (P::Width, self.width),
            (P::Height, self.height),
            (P::SuperSamplingExponent, self.super_sampling),
        ]
        .into_iter()
        .fold(base, |params, (parameter, value)| match value {
            Some(value) => params.with(parameter, value),
            None => params,
        })
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TileModeArg {
    InMem,
    MemMap,
}

impl From<TileModeArg> for TileMode {
    fn from(mode: TileModeArg) -> Self {
        match mode {
            TileModeArg::InMem => TileMode::InMem,
            TileModeArg::MemMap => TileMode::MemMap,
        }
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print every pixel that sees terrain to stdout.
    Csv,

    /// Print a summary of the panorama to stdout.
    Json,

    /// Plot the skyline to terminal.
    Plot,

    /// List the summits within range of the observer.
    Summits {
        /// Gazetteer file listing the summits.
        #[arg(short, long)]
        gazetteer: PathBuf,
    },
}
