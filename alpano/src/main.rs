mod options;
mod progress;

use anyhow::Result;
use clap::Parser;
use log::info;
use options::{Cli, Command as CliCmd};
use panorama::{
    read_summits_from, Panorama, PanoramaComputer, PanoramaParameters, PanoramaUserParameters,
};
use serde::Serialize;
use std::{io::Write, path::Path};
use terrain::{azimuth::to_octant_string, ContinuousElevationModel, Tiles};
use textplots::{Chart, Plot, Shape};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::init();

    let user_params = cli.user_parameters()?;
    let params = user_params.panorama_parameters()?;
    info!(
        "observer at {} {} m, {}x{} pixels",
        params.observer_position(),
        params.observer_elevation(),
        params.width(),
        params.height()
    );

    match &cli.cmd {
        CliCmd::Csv => print_csv(&compute(&cli, params)?)?,
        CliCmd::Json => print_json(&user_params, &compute(&cli, params)?)?,
        CliCmd::Plot => plot_skyline(&compute(&cli, params)?)?,
        CliCmd::Summits { gazetteer } => print_summits(&params, gazetteer)?,
    };
    Ok(())
}

fn compute(cli: &Cli, params: PanoramaParameters) -> Result<Panorama> {
    let tiles = Tiles::new(cli.tile_dir.clone(), cli.tile_mode.into())?;
    let dem = tiles.around(
        params.observer_position(),
        f64::from(params.max_distance()),
    )?;
    let computer = PanoramaComputer::new(ContinuousElevationModel::new(dem));
    let pb = progress::bar("Computing panorama".to_string(), params.width() as u64)?;
    let panorama = computer.compute_with(params, |_| pb.inc(1))?;
    pb.finish_and_clear();
    Ok(panorama)
}

/// Prints one line per pixel that sees terrain. Angles are in degrees.
fn print_csv(panorama: &Panorama) -> Result<()> {
    let params = panorama.parameters();
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "x,y,distance,longitude,latitude,elevation,slope")?;
    for y in 0..params.height() {
        for x in 0..params.width() {
            let distance = panorama.distance_at(x, y)?;
            if distance.is_infinite() {
                continue;
            }
            let longitude = panorama.longitude_at(x, y)?.to_degrees();
            let latitude = panorama.latitude_at(x, y)?.to_degrees();
            let elevation = panorama.elevation_at(x, y)?;
            let slope = panorama.slope_at(x, y)?.to_degrees();
            writeln!(
                stdout,
                "{x},{y},{distance},{longitude},{latitude},{elevation},{slope}"
            )?;
        }
    }
    Ok(())
}

fn print_json(user_params: &PanoramaUserParameters, panorama: &Panorama) -> Result<()> {
    #[derive(Serialize)]
    struct Summary<'a> {
        parameters: &'a PanoramaUserParameters,
        width: usize,
        height: usize,
        pixels: usize,
        hits: usize,
        nearest_m: Option<f32>,
        farthest_m: Option<f32>,
    }

    let hits: Vec<f32> = panorama
        .distances()
        .iter()
        .copied()
        .filter(|d| d.is_finite())
        .collect();
    let params = panorama.parameters();
    let summary = Summary {
        parameters: user_params,
        width: params.width(),
        height: params.height(),
        pixels: params.size(),
        hits: hits.len(),
        nearest_m: hits.iter().copied().reduce(f32::min),
        farthest_m: hits.iter().copied().reduce(f32::max),
    };
    let json = serde_json::to_string(&summary)?;
    println!("{json}");
    Ok(())
}

/// Plots, for each column, the altitude of its topmost terrain pixel.
fn plot_skyline(panorama: &Panorama) -> Result<()> {
    let params = panorama.parameters();
    let mut skyline = Vec::with_capacity(params.width());
    for x in 0..params.width() {
        for y in 0..params.height() {
            if panorama.distance_at(x, y)?.is_finite() {
                #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
                let altitude = params.altitude_for_y(y as f64)?.to_degrees() as f32;
                #[allow(clippy::cast_precision_loss)]
                skyline.push((x as f32, altitude));
                break;
            }
        }
    }
    #[allow(clippy::cast_precision_loss)]
    Chart::new(300, 150, 0.0, params.width() as f32)
        .lineplot(&Shape::Lines(&skyline))
        .display();
    Ok(())
}

fn print_summits(params: &PanoramaParameters, gazetteer: &Path) -> Result<()> {
    #[derive(Serialize)]
    struct JsonEntry {
        name: String,
        elevation: i32,
        location: [f64; 2],
        distance_m: f64,
        azimuth: f64,
        direction: String,
    }

    let observer = params.observer_position();
    let max_distance = f64::from(params.max_distance());
    let mut entries = Vec::new();
    for summit in read_summits_from(gazetteer)? {
        let position = summit.position();
        let distance_m = observer.distance_to(&position);
        if distance_m > max_distance {
            continue;
        }
        let azimuth = observer.azimuth_to(&position);
        entries.push(JsonEntry {
            name: summit.name().to_string(),
            elevation: summit.elevation(),
            location: [position.longitude().to_degrees(), position.latitude().to_degrees()],
            distance_m,
            azimuth: azimuth.to_degrees(),
            direction: to_octant_string(azimuth, "N", "E", "S", "W")?,
        });
    }
    entries.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    let json = serde_json::to_string(&entries)?;
    println!("{json}");
    Ok(())
}
