mod options;
mod progress;

use anyhow::{anyhow, Error as AnyError};
use clap::Parser;
use dem::{TileDir, TileHeights, TileMode};
use heightprofile::{
    start_sampling, CoordinateSystem, Outcome, Polyline, ProfileResult, SamplingConfig, Teardown,
};
use log::info;
use options::{Cli, Command as CliCmd};
use std::{io::Write, sync::Arc};
use textplots::{Chart, Plot, Shape};

#[tokio::main]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
async fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();
    env_logger::init();

    let config = cli.sampling_config()?;
    let Cli {
        tile_dir,
        surface_dir,
        in_mem,
        line,
        mercator,
        name,
        cmd,
        ..
    } = cli;

    let tile_mode = if in_mem { TileMode::InMem } else { TileMode::MemMap };
    let mut heights = TileHeights::new(TileDir::new(tile_dir, tile_mode)?);
    if let Some(surface_dir) = surface_dir {
        heights = heights.with_surface(TileDir::new(surface_dir, tile_mode)?);
    }

    let crs = if mercator {
        CoordinateSystem::WebMercator
    } else {
        CoordinateSystem::Wgs84
    };
    let polyline = Polyline::new(line.0, crs);

    let mut run = start_sampling(&polyline, &config, Arc::new(heights))?;
    if let Some(warning) = run.warning() {
        eprintln!("warning: {warning}");
    }
    if run.plan().is_adjusted() {
        eprintln!(
            "resolution enlarged from {} m to {} m to stay within {} points",
            config.resolution_m,
            run.resolution(),
            config.max_points
        );
    }

    let mut teardown = Teardown::new();

    let cancel = run.cancel_handle();
    ctrlc::set_handler(move || cancel.cancel())?;

    let total_samples = run.total_samples();
    let pb = progress::make_progress_bar(format!("Sampling {name}"), total_samples as u64 + 1);
    teardown.push({
        let pb = pb.clone();
        move || pb.finish_and_clear()
    });
    let mut progress = run
        .progress()
        .ok_or_else(|| anyhow!("progress stream already taken"))?;
    let forwarder = tokio::spawn(async move {
        while let Some(fraction) = progress.recv().await {
            pb.set_position((fraction * total_samples as f64).round() as u64 + 1);
        }
    });
    teardown.push(move || forwarder.abort());

    let plan = *run.plan();
    let outcome = run.ready().await;
    teardown.dispose();

    let result = match outcome {
        Outcome::Complete(points) => ProfileResult::new(name, &plan, config.elevation_type, points),
        Outcome::Cancelled => return Err(anyhow!("sampling cancelled")),
        Outcome::Failed(e) => return Err(e.into()),
    };
    info!("sampled {} points at {} m", result.points.len(), result.resolution_m);

    match cmd {
        CliCmd::Csv => print_csv(&result, &config)?,
        CliCmd::Json => print_json(&result)?,
        CliCmd::Plot => plot_ascii(&result),
    };
    Ok(())
}

/// # Example with gnuplot
///
/// ```sh
/// cargo run -- --tile-dir=data/nasadem/3arcsecond/ --resolution=30 --line='-71.308,44.283;-71.297,44.256' csv | tr ',' ' ' > ~/.tmp/plot && gnuplot -p -e "plot '~/.tmp/plot' using 1:4 with lines"
/// ```
fn print_csv(result: &ProfileResult, config: &SamplingConfig) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Distance,Longitude,Latitude,Elevation")?;
    for ((distance, _), point) in result.series().iter().zip(result.points.iter()) {
        let elevation = ProfileResult::format_height(point.height, config.decimal_places);
        writeln!(
            stdout,
            "{distance},{longitude},{latitude},{elevation}",
            longitude = point.lon,
            latitude = point.lat,
        )?;
    }
    Ok(())
}

fn print_json(result: &ProfileResult) -> Result<(), AnyError> {
    let json = serde_json::to_string(result)?;
    println!("{json}");
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn plot_ascii(result: &ProfileResult) {
    let plot_data: Vec<(f32, f32)> = result
        .series()
        .into_iter()
        .map(|(distance, height)| (distance as f32, height as f32))
        .collect();
    Chart::new(300, 150, 0.0, result.length_m() as f32)
        .lineplot(&Shape::Lines(&plot_data))
        .display();
}
