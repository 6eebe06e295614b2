use anyhow::{anyhow, Error as AnyError};
use clap::{Parser, Subcommand};
use heightprofile::{ElevationType, SamplingConfig};
use std::{path::PathBuf, str::FromStr};

/// Sample an elevation profile along a line.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Directory of terrain `.hgt` tiles.
    #[arg(short, long)]
    pub tile_dir: PathBuf,

    /// Directory of surface model `.hgt` tiles, used with
    /// `--elevation both`.
    #[arg(long)]
    pub surface_dir: Option<PathBuf>,

    /// Read tiles into memory instead of mapping them.
    #[arg(long, default_value_t = false)]
    pub in_mem: bool,

    /// Profile line "lon,lat[,alt];lon,lat[,alt];...".
    #[arg(short, long, allow_hyphen_values = true)]
    pub line: Line,

    /// Line vertices are EPSG:3857 meters rather than degrees.
    #[arg(long, default_value_t = false)]
    pub mercator: bool,

    /// JSON file with sampling parameters.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Distance between samples, in meters.
    #[arg(short, long)]
    pub resolution: Option<f64>,

    /// Maximum number of samples.
    #[arg(short, long)]
    pub max_points: Option<usize>,

    /// "terrain" or "both".
    #[arg(short, long)]
    pub elevation: Option<ElevationType>,

    /// Name given to the profile in JSON output.
    #[arg(long, default_value = "profile")]
    pub name: String,

    #[command(subcommand)]
    pub cmd: Command,
}

impl Cli {
    /// Config file (or defaults) with command line overrides applied.
    pub fn sampling_config(&self) -> Result<SamplingConfig, AnyError> {
        let mut config = match &self.config {
            Some(path) => SamplingConfig::from_json_file(path)?,
            None => SamplingConfig::default(),
        };
        if let Some(resolution_m) = self.resolution {
            config.resolution_m = resolution_m;
        }
        if let Some(max_points) = self.max_points {
            config.max_points = max_points;
        }
        if let Some(elevation_type) = self.elevation {
            config.elevation_type = elevation_type;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Polyline vertices as `[x, y, alt]`.
#[derive(Clone, Debug)]
pub struct Line(pub Vec<[f64; 3]>);

impl FromStr for Line {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let vertices = s
            .split(';')
            .filter(|vertex| !vertex.trim().is_empty())
            .map(|vertex| {
                let parts = vertex
                    .split(',')
                    .map(|part| f64::from_str(part.trim()))
                    .collect::<Result<Vec<f64>, _>>()?;
                match parts[..] {
                    [x, y] => Ok([x, y, 0.0]),
                    [x, y, alt] => Ok([x, y, alt]),
                    _ => Err(anyhow!("not a valid x,y[,alt] vertex: '{vertex}'")),
                }
            })
            .collect::<Result<Vec<_>, AnyError>>()?;
        Ok(Self(vertices))
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print samples as CSV to stdout.
    Csv,

    /// Print the profile as JSON to stdout.
    Json,

    /// Plot to terminal.
    Plot,
}
