use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use foundation::math::{Ecef, GeoPosition};
use geometry::{
    DistanceMode, ValidityRules, bezier_positions, close_ring, is_valid_position, polygon_area,
    polygon_centroid, polyline_length, segments,
};
use plot::PlotConfig;
use plot::labels::area_conversion;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Coordinate and geometry helpers for globe annotations.
#[derive(Parser)]
#[command(name = "plotkit", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Geodetic degrees/meters to ECEF meters.
    ToCartesian {
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        #[arg(default_value_t = 0.0, allow_hyphen_values = true)]
        altitude: f64,
    },
    /// ECEF meters to geodetic degrees/meters.
    ToGeodetic {
        #[arg(allow_hyphen_values = true)]
        x: f64,
        #[arg(allow_hyphen_values = true)]
        y: f64,
        #[arg(allow_hyphen_values = true)]
        z: f64,
    },
    /// Smooths a JSON position array with a cubic bezier.
    Bezier {
        /// JSON file; stdin when omitted.
        input: Option<PathBuf>,
        #[arg(long)]
        count: Option<usize>,
    },
    /// Geodesic area and centroid of a JSON position ring.
    Area { input: Option<PathBuf> },
    /// Segments of a JSON position path with midpoints and lengths.
    Segments {
        input: Option<PathBuf>,
        /// Straight-line distances including altitude.
        #[arg(long)]
        cartesian: bool,
    },
    /// Checks a longitude/latitude pair.
    Validate {
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        /// Reject (0, 0) unless it is otherwise valid.
        #[arg(long)]
        strict: bool,
    },
    /// Prints the effective session configuration.
    Config { path: Option<PathBuf> },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = real_main(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::ToCartesian {
            longitude,
            latitude,
            altitude,
        } => {
            let ecef = GeoPosition::new(longitude, latitude, altitude).to_cartesian();
            print_json(&ecef.as_array())
        }
        Command::ToGeodetic { x, y, z } => match GeoPosition::from_cartesian(Ecef::new(x, y, z)) {
            Some(p) => print_json(&p),
            None => Err("point is too close to the earth centre".to_string()),
        },
        Command::Bezier { input, count } => {
            let points = read_positions(input.as_deref())?;
            let count = count.unwrap_or_else(|| PlotConfig::default().bezier_samples);
            print_json(&bezier_positions(&points, count))
        }
        Command::Area { input } => cmd_area(input.as_deref()),
        Command::Segments { input, cartesian } => cmd_segments(input.as_deref(), cartesian),
        Command::Validate {
            longitude,
            latitude,
            strict,
        } => {
            let rules = ValidityRules {
                origin_is_valid: !strict,
            };
            let valid = is_valid_position(&GeoPosition::new(longitude, latitude, 0.0), rules);
            println!("{valid}");
            if valid {
                Ok(())
            } else {
                Err(format!("invalid position: {longitude}, {latitude}"))
            }
        }
        Command::Config { path } => {
            let config = match path {
                Some(p) => PlotConfig::from_path(&p).map_err(|e| format!("{p:?}: {e}"))?,
                None => PlotConfig::default(),
            };
            print_json(&config.apply_env())
        }
    }
}

#[derive(Serialize)]
struct AreaReport {
    area_m2: f64,
    label: String,
    centroid: Option<GeoPosition>,
}

fn cmd_area(input: Option<&Path>) -> Result<(), String> {
    let ring = close_ring(&read_positions(input)?);
    let area_m2 = polygon_area(&ring);
    print_json(&AreaReport {
        area_m2,
        label: area_conversion(Some(area_m2)),
        centroid: polygon_centroid(&ring),
    })
}

#[derive(Serialize)]
struct SegmentReport {
    start: GeoPosition,
    end: GeoPosition,
    center: GeoPosition,
    distance_m: f64,
}

#[derive(Serialize)]
struct PathReport {
    total_m: f64,
    segments: Vec<SegmentReport>,
}

fn cmd_segments(input: Option<&Path>, cartesian: bool) -> Result<(), String> {
    let points = read_positions(input)?;
    let mode = if cartesian {
        DistanceMode::Cartesian
    } else {
        DistanceMode::Geodesic
    };
    let report = PathReport {
        total_m: polyline_length(&points, mode),
        segments: segments(&points, mode)
            .into_iter()
            .map(|s| SegmentReport {
                start: s.start,
                end: s.end,
                center: s.center,
                distance_m: s.distance,
            })
            .collect(),
    };
    print_json(&report)
}

fn read_positions(input: Option<&Path>) -> Result<Vec<GeoPosition>, String> {
    let text = match input {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("read stdin: {e}"))?;
            buf
        }
    };
    let points: Vec<GeoPosition> =
        serde_json::from_str(&text).map_err(|e| format!("positions: {e}"))?;
    debug!(count = points.len(), "positions loaded");
    Ok(points)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}
