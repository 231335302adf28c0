use crate::config::{DEFAULT_ATTRIBUTION, DEFAULT_TILE_URL, DEFAULT_ZOOM, MapConfig, TileLayer};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts by clicking on a map"
)]
pub struct Cli {
    /// File of commands to replay (click, type, distance, duration, cadence,
    /// elevation, submit, list, markers, quit). Reads stdin when omitted.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Current latitude. Without both --lat and --lng the position lookup fails.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Current longitude.
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Initial map zoom level
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    /// Tile URL template
    #[arg(long, default_value = DEFAULT_TILE_URL)]
    pub tile_url: String,

    /// Tile attribution HTML
    #[arg(long, default_value = DEFAULT_ATTRIBUTION)]
    pub attribution: String,

    /// Print all workouts as JSON on exit
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

impl Cli {
    pub fn map_config(&self) -> MapConfig {
        MapConfig {
            zoom: self.zoom,
            tiles: TileLayer {
                url_template: self.tile_url.clone(),
                attribution: self.attribution.clone(),
            },
            ..MapConfig::default()
        }
    }
}
