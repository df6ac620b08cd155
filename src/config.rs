use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use tracing::Level;

use crate::food::FoodPlacement;
use crate::Coords;

pub const DEFAULT_TICK_MS: u64 = 100;
pub const DEFAULT_CELL_WIDTH: u16 = 2;
pub const POINTS_PER_FOOD: u32 = 100;
pub const START_CELL: Coords = (9, 9);

const SCORE_FILE_NAME: &str = "highscore.json";
const LOG_FILE_NAME: &str = "boxsnake.log";

#[derive(Debug, Parser)]
#[command(name = "boxsnake", version, about = "Snake on a grid, in your terminal")]
pub struct Config {
    /// Milliseconds between two moves of the snake
    #[arg(long, default_value_t = DEFAULT_TICK_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Terminal columns used to draw one grid cell
    #[arg(long, default_value_t = DEFAULT_CELL_WIDTH, value_parser = clap::value_parser!(u16).range(1..=4))]
    pub cell_width: u16,

    /// Where new food may appear
    #[arg(long, value_enum, default_value_t = FoodPlacement::Anywhere)]
    pub food: FoodPlacement,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// High score file [default: <data dir>/highscore.json]
    #[arg(long)]
    pub score_file: Option<PathBuf>,

    /// Log file [default: <data dir>/boxsnake.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Most verbose level written to the log
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn score_path(&self) -> Result<PathBuf> {
        match &self.score_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(SCORE_FILE_NAME)),
        }
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(LOG_FILE_NAME)),
        }
    }
}

fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("com", "boxsnake", "BoxSnake")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}
