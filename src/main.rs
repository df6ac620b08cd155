mod app;
mod config;
mod food;
mod game;
mod grid;
mod input;
mod logging;
mod render;
mod score;
mod snake;
mod term;
mod ticker;

use anyhow::Result;
use clap::Parser;
use tracing::info;

pub type GridInt = i32;
pub type Coords = (GridInt, GridInt);

fn main() -> Result<()> {
    let config = config::Config::parse();
    logging::init(&config.log_path()?, config.log_level)?;

    let store = score::JsonFileStore::new(config.score_path()?);
    info!(path = %store.path().display(), "high score store");

    let mut app = app::App::new(&config, store)?;
    // Quitting is handled inside the loop, which restores the terminal first
    app.run()
}
