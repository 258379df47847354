mod app;
mod config;
mod errors;
mod game;
mod grid;
mod input;
mod snake;
mod term;

use clap::Parser;

pub type GridInt = u16;
pub type Coords = (GridInt, GridInt);

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; redirect it (2>snake.log) to read them while playing.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = config::GameConfig::parse().validate()?;
    log::info!("starting a {}x{} game", config.cols, config.rows);

    app::SnakeApp::new(&config)?.run()
}
