mod game;
mod term;

use clap::Parser;
use color_eyre::eyre::Result;
use grid_snake::config::DEFAULT_SPEED;
use grid_snake::{GameConfig, START_LENGTH};
use log::info;

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Grid snake in the terminal")]
struct Cli {
    /// Board width, falls back to 15 when missing or invalid
    #[arg(long, env = "SNAKE_WIDTH")]
    width: Option<String>,

    /// Board height, falls back to 10 when missing or invalid
    #[arg(long, env = "SNAKE_HEIGHT")]
    height: Option<String>,

    /// Ticks per second
    #[arg(long, env = "SNAKE_SPEED", default_value_t = DEFAULT_SPEED)]
    speed: f64,

    /// Initial snake length
    #[arg(long, env = "SNAKE_START_LENGTH", default_value_t = START_LENGTH)]
    start_length: usize,

    /// Seed for food placement
    #[arg(long, env = "SNAKE_SEED")]
    seed: Option<u64>,
}

impl From<Cli> for GameConfig {
    fn from(cli: Cli) -> Self {
        GameConfig {
            width: cli.width,
            height: cli.height,
            speed: cli.speed,
            start_length: cli.start_length,
            seed: cli.seed,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let config = GameConfig::from(Cli::parse());
    info!("starting with {:?}", config);

    let mut game = game::SnakeGame::new(&config)?;
    game.run()
}
