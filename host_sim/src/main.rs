//! superpong - play the Superpong engine in a terminal
//!
//! The 128x64 pixel display is drawn with half-block characters, the 20x2
//! character display sits underneath it, and the keyboard stands in for the
//! 4x4 keypad.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{Config, Game, Params, Peripherals, Side};
use tracing::info;

mod autopilot;
mod terminal;

use autopilot::{Autopilot, Observation, Seats};
use terminal::{Host, TermDelay, TermKeypad, TermLcd, TermText};

/// Two-player Pong on a simulated LCD and keypad
#[derive(Parser, Debug)]
#[command(name = "superpong")]
#[command(about = "Two-player Pong on a simulated LCD and keypad", long_about = None)]
struct Cli {
    /// Points needed to win a match (1-9)
    #[arg(long, default_value_t = Params::WIN_SCORE)]
    win_score: u8,

    /// Paddle pixels per tick while a key is held
    #[arg(long, default_value_t = Params::PADDLE_SPEED)]
    paddle_speed: i32,

    /// Player names, left then right
    #[arg(long, num_args = 2, value_names = ["LEFT", "RIGHT"])]
    names: Option<Vec<String>>,

    /// Paddles steered by the computer
    #[arg(long, value_enum, default_value_t = Seats::Off)]
    autopilot: Seats,

    /// Seed for the autopilot's reaction jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per keypad scan
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Where to write logs
    #[arg(long, default_value = "superpong.log")]
    log_file: PathBuf,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::new();
        config.win_score = self.win_score;
        config.paddle_speed = self.paddle_speed;
        if let Some([left, right]) = self.names.as_deref() {
            config.left_name = left.clone();
            config.right_name = right.clone();
        }
        config
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    let config = cli.config();
    let host = Host::new(
        Autopilot::new(cli.autopilot, seed),
        config.keys,
        Duration::from_millis(cli.tick_ms),
    )
    .shared();

    let peripherals = Peripherals::new(
        TermLcd(host.clone()),
        TermText(host.clone()),
        TermKeypad(host.clone()),
        TermDelay(host.clone()),
    );
    let mut game = Game::new(config, peripherals).context("invalid game settings")?;
    info!(seed, autopilot = ?cli.autopilot, "starting superpong");

    // Set up panic hook to restore terminal state
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        terminal::restore_terminal();
        original_hook(panic_info);
    }));
    terminal::enter_terminal().context("failed to set up terminal")?;

    // Quitting exits from inside the keypad scan
    loop {
        host.borrow_mut().observation = Observation {
            ball: game.ball(),
            paddles: [game.paddle(Side::Left), game.paddle(Side::Right)],
        };
        game.step();
    }
}
