//! Chess - two players sharing one terminal.
//!
//! Reads moves as square names from stdin, draws the board to stdout and
//! writes log lines to stderr.

mod config;
mod prompt;
mod render;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chess_engine::{session, Game, SessionError, SessionOptions};
use clap::Parser;
use config::ConsoleConfig;
use prompt::Prompt;
use tracing::level_filters::LevelFilter;

/// Two-player chess in the terminal.
#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Two-player chess in the terminal")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value_os_t = ConsoleConfig::default_path())]
    config: PathBuf,

    /// Starting position as FEN, overriding the configuration file
    #[arg(long)]
    fen: Option<String>,

    /// Maximum log level written to stderr (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Do not suggest a way out of check
    #[arg(long)]
    no_hints: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ConsoleConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    let requested = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let level = requested.parse::<LevelFilter>().ok();
    tracing_subscriber::fmt()
        .with_max_level(level.unwrap_or(LevelFilter::WARN))
        .with_writer(std::io::stderr)
        .init();
    if level.is_none() {
        tracing::warn!("Unknown log level {:?}, using warn", requested);
    }
    tracing::info!("Config: {:?}", cli.config);

    let mut game = match cli.fen.as_deref().or(config.start_fen.as_deref()) {
        Some(fen) => Game::from_fen(fen).with_context(|| format!("Invalid start position {:?}", fen))?,
        None => Game::new(),
    };

    let options = SessionOptions {
        hints: config.hints && !cli.no_hints,
    };
    let mut prompt = Prompt::new(
        std::io::stdin().lock(),
        std::io::stdout().lock(),
        config.display.clone(),
    );

    let result = session::play(&mut game, &mut prompt, options);
    let mut stdout = prompt.into_output();
    match result {
        Ok(outcome) => {
            tracing::info!("{} won after {} plies", outcome.winner, outcome.ply);
            Ok(())
        }
        Err(SessionError::InputClosed) => {
            writeln!(stdout, "\nInput closed, leaving the game.")?;
            tracing::info!("Input closed at ply {}", game.ply());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
