use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tempo_engine::{EngineConfig, Game};
use tempo_play::{ColorChoice, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play chess against a fixed-depth minimax engine in the terminal.
#[derive(Parser, Debug)]
#[command(name = "tempo", version)]
struct Args {
    /// Colour you play: white, black or random.
    #[arg(short, long, default_value = "white")]
    color: ColorChoice,

    /// Depth of the engine's deeper search, in plies.
    #[arg(long, default_value_t = tempo_engine::config::DEFAULT_DEEP_DEPTH)]
    deep_depth: u8,

    /// Depth of the engine's shallower search, in plies.
    #[arg(long, default_value_t = tempo_engine::config::DEFAULT_SHALLOW_DEPTH)]
    shallow_depth: u8,

    /// Start from this position instead of the standard one.
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = EngineConfig {
        deep_depth: args.deep_depth,
        shallow_depth: args.shallow_depth,
    };
    config.validate().context("invalid search depths")?;

    let human = args.color.resolve();
    info!(human = %human, ?config, "tempo starting");

    let game = match args.fen.as_deref() {
        Some(fen) => Game::from_fen(fen, human, config)
            .with_context(|| format!("cannot start from FEN {fen:?}"))?,
        None => Game::new(human, config).context("cannot start a new game")?,
    };

    let stdin = io::stdin();
    Session::with_game(game)
        .run(stdin.lock(), io::stdout())
        .context("console session failed")?;
    Ok(())
}
