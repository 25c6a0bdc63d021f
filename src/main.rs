//! Terminal front end: reads commands line by line from stdin and redraws
//! the field after each of them.

mod config;
mod control;
mod render;
mod store;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_std::io::{prelude::BufReadExt, stdin, BufReader};
use async_std::task;
use clap::Parser;
use futures::StreamExt;
use model::Game;
use tracing::{debug, info, Subscriber};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::{prelude::*, reload, EnvFilter, Registry};

use crate::config::AppConfig;
use crate::control::{Command, SettleGuard};
use crate::render::{Renderer, TracingObserver};
use crate::store::FileHighScoreStore;

#[derive(Parser, Debug)]
#[command(name = "tile-merge", about = "2048 in the terminal")]
struct Args {
    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    high_score_path: Option<String>,
    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(width) = self.width {
            config.board.width = width;
        }
        if let Some(height) = self.height {
            config.board.height = height;
        }
        if self.seed.is_some() {
            config.game.seed = self.seed;
        }
        if let Some(path) = self.high_score_path {
            config.game.high_score_path = path;
        }
        if self.no_color {
            config.game.color = false;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config
    }
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Builds the subscriber with a reloadable filter. `RUST_LOG` wins over `level`.
fn subscriber<W>(level: &str, writer: W) -> (impl Subscriber + Send + Sync + 'static, FilterHandle)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer));
    (subscriber, handle)
}

/// Loads the config and applies flags, then switches the filter to the
/// configured level unless `RUST_LOG` is set.
fn load_settings(args: Args, filter: &FilterHandle) -> Result<AppConfig> {
    let loaded = config::load_config(args.config.as_deref());
    let config = args.apply(loaded);
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
        filter
            .reload(EnvFilter::new(&config.log_level))
            .context("failed to apply log level")?;
    }
    Ok(config)
}

async fn run(config: AppConfig) -> Result<()> {
    let seed = config.game.seed.unwrap_or_else(rand::random);
    let store = FileHighScoreStore::new(&config.game.high_score_path);
    let mut game = Game::new(
        &config.board,
        seed,
        Box::new(store),
        Box::new(TracingObserver),
    )
    .context("invalid board configuration")?;
    info!(seed, "starting");
    game.new_game()?;

    let renderer = Renderer::new(config.game.color);
    let mut guard = SettleGuard::new(Duration::from_millis(config.game.settle_delay_ms));
    print!("{}", renderer.render(&game));

    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next().await {
        let line = line.context("failed to read input")?;
        match Command::parse(&line) {
            Some(Command::Swipe(side)) => {
                let now = Instant::now();
                if guard.is_waiting(now) {
                    debug!(?side, "still settling, swipe dropped");
                    continue;
                }
                if game.swipe(side)?.map_or(false, |outcome| outcome.changed) {
                    guard.start(now);
                }
            }
            Some(Command::NewGame) => game.new_game()?,
            Some(Command::Quit) => break,
            None => {
                debug!(input = %line.trim(), "ignored");
                continue;
            }
        }
        print!("{}", renderer.render(&game));
    }

    info!(score = game.score(), high_score = game.high_score(), "bye");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let startup_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| AppConfig::default().log_level);
    let (subscriber, filter) = subscriber(&startup_level, std::io::stderr);
    tracing::subscriber::set_global_default(subscriber).context("failed to install tracing")?;
    let config = load_settings(args, &filter)?;
    config.board.validate()?;
    task::block_on(run(config))
}
