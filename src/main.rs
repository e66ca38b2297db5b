//! Headless polyominomania runner (default binary).
//!
//! Commands:
//!
//! - `catalog <N>`: build every one-sided polyomino of size N, print as JSON
//! - `play [CONFIG.json]`: autoplay one session, print the final result as JSON
//!
//! Host options come from the environment:
//! `POLYOMINOMANIA_SEED`, `POLYOMINOMANIA_MAX_PIECES`, `POLYOMINOMANIA_LOG`.

use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn, Level};
use tracing_subscriber::prelude::*;

use polyominomania::core::config::check_rules;
use polyominomania::core::{BuildProgress, CancelToken, GameResult, Session};
use polyominomania::engine::{apply_place, best_placement, CatalogService};
use polyominomania::types::GameConfig;

const USAGE: &str = "usage: polyominomania catalog <N> | play [CONFIG.json]";

/// Options read from the environment.
#[derive(Debug, Clone)]
struct RunOptions {
    seed: Option<u64>,
    max_pieces: u64,
    log_level: Level,
}

impl RunOptions {
    fn from_env() -> Self {
        let seed = env::var("POLYOMINOMANIA_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let max_pieces = env::var("POLYOMINOMANIA_MAX_PIECES")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(500);

        let log_level = env::var("POLYOMINOMANIA_LOG")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(Level::INFO);

        Self {
            seed,
            max_pieces,
            log_level,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn main() -> Result<()> {
    let options = RunOptions::from_env();

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            options.log_level,
        ))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("catalog") => {
            let size = args
                .get(1)
                .context(USAGE)?
                .parse::<u8>()
                .context("piece size must be a number")?;
            run_catalog(&options, size)
        }
        Some("play") => run_play(&options, args.get(1).map(String::as_str)),
        _ => bail!(USAGE),
    }
}

fn log_progress(progress: &BuildProgress) {
    // Report roughly every tenth of the way.
    let step = (progress.target / 10).max(1);
    if progress.generated % step == 0 || progress.generated == progress.target {
        info!("{}", progress);
    }
}

fn run_catalog(options: &RunOptions, size: u8) -> Result<()> {
    let service = CatalogService::new();
    let mut rng = options.rng();
    let catalog = service
        .build(size, &mut rng, &CancelToken::new(), log_progress)
        .with_context(|| format!("building catalog for size {}", size))?;

    let json = serde_json::to_string(catalog.shapes()).context("encoding catalog")?;
    println!("{}", json);
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::classic());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path))
}

fn run_play(options: &RunOptions, path: Option<&str>) -> Result<()> {
    let config = load_config(path)?;
    check_rules(&config).context("invalid configuration")?;
    if !config.description.is_empty() {
        info!(description = %config.description, "loaded rules");
    }

    let service = CatalogService::new();
    let catalogs = service
        .build_for_config(&config, options.seed, &CancelToken::new(), log_progress)
        .context("building catalogs")?;

    let mut session = Session::with_rng(config, &catalogs, options.rng())
        .context("starting session")?;

    while !session.game_over() && session.pieces_locked() < options.max_pieces {
        let Some(placement) = best_placement(&session) else {
            warn!("no legal placement left");
            break;
        };
        if let Err(e) = apply_place(&mut session, placement) {
            warn!(code = e.code(), "{}", e.message());
            break;
        }
    }

    let result = session.result().unwrap_or_else(|| GameResult {
        leaderboard_key: session.leaderboard_key().to_string(),
        score: session.score(),
        lines: session.lines(),
        level: session.level(),
    });
    info!(
        pieces = session.pieces_locked(),
        topped_out = session.game_over(),
        "session finished"
    );

    let json = serde_json::to_string_pretty(&result).context("encoding result")?;
    println!("{}", json);
    Ok(())
}
