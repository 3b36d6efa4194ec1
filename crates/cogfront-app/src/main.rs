use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use log::info;

use cogfront_app::game_loop::{spawn_game_loop, LoopOptions};
use cogfront_app::state::SharedSnapshot;
use cogfront_core::config::{GameConfig, SimConfig};
use cogfront_core::enums::BossKind;

/// Runs one boss fight headless and prints a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Boss scene to load
    #[arg(short, long, value_enum, default_value_t = BossArg::Eye)]
    boss: BossArg,

    /// RNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many ticks
    #[arg(short, long)]
    ticks: Option<u64>,

    /// JSON tuning file; defaults are used for missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run as fast as possible instead of at 60Hz
    #[arg(long)]
    fast: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BossArg {
    Eye,
    Drone,
    Goat,
    Final,
}

impl From<BossArg> for BossKind {
    fn from(arg: BossArg) -> Self {
        match arg {
            BossArg::Eye => BossKind::Eye,
            BossArg::Drone => BossKind::Drone,
            BossArg::Goat => BossKind::Goat,
            BossArg::Final => BossKind::Final,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let game = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            let game = GameConfig::default();
            game.validate()?;
            game
        }
    };
    let config = SimConfig {
        seed: args.seed,
        boss: args.boss.into(),
        game,
    };
    info!("starting {} with seed {}", config.boss.title(), config.seed);

    let latest: SharedSnapshot = Arc::new(Mutex::new(None));
    let options = LoopOptions {
        max_ticks: args.ticks,
        paced: !args.fast,
    };
    let (_commands, handle) = spawn_game_loop(config, options, Arc::clone(&latest))
        .context("spawning game loop")?;

    if options.paced {
        while !handle.is_finished() {
            std::thread::sleep(Duration::from_secs(1));
            if let Ok(lock) = latest.lock() {
                if let Some(snapshot) = lock.as_ref() {
                    info!(
                        "t={:.1}s {:?} boss {:.1} player {:.1}",
                        snapshot.time.elapsed_secs,
                        snapshot.phase,
                        snapshot.boss.health,
                        snapshot.player.health,
                    );
                }
            }
        }
    }

    let summary = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
