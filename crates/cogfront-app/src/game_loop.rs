//! Game loop thread: runs the simulation engine at 60Hz and routes its events.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Events go to the service objects and
//! the latest snapshot is stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::info;

use cogfront_core::config::SimConfig;
use cogfront_core::constants::TICK_RATE;
use cogfront_core::enums::GamePhase;
use cogfront_core::services::{dispatch, InMemoryProgress, ProgressStore, Services};
use cogfront_sim::SimulationEngine;

use crate::services::{LogAudio, LogMenus};
use crate::state::{GameLoopCommand, RunSummary, SharedSnapshot};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How long and how fast to run.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Stop after this many loop iterations even if the fight is still going.
    pub max_ticks: Option<u64>,
    /// Sleep between ticks to hold real time. Off runs as fast as possible.
    pub paced: bool,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the run summary.
pub fn spawn_game_loop(
    config: SimConfig,
    options: LoopOptions,
    latest_snapshot: SharedSnapshot,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<RunSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("cogfront-game-loop".into())
        .spawn(move || run_game_loop(config, options, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the fight ends, the tick cap, Shutdown, or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) -> RunSummary {
    let mut engine = SimulationEngine::new(config);
    let mut audio = LogAudio::default();
    let mut menus = LogMenus::default();
    let mut progress = InMemoryProgress::default();
    let mut next_tick_time = Instant::now();
    let mut ticks_run: u64 = 0;

    'run: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => break 'run,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'run,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        ticks_run += 1;

        // 3. Route events to the services
        dispatch(
            &snapshot.events,
            &mut Services {
                audio: &mut audio,
                menus: &mut menus,
                progress: &mut progress,
            },
        );

        let finished = matches!(snapshot.phase, GamePhase::Won | GamePhase::Lost);
        let capped = options.max_ticks.is_some_and(|max| ticks_run >= max);

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if finished || capped {
            break;
        }

        // 5. Sleep until next tick
        if options.paced {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }

    let summary = RunSummary {
        ticks: engine.time().tick,
        phase: engine.phase(),
        boss_health: engine.boss().core().health.current(),
        player_health: engine.scene().player.health.current(),
        bosses_defeated: (1..=4).filter(|i| progress.is_boss_defeated(*i)).collect(),
    };
    info!("run ended: {summary:?}");
    summary
}
