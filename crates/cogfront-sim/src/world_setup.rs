//! Scene factory: board, belts, player and starting parts.

use hecs::World;
use log::{debug, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cogfront_core::config::{GameConfig, SimConfig};
use cogfront_core::constants::{PLAY_HALF_HEIGHT, PLAY_HALF_WIDTH};
use cogfront_core::enums::PartKind;
use cogfront_core::types::{Bounds, SimTime};
use cogfront_grid::pattern::TilePattern;
use cogfront_grid::reserve::PowerReserve;
use cogfront_grid::{Board, ConveyorBelt, PartRegistry};

use crate::player::Player;
use crate::scene::Scene;

/// Hit points a part starts with. Power sources and refills are indestructible.
pub fn part_health(kind: PartKind, config: &GameConfig) -> Option<f32> {
    match kind {
        PartKind::PowerSource | PartKind::AmmoRefill => None,
        _ => Some(config.board.part_health),
    }
}

/// Build the scene for a fresh run. Belts start stopped; the intro starts them.
pub fn build_scene(config: &SimConfig) -> Scene {
    let game = &config.game;
    let mut parts = PartRegistry::new();
    let mut board = Board::from_config(&game.board);

    for placement in &game.board.initial_parts {
        let id = parts.spawn(placement.kind, part_health(placement.kind, game));
        if !board.place_in_cell(&mut parts, id, placement.cell) {
            warn!("starting {:?} does not fit {:?}", placement.kind, placement.cell);
            parts.remove(id);
        }
    }

    let belts = game
        .conveyor
        .lanes
        .iter()
        .enumerate()
        .map(|(index, lane)| ConveyorBelt::new(index, *lane, &game.conveyor, Some(game.board.part_health)))
        .collect();

    let reserve = game
        .power_reserve
        .enabled
        .then(|| PowerReserve::new(&game.power_reserve));
    let pattern = game.board.pattern.as_ref().map(TilePattern::new);

    debug!(
        "scene for {:?}: {} starting parts, {} belts",
        config.boss,
        parts.len(),
        game.conveyor.lanes.len()
    );

    Scene {
        world: World::new(),
        parts,
        board,
        belts,
        player: Player::new(&game.player),
        rng: ChaCha8Rng::seed_from_u64(config.seed),
        config: game.clone(),
        bounds: Bounds::centered(PLAY_HALF_WIDTH, PLAY_HALF_HEIGHT),
        time: SimTime::default(),
        reserve,
        pattern,
        time_scale: 1.0,
        events: Vec::new(),
        despawn_buffer: Vec::new(),
    }
}
