//! Everything a boss scene holds apart from the boss and its director.

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use cogfront_core::config::GameConfig;
use cogfront_core::constants::PROJECTILE_RADIUS;
use cogfront_core::enums::{PartKind, ProjectileKind};
use cogfront_core::events::{GameEvent, SoundCue};
use cogfront_core::types::{Bounds, SimTime};
use cogfront_grid::pattern::TilePattern;
use cogfront_grid::reserve::PowerReserve;
use cogfront_grid::{Board, ConveyorBelt, PartRegistry};

use crate::components::{Carried, Position, Projectile, Velocity};
use crate::player::Player;

/// Shared scene state handed to bosses, lifecycle scripts and systems.
pub struct Scene {
    /// Drones and projectiles.
    pub world: World,
    pub parts: PartRegistry,
    pub board: Board,
    pub belts: Vec<ConveyorBelt>,
    pub player: Player,
    pub rng: ChaCha8Rng,
    pub config: GameConfig,
    pub bounds: Bounds,
    pub time: SimTime,
    pub reserve: Option<PowerReserve>,
    pub pattern: Option<TilePattern>,
    /// 0 freezes gameplay. Set by lifecycle scripts on win or loss.
    pub time_scale: f32,
    pub events: Vec<GameEvent>,
    pub despawn_buffer: Vec<Entity>,
}

impl Scene {
    pub fn dt(&self) -> f32 {
        self.time.dt() * self.time_scale
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sound(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::sound(cue));
    }

    pub fn animation(&mut self, trigger: &str) {
        self.events.push(GameEvent::animation(trigger));
    }

    pub fn explosion(&mut self, at: Vec2, big: bool) {
        self.events.push(GameEvent::Explosion { at, big });
    }

    /// Spawn a straight-line projectile. `direction` need not be normalized.
    pub fn spawn_projectile(
        &mut self,
        kind: ProjectileKind,
        origin: Vec2,
        direction: Vec2,
        speed: f32,
    ) -> Entity {
        let velocity = direction.normalize_or_zero() * speed;
        self.world.spawn((
            Position(origin),
            Velocity(velocity),
            Projectile::new(kind, PROJECTILE_RADIUS),
        ))
    }

    /// Fling a captured part. The projectile remembers what it was made from.
    pub fn spawn_part_missile(&mut self, origin: Vec2, direction: Vec2, speed: f32, kind: PartKind) {
        let entity = self.spawn_projectile(ProjectileKind::PartMissile, origin, direction, speed);
        let _ = self.world.insert_one(entity, Carried(kind));
    }

    /// Set conveyor belts running or stopped.
    pub fn set_conveyors(&mut self, running: bool) {
        for belt in &mut self.belts {
            belt.set_running(running);
        }
    }
}
