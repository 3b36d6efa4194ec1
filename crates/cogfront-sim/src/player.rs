//! The player: movement, carrying parts, shooting and taking hits.

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use cogfront_core::config::PlayerConfig;
use cogfront_core::constants::{HELD_ITEM_OFFSET, PLAYER_RADIUS};
use cogfront_core::enums::{PartKind, ProjectileKind};
use cogfront_core::events::{GameEvent, ShakeTarget, SoundCue};
use cogfront_core::health::{DamageResult, Health};
use cogfront_core::state::{PartLocation, PlayerView};
use cogfront_core::types::PartId;
use cogfront_grid::PlaceableSurface;

use crate::scene::Scene;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub radius: f32,
    pub health: Health,
    pub ammo: u32,
    pub holding: Option<PartId>,
    /// Hidden and ignoring input until the intro enables gameplay.
    pub active: bool,
    /// Movement input, applied every tick.
    pub input: Vec2,
    invincible_for: f32,
    dead: bool,
    config: PlayerConfig,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            position: config.start,
            radius: PLAYER_RADIUS,
            health: Health::new(config.max_health),
            ammo: config.max_ammo,
            holding: None,
            active: false,
            input: Vec2::ZERO,
            invincible_for: 0.0,
            dead: false,
            config: config.clone(),
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_for > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Can be hit by hostile projectiles and contact damage.
    pub fn is_targetable(&self) -> bool {
        self.active && !self.dead && !self.is_invincible()
    }

    /// Apply a hit and start the invincibility window.
    ///
    /// Returns true on the hit that kills the player.
    pub fn hurt(&mut self, amount: f32) -> bool {
        if !self.is_targetable() {
            return false;
        }
        self.invincible_for = self.config.flash_duration * self.config.flash_count as f32;
        match self.health.take_damage(amount) {
            DamageResult::Alive => false,
            DamageResult::Depleted => {
                self.dead = true;
                true
            }
        }
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            position: self.position,
            health: self.health.current(),
            ammo: self.ammo,
            holding: self.holding,
            invincible: self.is_invincible(),
            active: self.active,
        }
    }
}

/// Move the player, count down invincibility, and carry the held part along.
pub fn update(scene: &mut Scene) {
    let dt = scene.dt();
    let player = &mut scene.player;
    player.invincible_for = (player.invincible_for - dt).max(0.0);
    if !player.active || player.dead {
        return;
    }
    if player.input != Vec2::ZERO {
        let step = player.input.clamp_length_max(1.0) * player.config.speed * dt;
        player.position = scene.bounds.clamp(player.position + step, player.radius);
    }
    let held_at = player.position + Vec2::from(HELD_ITEM_OFFSET);
    if let Some(part) = player.holding.and_then(|id| scene.parts.get_mut(id)) {
        part.position = held_at;
    }
}

/// Surface under a world point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    Board,
    Belt(usize),
}

fn surface_at(scene: &Scene, at: Vec2) -> Option<Surface> {
    if scene.board.has_cell_at(at) {
        return Some(Surface::Board);
    }
    scene
        .belts
        .iter()
        .position(|belt| belt.has_cell_at(at))
        .map(Surface::Belt)
}

fn cell_center(scene: &Scene, surface: Surface, at: Vec2) -> Option<Vec2> {
    match surface {
        Surface::Board => scene.board.cell_center(at),
        Surface::Belt(index) => scene.belts.get(index)?.cell_center(at),
    }
}

fn part_at(scene: &Scene, surface: Surface, at: Vec2) -> Option<PartId> {
    match surface {
        Surface::Board => scene.board.cell_at(at).and_then(|key| scene.board.occupant(key)),
        Surface::Belt(index) => scene.belts.get(index)?.part_at(at),
    }
}

fn in_reach(scene: &Scene, surface: Surface, at: Vec2) -> bool {
    cell_center(scene, surface, at)
        .is_some_and(|center| center.distance(scene.player.position) <= scene.player.config.interact_range)
}

/// Pick up from, or place onto, whichever surface is under `at`.
pub fn interact(scene: &mut Scene, at: Vec2) {
    let Some(surface) = surface_at(scene, at) else {
        return;
    };
    if !in_reach(scene, surface, at) {
        return;
    }
    match scene.player.holding {
        None => pick_up(scene, surface, at),
        Some(held) => place(scene, surface, held, at),
    }
}

fn pick_up(scene: &mut Scene, surface: Surface, at: Vec2) {
    let Some(target) = part_at(scene, surface, at) else {
        return;
    };
    if scene.parts.kind(target) == Some(PartKind::PowerSource) {
        scene.sound(SoundCue::Error);
        scene.emit(GameEvent::Shake {
            target: ShakeTarget::Part(target),
        });
        return;
    }

    let picked = match surface {
        Surface::Board => scene.board.pick_up(&mut scene.parts, at),
        Surface::Belt(index) => match scene.belts.get_mut(index) {
            Some(belt) => belt.pick_up(&mut scene.parts, at),
            None => None,
        },
    };
    let Some(id) = picked else { return };

    if scene.parts.kind(id) == Some(PartKind::AmmoRefill) {
        scene.parts.remove(id);
        scene.player.ammo = scene.player.config.max_ammo;
        scene.sound(SoundCue::PickUpItem);
        debug!("ammo refilled from {id:?}");
        return;
    }

    if let Some(part) = scene.parts.get_mut(id) {
        part.location = PartLocation::Held;
    }
    scene.player.holding = Some(id);
    scene.sound(SoundCue::PickUpPart);
}

fn place(scene: &mut Scene, surface: Surface, held: PartId, at: Vec2) {
    let placed = match surface {
        Surface::Board => scene.board.place(&mut scene.parts, held, at),
        Surface::Belt(index) => match scene.belts.get_mut(index) {
            Some(belt) => belt.place(&mut scene.parts, held, at),
            None => false,
        },
    };
    if placed {
        scene.player.holding = None;
        scene.sound(SoundCue::PlacePart);
    } else {
        scene.sound(SoundCue::Error);
        scene.emit(GameEvent::Shake {
            target: ShakeTarget::HeldPart,
        });
    }
}

/// Fire toward a world point, or signal an empty magazine.
pub fn shoot(scene: &mut Scene, toward: Vec2) {
    if scene.player.ammo == 0 {
        scene.sound(SoundCue::Empty);
        scene.emit(GameEvent::Shake {
            target: ShakeTarget::AmmoDisplay,
        });
        return;
    }
    scene.player.ammo -= 1;
    scene.sound(SoundCue::TurretShoot);

    let origin = scene.player.position;
    let offset = toward - origin;
    let direction = if offset.length_squared() < 1e-6 {
        Vec2::Y
    } else {
        offset
    };
    let speed = scene.player.config.shot_speed;
    scene.spawn_projectile(ProjectileKind::PlayerShot, origin, direction, speed);
}

/// Rotate the part under `at`. Gears and sources refuse.
pub fn rotate_part(scene: &mut Scene, at: Vec2, degrees: f32) {
    let Some(surface) = surface_at(scene, at) else {
        return;
    };
    if !in_reach(scene, surface, at) {
        return;
    }
    let Some(id) = part_at(scene, surface, at) else {
        return;
    };
    let rotated = scene
        .parts
        .get_mut(id)
        .is_some_and(|part| part.try_rotate(degrees));
    if !rotated {
        scene.sound(SoundCue::Error);
        scene.emit(GameEvent::Shake {
            target: ShakeTarget::Part(id),
        });
    }
}
