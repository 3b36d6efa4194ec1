//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Part variant placed on boards and carried on conveyors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartKind {
    /// Relays power between adjacent powered parts.
    Gear,
    /// A gear that also aims adjacent turrets at the boss.
    AutoGear,
    /// Always powered unless a reserve meter runs dry.
    PowerSource,
    /// Charges and fires while next to a powered gear.
    Turret,
    /// Absorbs boss projectiles.
    Wall,
    /// Refills player ammo when picked up.
    AmmoRefill,
}

impl PartKind {
    /// Parts that hold and relay power.
    pub fn is_gear_family(self) -> bool {
        matches!(self, Self::Gear | Self::AutoGear | Self::PowerSource)
    }

    /// Parts that accept a rotate command.
    pub fn can_rotate(self) -> bool {
        matches!(self, Self::Turret | Self::Wall)
    }
}

/// Boss scene selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    /// THE SPY
    #[default]
    Eye,
    /// THE SWARM
    Drone,
    /// THE DEMON
    Goat,
    /// THE DIRECTOR
    Final,
}

impl BossKind {
    /// Title typed out during the intro.
    pub fn title(self) -> &'static str {
        match self {
            Self::Eye => "THE SPY",
            Self::Drone => "THE SWARM",
            Self::Goat => "THE DEMON",
            Self::Final => "THE DIRECTOR",
        }
    }

    /// Progress index recorded when the boss is defeated.
    pub fn progress_index(self) -> u32 {
        match self {
            Self::Eye => 1,
            Self::Drone => 2,
            Self::Goat => 3,
            Self::Final => 4,
        }
    }
}

/// Boss phase, ordered by severity. Transitions only move forward.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BossPhase {
    #[default]
    Normal,
    PhaseTwo,
    PhaseThree,
}

/// Behavior shared by every live drone of a swarm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroneState {
    /// Tight orbit around the tower plus wander.
    #[default]
    Protecting,
    /// Evenly spaced orbit, firing outward.
    Shooting,
    /// Evenly spaced orbit, holding fire.
    Waiting,
    /// Flee from the tower.
    Scattering,
}

/// Overall game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Intro script running, player input ignored.
    #[default]
    Intro,
    /// Boss fight in progress.
    Active,
    /// Paused by the player.
    Paused,
    /// Boss defeated.
    Won,
    /// Player died.
    Lost,
}

/// Projectile kind. Decides what a projectile can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Fired by a turret part. Hits bosses and drones.
    TurretShot,
    /// Fired by the player. Hits bosses and clears boss shots.
    PlayerShot,
    /// Fired by a boss. Hits the player and placed parts.
    BossShot,
    /// Fired by a drone. Hits the player and placed parts.
    DroneShot,
    /// A captured part flung by the final boss.
    PartMissile,
}

impl ProjectileKind {
    pub fn is_hostile(self) -> bool {
        matches!(self, Self::BossShot | Self::DroneShot | Self::PartMissile)
    }

    /// Damage dealt to a placed part on contact.
    pub fn part_damage(self) -> f32 {
        use crate::constants::*;
        match self {
            Self::BossShot | Self::DroneShot => BOSS_SHOT_PART_DAMAGE,
            Self::PartMissile => PART_MISSILE_DAMAGE,
            Self::TurretShot | Self::PlayerShot => 0.0,
        }
    }
}
