//! Events emitted by the simulation for audio, animation and menu collaborators.
//!
//! The simulation never calls collaborators directly. It buffers these events
//! during a tick and hands them out with the snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{CellKey, PartId};

/// Symbolic sound names understood by the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    BossDefeat,
    BossNameLetter,
    DroneBossSignal,
    EasterEgg,
    Empty,
    Error,
    FinalBossCharge,
    FinalBossIntro,
    FinalBossLaser,
    FinalBossSaw,
    GoatBossDead,
    PickUpItem,
    PickUpPart,
    PlacePart,
    PlayerHurt,
    SmallProjectile,
    Static,
    Trash,
    TurretHit,
    TurretShoot,
    WallHit,
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            Self::BossDefeat => "BossDefeat",
            Self::BossNameLetter => "BossNameLetter",
            Self::DroneBossSignal => "DroneBossSignal",
            Self::EasterEgg => "EasterEgg",
            Self::Empty => "Empty",
            Self::Error => "Error",
            Self::FinalBossCharge => "FinalBossCharge",
            Self::FinalBossIntro => "FinalBossIntro",
            Self::FinalBossLaser => "FinalBossLaser",
            Self::FinalBossSaw => "FinalBossSaw",
            Self::GoatBossDead => "GoatBossDead",
            Self::PickUpItem => "PickUpItem",
            Self::PickUpPart => "PickUpPart",
            Self::PlacePart => "PlacePart",
            Self::PlayerHurt => "PlayerHurt",
            Self::SmallProjectile => "SmallProjectile",
            Self::Static => "Static",
            Self::Trash => "Trash",
            Self::TurretHit => "TurretHit",
            Self::TurretShoot => "TurretShoot",
            Self::WallHit => "WallHit",
        }
    }
}

/// What a shake cue applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShakeTarget {
    HeldPart,
    AmmoDisplay,
    Part(PartId),
}

/// Everything the simulation asks of the outside world during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Play a one-shot sound.
    Sound { cue: SoundCue },
    /// Start (`true`) or pause (`false`) background music.
    Music { playing: bool },
    /// Fire a named animation trigger.
    Animation { trigger: String },
    /// Spawn an explosion effect.
    Explosion { at: Vec2, big: bool },
    /// Shake something to signal a failed action.
    Shake { target: ShakeTarget },
    /// Boss title text so far, typed one letter at a time.
    BossTitle { text: String },
    /// A drone wave spawned.
    DroneWave { count: u32 },
    /// Boss phase advanced.
    PhaseChanged { phase: BossPhase },
    /// A part was destroyed.
    PartDestroyed { part: PartId },
    /// A board cell was removed by the final boss laser.
    CellDestroyed { cell: CellKey },
    /// A laser beam segment appeared.
    LaserSegment { at: Vec2 },
    /// Open a named menu canvas.
    OpenMenu { name: String },
    /// Return to the main menu.
    MainMenu,
    /// Record a defeated boss.
    BossDefeated { index: u32 },
    /// Record a found easter egg.
    EasterEggFound { scene: String },
    /// The player died.
    PlayerDied,
    /// The boss died.
    BossDied { kind: BossKind },
    /// Simulation time scale changed (0 freezes gameplay).
    TimeScale { scale: f32 },
}

impl GameEvent {
    pub fn sound(cue: SoundCue) -> Self {
        Self::Sound { cue }
    }

    pub fn animation(trigger: &str) -> Self {
        Self::Animation {
            trigger: trigger.to_string(),
        }
    }
}
