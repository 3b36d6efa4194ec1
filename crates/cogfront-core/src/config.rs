//! Tuning configuration.
//!
//! Every section falls back to the values in [`crate::constants`], so a config
//! file only needs to name the fields it overrides.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{BossKind, PartKind};
use crate::error::ConfigError;
use crate::types::CellKey;

/// Everything needed to build a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. Same seed, same commands, same simulation.
    pub seed: u64,
    pub boss: BossKind,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            boss: BossKind::Eye,
            game: GameConfig::default(),
        }
    }
}

/// Tuning sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub steering: SteeringConfig,
    pub board: BoardConfig,
    pub conveyor: ConveyorConfig,
    pub turret: TurretConfig,
    pub player: PlayerConfig,
    pub eye: EyeConfig,
    pub drone: DroneConfig,
    pub goat: GoatConfig,
    pub final_boss: FinalBossConfig,
    pub power_reserve: PowerReserveConfig,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            }
        }

        if self.board.rows <= 0 || self.board.columns <= 0 {
            return Err(invalid("board", "rows and columns must be positive"));
        }
        if self.board.cell_size <= 0.0 {
            return Err(invalid("board.cell_size", "must be positive"));
        }
        if self.conveyor.bag.is_empty() {
            return Err(invalid("conveyor.bag", "must list at least one part"));
        }
        if self.steering.max_speed <= 0.0 {
            return Err(invalid("steering.max_speed", "must be positive"));
        }
        if self.eye.left_bound >= self.eye.right_bound {
            return Err(invalid("eye.left_bound", "must be less than right_bound"));
        }
        if self.goat.hover_points.is_empty() {
            return Err(invalid("goat.hover_points", "must list at least one point"));
        }
        if self.goat.cone_count == 0 {
            return Err(invalid("goat.cone_count", "must be at least one"));
        }
        if self.drone.phase_three_threshold > self.drone.phase_two_threshold {
            return Err(invalid(
                "drone.phase_three_threshold",
                "must not exceed phase_two_threshold",
            ));
        }
        if self.final_boss.min_x > self.final_boss.max_x {
            return Err(invalid("final_boss.min_x", "must not exceed max_x"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    pub max_speed: f32,
    pub wander_radius: f32,
    pub wander_time: f32,
    pub arrive_target_radius: f32,
    pub arrive_slowing_radius: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            wander_radius: WANDER_RADIUS,
            wander_time: WANDER_TIME,
            arrive_target_radius: ARRIVE_TARGET_RADIUS,
            arrive_slowing_radius: ARRIVE_SLOWING_RADIUS,
        }
    }
}

/// A part that starts on the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartPlacement {
    pub cell: CellKey,
    pub kind: PartKind,
}

/// Easter egg: every listed cell must hold `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilePatternConfig {
    pub cells: Vec<CellKey>,
    pub kind: PartKind,
    pub scene: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: i32,
    pub columns: i32,
    pub cell_size: f32,
    /// World position of cell (0, 0).
    pub origin: Vec2,
    pub check_radius: f32,
    pub move_epsilon: f32,
    pub initial_parts: Vec<PartPlacement>,
    pub part_health: f32,
    pub pattern: Option<TilePatternConfig>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            columns: BOARD_COLUMNS,
            cell_size: CELL_SIZE,
            origin: Vec2::from(BOARD_ORIGIN),
            check_radius: CHECK_RADIUS,
            move_epsilon: GEAR_MOVE_EPSILON,
            initial_parts: vec![PartPlacement {
                cell: CellKey::new(0, 2),
                kind: PartKind::PowerSource,
            }],
            part_health: PART_MAX_HEALTH,
            pattern: Some(TilePatternConfig {
                cells: vec![
                    CellKey::new(0, 0),
                    CellKey::new(0, 4),
                    CellKey::new(4, 0),
                    CellKey::new(4, 4),
                ],
                kind: PartKind::Wall,
                scene: "BossFourScene".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConveyorConfig {
    pub speed: f32,
    pub spawn_interval: f32,
    pub destroy_distance: f32,
    /// World position where each belt spawns its cells. Belts run toward +x.
    pub lanes: Vec<Vec2>,
    /// Part kinds drawn without repeats until the bag empties.
    pub bag: Vec<PartKind>,
}

impl Default for ConveyorConfig {
    fn default() -> Self {
        Self {
            speed: CONVEYOR_SPEED,
            spawn_interval: CONVEYOR_SPAWN_INTERVAL,
            destroy_distance: CONVEYOR_DESTROY_DISTANCE,
            lanes: vec![Vec2::new(-8.5, -4.0), Vec2::new(-8.5, -5.5)],
            bag: vec![
                PartKind::Gear,
                PartKind::Gear,
                PartKind::Gear,
                PartKind::AutoGear,
                PartKind::Turret,
                PartKind::Turret,
                PartKind::Wall,
                PartKind::AmmoRefill,
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretConfig {
    pub shoot_interval: f32,
    pub shot_speed: f32,
    pub boss_damage: f32,
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            shoot_interval: TURRET_SHOOT_INTERVAL,
            shot_speed: TURRET_SHOT_SPEED,
            boss_damage: TURRET_SHOT_DAMAGE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start: Vec2,
    pub max_health: f32,
    pub speed: f32,
    pub max_ammo: u32,
    pub interact_range: f32,
    pub flash_duration: f32,
    pub flash_count: u32,
    pub shot_speed: f32,
    pub shot_damage: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: Vec2::new(0.0, -3.2),
            max_health: PLAYER_MAX_HEALTH,
            speed: PLAYER_SPEED,
            max_ammo: PLAYER_MAX_AMMO,
            interact_range: PLAYER_INTERACT_RANGE,
            flash_duration: PLAYER_FLASH_DURATION,
            flash_count: PLAYER_FLASH_COUNT,
            shot_speed: PLAYER_SHOT_SPEED,
            shot_damage: PLAYER_SHOT_DAMAGE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeConfig {
    pub max_health: f32,
    pub home: Vec2,
    pub left_bound: f32,
    pub right_bound: f32,
    pub move_speed: f32,
    pub move_interval: f32,
    pub max_angle: f32,
    pub reopen_secs: f32,
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            max_health: EYE_MAX_HEALTH,
            home: Vec2::from(EYE_HOME),
            left_bound: EYE_LEFT_BOUND,
            right_bound: EYE_RIGHT_BOUND,
            move_speed: EYE_MOVE_SPEED,
            move_interval: EYE_MOVE_INTERVAL,
            max_angle: EYE_MAX_ANGLE,
            reopen_secs: EYE_REOPEN_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneConfig {
    pub max_health: f32,
    pub position: Vec2,
    pub spawn_radius: f32,
    pub phase_two_threshold: f32,
    pub phase_three_threshold: f32,
    pub intro_wave: u32,
    pub respawn_wave: u32,
    pub phase_two_wave: u32,
    pub phase_three_wave: u32,
    pub death_wave: u32,
    pub hits: u32,
    pub max_speed: f32,
    pub shoot_cooldown: f32,
    pub protect_weight: f32,
    pub shoot_weight: f32,
    pub scatter_weight: f32,
    pub wander_weight: f32,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            max_health: DRONE_BOSS_MAX_HEALTH,
            position: Vec2::from(DRONE_BOSS_POSITION),
            spawn_radius: DRONE_SPAWN_RADIUS,
            phase_two_threshold: DRONE_PHASE_TWO_THRESHOLD,
            phase_three_threshold: DRONE_PHASE_THREE_THRESHOLD,
            intro_wave: DRONE_INTRO_WAVE,
            respawn_wave: DRONE_RESPAWN_WAVE,
            phase_two_wave: DRONE_PHASE_TWO_WAVE,
            phase_three_wave: DRONE_PHASE_THREE_WAVE,
            death_wave: DRONE_DEATH_WAVE,
            hits: DRONE_HITS,
            max_speed: DRONE_MAX_SPEED,
            shoot_cooldown: DRONE_SHOOT_COOLDOWN,
            protect_weight: DRONE_PROTECT_WEIGHT,
            shoot_weight: DRONE_SHOOT_WEIGHT,
            scatter_weight: DRONE_SCATTER_WEIGHT,
            wander_weight: DRONE_WANDER_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoatConfig {
    pub max_health: f32,
    pub start: Vec2,
    /// Cycled in order, starting from the second entry.
    pub hover_points: Vec<Vec2>,
    /// Where the projectile cone is aimed.
    pub target: Vec2,
    pub cone_count: u32,
    pub cone_angle: f32,
    pub board_turn: f32,
}

impl Default for GoatConfig {
    fn default() -> Self {
        Self {
            max_health: GOAT_MAX_HEALTH,
            start: Vec2::from(GOAT_START),
            hover_points: vec![
                Vec2::new(-3.0, 4.0),
                Vec2::new(0.0, 5.0),
                Vec2::new(3.0, 4.0),
            ],
            target: Vec2::new(0.0, -3.0),
            cone_count: GOAT_CONE_COUNT,
            cone_angle: GOAT_CONE_ANGLE,
            board_turn: GOAT_BOARD_TURN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalBossConfig {
    pub max_health: f32,
    pub start: Vec2,
    pub phase_two_threshold: f32,
    pub claw_reach: f32,
    pub claw_travel_secs: f32,
    pub horizontal_speed: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub hit_nudge: f32,
    pub laser_secs: f32,
}

impl Default for FinalBossConfig {
    fn default() -> Self {
        Self {
            max_health: FINAL_MAX_HEALTH,
            start: Vec2::from(FINAL_START),
            phase_two_threshold: FINAL_PHASE_TWO_THRESHOLD,
            claw_reach: FINAL_CLAW_REACH,
            claw_travel_secs: FINAL_CLAW_TRAVEL_SECS,
            horizontal_speed: FINAL_HORIZONTAL_SPEED,
            min_x: FINAL_MIN_X,
            max_x: FINAL_MAX_X,
            hit_nudge: FINAL_HIT_NUDGE,
            laser_secs: FINAL_LASER_SECS,
        }
    }
}

/// Optional reserve meter gating power sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerReserveConfig {
    pub enabled: bool,
    pub reserve_max: f32,
    pub goal_max: f32,
    pub period: f32,
    /// Gear whose power fills the goal meter.
    pub goal_cell: CellKey,
}

impl Default for PowerReserveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            reserve_max: POWER_RESERVE_MAX,
            goal_max: POWER_GOAL_MAX,
            period: POWER_RESERVE_PERIOD,
            goal_cell: CellKey::new(4, 2),
        }
    }
}
