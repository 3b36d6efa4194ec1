//! Simulation constants and tuning parameters.
//!
//! Distances are in world units (one board cell = 1.0), times in seconds,
//! angles in degrees unless a name says otherwise.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Play area ---

/// Half width of the play area. Projectiles beyond it are despawned.
pub const PLAY_HALF_WIDTH: f32 = 10.0;

/// Half height of the play area.
pub const PLAY_HALF_HEIGHT: f32 = 7.0;

// --- Steering ---

/// Default agent speed cap.
pub const DEFAULT_MAX_SPEED: f32 = 5.0;

/// Magnitude of the impulse returned when the wander timer expires.
pub const WANDER_RADIUS: f32 = 5.0;

/// Seconds between wander heading changes.
pub const WANDER_TIME: f32 = 1.0;

/// Arrive: distance at which the agent counts as arrived.
pub const ARRIVE_TARGET_RADIUS: f32 = 0.25;

/// Arrive: distance at which the agent starts slowing down.
pub const ARRIVE_SLOWING_RADIUS: f32 = 1.0;

// --- Board ---

/// Default board rows.
pub const BOARD_ROWS: i32 = 5;

/// Default board columns.
pub const BOARD_COLUMNS: i32 = 5;

/// Side length of a board cell.
pub const CELL_SIZE: f32 = 1.0;

/// Distance from a part to the adjacency probe points.
pub const CHECK_RADIUS: f32 = 1.0;

/// Board-local drift above which a powered gear counts as moved.
pub const GEAR_MOVE_EPSILON: f32 = 0.001;

/// Default world position of board cell (0, 0).
pub const BOARD_ORIGIN: (f32, f32) = (-2.0, -2.0);

// --- Parts ---

/// Hit points of a destructible part.
pub const PART_MAX_HEALTH: f32 = 3.0;

/// Degrees a rotate command turns a part by.
pub const PART_ROTATE_STEP: f32 = 30.0;

/// Snap step used when an auto gear aims an adjacent turret.
pub const AUTO_GEAR_SNAP_STEP: f32 = 10.0;

/// Seconds a powered turret charges before firing.
pub const TURRET_SHOOT_INTERVAL: f32 = 1.0;

// --- Conveyor ---

/// Conveyor cell speed along the belt axis.
pub const CONVEYOR_SPEED: f32 = 1.0;

/// Seconds between conveyor spawns.
pub const CONVEYOR_SPAWN_INTERVAL: f32 = 2.0;

/// Belt-local distance after which a conveyor cell is evicted.
pub const CONVEYOR_DESTROY_DISTANCE: f32 = 17.0;

// --- Power reserve ---

/// Reserve meter capacity.
pub const POWER_RESERVE_MAX: f32 = 30.0;

/// Goal meter capacity.
pub const POWER_GOAL_MAX: f32 = 30.0;

/// Seconds between reserve drain / goal fill steps.
pub const POWER_RESERVE_PERIOD: f32 = 1.0;

// --- Projectiles ---

/// Collision radius of every projectile.
pub const PROJECTILE_RADIUS: f32 = 0.15;

/// Turret shot speed.
pub const TURRET_SHOT_SPEED: f32 = 8.0;

/// Player shot speed.
pub const PLAYER_SHOT_SPEED: f32 = 10.0;

/// Speed of shots fired by bosses and drones.
pub const BOSS_SHOT_SPEED: f32 = 4.0;

/// Speed of a captured part flung by the final boss.
pub const PART_MISSILE_SPEED: f32 = 6.0;

// --- Damage ---

/// Damage a turret shot deals to a boss.
pub const TURRET_SHOT_DAMAGE: f32 = 3.0;

/// Damage a player shot deals to a boss.
pub const PLAYER_SHOT_DAMAGE: f32 = 0.5;

/// Damage a drone or boss shot deals to a placed part.
pub const BOSS_SHOT_PART_DAMAGE: f32 = 0.5;

/// Damage a flung part deals to a placed part.
pub const PART_MISSILE_DAMAGE: f32 = 2.0;

/// Damage the final boss saw deals to a placed part.
pub const BLADE_PART_DAMAGE: f32 = 3.0;

/// Damage any hostile hit deals to the player.
pub const PLAYER_HIT_DAMAGE: f32 = 1.0;

// --- Player ---

/// Player hit points.
pub const PLAYER_MAX_HEALTH: f32 = 5.0;

/// Player movement speed.
pub const PLAYER_SPEED: f32 = 5.0;

/// Player collision radius.
pub const PLAYER_RADIUS: f32 = 0.3;

/// Shots available after a refill.
pub const PLAYER_MAX_AMMO: u32 = 3;

/// Furthest tile the player can interact with.
pub const PLAYER_INTERACT_RANGE: f32 = 2.0;

/// Seconds per invincibility flash.
pub const PLAYER_FLASH_DURATION: f32 = 0.1;

/// Number of invincibility flashes after a hit.
pub const PLAYER_FLASH_COUNT: u32 = 5;

/// Offset of a held part from the player.
pub const HELD_ITEM_OFFSET: (f32, f32) = (0.0, 0.5);

// --- Lifecycle ---

/// Delay between typed boss-name letters.
pub const LETTER_DELAY: f32 = 0.15;

// --- Eye boss ("THE SPY") ---

pub const EYE_MAX_HEALTH: f32 = 100.0;
pub const EYE_LEFT_BOUND: f32 = -5.0;
pub const EYE_RIGHT_BOUND: f32 = 5.0;
pub const EYE_MOVE_SPEED: f32 = 2.0;
pub const EYE_MOVE_INTERVAL: f32 = 5.0;
/// Widest shot spread, reached at full distress.
pub const EYE_MAX_ANGLE: f32 = 30.0;
pub const EYE_HOME: (f32, f32) = (0.0, 3.5);
pub const EYE_START: (f32, f32) = (0.0, 6.0);
pub const EYE_RADIUS: f32 = 1.0;
/// Seconds the opening animation takes before the intro can continue.
pub const EYE_INTRO_OPEN_SECS: f32 = 1.5;
/// Seconds a closed eye takes to reopen at scaler 0.
pub const EYE_REOPEN_SECS: f32 = 2.0;
pub const EYE_ENTRY_SECS: f32 = 0.5;

// --- Drone boss ("THE SWARM") ---

pub const DRONE_BOSS_MAX_HEALTH: f32 = 100.0;
pub const DRONE_BOSS_POSITION: (f32, f32) = (0.0, 4.0);
pub const DRONE_BOSS_RADIUS: f32 = 1.0;
pub const DRONE_SPAWN_RADIUS: f32 = 5.0;
pub const DRONE_PHASE_TWO_THRESHOLD: f32 = 67.0;
pub const DRONE_PHASE_THREE_THRESHOLD: f32 = 33.0;
pub const DRONE_INTRO_WAVE: u32 = 10;
pub const DRONE_RESPAWN_WAVE: u32 = 5;
pub const DRONE_PHASE_TWO_WAVE: u32 = 25;
pub const DRONE_PHASE_THREE_WAVE: u32 = 50;
pub const DRONE_DEATH_WAVE: u32 = 50;
pub const DRONE_HITS: u32 = 2;
pub const DRONE_RADIUS: f32 = 0.25;
pub const DRONE_MAX_SPEED: f32 = 6.0;
pub const DRONE_SHOOT_COOLDOWN: f32 = 1.0;
pub const DRONE_SIGNAL_SECS: f32 = 1.75;
pub const DRONE_PHASE_SECS: f32 = 5.0;
pub const DRONE_PROTECT_RADIUS: f32 = 0.75;
pub const DRONE_PROTECT_SPEED: f32 = 100.0;
pub const DRONE_SHOOT_RADIUS: f32 = 1.75;
pub const DRONE_SHOOT_SPEED: f32 = 50.0;
pub const DRONE_PROTECT_WEIGHT: f32 = 1.0;
pub const DRONE_SHOOT_WEIGHT: f32 = 1.5;
pub const DRONE_SCATTER_WEIGHT: f32 = 1.0;
pub const DRONE_WANDER_WEIGHT: f32 = 0.5;
/// Seconds the tower's arrival animation runs before it turns static.
pub const DRONE_BOSS_ARRIVAL_SECS: f32 = 1.0;

// --- Goat boss ("THE DEMON") ---

pub const GOAT_MAX_HEALTH: f32 = 100.0;
pub const GOAT_START: (f32, f32) = (0.0, 5.0);
pub const GOAT_RADIUS: f32 = 0.8;
pub const GOAT_MAX_SPEED: f32 = 4.0;
pub const GOAT_HOVER_RADIUS: f32 = 0.25;
pub const GOAT_HOVER_SPEED: f32 = 100.0;
pub const GOAT_HOVER_WEIGHT: f32 = 2.0;
pub const GOAT_CONE_COUNT: u32 = 10;
pub const GOAT_CONE_ANGLE: f32 = 45.0;
pub const GOAT_BOARD_TURN: f32 = -90.0;
pub const GOAT_BOARD_TURN_SECS: f32 = 0.5;
pub const GOAT_BASE_DELAY: f32 = 1.0;
/// Extra delay at zero distress, shrinking as distress grows.
pub const GOAT_SCALED_DELAY: f32 = 4.0;
pub const GOAT_INTRO_STATIC_SECS: f32 = 3.75;

// --- Final boss ("THE DIRECTOR") ---

pub const FINAL_MAX_HEALTH: f32 = 150.0;
pub const FINAL_START: (f32, f32) = (0.0, 3.5);
pub const FINAL_RADIUS: f32 = 1.2;
pub const FINAL_PHASE_TWO_THRESHOLD: f32 = 75.0;
pub const FINAL_CLAW_REACH: f32 = 2.5;
/// Seconds the claw target takes to travel to a point.
pub const FINAL_CLAW_TRAVEL_SECS: f32 = 1.0;
/// Horizontal move progress per second.
pub const FINAL_HORIZONTAL_SPEED: f32 = 0.5;
pub const FINAL_MIN_X: f32 = -4.0;
pub const FINAL_MAX_X: f32 = 4.0;
pub const FINAL_HIT_NUDGE: f32 = 2.0;
/// Claw rest position relative to the boss.
pub const FINAL_CLAW_REST: (f32, f32) = (0.5, 2.0);
/// Muzzle position relative to the boss.
pub const FINAL_MUZZLE: (f32, f32) = (0.0, -1.0);
pub const FINAL_LASER_SECS: f32 = 2.0;
pub const FINAL_LASER_SPACING: f32 = 0.2;
pub const FINAL_CHARGE_TURN: f32 = 1755.0;
pub const FINAL_CHARGE_SECS: f32 = 3.0;
pub const FINAL_ARM_RESET_TURN: f32 = 45.0;
pub const FINAL_PHASE_TWO_BURST: u32 = 10;
pub const FINAL_DEFAULT_BURST: u32 = 3;
pub const FINAL_BURST_GAP: f32 = 0.2;
pub const FINAL_SAW_REACH: f32 = 2.5;
pub const FINAL_SAW_RADIUS: f32 = 0.6;
pub const FINAL_ARMS_INTRO_SECS: f32 = 3.0;
