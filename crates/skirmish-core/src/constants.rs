//! Simulation constants and tuning parameters.

/// Nominal tick rate (Hz) the driver paces the simulation at.
pub const TICK_RATE: u32 = 60;

/// Simulated seconds per tick. Enemy motion is tied to this fixed delta rather
/// than to wall-clock frame time, so game balance does not depend on the
/// driver's actual tick rate.
pub const FIXED_DT_SECS: f64 = 0.016;

// --- World ---

/// Default world width in pixels.
pub const DEFAULT_WORLD_WIDTH: f64 = 800.0;

/// Default world height in pixels.
pub const DEFAULT_WORLD_HEIGHT: f64 = 600.0;

// --- Sprite geometry ---

/// Edge length of a ship sprite frame (pixels).
pub const SHIP_FRAME_SIZE: f64 = 32.0;

/// Edge length of a bullet sprite frame (pixels).
pub const BULLET_FRAME_SIZE: f64 = 16.0;

/// Draw scale applied to every ship.
pub const SHIP_SCALE: f64 = 2.0;

/// Player physics body as a fraction of its frame.
pub const PLAYER_BODY_FRACTION: f64 = 0.6;

/// Bullet physics body width as a fraction of its frame.
pub const BULLET_BODY_WIDTH_FRACTION: f64 = 0.5;

/// Bullet physics body height as a fraction of its frame.
pub const BULLET_BODY_HEIGHT_FRACTION: f64 = 0.3;

// --- Player ---

/// Player spawn x (pixels from the left edge).
pub const PLAYER_START_X: f64 = 50.0;

pub const PLAYER_START_HEALTH: u32 = 10;

/// Vertical speed in pixels per second.
pub const PLAYER_START_SPEED: f64 = 200.0;

pub const PLAYER_START_SHOTS: u32 = 1;

/// Horizontal offset of a fired bullet from the player.
pub const PLAYER_MUZZLE_OFFSET: f64 = 20.0;

/// Vertical gap between bullets of one fan-out volley.
pub const FAN_OUT_SPACING: f64 = 10.0;

pub const PLAYER_BULLET_SPEED: f64 = 400.0;

// --- Enemies ---

pub const HEAVY_HEALTH: u32 = 3;
pub const LIGHT_HEALTH: u32 = 1;

/// Leftward drift for both enemy kinds (pixels per second).
pub const ENEMY_SPEED: f64 = 35.0;

/// Vertical oscillation amplitude (pixels).
pub const OSCILLATION_AMPLITUDE: f64 = 20.0;

/// Horizontal distance per radian of oscillation (pixels).
pub const OSCILLATION_WAVELENGTH: f64 = 30.0;

/// Horizontal offset of an enemy bullet from the firing enemy.
pub const ENEMY_MUZZLE_OFFSET: f64 = 20.0;

/// Enemy bullets travel leftward.
pub const ENEMY_BULLET_SPEED: f64 = -200.0;

/// Initial fire delay window for a freshly spawned light enemy (ms).
pub const INITIAL_FIRE_DELAY_MS: (f64, f64) = (2500.0, 5000.0);

/// Fire delay window redrawn after every shot (ms).
pub const REFIRE_DELAY_MS: (f64, f64) = (3000.0, 6000.0);

/// Upper bound of the random backdate applied to a new enemy's last shot (ms).
pub const FIRE_BACKDATE_MAX_MS: f64 = 5000.0;

// --- Waves ---

/// Enemies of each kind per group.
pub const GROUP_ROWS: u32 = 5;

/// y of the first row of a group.
pub const GROUP_START_Y: f64 = 100.0;

/// Vertical distance between rows.
pub const GROUP_ROW_SPACING: f64 = 100.0;

/// Heavies spawn this far beyond the right edge.
pub const HEAVY_SPAWN_MARGIN: f64 = 50.0;

/// Lights spawn this far beyond the right edge.
pub const LIGHT_SPAWN_MARGIN: f64 = 150.0;

/// Simulated delay between consecutive groups of a wave (ms).
pub const GROUP_SPAWN_INTERVAL_MS: f64 = 3000.0;

// --- Economy ---

pub const HEALTH_UPGRADE_COST: u64 = 10;
pub const SPEED_UPGRADE_COST: u64 = 10;

/// Multi-shot costs `MULTI_SHOT_COST_BASE ^ num_shots`.
pub const MULTI_SHOT_COST_BASE: u64 = 10;

pub const HEALTH_UPGRADE_AMOUNT: u32 = 1;
pub const SPEED_UPGRADE_AMOUNT: f64 = 20.0;

/// Points awarded per destroyed enemy.
pub const KILL_SCORE: u64 = 1;
