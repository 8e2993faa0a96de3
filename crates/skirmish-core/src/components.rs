//! ECS components for hecs entities.
//!
//! Components are plain data structs with no logic.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::types::BoundingBox;

/// Physical body shared by every entity: kind tag, collision box, liveness.
///
/// An entity with `active == false` has been destroyed this tick and is
/// waiting to be flushed from the world. Systems must skip it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub kind: EntityKind,
    pub bounds: BoundingBox,
    pub active: bool,
}

/// The player's ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub health: u32,
    /// Vertical speed (pixels per second).
    pub speed: f64,
    /// Bullets per fire command.
    pub num_shots: u32,
}

/// An enemy ship, light or heavy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub health: u32,
    /// Leftward drift (pixels per second).
    pub speed: f64,
    pub can_shoot: bool,
    /// Baseline y the oscillation is centred on.
    pub start_y: f64,
}

/// Firing schedule of a shooting enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FireTimer {
    /// Simulated time of the last shot (ms). May be negative when backdated.
    pub last_shot_ms: f64,
    /// Delay before the next shot (ms).
    pub next_shot_delay_ms: f64,
}

/// A bullet. Velocity lives in the `Velocity` component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Kind of the entity that fired it.
    pub owner: EntityKind,
}
