//! Game state snapshot: the complete visible state handed to the
//! presentation layer after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{BoundingBox, Position, SimTime};

/// Complete read-only projection of the simulation after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: u32,
    pub score: u64,
    pub player: PlayerView,
    /// Every active entity except the player, sorted by id.
    pub entities: Vec<EntityView>,
    pub prices: PriceView,
    /// Whether the upgrade shop is open.
    pub shop_open: bool,
    pub game_over: bool,
    /// Score at the moment of game over.
    pub final_score: Option<u64>,
    pub world: WorldView,
    pub events: Vec<GameEvent>,
}

/// The player's ship and capabilities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: u64,
    pub position: Position,
    pub bounds: BoundingBox,
    pub health: u32,
    pub speed: f64,
    pub num_shots: u32,
}

/// One renderable entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u64,
    pub kind: EntityKind,
    pub position: Position,
    pub bounds: BoundingBox,
}

/// Current upgrade prices. `None` means the price no longer fits in a score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PriceView {
    pub health: u64,
    pub speed: u64,
    pub multi_shot: Option<u64>,
}

/// World rectangle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WorldView {
    pub width: f64,
    pub height: f64,
}

impl GameStateSnapshot {
    /// Number of active enemies in this snapshot.
    pub fn enemy_count(&self) -> usize {
        self.entities.iter().filter(|e| e.kind.is_enemy()).count()
    }
}
