//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A wave began.
    WaveStarted { wave: u32 },
    /// A group of enemies entered the world.
    GroupReleased { wave: u32, group: u32 },
    /// A player bullet hit an enemy that survived.
    EnemyDamaged { id: u64, remaining_health: u32 },
    /// An enemy was shot down.
    EnemyDestroyed { id: u64, kind: EntityKind },
    /// An enemy left the world on the left side.
    EnemyEscaped { id: u64, kind: EntityKind },
    /// The player lost one point of health.
    PlayerHit { cause: DamageCause, remaining_health: u32 },
    /// A light enemy fired.
    EnemyFired { id: u64 },
    /// The wave is over and the shop is open.
    WaveCleared { wave: u32 },
    /// An upgrade was bought.
    UpgradePurchased { kind: UpgradeKind, cost: u64 },
    /// A command had no effect.
    CommandRejected { command: String, reason: String },
    /// Player health reached zero.
    GameOver { final_score: u64, wave: u32 },
    /// A fresh session began.
    Restarted,
}
