//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind tag carried by every entity's `Body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    /// Fragile, shooting enemy.
    EnemyLight,
    /// Armored, non-shooting enemy.
    EnemyHeavy,
    PlayerBullet,
    EnemyBullet,
}

impl EntityKind {
    pub fn is_enemy(self) -> bool {
        matches!(self, EntityKind::EnemyLight | EntityKind::EnemyHeavy)
    }

    pub fn is_bullet(self) -> bool {
        matches!(self, EntityKind::PlayerBullet | EntityKind::EnemyBullet)
    }
}

/// Purchasable upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Health,
    Speed,
    MultiShot,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [UpgradeKind::Health, UpgradeKind::Speed, UpgradeKind::MultiShot];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::Health => "health",
            UpgradeKind::Speed => "speed",
            UpgradeKind::MultiShot => "multishot",
        }
    }
}

/// Top-level game phase.
///
/// `Idle` and `Cleared` both wait for `StartNextWave`; `Cleared` additionally
/// has the upgrade shop open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first wave, awaiting the start prompt.
    #[default]
    Idle,
    /// Groups of the current wave are still being released.
    Spawning,
    /// All groups released, combat ongoing.
    Active,
    /// Wave cleared, upgrade shop open.
    Cleared,
    /// Player health depleted. Terminal until restart.
    GameOver,
}

impl GamePhase {
    /// Whether a wave is in progress (enemies move, fire, and the player acts).
    pub fn in_wave(self) -> bool {
        matches!(self, GamePhase::Spawning | GamePhase::Active)
    }

    /// Whether the start-next-wave prompt is armed.
    pub fn awaiting_wave(self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::Cleared)
    }
}

/// How the player lost a point of health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageCause {
    EnemyBullet,
    BodyCollision,
    EnemyEscaped,
}
