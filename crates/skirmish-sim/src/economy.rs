//! Score bookkeeping and upgrade pricing.

use skirmish_core::components::Player;
use skirmish_core::constants::*;
use skirmish_core::enums::UpgradeKind;
use skirmish_core::error::{CommandError, CommandResult};
use skirmish_core::state::PriceView;

/// Cost of a multi-shot upgrade for a ship that currently fires `num_shots`
/// bullets: 10, 100, 1000, ... `None` once the price overflows a score.
pub fn multi_shot_cost(num_shots: u32) -> Option<u64> {
    MULTI_SHOT_COST_BASE.checked_pow(num_shots)
}

/// Current price of `kind` for `player`.
pub fn upgrade_cost(kind: UpgradeKind, player: &Player) -> Option<u64> {
    match kind {
        UpgradeKind::Health => Some(HEALTH_UPGRADE_COST),
        UpgradeKind::Speed => Some(SPEED_UPGRADE_COST),
        UpgradeKind::MultiShot => multi_shot_cost(player.num_shots),
    }
}

/// Apply the effect of `kind` to `player`.
fn apply_upgrade(kind: UpgradeKind, player: &mut Player) {
    match kind {
        UpgradeKind::Health => {
            player.health = player.health.saturating_add(HEALTH_UPGRADE_AMOUNT);
        }
        UpgradeKind::Speed => player.speed += SPEED_UPGRADE_AMOUNT,
        UpgradeKind::MultiShot => player.num_shots = player.num_shots.saturating_add(1),
    }
}

/// The player's score, which doubles as currency.
#[derive(Debug, Clone, Default)]
pub struct Economy {
    score: u64,
}

impl Economy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Credit a kill.
    pub fn award_kill(&mut self) {
        self.score = self.score.saturating_add(KILL_SCORE);
    }

    /// All three prices for the shop display.
    pub fn prices(&self, player: &Player) -> PriceView {
        PriceView {
            health: HEALTH_UPGRADE_COST,
            speed: SPEED_UPGRADE_COST,
            multi_shot: multi_shot_cost(player.num_shots),
        }
    }

    /// Buy one upgrade. On success the score is debited and the cost paid is
    /// returned; on failure nothing changes.
    pub fn purchase(&mut self, kind: UpgradeKind, player: &mut Player) -> CommandResult<u64> {
        let cost = upgrade_cost(kind, player);
        match cost {
            Some(cost) if cost <= self.score => {
                self.score -= cost;
                apply_upgrade(kind, player);
                Ok(cost)
            }
            _ => Err(CommandError::InsufficientFunds {
                cost: cost.unwrap_or(u64::MAX),
                score: self.score,
            }),
        }
    }
}

#[cfg(test)]
impl Economy {
    pub fn with_score(score: u64) -> Self {
        Self { score }
    }
}
