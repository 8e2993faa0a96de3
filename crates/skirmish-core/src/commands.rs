//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::UpgradeKind;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Held movement state ---
    /// Up key pressed (`held: true`) or released (`held: false`).
    MoveUp { held: bool },
    /// Down key pressed or released.
    MoveDown { held: bool },

    // --- Edge-triggered actions ---
    /// Fire one fan-out volley.
    Fire,
    /// Start the next wave. Only valid while idle.
    StartNextWave,
    /// Buy an upgrade. Only valid while the shop is open.
    PurchaseUpgrade { kind: UpgradeKind },
    /// Reset the whole session. Only valid after game over.
    Restart,
}

impl PlayerCommand {
    /// Short name used in logs and rejection events.
    pub fn name(&self) -> &'static str {
        match self {
            PlayerCommand::MoveUp { .. } => "move_up",
            PlayerCommand::MoveDown { .. } => "move_down",
            PlayerCommand::Fire => "fire",
            PlayerCommand::StartNextWave => "start_next_wave",
            PlayerCommand::PurchaseUpgrade { .. } => "purchase_upgrade",
            PlayerCommand::Restart => "restart",
        }
    }
}
