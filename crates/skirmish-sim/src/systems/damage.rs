//! Player damage, shared by every path that costs the player health.

use skirmish_core::enums::DamageCause;
use skirmish_core::events::GameEvent;

use crate::store::EntityStore;

/// Take one point of health from the player and record the hit.
/// Returns true when this hit took the player from positive health to zero.
pub fn damage_player(store: &mut EntityStore, cause: DamageCause, events: &mut Vec<GameEvent>) -> bool {
    let remaining = store.with_player(|player| {
        debug_assert!(player.health > 0, "damaging a player with no health left");
        let before = player.health;
        player.health = player.health.saturating_sub(1);
        (before, player.health)
    });

    match remaining {
        Some((before, after)) => {
            events.push(GameEvent::PlayerHit {
                cause,
                remaining_health: after,
            });
            before > 0 && after == 0
        }
        None => false,
    }
}
