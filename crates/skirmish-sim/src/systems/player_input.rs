//! Player input: held movement keys and the fire trigger.

use skirmish_core::components::Player;
use skirmish_core::constants::{FAN_OUT_SPACING, PLAYER_BULLET_SPEED, PLAYER_MUZZLE_OFFSET};
use skirmish_core::enums::EntityKind;
use skirmish_core::types::{Position, Velocity};

use crate::store::EntityStore;

/// Input latched from commands, consumed by `run`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up_held: bool,
    pub down_held: bool,
    /// Set by a fire command, cleared once the volley is spawned.
    pub fire_pending: bool,
}

impl InputState {
    /// Signed direction of travel: up wins when both keys are held.
    pub fn direction(&self) -> f64 {
        if self.up_held {
            -1.0
        } else if self.down_held {
            1.0
        } else {
            0.0
        }
    }
}

/// Vertical offsets of a fan-out volley of `num_shots` bullets, centred on
/// the ship.
pub fn fan_out_offsets(num_shots: u32) -> Vec<f64> {
    let n = num_shots as f64;
    let first = -(n - 1.0) * FAN_OUT_SPACING / 2.0;
    (0..num_shots)
        .map(|i| first + i as f64 * FAN_OUT_SPACING)
        .collect()
}

/// Apply latched input. Outside a wave the ship is held still and a pending
/// shot is dropped.
pub fn run(store: &mut EntityStore, input: &mut InputState, in_wave: bool) -> usize {
    let fire = std::mem::take(&mut input.fire_pending);
    let Some(player) = store.player() else {
        return 0;
    };
    let Some(stats) = store.player_state() else {
        return 0;
    };

    let vy = if in_wave { input.direction() * stats.speed } else { 0.0 };
    if let Ok(mut vel) = store.world().get::<&mut Velocity>(player) {
        vel.y = vy;
    }

    if in_wave && fire {
        match store.position(player) {
            Some(origin) => fire_volley(store, origin, &stats),
            None => 0,
        }
    } else {
        0
    }
}

/// Zero the player's velocity.
pub fn halt(store: &mut EntityStore) {
    if let Some(player) = store.player() {
        if let Ok(mut vel) = store.world().get::<&mut Velocity>(player) {
            *vel = Velocity::default();
        }
    }
}

/// Spawn one volley from `origin`. Returns the number of bullets fired.
fn fire_volley(store: &mut EntityStore, origin: Position, stats: &Player) -> usize {
    let offsets = fan_out_offsets(stats.num_shots);
    for dy in &offsets {
        store.spawn_bullet(
            EntityKind::Player,
            origin.offset(PLAYER_MUZZLE_OFFSET, *dy),
            PLAYER_BULLET_SPEED,
        );
    }
    offsets.len()
}
