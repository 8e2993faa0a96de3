//! Kinematic integration.
//!
//! Every tick advances by the fixed delta regardless of wall-clock time.

use skirmish_core::components::{Body, Enemy, Player, Projectile};
use skirmish_core::constants::{FIXED_DT_SECS, OSCILLATION_AMPLITUDE, OSCILLATION_WAVELENGTH};
use skirmish_core::types::{Position, Velocity};

use crate::store::EntityStore;

/// Drift enemies leftward along a sine path around their spawn row.
pub fn move_enemies(store: &mut EntityStore) {
    for (_entity, (pos, body, enemy)) in store
        .world_mut()
        .query_mut::<(&mut Position, &Body, &Enemy)>()
    {
        if !body.active {
            continue;
        }
        pos.x -= enemy.speed * FIXED_DT_SECS;
        pos.y = enemy.start_y + OSCILLATION_AMPLITUDE * (pos.x / OSCILLATION_WAVELENGTH).sin();
    }
}

/// Bullets travel along x only.
pub fn move_bullets(store: &mut EntityStore) {
    for (_entity, (pos, vel, body, _projectile)) in store
        .world_mut()
        .query_mut::<(&mut Position, &Velocity, &Body, &Projectile)>()
    {
        if !body.active {
            continue;
        }
        pos.x += vel.x * FIXED_DT_SECS;
    }
}

/// Move the player vertically, keeping its box inside the world.
pub fn move_player(store: &mut EntityStore, world_height: f64) {
    for (_entity, (pos, vel, body, _player)) in store
        .world_mut()
        .query_mut::<(&mut Position, &Velocity, &Body, &Player)>()
    {
        if !body.active {
            continue;
        }
        let half = body.bounds.half_height();
        let max_y = (world_height - half).max(half);
        pos.y = (pos.y + vel.y * FIXED_DT_SECS).clamp(half, max_y);
    }
}
