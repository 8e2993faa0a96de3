//! Cleanup: enemies that slip past the left edge, and bullets that leave
//! the world.

use hecs::Entity;

use skirmish_core::components::Body;
use skirmish_core::constants::LIGHT_SPAWN_MARGIN;
use skirmish_core::enums::{DamageCause, EntityKind};
use skirmish_core::events::GameEvent;
use skirmish_core::types::{Position, Velocity};

use crate::store::{bounds_for, entity_id, EntityStore};
use crate::systems::damage::damage_player;

/// Remove enemies whose box has fully passed the left edge. Each one costs
/// the player a point of health. Returns true if that eliminated the player;
/// remaining escapes are then left for a tick that never comes.
pub fn remove_escaped_enemies(store: &mut EntityStore, events: &mut Vec<GameEvent>) -> bool {
    let mut eliminated = false;
    for kind in [EntityKind::EnemyHeavy, EntityKind::EnemyLight] {
        store.for_each_active(kind, |store, enemy| {
            if eliminated {
                return;
            }
            let escaped = match (store.position(enemy), store.body(enemy)) {
                (Some(pos), Some(body)) => pos.x + body.bounds.width < 0.0,
                _ => false,
            };
            if !escaped || !store.destroy(enemy) {
                return;
            }
            events.push(GameEvent::EnemyEscaped {
                id: entity_id(enemy),
                kind,
            });
            eliminated = damage_player(store, DamageCause::EnemyEscaped, events);
        });
        if eliminated {
            break;
        }
    }
    eliminated
}

/// Right-hand x beyond which nothing can ever be hit: the far edge of an
/// enemy at the rearmost spawn column.
pub fn right_cull_edge(world_width: f64) -> f64 {
    world_width + LIGHT_SPAWN_MARGIN + bounds_for(EntityKind::EnemyLight).half_width()
}

/// Destroy bullets that can never hit anything again: outside the world
/// vertically, past the left edge heading left, or heading right beyond the
/// rearmost enemy spawn column. Bullets travelling through the off-screen
/// spawn area stay live, so enemies can be shot before they scroll in.
/// Returns the number culled.
pub fn cull_bullets(store: &mut EntityStore, world_width: f64, world_height: f64) -> usize {
    let right_edge = right_cull_edge(world_width);
    let mut strays: Vec<Entity> = Vec::new();
    for (entity, (pos, vel, body)) in store
        .world()
        .query::<(&Position, &Velocity, &Body)>()
        .iter()
    {
        if !body.active || !body.kind.is_bullet() {
            continue;
        }
        let hw = body.bounds.half_width();
        let hh = body.bounds.half_height();
        let gone = pos.y + hh < 0.0
            || pos.y - hh > world_height
            || (pos.x - hw > right_edge && vel.x >= 0.0)
            || (pos.x + hw < 0.0 && vel.x <= 0.0);
        if gone {
            strays.push(entity);
        }
    }

    strays.into_iter().filter(|e| store.destroy(*e)).count()
}
