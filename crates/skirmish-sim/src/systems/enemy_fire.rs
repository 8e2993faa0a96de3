//! Enemy fire: shooting enemies fire on a randomized cadence.

use hecs::Entity;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{Body, Enemy, FireTimer};
use skirmish_core::constants::{ENEMY_BULLET_SPEED, ENEMY_MUZZLE_OFFSET, REFIRE_DELAY_MS};
use skirmish_core::enums::EntityKind;
use skirmish_core::events::GameEvent;
use skirmish_core::types::Position;

use crate::store::{entity_id, EntityStore};

/// Fire every light enemy whose delay has elapsed, then redraw its delay.
pub fn run(store: &mut EntityStore, now_ms: f64, rng: &mut ChaCha8Rng, events: &mut Vec<GameEvent>) {
    let mut shooters: Vec<(Entity, Position)> = Vec::new();

    for (entity, (pos, body, enemy, timer)) in store
        .world_mut()
        .query_mut::<(&Position, &Body, &Enemy, &FireTimer)>()
    {
        if !body.active || !enemy.can_shoot || body.kind != EntityKind::EnemyLight {
            continue;
        }
        if now_ms - timer.last_shot_ms > timer.next_shot_delay_ms {
            shooters.push((entity, *pos));
        }
    }

    // Query order follows archetype layout; sort so rng draws are stable.
    shooters.sort_by_key(|(e, _)| e.to_bits());

    for (entity, pos) in shooters {
        if let Ok(mut timer) = store.world().get::<&mut FireTimer>(entity) {
            timer.last_shot_ms = now_ms;
            timer.next_shot_delay_ms = rng.gen_range(REFIRE_DELAY_MS.0..REFIRE_DELAY_MS.1);
        }
        store.spawn_bullet(
            EntityKind::EnemyLight,
            pos.offset(-ENEMY_MUZZLE_OFFSET, 0.0),
            ENEMY_BULLET_SPEED,
        );
        events.push(GameEvent::EnemyFired { id: entity_id(entity) });
    }
}
