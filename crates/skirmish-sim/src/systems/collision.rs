//! Collision resolver.
//!
//! Detection and resolution are separate passes. `detect` reads positions and
//! returns every overlapping pair as a `Contact`; `resolve` applies them in
//! order. A contact is skipped when either side was destroyed by an earlier
//! contact in the same pass, and resolution stops the moment the player is
//! eliminated.

use hecs::Entity;

use skirmish_core::components::Enemy;
use skirmish_core::enums::{DamageCause, EntityKind};
use skirmish_core::events::GameEvent;

use crate::economy::Economy;
use crate::store::{entity_id, EntityStore};
use crate::systems::damage::damage_player;

/// Which rule a contact falls under. Declaration order is resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// A player bullet overlapping an enemy.
    BulletHitsEnemy,
    /// An enemy bullet overlapping the player.
    BulletHitsPlayer,
    /// An enemy ship overlapping the player.
    EnemyRamsPlayer,
}

/// One overlapping pair found by `detect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub kind: ContactKind,
    /// The bullet, or the ramming enemy.
    pub striker: Entity,
    /// The enemy or player being hit.
    pub target: Entity,
}

/// Aggregate effect of one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub contacts_resolved: u32,
    pub enemies_destroyed: u32,
    pub player_hits: u32,
    pub player_eliminated: bool,
}

/// Find every overlapping pair among active entities.
pub fn detect(store: &EntityStore) -> Vec<Contact> {
    let mut contacts = Vec::new();

    let player_bullets = store.active_bodies(EntityKind::PlayerBullet);
    let enemy_bullets = store.active_bodies(EntityKind::EnemyBullet);
    let mut enemies = store.active_bodies(EntityKind::EnemyHeavy);
    enemies.extend(store.active_bodies(EntityKind::EnemyLight));
    enemies.sort_by_key(|(e, _, _)| e.to_bits());
    let player = store.player().and_then(|p| {
        if !store.is_active(p) {
            return None;
        }
        let pos = store.position(p)?;
        let body = store.body(p)?;
        Some((p, pos, body.bounds))
    });

    for (bullet, bpos, bbox) in &player_bullets {
        for (enemy, epos, ebox) in &enemies {
            if bbox.overlaps(bpos, ebox, epos) {
                contacts.push(Contact {
                    kind: ContactKind::BulletHitsEnemy,
                    striker: *bullet,
                    target: *enemy,
                });
            }
        }
    }

    if let Some((player, ppos, pbox)) = player {
        for (bullet, bpos, bbox) in &enemy_bullets {
            if bbox.overlaps(bpos, &pbox, &ppos) {
                contacts.push(Contact {
                    kind: ContactKind::BulletHitsPlayer,
                    striker: *bullet,
                    target: player,
                });
            }
        }
        for (enemy, epos, ebox) in &enemies {
            if ebox.overlaps(epos, &pbox, &ppos) {
                contacts.push(Contact {
                    kind: ContactKind::EnemyRamsPlayer,
                    striker: *enemy,
                    target: player,
                });
            }
        }
    }

    contacts
}

/// Apply contacts in order.
pub fn resolve(
    store: &mut EntityStore,
    contacts: &[Contact],
    economy: &mut Economy,
    events: &mut Vec<GameEvent>,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for contact in contacts {
        if !store.is_active(contact.striker) || !store.is_active(contact.target) {
            continue;
        }
        outcome.contacts_resolved += 1;

        match contact.kind {
            ContactKind::BulletHitsEnemy => {
                store.destroy(contact.striker);
                if hit_enemy(store, contact.target, events) {
                    economy.award_kill();
                    outcome.enemies_destroyed += 1;
                }
            }
            ContactKind::BulletHitsPlayer => {
                store.destroy(contact.striker);
                outcome.player_hits += 1;
                if damage_player(store, DamageCause::EnemyBullet, events) {
                    outcome.player_eliminated = true;
                    break;
                }
            }
            ContactKind::EnemyRamsPlayer => {
                let kind = store.body(contact.striker).map(|b| b.kind);
                store.destroy(contact.striker);
                if let Some(kind) = kind {
                    events.push(GameEvent::EnemyDestroyed {
                        id: entity_id(contact.striker),
                        kind,
                    });
                }
                outcome.enemies_destroyed += 1;
                outcome.player_hits += 1;
                if damage_player(store, DamageCause::BodyCollision, events) {
                    outcome.player_eliminated = true;
                    break;
                }
            }
        }
    }

    log::trace!(
        "collision: {} contacts, {} resolved",
        contacts.len(),
        outcome.contacts_resolved
    );
    outcome
}

/// Detect and resolve in one call.
pub fn run(store: &mut EntityStore, economy: &mut Economy, events: &mut Vec<GameEvent>) -> CollisionOutcome {
    let contacts = detect(store);
    resolve(store, &contacts, economy, events)
}

/// Take one point of health from an enemy. Returns true if it was destroyed.
fn hit_enemy(store: &mut EntityStore, enemy: Entity, events: &mut Vec<GameEvent>) -> bool {
    let Some(kind) = store.body(enemy).map(|b| b.kind) else {
        return false;
    };
    let remaining = match store.world().get::<&mut Enemy>(enemy) {
        Ok(mut e) => {
            debug_assert!(e.health > 0, "hitting an enemy with no health left");
            e.health = e.health.saturating_sub(1);
            e.health
        }
        Err(_) => return false,
    };

    let id = entity_id(enemy);
    if remaining == 0 {
        store.destroy(enemy);
        events.push(GameEvent::EnemyDestroyed { id, kind });
        true
    } else {
        events.push(GameEvent::EnemyDamaged {
            id,
            remaining_health: remaining,
        });
        false
    }
}
