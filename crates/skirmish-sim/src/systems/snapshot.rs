//! Snapshot system: projects the store into a `GameStateSnapshot`.
//!
//! Read-only; never modifies the store.

use skirmish_core::config::SimConfig;
use skirmish_core::enums::{EntityKind, GamePhase};
use skirmish_core::events::GameEvent;
use skirmish_core::state::*;
use skirmish_core::types::SimTime;

use crate::economy::Economy;
use crate::store::{entity_id, EntityStore};

/// Everything outside the store that a snapshot reports.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: u32,
    pub economy: &'a Economy,
    pub final_score: Option<u64>,
    pub config: &'a SimConfig,
}

/// Build a complete snapshot of the current state.
pub fn build_snapshot(
    store: &EntityStore,
    ctx: &SnapshotContext<'_>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let player = build_player(store);
    let prices = store
        .player_state()
        .map(|p| ctx.economy.prices(&p))
        .unwrap_or_default();

    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        wave: ctx.wave,
        score: ctx.economy.score(),
        player,
        entities: build_entities(store),
        prices,
        shop_open: ctx.phase == GamePhase::Cleared,
        game_over: ctx.phase == GamePhase::GameOver,
        final_score: ctx.final_score,
        world: WorldView {
            width: ctx.config.world_width,
            height: ctx.config.world_height,
        },
        events,
    }
}

fn build_player(store: &EntityStore) -> PlayerView {
    let Some(entity) = store.player() else {
        return PlayerView::default();
    };
    let stats = store.player_state();
    PlayerView {
        id: entity_id(entity),
        position: store.position(entity).unwrap_or_default(),
        bounds: store.body(entity).map(|b| b.bounds).unwrap_or_default(),
        health: stats.as_ref().map(|p| p.health).unwrap_or(0),
        speed: stats.as_ref().map(|p| p.speed).unwrap_or(0.0),
        num_shots: stats.as_ref().map(|p| p.num_shots).unwrap_or(0),
    }
}

fn build_entities(store: &EntityStore) -> Vec<EntityView> {
    let mut entities: Vec<EntityView> = [
        EntityKind::EnemyHeavy,
        EntityKind::EnemyLight,
        EntityKind::PlayerBullet,
        EntityKind::EnemyBullet,
    ]
    .into_iter()
    .flat_map(|kind| {
        store
            .active_bodies(kind)
            .into_iter()
            .map(move |(entity, position, bounds)| EntityView {
                id: entity_id(entity),
                kind,
                position,
                bounds,
            })
    })
    .collect();
    entities.sort_by_key(|e| e.id);
    entities
}
