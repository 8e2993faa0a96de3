//! Wave director: starts waves, releases enemy groups on schedule, and
//! decides when a wave is over.
//!
//! Wave N is N groups of ten. The first group is released as the wave
//! starts; the rest go on the scheduler at fixed intervals. The wave stays
//! in `Spawning` until its last group is out, so it can only be cleared
//! from `Active`.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use skirmish_core::constants::*;
use skirmish_core::enums::{EntityKind, GamePhase};
use skirmish_core::events::GameEvent;
use skirmish_core::types::Position;

use crate::scheduler::{DeferredAction, Scheduler};
use crate::store::EntityStore;

/// Progress of the current wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveState {
    /// Current wave number; 0 before the first wave.
    pub wave: u32,
    /// Groups this wave will release.
    pub groups_total: u32,
    /// Groups released so far.
    pub groups_released: u32,
}

impl WaveState {
    pub fn all_released(&self) -> bool {
        self.groups_released >= self.groups_total
    }

    /// Phase the wave is in while it is running.
    fn running_phase(&self) -> GamePhase {
        if self.all_released() {
            GamePhase::Active
        } else {
            GamePhase::Spawning
        }
    }
}

/// Spawn positions of one group: five heavies in front, five lights behind.
pub fn group_layout(world_width: f64) -> Vec<(EntityKind, Position)> {
    let mut layout = Vec::with_capacity(GROUP_ROWS as usize * 2);
    for row in 0..GROUP_ROWS {
        let y = GROUP_START_Y + GROUP_ROW_SPACING * row as f64;
        layout.push((
            EntityKind::EnemyHeavy,
            Position::new(world_width + HEAVY_SPAWN_MARGIN, y),
        ));
    }
    for row in 0..GROUP_ROWS {
        let y = GROUP_START_Y + GROUP_ROW_SPACING * row as f64;
        layout.push((
            EntityKind::EnemyLight,
            Position::new(world_width + LIGHT_SPAWN_MARGIN, y),
        ));
    }
    layout
}

/// Begin the next wave. Returns the phase the game is now in.
pub fn start_next_wave(
    state: &mut WaveState,
    store: &mut EntityStore,
    scheduler: &mut Scheduler,
    rng: &mut ChaCha8Rng,
    now_ms: f64,
    world_width: f64,
    events: &mut Vec<GameEvent>,
) -> GamePhase {
    state.wave += 1;
    state.groups_total = state.wave;
    state.groups_released = 0;
    events.push(GameEvent::WaveStarted { wave: state.wave });
    log::info!("wave {} started ({} groups)", state.wave, state.groups_total);

    release_group(state, store, rng, now_ms, world_width, events);
    for group in 1..state.groups_total {
        scheduler.schedule(
            now_ms + GROUP_SPAWN_INTERVAL_MS * group as f64,
            DeferredAction::ReleaseGroup {
                wave: state.wave,
                group,
            },
        );
    }
    state.running_phase()
}

/// Release every group whose time has come. Returns the phase the game is
/// now in; actions left over from an earlier wave are dropped.
pub fn poll(
    state: &mut WaveState,
    store: &mut EntityStore,
    scheduler: &mut Scheduler,
    rng: &mut ChaCha8Rng,
    now_ms: f64,
    world_width: f64,
    events: &mut Vec<GameEvent>,
) -> GamePhase {
    for action in scheduler.pop_due(now_ms) {
        match action {
            DeferredAction::ReleaseGroup { wave, .. } if wave == state.wave => {
                release_group(state, store, rng, now_ms, world_width, events);
            }
            DeferredAction::ReleaseGroup { wave, group } => {
                log::warn!("dropping stale release of wave {wave} group {group}");
            }
        }
    }
    state.running_phase()
}

/// True when an active wave has no enemies left.
pub fn is_cleared(phase: GamePhase, store: &EntityStore) -> bool {
    phase == GamePhase::Active && store.count_active_enemies() == 0
}

fn release_group(
    state: &mut WaveState,
    store: &mut EntityStore,
    rng: &mut ChaCha8Rng,
    now_ms: f64,
    world_width: f64,
    events: &mut Vec<GameEvent>,
) {
    for (kind, position) in group_layout(world_width) {
        store.spawn_enemy(kind, position, now_ms, rng);
    }
    let group = state.groups_released;
    state.groups_released += 1;
    events.push(GameEvent::GroupReleased {
        wave: state.wave,
        group,
    });
    log::debug!(
        "wave {} group {} released at {now_ms}ms",
        state.wave,
        group
    );
}
