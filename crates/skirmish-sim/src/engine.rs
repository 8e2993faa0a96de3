//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the entity store, processes player commands, runs
//! all systems, and produces `GameStateSnapshot`s. Completely headless, so
//! the whole game can be driven deterministically from tests.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::config::SimConfig;
use skirmish_core::enums::GamePhase;
use skirmish_core::error::{CommandError, CommandResult};
use skirmish_core::events::GameEvent;
use skirmish_core::state::GameStateSnapshot;
use skirmish_core::types::SimTime;

use crate::economy::Economy;
use crate::scheduler::Scheduler;
use crate::store::EntityStore;
use crate::systems;
use crate::systems::player_input::InputState;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::wave_director::WaveState;

/// The simulation engine. Owns the entity store and all session state.
pub struct SimulationEngine {
    config: SimConfig,
    store: EntityStore,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    scheduler: Scheduler,
    waves: WaveState,
    economy: Economy,
    input: InputState,
    final_score: Option<u64>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine with a fresh session.
    pub fn new(config: SimConfig) -> Self {
        let mut store = EntityStore::new();
        store.create_player(config.world_height);
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            store,
            time: SimTime::default(),
            phase: GamePhase::default(),
            command_queue: VecDeque::new(),
            scheduler: Scheduler::new(),
            waves: WaveState::default(),
            economy: Economy::new(),
            input: InputState::default(),
            final_score: None,
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Queued commands are always processed, so `Restart` is honoured after
    /// game over; nothing else runs until then.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase != GamePhase::GameOver {
            self.time.advance();
            self.run_systems();
            self.store.flush();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.store, &self.snapshot_context(), events)
    }

    /// Snapshot of the current state without advancing.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(&self.store, &self.snapshot_context(), Vec::new())
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current wave number; 0 before the first wave.
    pub fn wave(&self) -> u32 {
        self.waves.wave
    }

    pub fn score(&self) -> u64 {
        self.economy.score()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the entity store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Mutable store access (for tests that stage entities).
    #[cfg(test)]
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// Pending deferred actions (for tests).
    #[cfg(test)]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Overwrite the score (for shop tests).
    #[cfg(test)]
    pub fn set_score(&mut self, score: u64) {
        self.economy = Economy::with_score(score);
    }

    /// Place enough player bullets on every active enemy to destroy it on
    /// the next collision pass.
    #[cfg(test)]
    pub fn stage_lethal_volleys(&mut self) {
        use skirmish_core::components::Enemy;
        use skirmish_core::enums::EntityKind;

        let mut targets = Vec::new();
        for kind in [EntityKind::EnemyHeavy, EntityKind::EnemyLight] {
            for (entity, pos, _) in self.store.active_bodies(kind) {
                let health = self
                    .store
                    .world()
                    .get::<&Enemy>(entity)
                    .map(|e| e.health)
                    .unwrap_or(0);
                targets.push((pos, health));
            }
        }
        for (pos, health) in targets {
            for _ in 0..health {
                self.store.spawn_bullet(EntityKind::Player, pos, 0.0);
            }
        }
    }

    fn snapshot_context(&self) -> SnapshotContext<'_> {
        SnapshotContext {
            time: self.time,
            phase: self.phase,
            wave: self.waves.wave,
            economy: &self.economy,
            final_score: self.final_score,
            config: &self.config,
        }
    }

    /// Process all queued commands. Rejections are reported as events.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(command) {
                log::debug!("rejected {}: {err}", command.name());
                self.events.push(GameEvent::CommandRejected {
                    command: command.name().to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> CommandResult<()> {
        match command {
            PlayerCommand::MoveUp { held } => {
                self.input.up_held = held;
                Ok(())
            }
            PlayerCommand::MoveDown { held } => {
                self.input.down_held = held;
                Ok(())
            }
            PlayerCommand::Fire => {
                self.require(command, self.phase.in_wave())?;
                if self.input.fire_pending {
                    return Err(CommandError::FireAlreadyPending);
                }
                self.input.fire_pending = true;
                Ok(())
            }
            PlayerCommand::StartNextWave => {
                self.require(command, self.phase.awaiting_wave())?;
                self.phase = systems::wave_director::start_next_wave(
                    &mut self.waves,
                    &mut self.store,
                    &mut self.scheduler,
                    &mut self.rng,
                    self.time.elapsed_ms,
                    self.config.world_width,
                    &mut self.events,
                );
                Ok(())
            }
            PlayerCommand::PurchaseUpgrade { kind } => {
                self.require(command, self.phase == GamePhase::Cleared)?;
                let economy = &mut self.economy;
                if let Some(result) = self.store.with_player(|player| economy.purchase(kind, player)) {
                    let cost = result?;
                    log::debug!("purchased {} for {cost}", kind.as_str());
                    self.events.push(GameEvent::UpgradePurchased { kind, cost });
                }
                Ok(())
            }
            PlayerCommand::Restart => {
                self.require(command, self.phase == GamePhase::GameOver)?;
                self.restart();
                Ok(())
            }
        }
    }

    fn require(&self, command: PlayerCommand, allowed: bool) -> CommandResult<()> {
        if allowed {
            Ok(())
        } else {
            Err(CommandError::InvalidPhase {
                command: command.name(),
                phase: self.phase,
            })
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now_ms = self.time.elapsed_ms;

        // 1. Deferred group releases
        if self.phase == GamePhase::Spawning {
            self.phase = systems::wave_director::poll(
                &mut self.waves,
                &mut self.store,
                &mut self.scheduler,
                &mut self.rng,
                now_ms,
                self.config.world_width,
                &mut self.events,
            );
        }

        // 2. Movement & AI
        systems::movement::move_bullets(&mut self.store);
        systems::movement::move_player(&mut self.store, self.config.world_height);
        if self.phase.in_wave() {
            systems::movement::move_enemies(&mut self.store);
            systems::enemy_fire::run(&mut self.store, now_ms, &mut self.rng, &mut self.events);
        }

        // 3. Collisions
        let outcome = systems::collision::run(&mut self.store, &mut self.economy, &mut self.events);
        if outcome.player_eliminated {
            self.enter_game_over();
            return;
        }

        // 4. Escapes and stray bullets
        if systems::cleanup::remove_escaped_enemies(&mut self.store, &mut self.events) {
            self.enter_game_over();
            return;
        }
        systems::cleanup::cull_bullets(
            &mut self.store,
            self.config.world_width,
            self.config.world_height,
        );

        // 5. Wave clear
        if systems::wave_director::is_cleared(self.phase, &self.store) {
            self.enter_cleared();
        }

        // 6. Player input
        systems::player_input::run(&mut self.store, &mut self.input, self.phase.in_wave());
    }

    fn enter_cleared(&mut self) {
        self.phase = GamePhase::Cleared;
        systems::player_input::halt(&mut self.store);
        self.events.push(GameEvent::WaveCleared {
            wave: self.waves.wave,
        });
        log::info!(
            "wave {} cleared, score {}",
            self.waves.wave,
            self.economy.score()
        );
    }

    fn enter_game_over(&mut self) {
        let final_score = self.economy.score();
        self.phase = GamePhase::GameOver;
        self.final_score = Some(final_score);
        self.scheduler.clear();
        self.input = InputState::default();
        self.events.push(GameEvent::GameOver {
            final_score,
            wave: self.waves.wave,
        });
        log::info!("game over on wave {} with score {final_score}", self.waves.wave);
    }

    /// Rebuild the session from scratch with the configured seed.
    fn restart(&mut self) {
        self.store.clear();
        self.store.create_player(self.config.world_height);
        self.time = SimTime::default();
        self.phase = GamePhase::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.scheduler.clear();
        self.waves = WaveState::default();
        self.economy = Economy::new();
        self.input = InputState::default();
        self.final_score = None;
        self.events.push(GameEvent::Restarted);
        log::info!("session restarted");
    }
}
