//! Game loop thread: runs the simulation engine at a paced tick rate and
//! publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for
//! ownership. Commands arrive via `mpsc` channel. Snapshots are stored in
//! shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use skirmish_core::config::SimConfig;
use skirmish_core::state::GameStateSnapshot;
use skirmish_sim::engine::SimulationEngine;

use crate::state::{GameLoopCommand, LoopHandle};

/// Wall-clock duration of one tick at `tick_rate_hz`, sped up by `time_scale`.
pub fn tick_duration(tick_rate_hz: u32, time_scale: f64) -> Duration {
    let nominal = Duration::from_nanos(1_000_000_000 / u64::from(tick_rate_hz.max(1)));
    if time_scale > 0.001 {
        nominal.div_f64(time_scale)
    } else {
        nominal
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    config: SimConfig,
    tick_rate_hz: u32,
    time_scale: f64,
) -> std::io::Result<LoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);
    let tick = tick_duration(tick_rate_hz, time_scale);

    let thread = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(config);
            run_game_loop(engine, cmd_rx, &shared, tick);
        })?;

    Ok(LoopHandle {
        command_tx: cmd_tx,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    tick: Duration,
) {
    let mut next_tick_time = Instant::now();
    log::debug!("game loop started, {tick:?} per tick");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (the engine freezes itself on game over)
        let snapshot = engine.tick();

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += tick;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::commands::PlayerCommand;
    use skirmish_core::enums::GamePhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartNextWave))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Fire))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartNextWave)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Fire)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration() {
        // 60Hz = 16.666ms per tick
        assert_eq!(tick_duration(60, 1.0).as_nanos(), 1_000_000_000u128 / 60);
        let doubled = tick_duration(60, 2.0).as_secs_f64();
        assert!((doubled - tick_duration(120, 1.0).as_secs_f64()).abs() < 1e-8);
        assert_eq!(tick_duration(60, 0.0), tick_duration(60, 1.0));
    }

    #[test]
    fn test_loop_runs_commands_and_shuts_down() {
        let handle = spawn_game_loop(SimConfig::default(), 60, 20.0).unwrap();
        assert!(handle.send(PlayerCommand::StartNextWave));

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut started = false;
        while Instant::now() < deadline {
            if let Some(snap) = handle.latest() {
                if snap.wave == 1 {
                    assert!(matches!(snap.phase, GamePhase::Active | GamePhase::Spawning));
                    started = true;
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(started, "game loop never processed StartNextWave");
        handle.shutdown().unwrap();
    }

    #[test]
    fn test_loop_exits_when_sender_dropped() {
        let handle = spawn_game_loop(SimConfig::default(), 60, 10.0).unwrap();
        let LoopHandle {
            command_tx, thread, ..
        } = handle;
        drop(command_tx);
        thread.join().unwrap();
    }
}
