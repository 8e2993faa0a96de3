//! Driver for the SKIRMISH simulation: configuration, the paced game-loop
//! thread, the autopilot input source and the run summary.

pub mod game_loop;
pub mod pilot;
pub mod runner;
pub mod settings;
pub mod state;
