//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs ECS world through the entity store, runs systems at a
//! fixed tick, and produces GameStateSnapshots for the presentation layer.

pub mod economy;
pub mod engine;
pub mod scheduler;
pub mod store;
pub mod systems;

pub use engine::SimulationEngine;
pub use skirmish_core as core;
