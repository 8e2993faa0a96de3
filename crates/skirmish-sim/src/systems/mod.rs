//! Systems that operate on the entity store each tick.
//!
//! Systems are free functions over `&mut EntityStore` (or `&EntityStore` for
//! read-only work). They hold no state of their own.

pub mod cleanup;
pub mod collision;
pub mod damage;
pub mod enemy_fire;
pub mod movement;
pub mod player_input;
pub mod snapshot;
pub mod wave_director;
