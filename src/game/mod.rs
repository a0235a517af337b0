//! Deterministic fixed-tick simulation core
//!
//! Everything in this tree is synchronous and host-driven: the runner
//! hands in a millisecond clock and the pending player actions, and one
//! [`game_loop::step`] advances the world by exactly one tick. Given the
//! same seed and the same action timeline, two hosts compute identical
//! states.

pub mod actions;
pub mod constants;
pub mod game_loop;
pub mod paths;
pub mod phase;
pub mod rng;
pub mod spawner;
pub mod state;
pub mod systems;
