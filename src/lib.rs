//! Nebula Strike Server Library
//!
//! Authoritative, deterministic simulation core for a cooperative
//! vertical-scrolling arcade shooter, plus a host runner that drives it
//! at a fixed tick rate.
//!
//! The simulation is a pure function of its seed and the timeline of
//! player actions: any host replaying the same inputs computes the same
//! state, so the runner only ever has to ship inputs and occasional
//! snapshots.

pub mod config;
pub mod game;
pub mod util;
