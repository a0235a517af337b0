//! Difficulty phase controller
//!
//! Phases advance without bound: when a spawn request finds the quota
//! exhausted it starts the next phase instead of spawning. Each phase
//! opens with an intro countdown during which spawning and enemy
//! advancement are gated.

use serde::{Deserialize, Serialize};

use crate::game::constants::phase::*;
use crate::game::state::{GameState, GameTime};

/// Flavor banner lines, cycled by phase index
pub const MESSAGES: [&str; 13] = [
    "All your base are belong to us",
    "Nuke from orbit only way to be sure",
    "Someone set up us the bomb",
    "I'll be back",
    "You have no chance to survive, make your time",
    "Do. Or do not. There is no try",
    "We are an impossibility in an impossible universe",
    "You are on the way to destruction",
    "Dead or alive, you're coming with me!",
    "For great justice",
    "Khaaaaaaaaan!",
    "Take off every zig!!",
    "By Grabthar's hammer, by the suns of Worvan, you shall be avenged",
];

/// Derived parameters of the current phase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseInfo {
    /// Gap between enemy spawn requests, in ms
    pub enemy_interval: i64,
    /// Gap between rock spawns, in ms
    pub rock_interval: i64,
    /// How long a bomber sits at its bombing point, in ms
    pub bomber_pause: i64,
    /// Multiplier on enemy path speed
    pub speed_modifier: f32,
    /// Remaining enemy quota; hitting zero ends the phase
    pub enemy_count: i32,
    /// Intro banner text
    pub message: String,
}

/// Compute the parameters for a 1-based phase number
pub fn create_phase(number: u32) -> PhaseInfo {
    let i = number.saturating_sub(1) as i64;

    PhaseInfo {
        enemy_interval: (ENEMY_INTERVAL_BASE_MS - i * ENEMY_INTERVAL_STEP_MS)
            .max(ENEMY_INTERVAL_MIN_MS),
        rock_interval: (ROCK_INTERVAL_BASE_MS - i * ROCK_INTERVAL_STEP_MS).max(0),
        bomber_pause: (BOMBER_PAUSE_BASE_MS - i * BOMBER_PAUSE_STEP_MS).max(0),
        speed_modifier: (1.0 + i as f32 * 0.01).max(1.5),
        enemy_count: ENEMY_COUNT_BASE + i as i32 * ENEMY_COUNT_STEP,
        message: MESSAGES[i as usize % MESSAGES.len()].to_string(),
    }
}

/// Advance to the next phase and open its intro countdown
pub fn start_phase(state: &mut GameState, now: GameTime) {
    state.phase += 1;
    state.phase_start = now + START_TIME_MS;
    state.phase_info = create_phase(state.phase);

    tracing::debug!(
        phase = state.phase,
        enemy_count = state.phase_info.enemy_count,
        enemy_interval = state.phase_info.enemy_interval,
        "phase started"
    );
}

/// Whether the intro banner is still up and spawning is gated
pub fn in_intro(state: &GameState, now: GameTime) -> bool {
    state.phase_start > now
}
