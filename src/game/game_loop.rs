//! Fixed-tick driver
//!
//! One call to [`step`] applies the pending actions and advances the
//! simulation by exactly one tick. Pass order is part of the deterministic
//! contract and must not be reordered:
//!
//! 1. clear last tick's events
//! 2. particles
//! 3. stop if the roster is empty
//! 4. players (persistence, movement, firing)
//! 5. power-ups
//! 6. bullets
//! 7. rocks
//! 8. stop if the phase intro is still up
//! 9. spawn scheduling (enemies, then rocks)
//! 10. enemies

use crate::game::actions::{self, ActionMessage};
use crate::game::phase;
use crate::game::spawner;
use crate::game::state::{GameState, GameTime};
use crate::game::systems::{bullets, enemies, particles, players, powerups, rocks};

/// Apply pending actions, then advance one tick
pub fn step(
    state: &mut GameState,
    now: GameTime,
    pending: impl IntoIterator<Item = ActionMessage>,
    max_players: usize,
) {
    for msg in pending {
        actions::apply(state, now, msg, max_players);
    }
    update(state, now);
}

/// Advance the simulation by one tick at host time `now`
pub fn update(state: &mut GameState, now: GameTime) {
    state.events.clear();

    particles::update(state);

    // an empty roster idles: particles fade out, nothing else moves
    if state.players.is_empty() {
        return;
    }

    players::update(state, now);
    powerups::update(state, now);
    bullets::update(state, now);
    rocks::update(state, now);

    if phase::in_intro(state, now) {
        return;
    }

    if now - state.last_enemy > state.phase_info.enemy_interval {
        // the spawner's offset pulls the next check forward after a bomber
        state.last_enemy = now - spawner::spawn_enemy(state, now);
    }

    if now - state.last_rock > state.phase_info.rock_interval {
        spawner::spawn_rock(state);
        state.last_rock = now;
    }

    enemies::update(state, now);
}
