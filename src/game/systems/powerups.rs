//! Power-up drops, drift, and pickup
//!
//! Drops fire on wave clear only; the gate and the type roll use ambient
//! randomness - the drop economy is tuning, not replay-critical
//! composition, and spending seeded draws here would shift the enemy
//! sequence.

use rand::Rng;

use crate::game::constants::{particle, powerup, view};
use crate::game::state::{
    EntityId, EventKind, GameState, GameTime, ParticleKind, PowerUpKind, POWER_UP_KINDS,
};
use crate::game::systems::particles;
use crate::util::vec2::{circles_overlap, Vec2};

/// Advance all power-ups and resolve pickups
///
/// Only one player may claim a given power-up: first match in roster
/// order wins.
pub fn update(state: &mut GameState, _now: GameTime) {
    let ids: Vec<EntityId> = state.power_ups.iter().map(|p| p.id).collect();

    for id in ids {
        let Some(index) = state.power_ups.iter().position(|p| p.id == id) else {
            continue;
        };

        state.power_ups[index].position.y += powerup::DRIFT_SPEED;
        if state.power_ups[index].position.y > view::HEIGHT {
            state.power_ups.remove(index);
            continue;
        }

        let pu_pos = state.power_ups[index].position;
        let pu_radius = state.power_ups[index].radius;
        let claimed = state
            .players
            .iter()
            .position(|p| circles_overlap(p.position, p.radius, pu_pos, pu_radius));

        if let Some(player_index) = claimed {
            let collected = state.power_ups.remove(index);
            apply_effect(state, player_index, collected.kind);
            particles::spray(
                state,
                ParticleKind::Star3,
                collected.position,
                particle::BURST_SMALL,
            );
            let who = state.players[player_index].player_id;
            state.push_event(EventKind::Collect, Some(who));
        }
    }
}

fn apply_effect(state: &mut GameState, player_index: usize, kind: PowerUpKind) {
    let p = &mut state.players[player_index];
    match kind {
        PowerUpKind::DoubleShot => p.shots = 2,
        PowerUpKind::FastFire => p.fire_interval = powerup::FAST_FIRE_INTERVAL_MS,
        PowerUpKind::Health => p.health = (p.health + 1).min(p.max_health),
        PowerUpKind::Shield => p.max_health = powerup::SHIELD_MAX_HEALTH,
        PowerUpKind::Speed => p.move_modifier = 1.0,
    }
}

/// Probabilistic drop at a cleared wave's last casualty
///
/// The skip chance loosens as phases climb: 80% below phase 3, 50% below
/// phase 10, 30% after that.
pub fn spawn_drop(state: &mut GameState, position: Vec2) {
    let skip_chance = if state.phase < 3 {
        0.8
    } else if state.phase < 10 {
        0.5
    } else {
        0.3
    };

    let mut rng = rand::thread_rng();
    if rng.gen::<f64>() < skip_chance {
        return;
    }

    let kind = POWER_UP_KINDS[rng.gen_range(0..POWER_UP_KINDS.len())];
    state.spawn_power_up(position, kind);
    tracing::debug!(?kind, "power-up dropped");
}
