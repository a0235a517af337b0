//! Player pass: persistence, movement, firing, gun heat, damage
//!
//! Runs early in the tick so player positions are settled before any
//! collision pass reads them.

use crate::game::constants::{bullet, particle, player, view};
use crate::game::state::{EntityId, EventKind, GameEvent, GameState, GameTime, ParticleKind};
use crate::game::systems::particles;
use crate::util::vec2::Vec2;

/// Advance every player: best-run bookkeeping, movement, fire control
pub fn update(state: &mut GameState, now: GameTime) {
    let phase = state.phase;
    let mut shots: Vec<(EntityId, u32, Vec2)> = Vec::new();

    for p in state.players.iter_mut() {
        // persistence bridge: overwrite the best-run record when beaten.
        // Records are host-allocated; absent entries are left alone.
        if let Some(record) = state.persisted.get_mut(&p.player_id) {
            if record.best_score < p.score {
                record.best_score = p.score;
                record.best_phase = phase;
            }
        }

        p.position += Vec2::new(p.controls.x, p.controls.y) * (player::MOVE_SPEED * p.move_modifier);
        p.position = p.position.clamp_to_bounds(view::WIDTH, view::HEIGHT);

        // an overheated gun fires at half rate
        let cooldown = p.fire_interval * if p.gun_temp > player::GUN_TEMP_HOT { 2 } else { 1 };
        if p.controls.fire && now - p.last_fire > cooldown {
            if p.shots == 2 {
                shots.push((
                    p.id,
                    p.index,
                    p.position + Vec2::new(-bullet::DOUBLE_SHOT_OFFSET, bullet::MUZZLE_Y_OFFSET),
                ));
                shots.push((
                    p.id,
                    p.index,
                    p.position + Vec2::new(bullet::DOUBLE_SHOT_OFFSET, bullet::MUZZLE_Y_OFFSET),
                ));
                p.gun_temp += 2.0 * player::GUN_TEMP_PER_SHOT;
            } else {
                shots.push((p.id, p.index, p.position));
                p.gun_temp += player::GUN_TEMP_PER_SHOT;
            }
            p.gun_temp = p.gun_temp.min(1.0);
            p.last_fire = now;
            state.events.push(GameEvent {
                kind: EventKind::Fire,
                who: Some(p.player_id),
            });
        }

        if !p.controls.fire {
            p.gun_temp = (p.gun_temp - player::GUN_TEMP_COOL_DOWN).max(0.0);
        }
    }

    for (owner, owner_index, position) in shots {
        state.spawn_player_bullet(position, owner, owner_index);
    }
}

/// Apply one point of damage to a player, honoring the shared grace window
///
/// Within 3000 ms of the previous hit nothing happens, which keeps a ship
/// overlapping several hazards in one tick from losing its whole bar.
pub fn take_damage(state: &mut GameState, now: GameTime, player_entity: EntityId) {
    let Some(index) = state.players.iter().position(|p| p.id == player_entity) else {
        return;
    };

    let p = &mut state.players[index];
    if now - p.last_hit <= player::HIT_GRACE_MS {
        return;
    }
    p.health -= 1;
    p.last_hit = now;

    if p.health <= 0 {
        let dead = state.players.remove(index);
        particles::spray(
            state,
            ParticleKind::Star2,
            dead.position,
            particle::BURST_PLAYER_DEATH,
        );
        state.push_event(EventKind::Die, Some(dead.player_id));
    } else {
        let who = p.player_id;
        state.push_event(EventKind::Hit, Some(who));
    }
}
