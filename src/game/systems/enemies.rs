//! Enemy pass: bullet damage, contact damage, bomber fire, path motion
//!
//! Enemies follow waypoint paths with a sinusoidal bow perpendicular to
//! each segment. Reaching the final waypoint despawns the enemy silently;
//! only destruction produces an explosion.

use crate::game::constants::{enemy, particle};
use crate::game::state::{BulletKind, EntityId, EventKind, GameState, GameTime, ParticleKind};
use crate::game::systems::{bullets, particles, players, powerups};
use crate::util::vec2::{circles_overlap, Vec2};

/// Advance every enemy and resolve its collisions for this tick
pub fn update(state: &mut GameState, now: GameTime) {
    let ids: Vec<EntityId> = state.enemies.iter().map(|e| e.id).collect();

    for id in ids {
        let Some(e) = state.enemy_by_id(id) else {
            continue;
        };
        let e_pos = e.position;
        let e_radius = e.radius;
        let e_last_hit = e.last_hit;

        // every overlapping player bullet lands: one point of damage each,
        // all of them consumed even if an early one is the kill
        let hit_bullets: Vec<EntityId> = state
            .bullets
            .iter()
            .filter(|b| {
                b.kind == BulletKind::Player
                    && circles_overlap(b.position, b.radius, e_pos, e_radius)
            })
            .map(|b| b.id)
            .collect();

        for bullet_id in hit_bullets {
            damage(state, now, id, Some(bullet_id));
        }
        if state.enemy_by_id(id).is_none() {
            continue;
        }

        // ramming exchange, gated once by the enemy's own grace window;
        // every overlapping player is hurt, and each costs the enemy a hit
        if now - e_last_hit > enemy::HIT_GRACE_MS {
            let rammed: Vec<EntityId> = state
                .players
                .iter()
                .filter(|p| circles_overlap(p.position, p.radius, e_pos, e_radius))
                .map(|p| p.id)
                .collect();

            for player_entity in rammed {
                damage(state, now, id, None);
                players::take_damage(state, now, player_entity);
            }
            if state.enemy_by_id(id).is_none() {
                continue;
            }
        }

        let fire_from = {
            let Some(e) = state.enemy_by_id_mut(id) else {
                continue;
            };
            if e.shoot && e.needs_shoot && e.wait_until - now < enemy::SHOOT_WINDOW_MS {
                e.needs_shoot = false;
                Some(e.position)
            } else {
                None
            }
        };
        if let Some(origin) = fire_from {
            let count = state.bomber_spray_count();
            bullets::radial_spray(state, origin, count);
        }

        advance_along_path(state, now, id);
    }
}

/// Move an enemy along its current path segment
///
/// Progress is normalized per segment; the visual position bows away from
/// the straight line by a half-sine perpendicular offset.
fn advance_along_path(state: &mut GameState, now: GameTime, id: EntityId) {
    let mut despawn = false;

    if let Some(e) = state.enemy_by_id_mut(id) {
        if e.wait_until >= now {
            return;
        }

        let from = e.path[e.pt - 1].position;
        let to = e.path[e.pt].position;
        let seg = to - from;
        let len = seg.length();

        if len > 0.0 {
            e.pos = (e.pos + e.speed / len).min(1.0);
            let bow = (std::f32::consts::PI * e.pos).sin() * enemy::PATH_BOW;
            e.position = from.lerp(to, e.pos) + Vec2::new(seg.y / len, seg.x / len) * bow;
        }

        if e.pos >= 1.0 || len == 0.0 {
            e.wait_until = now + e.path[e.pt].wait;
            e.needs_shoot = true;
            e.pt += 1;
            e.pos = 0.0;
            if e.pt >= e.path.len() {
                despawn = true;
            }
        }
    }

    if despawn {
        // left the field: no explosion, no score
        state.remove_enemy(id);
    }
}

/// Apply one point of damage, consuming the bullet if one landed
///
/// A kill awards the enemy's value to the bullet's owner, ticks the wave
/// counter down, and rolls a power-up drop when that clears the wave.
fn damage(state: &mut GameState, now: GameTime, enemy_id: EntityId, bullet_id: Option<EntityId>) {
    let owner = bullet_id
        .and_then(|id| state.remove_bullet(id))
        .and_then(|b| b.owner);

    let survived = {
        let Some(e) = state.enemy_by_id_mut(enemy_id) else {
            return;
        };
        e.health -= 1;
        e.last_hit = now;
        e.health > 0
    };
    if survived {
        return;
    }

    let Some(dead) = state.remove_enemy(enemy_id) else {
        return;
    };

    if let Some(owner_id) = owner {
        if let Some(p) = state.player_by_id_mut(owner_id) {
            p.score += dead.value;
        }
    }

    if let Some(wave) = dead.wave {
        if let Some(count) = state.wave_counts.get_mut(&wave) {
            *count -= 1;
            if *count == 0 {
                state.wave_counts.remove(&wave);
                powerups::spawn_drop(state, dead.position);
            }
        }
    }

    particles::spray(state, ParticleKind::Star1, dead.position, particle::BURST_SMALL);
    state.push_event(EventKind::Explode, None);
}
