//! Bullet pass: kinematics, bounds culling, enemy fire vs players
//!
//! Player-bullet hits against enemies and rocks are resolved in those
//! entities' own passes; this pass owns movement and the enemy-bullet
//! side of the exchange.

use crate::game::constants::{particle, view};
use crate::game::state::{BulletKind, EntityId, GameState, GameTime};
use crate::game::systems::players;
use crate::util::vec2::{circles_overlap, Vec2};

/// Advance all bullets, cull strays, and land enemy fire on players
pub fn update(state: &mut GameState, now: GameTime) {
    let ids: Vec<EntityId> = state.bullets.iter().map(|b| b.id).collect();

    for id in ids {
        let Some(index) = state.bullets.iter().position(|b| b.id == id) else {
            continue;
        };

        {
            let b = &mut state.bullets[index];
            b.position += b.velocity;
        }

        let b = &state.bullets[index];
        let out_of_bounds = b.position.y < -view::BULLET_MARGIN
            || b.position.y > view::HEIGHT + view::BULLET_MARGIN
            || b.position.x < -view::BULLET_MARGIN
            || b.position.x > view::WIDTH + view::BULLET_MARGIN;
        if out_of_bounds {
            state.bullets.remove(index);
            continue;
        }

        if b.kind == BulletKind::Enemy {
            let b_pos = b.position;
            let b_radius = b.radius;
            let hit = state
                .players
                .iter()
                .find(|p| circles_overlap(p.position, p.radius, b_pos, b_radius))
                .map(|p| p.id);

            if let Some(player_entity) = hit {
                state.bullets.remove(index);
                players::take_damage(state, now, player_entity);
            }
        }
    }
}

/// Fan-shaped radial spray fired by a bomber, aimed into the lower arc
pub fn radial_spray(state: &mut GameState, origin: Vec2, count: usize) {
    debug_assert!(count >= 2);
    let step = std::f32::consts::PI / (count - 1) as f32;
    let offset = -std::f32::consts::FRAC_PI_2;
    for i in 0..count {
        let angle = offset + step * i as f32;
        state.spawn_enemy_bullet(
            origin,
            Vec2::new(angle.sin() * particle::SPEED, angle.cos() * particle::SPEED),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::bullet;
    use crate::game::state::Player;
    use uuid::Uuid;

    #[test]
    fn test_bullets_advance() {
        let mut state = GameState::new(1);
        state.spawn_player_bullet(Vec2::new(100.0, 500.0), 1, 0);
        update(&mut state, 0);
        assert_eq!(state.bullets[0].position.y, 500.0 - bullet::SPEED);
    }

    #[test]
    fn test_bullets_cull_past_margin() {
        let mut state = GameState::new(1);
        state.spawn_player_bullet(Vec2::new(100.0, -20.0), 1, 0);
        update(&mut state, 0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_enemy_bullet_hits_player() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        let mut player = Player::new(id, Uuid::new_v4(), 0);
        player.position = Vec2::new(500.0, 500.0);
        player.last_hit = -10_000;
        state.players.push(player);

        state.spawn_enemy_bullet(Vec2::new(500.0, 490.0), Vec2::new(0.0, 5.0));
        update(&mut state, 1000);

        assert!(state.bullets.is_empty());
        assert_eq!(state.players[0].health, 2);
    }

    #[test]
    fn test_player_bullet_passes_through_player() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        let mut player = Player::new(id, Uuid::new_v4(), 0);
        player.position = Vec2::new(500.0, 500.0);
        state.players.push(player);

        state.spawn_player_bullet(Vec2::new(500.0, 505.0), id, 0);
        update(&mut state, 1000);

        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.players[0].health, 3);
    }

    #[test]
    fn test_radial_spray_fans_downward() {
        let mut state = GameState::new(1);
        radial_spray(&mut state, Vec2::new(400.0, 400.0), 5);
        assert_eq!(state.bullets.len(), 5);
        for b in &state.bullets {
            assert_eq!(b.kind, BulletKind::Enemy);
            assert!(b.owner.is_none());
            // lower arc: no upward velocity
            assert!(b.velocity.y >= -0.001);
        }
    }
}
