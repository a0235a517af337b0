//! Cosmetic particle pass
//!
//! Particles are presentation-only debris: pure kinematics, no collision,
//! culled on leaving the play bounds. Spray angles use ambient randomness
//! because nothing downstream ever reads them back.

use rand::Rng;

use crate::game::constants::{particle, view};
use crate::game::state::{GameState, ParticleKind};
use crate::util::vec2::Vec2;

/// Advance all particles and cull those outside the view
pub fn update(state: &mut GameState) {
    for p in &mut state.particles {
        p.position += p.velocity;
    }
    state.particles.retain(|p| {
        p.position.x >= 0.0
            && p.position.x <= view::WIDTH
            && p.position.y >= 0.0
            && p.position.y <= view::HEIGHT
    });
}

/// Emit a ring of particles around an origin
pub fn spray(state: &mut GameState, kind: ParticleKind, origin: Vec2, count: usize) {
    let step = std::f32::consts::TAU / count as f32;
    let offset = rand::thread_rng().gen::<f32>() * std::f32::consts::PI;
    for i in 0..count {
        let angle = offset + step * i as f32;
        state.spawn_particle(
            origin,
            Vec2::new(angle.sin() * particle::SPEED, angle.cos() * particle::SPEED),
            kind,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particles_advance() {
        let mut state = GameState::new(1);
        state.spawn_particle(
            Vec2::new(100.0, 100.0),
            Vec2::new(3.0, -2.0),
            ParticleKind::Star1,
        );
        update(&mut state);
        assert_eq!(state.particles[0].position, Vec2::new(103.0, 98.0));
    }

    #[test]
    fn test_particles_cull_outside_view() {
        let mut state = GameState::new(1);
        state.spawn_particle(Vec2::new(2.0, 100.0), Vec2::new(-10.0, 0.0), ParticleKind::Rock);
        state.spawn_particle(Vec2::new(500.0, 500.0), Vec2::ZERO, ParticleKind::Rock);
        update(&mut state);
        assert_eq!(state.particles.len(), 1);
    }

    #[test]
    fn test_spray_count_and_speed() {
        let mut state = GameState::new(1);
        spray(&mut state, ParticleKind::Star3, Vec2::new(300.0, 300.0), 8);
        assert_eq!(state.particles.len(), 8);
        for p in &state.particles {
            assert!((p.velocity.length() - particle::SPEED).abs() < 0.01);
            assert_eq!(p.kind, ParticleKind::Star3);
        }
    }
}
