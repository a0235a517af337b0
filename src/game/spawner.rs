//! Procedural enemy and rock spawning
//!
//! Enemy composition is driven entirely by the seeded sequence so every
//! observer derives the same formations. Rock trajectories are scenery
//! and roll from ambient randomness instead of spending seeded draws.

use rand::Rng;

use crate::game::constants::{enemy, rock, view};
use crate::game::paths::{self, ENTRY_POINTS, EXIT_POINTS};
use crate::game::phase;
use crate::game::state::{Enemy, EnemyColor, GameState, GameTime, PathPoint};
use crate::util::vec2::Vec2;

/// Spawn the next enemy formation, or roll the phase over if the quota
/// is exhausted.
///
/// Returns a scheduling offset in ms: the caller stamps
/// `last_enemy = now - offset`, so a positive offset pulls the next spawn
/// check forward.
pub fn spawn_enemy(state: &mut GameState, now: GameTime) -> i64 {
    if state.phase_info.enemy_count <= 0 {
        phase::start_phase(state, now);
        return 0;
    }

    state.phase_info.enemy_count -= 1;

    let entry = paths::pick(&ENTRY_POINTS, state.rng.next_value());
    // an exit on the same x-origin would make the path a no-op pass-through
    let possible_exits: Vec<Vec2> = EXIT_POINTS.iter().copied().filter(|e| e.x != entry.x).collect();
    let exit = paths::pick(&possible_exits, state.rng.next_value());
    let move_speed = enemy::MOVE_SPEED
        * (0.75 + state.rng.next_value() as f32 * 0.25)
        * state.phase_info.speed_modifier;

    if state.rng.next_value() > 0.25 {
        spawn_flow_wave(state, now, entry, exit, move_speed);
        0
    } else {
        spawn_bombing_run(state, now, entry, exit, move_speed);
        // bombers report a head start so the next wave follows sooner
        500
    }
}

/// A trailing formation of 5-7 enemies sharing one path
fn spawn_flow_wave(state: &mut GameState, now: GameTime, entry: Vec2, exit: Vec2, move_speed: f32) {
    let control_points = paths::control_points();
    let waypoint_count = 1 + (state.rng.next_value() * 3.0) as usize;
    let mut path = Vec::with_capacity(waypoint_count + 2);
    path.push(PathPoint::new(entry, 0));
    for _ in 0..waypoint_count {
        path.push(PathPoint::new(
            paths::pick(&control_points, state.rng.next_value()),
            0,
        ));
    }
    path.push(PathPoint::new(exit, 0));

    let count = (state.rng.next_value() * 3.0) as usize + 5;
    let sprite = (state.rng.next_value() * enemy::SPRITE_VARIANTS as f64) as u32;
    let color = if state.rng.next_value() > 0.5 {
        EnemyColor::Red
    } else {
        EnemyColor::Green
    };

    let wave = state.phase_info.enemy_count as u32;
    for i in 0..count {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            position: entry,
            radius: enemy::RADIUS,
            path: path.clone(),
            pt: 1,
            pos: 0.0,
            speed: move_speed / 2.0,
            color,
            sprite,
            health: enemy::FLOW_HEALTH,
            value: enemy::FLOW_VALUE,
            // not invulnerable to start with
            last_hit: now - 20_000,
            shoot: false,
            needs_shoot: false,
            wave: Some(wave),
            wait_until: now + i as i64 * enemy::FORMATION_STAGGER_MS,
        });
    }
    state.wave_counts.insert(wave, count as u32);

    tracing::debug!(wave, count, phase = state.phase, "flow wave spawned");
}

/// 1-3 sit-and-shoot bombers, each parked on its own upper-half station
fn spawn_bombing_run(state: &mut GameState, now: GameTime, entry: Vec2, exit: Vec2, move_speed: f32) {
    let mut stations = paths::bombing_points();
    let pause = state.phase_info.bomber_pause;
    let count = if state.phase > 5 {
        3
    } else if state.phase > 2 {
        2
    } else {
        1
    };
    let color = if state.rng.next_value() > 0.5 {
        EnemyColor::Blue
    } else {
        EnemyColor::Black
    };
    let sprite = (state.rng.next_value() * enemy::SPRITE_VARIANTS as f64) as u32;

    for _ in 0..count {
        // remove the chosen station so batchmates never share one
        let index = ((state.rng.next_value() * stations.len() as f64) as usize)
            .min(stations.len() - 1);
        let station = stations.remove(index);

        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            position: entry,
            radius: enemy::RADIUS,
            path: vec![
                PathPoint::new(entry, 0),
                PathPoint::new(station, pause),
                PathPoint::new(exit, 0),
            ],
            pt: 1,
            pos: 0.0,
            speed: move_speed,
            color,
            sprite,
            health: enemy::BOMBER_HEALTH,
            value: enemy::BOMBER_VALUE,
            last_hit: now - 20_000,
            shoot: true,
            needs_shoot: false,
            wave: None,
            wait_until: 0,
        });
    }

    tracing::debug!(count, phase = state.phase, "bombing run spawned");
}

/// Drop a rock from a random x at a random speed and rotation
///
/// Ambient randomness by design: rocks are hazards, not replay-critical
/// composition, and spending seeded draws here would shift the enemy
/// sequence.
pub fn spawn_rock(state: &mut GameState) {
    let mut rng = rand::thread_rng();
    let x = rng.gen::<f32>() * view::WIDTH;
    let rotation = rng.gen::<f32>() * std::f32::consts::TAU;
    let vy = (rng.gen::<f32>() * (rock::MAX_SPEED - rock::MIN_SPEED) + rock::MIN_SPEED)
        * view::SPEED_SCALE;
    state.spawn_rock(x, rotation, vy);
}
