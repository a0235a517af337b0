//! Fixed waypoint catalogue for enemy flight paths
//!
//! Entry and exit points sit just off-screen on the left and right edges;
//! control points form a 3x5 grid over the play field. The spawner draws
//! indices into these tables from the seeded sequence, so the tables must
//! never be reordered.

use crate::game::constants::view::{HEIGHT, WIDTH};
use crate::util::vec2::Vec2;

/// Off-screen points where formations enter the field
pub const ENTRY_POINTS: [Vec2; 6] = [
    Vec2::new(-50.0, -50.0),
    Vec2::new(WIDTH + 50.0, -50.0),
    Vec2::new(-50.0, HEIGHT * 0.25),
    Vec2::new(WIDTH + 50.0, HEIGHT * 0.25),
    Vec2::new(-50.0, HEIGHT * 0.5),
    Vec2::new(WIDTH + 50.0, HEIGHT * 0.5),
];

/// Off-screen points where formations leave the field
///
/// The entry points plus two lower rows; the lower rows are listed twice
/// to weight exits toward the bottom of the field.
pub const EXIT_POINTS: [Vec2; 10] = [
    Vec2::new(-50.0, -50.0),
    Vec2::new(WIDTH + 50.0, -50.0),
    Vec2::new(-50.0, HEIGHT * 0.25),
    Vec2::new(WIDTH + 50.0, HEIGHT * 0.25),
    Vec2::new(-50.0, HEIGHT * 0.5),
    Vec2::new(WIDTH + 50.0, HEIGHT * 0.5),
    Vec2::new(-50.0, HEIGHT * 0.65),
    Vec2::new(WIDTH + 50.0, HEIGHT * 0.65),
    Vec2::new(-50.0, HEIGHT * 0.65),
    Vec2::new(WIDTH + 50.0, HEIGHT * 0.65),
];

/// Grid dimensions of the control-point lattice
pub const CONTROL_COLS: usize = 3;
pub const CONTROL_ROWS: usize = 5;

/// 3x5 lattice of mid-flight control points, column-major
pub fn control_points() -> Vec<Vec2> {
    let mut points = Vec::with_capacity(CONTROL_COLS * CONTROL_ROWS);
    for x in 0..CONTROL_COLS {
        for y in 0..CONTROL_ROWS {
            points.push(Vec2::new(
                WIDTH * 0.2 + x as f32 * WIDTH * 0.2,
                HEIGHT * 0.1 + y as f32 * HEIGHT * 0.15,
            ));
        }
    }
    points
}

/// Control points in the upper half of the field, used as bombing stations
pub fn bombing_points() -> Vec<Vec2> {
    control_points()
        .into_iter()
        .filter(|p| p.y < HEIGHT / 2.0)
        .collect()
}

/// Pick an element of a slice from a unit-interval draw
pub fn pick<T: Copy>(slice: &[T], draw: f64) -> T {
    let index = ((draw * slice.len() as f64) as usize).min(slice.len() - 1);
    slice[index]
}
