pub mod bullets;
pub mod enemies;
pub mod particles;
pub mod players;
pub mod powerups;
pub mod rocks;
