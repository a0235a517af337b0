//! Simulation state definitions
//!
//! Contains all entities (players, enemies, rocks, bullets, particles,
//! power-ups), the shared id allocator, per-tick events, and the persisted
//! best-run records. Containers are plain `Vec`s in insertion order:
//! iteration order is part of the deterministic contract, so keyed maps are
//! only used where order never matters (wave counts, persisted records).

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::game::constants::{bullet, particle, player, powerup, rock, view};
use crate::game::phase::{create_phase, PhaseInfo};
use crate::game::rng::SeededSequence;
use crate::util::vec2::Vec2;

/// External player identity, owned by the host/transport layer
pub type PlayerId = Uuid;

/// Unique entity identifier - monotonic, shared across all kinds, never reused
pub type EntityId = u64;

/// Monotonic game time in milliseconds, supplied by the host each tick
pub type GameTime = i64;

/// Last received control vector for a player
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Controls {
    pub x: f32,
    pub y: f32,
    pub fire: bool,
}

/// A player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    /// External identity of the connection driving this ship
    pub player_id: PlayerId,
    pub position: Vec2,
    pub radius: f32,
    /// Visual slot, stable per join order, never reused
    pub index: u32,
    pub health: i32,
    pub max_health: i32,
    pub controls: Controls,
    pub last_fire: GameTime,
    pub last_hit: GameTime,
    pub fire_interval: i64,
    pub score: u32,
    /// 0..1 heat gauge; above the hot threshold the fire cooldown doubles
    pub gun_temp: f32,
    /// Simultaneous projectile count (1, or 2 with double-shot)
    pub shots: u8,
    pub move_modifier: f32,
}

impl Player {
    pub fn new(id: EntityId, player_id: PlayerId, slot: u32) -> Self {
        Self {
            id,
            player_id,
            position: Vec2::new(
                player::SPAWN_BASE_X + slot as f32 * player::SPAWN_SLOT_SPACING,
                view::HEIGHT - player::SPAWN_Y_FROM_BOTTOM,
            ),
            radius: player::RADIUS,
            index: slot,
            health: player::STARTING_HEALTH,
            max_health: player::STARTING_HEALTH,
            controls: Controls::default(),
            last_fire: 0,
            // far enough in the past that a fresh ship is not flashing
            last_hit: -10_000,
            fire_interval: player::FIRE_INTERVAL_MS,
            score: 0,
            gun_temp: 0.0,
            shots: 1,
            move_modifier: player::MOVE_MODIFIER,
        }
    }
}

/// Visual category of an enemy; never affects gameplay
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EnemyColor {
    Black,
    Blue,
    Green,
    Red,
}

/// One waypoint of an enemy path with its post-arrival wait
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: Vec2,
    pub wait: i64,
}

impl PathPoint {
    pub fn new(position: Vec2, wait: i64) -> Self {
        Self { position, wait }
    }
}

/// An enemy following a waypoint path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Vec2,
    pub radius: f32,
    /// Ordered waypoints; `pt` indexes the current target (starts at 1)
    pub path: Vec<PathPoint>,
    pub pt: usize,
    /// Progress 0..1 along the current segment
    pub pos: f32,
    pub speed: f32,
    pub color: EnemyColor,
    /// Sprite variant within the color, visual only
    pub sprite: u32,
    pub health: i32,
    /// Score awarded to the killer
    pub value: u32,
    pub last_hit: GameTime,
    /// Bombing archetype: fires a radial spray on arrival
    pub shoot: bool,
    /// Edge-triggered shot request, armed when a waypoint is reached
    pub needs_shoot: bool,
    /// Wave id for wave-clear bonus tracking (flow formations only)
    pub wave: Option<u32>,
    /// The enemy does not advance before this time
    pub wait_until: GameTime,
}

/// A falling rock hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub id: EntityId,
    pub position: Vec2,
    pub radius: f32,
    /// Downward speed per tick
    pub vy: f32,
    /// Static rotation offset, visual only
    pub rotation: f32,
}

/// Who fired a bullet, and who it can hurt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BulletKind {
    /// Fired by a player; damages enemies and rocks
    Player,
    /// Fired by an enemy; damages players
    Enemy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub position: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
    /// Entity id of the firing player; `None` for enemy bullets
    pub owner: Option<EntityId>,
    /// Visual slot of the owner, presentation only
    pub owner_index: u32,
    pub kind: BulletKind,
}

/// Visual category of a particle burst
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ParticleKind {
    Rock,
    Star1,
    Star2,
    Star3,
}

/// Cosmetic debris; never participates in collision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: EntityId,
    pub position: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
    pub kind: ParticleKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PowerUpKind {
    DoubleShot,
    FastFire,
    Health,
    Shield,
    Speed,
}

pub const POWER_UP_KINDS: [PowerUpKind; 5] = [
    PowerUpKind::DoubleShot,
    PowerUpKind::FastFire,
    PowerUpKind::Health,
    PowerUpKind::Shield,
    PowerUpKind::Speed,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub position: Vec2,
    pub radius: f32,
    pub kind: PowerUpKind,
}

/// Best-run record, durable across rounds, owned per external identity
///
/// The core only overwrites fields of records the host has already
/// created; it never inserts or deletes entries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Persisted {
    pub best_phase: u32,
    pub best_score: u32,
}

/// Discrete gameplay event emitted during a tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventKind {
    Fire,
    Explode,
    Hit,
    Die,
    Collect,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEvent {
    pub kind: EventKind,
    pub who: Option<PlayerId>,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub enemies: Vec<Enemy>,
    pub rocks: Vec<Rock>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    /// Remaining-alive count per flow-wave id, for wave-clear detection
    pub wave_counts: HashMap<u32, u32>,
    /// Best-run records keyed by external identity; outlives rounds
    pub persisted: HashMap<PlayerId, Persisted>,
    /// Events of the current tick; rebuilt every tick, not history
    #[serde(skip)]
    pub events: SmallVec<[GameEvent; 16]>,
    pub last_rock: GameTime,
    pub last_enemy: GameTime,
    /// Current phase number; 0 only before the first round starts
    pub phase: u32,
    /// End of the current phase-intro countdown
    pub phase_start: GameTime,
    pub phase_info: PhaseInfo,
    /// Seeded draw source for enemy spawning
    pub rng: SeededSequence,
    next_entity_id: EntityId,
    next_player_index: u32,
}

impl GameState {
    pub fn new(seed: u32) -> Self {
        Self {
            players: Vec::new(),
            enemies: Vec::new(),
            rocks: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            wave_counts: HashMap::new(),
            persisted: HashMap::new(),
            events: SmallVec::new(),
            last_rock: -2000,
            last_enemy: 0,
            phase: 0,
            phase_start: 0,
            phase_info: create_phase(0),
            rng: SeededSequence::new(seed),
            next_entity_id: 1,
            next_player_index: 0,
        }
    }

    /// Allocate a new unique entity id
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Allocate the next visual slot; slots are never reused
    pub fn next_player_index(&mut self) -> u32 {
        let index = self.next_player_index;
        self.next_player_index += 1;
        index
    }

    pub fn push_event(&mut self, kind: EventKind, who: Option<PlayerId>) {
        self.events.push(GameEvent { kind, who });
    }

    /// Find a player by external identity
    pub fn player_by_identity(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    pub fn player_by_identity_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.player_id == player_id)
    }

    /// Find a player by entity id
    pub fn player_by_id(&self, id: EntityId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_by_id_mut(&mut self, id: EntityId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn remove_player(&mut self, id: EntityId) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id == id)?;
        Some(self.players.remove(index))
    }

    pub fn enemy_by_id(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_by_id_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn remove_enemy(&mut self, id: EntityId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub fn bullet_by_id(&self, id: EntityId) -> Option<&Bullet> {
        self.bullets.iter().find(|b| b.id == id)
    }

    pub fn remove_bullet(&mut self, id: EntityId) -> Option<Bullet> {
        let index = self.bullets.iter().position(|b| b.id == id)?;
        Some(self.bullets.remove(index))
    }

    pub fn rock_by_id(&self, id: EntityId) -> Option<&Rock> {
        self.rocks.iter().find(|r| r.id == id)
    }

    pub fn remove_rock(&mut self, id: EntityId) -> Option<Rock> {
        let index = self.rocks.iter().position(|r| r.id == id)?;
        Some(self.rocks.remove(index))
    }

    pub fn remove_power_up(&mut self, id: EntityId) -> Option<PowerUp> {
        let index = self.power_ups.iter().position(|p| p.id == id)?;
        Some(self.power_ups.remove(index))
    }

    /// Spawn a player bullet at a position
    pub fn spawn_player_bullet(&mut self, position: Vec2, owner: EntityId, owner_index: u32) {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            position,
            radius: bullet::PLAYER_RADIUS,
            velocity: Vec2::new(0.0, -bullet::SPEED),
            owner: Some(owner),
            owner_index,
            kind: BulletKind::Player,
        });
    }

    /// Spawn an enemy bullet with an explicit velocity
    pub fn spawn_enemy_bullet(&mut self, position: Vec2, velocity: Vec2) {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            position,
            radius: bullet::ENEMY_RADIUS,
            velocity,
            owner: None,
            owner_index: 0,
            kind: BulletKind::Enemy,
        });
    }

    pub fn spawn_particle(&mut self, position: Vec2, velocity: Vec2, kind: ParticleKind) {
        let id = self.next_entity_id();
        self.particles.push(Particle {
            id,
            position,
            radius: particle::RADIUS,
            velocity,
            kind,
        });
    }

    pub fn spawn_power_up(&mut self, position: Vec2, kind: PowerUpKind) {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp {
            id,
            position,
            radius: powerup::RADIUS,
            kind,
        });
    }

    pub fn spawn_rock(&mut self, x: f32, rotation: f32, vy: f32) {
        let id = self.next_entity_id();
        self.rocks.push(Rock {
            id,
            position: Vec2::new(x, 0.0),
            radius: rock::RADIUS,
            vy,
            rotation,
        });
    }

    /// Clear all dynamic containers and rewind the seeded sequence
    ///
    /// Called exactly when the roster transitions from empty to one player.
    /// Persisted records and the id allocators survive; everything else of
    /// the old round is discarded. The caller starts phase 1 afterwards.
    pub fn reset_round(&mut self, now: GameTime) {
        self.enemies.clear();
        self.rocks.clear();
        self.bullets.clear();
        self.particles.clear();
        self.power_ups.clear();
        self.wave_counts.clear();
        self.phase = 0;
        self.rng.reset();
        self.last_enemy = now;
    }

    /// Size of a bomber's radial spray, given the current phase
    pub fn bomber_spray_count(&self) -> usize {
        4 + (self.phase as usize / 3).min(4)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_monotonic() {
        let mut state = GameState::new(1);
        let id1 = state.next_entity_id();
        let id2 = state.next_entity_id();
        assert_ne!(id1, id2);
        assert_eq!(id2, id1 + 1);
    }

    #[test]
    fn test_player_slots_never_reused() {
        let mut state = GameState::new(1);
        let a = state.next_player_index();
        let b = state.next_player_index();
        assert_eq!((a, b), (0, 1));

        // joining, leaving, rejoining still advances the slot
        let slot = state.next_player_index();
        let id = state.next_entity_id();
        let player = Player::new(id, Uuid::new_v4(), slot);
        state.players.push(player);
        state.remove_player(id);
        assert_eq!(state.next_player_index(), 3);
    }

    #[test]
    fn test_player_spawn_position_follows_slot() {
        let p0 = Player::new(1, Uuid::new_v4(), 0);
        let p2 = Player::new(2, Uuid::new_v4(), 2);
        assert_eq!(p0.position, Vec2::new(200.0, view::HEIGHT - 400.0));
        assert_eq!(p2.position.x, 200.0 + 2.0 * 125.0);
    }

    #[test]
    fn test_remove_bullet_by_id() {
        let mut state = GameState::new(1);
        state.spawn_player_bullet(Vec2::new(10.0, 10.0), 99, 0);
        let id = state.bullets[0].id;
        assert!(state.remove_bullet(id).is_some());
        assert!(state.remove_bullet(id).is_none());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_reset_round_clears_dynamic_state() {
        let mut state = GameState::new(1);
        state.spawn_player_bullet(Vec2::ZERO, 1, 0);
        state.spawn_rock(100.0, 0.0, 4.0);
        state.spawn_particle(Vec2::ZERO, Vec2::ZERO, ParticleKind::Star1);
        state.spawn_power_up(Vec2::ZERO, PowerUpKind::Health);
        state.wave_counts.insert(3, 5);
        state.rng.next_value();
        state.phase = 7;

        let persisted_id = Uuid::new_v4();
        state.persisted.insert(persisted_id, Persisted {
            best_phase: 7,
            best_score: 1200,
        });

        state.reset_round(50_000);

        assert!(state.bullets.is_empty());
        assert!(state.rocks.is_empty());
        assert!(state.particles.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(state.wave_counts.is_empty());
        assert_eq!(state.phase, 0);
        assert_eq!(state.rng.cursor(), 0);
        assert_eq!(state.last_enemy, 50_000);
        // persisted records survive the reset
        assert_eq!(state.persisted[&persisted_id].best_score, 1200);
    }

    #[test]
    fn test_bomber_spray_count_scales_with_phase() {
        let mut state = GameState::new(1);
        state.phase = 1;
        assert_eq!(state.bomber_spray_count(), 4);
        state.phase = 6;
        assert_eq!(state.bomber_spray_count(), 6);
        state.phase = 30;
        // capped
        assert_eq!(state.bomber_spray_count(), 8);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut state = GameState::new(5);
        state.spawn_player_bullet(Vec2::new(1.0, 2.0), 7, 0);
        state.rng.next_value();

        let encoded = bincode::serde::encode_to_vec(&state, bincode::config::standard()).unwrap();
        let (decoded, _): (GameState, usize) =
            bincode::serde::decode_from_slice(&encoded, bincode::config::standard()).unwrap();

        assert_eq!(decoded.bullets.len(), 1);
        assert_eq!(decoded.rng.cursor(), 1);
        assert_eq!(decoded.phase_info, state.phase_info);
    }
}
