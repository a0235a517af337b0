/// Play-field constants - all distances in pixels of the logical view
pub mod view {
    /// Logical play-field width
    pub const WIDTH: f32 = 1000.0;
    /// Logical play-field height
    pub const HEIGHT: f32 = 1600.0;
    /// Global speed scale applied to every base speed
    pub const SPEED_SCALE: f32 = 2.0;
    /// Margin outside the view in which bullets survive
    pub const BULLET_MARGIN: f32 = 50.0;
    /// Extra space below the view before a rock despawns
    pub const ROCK_BOTTOM_MARGIN: f32 = 100.0;
}

/// Simulation timing
pub mod sim {
    /// Fixed simulation rate in Hz
    pub const TICK_RATE: u32 = 20;
    /// Tick duration in milliseconds of game time
    pub const TICK_DURATION_MS: i64 = 1000 / TICK_RATE as i64;
}

/// Player tuning
pub mod player {
    use super::view::SPEED_SCALE;

    /// Maximum concurrent players in a round
    pub const MAX_COUNT: usize = 4;
    /// Per-tick movement at full stick deflection, before the move modifier
    pub const MOVE_SPEED: f32 = 13.0 * SPEED_SCALE;
    /// Starting and default maximum health
    pub const STARTING_HEALTH: i32 = 3;
    /// Collision radius
    pub const RADIUS: f32 = 20.0;
    /// Cooldown between shots in ms
    pub const FIRE_INTERVAL_MS: i64 = 150;
    /// Default movement multiplier (the Speed power-up raises it to 1.0)
    pub const MOVE_MODIFIER: f32 = 0.75;
    /// Grace period after taking damage, in ms
    pub const HIT_GRACE_MS: i64 = 3000;
    /// Heat added per bullet fired
    pub const GUN_TEMP_PER_SHOT: f32 = 0.02;
    /// Heat removed per tick while not firing
    pub const GUN_TEMP_COOL_DOWN: f32 = 0.04;
    /// Above this heat the fire cooldown doubles
    pub const GUN_TEMP_HOT: f32 = 0.9;
    /// Spawn position: x offset of the first slot
    pub const SPAWN_BASE_X: f32 = 200.0;
    /// Spawn position: x spacing between slots
    pub const SPAWN_SLOT_SPACING: f32 = 125.0;
    /// Spawn position: distance above the bottom of the view
    pub const SPAWN_Y_FROM_BOTTOM: f32 = 400.0;
}

/// Bullet tuning
pub mod bullet {
    use super::view::SPEED_SCALE;

    /// Upward speed of player bullets, per tick
    pub const SPEED: f32 = 40.0 * SPEED_SCALE;
    /// Collision radius of a player bullet
    pub const PLAYER_RADIUS: f32 = 5.0;
    /// Collision radius of an enemy bullet
    pub const ENEMY_RADIUS: f32 = 2.0;
    /// Sideways offset of the barrel pair when double-shot is active
    pub const DOUBLE_SHOT_OFFSET: f32 = 20.0;
    /// Muzzle y offset relative to the ship center
    pub const MUZZLE_Y_OFFSET: f32 = 5.0;
}

/// Enemy tuning
pub mod enemy {
    use super::view::SPEED_SCALE;

    /// Base path speed, per tick, before phase and jitter scaling
    pub const MOVE_SPEED: f32 = 30.0 * SPEED_SCALE;
    /// Collision radius
    pub const RADIUS: f32 = 70.0;
    /// Contact-damage invulnerability window after being hit, in ms
    pub const HIT_GRACE_MS: i64 = 3000;
    /// A bomber fires once it is within this long of reaching its pause point
    pub const SHOOT_WINDOW_MS: i64 = 500;
    /// Delay between members of a flow formation entering the path
    pub const FORMATION_STAGGER_MS: i64 = 500;
    /// Amplitude of the sinusoidal bow applied across a path segment
    pub const PATH_BOW: f32 = 100.0;
    /// Flow archetype: health, score value
    pub const FLOW_HEALTH: i32 = 1;
    pub const FLOW_VALUE: u32 = 100;
    /// Bombing archetype: health, score value
    pub const BOMBER_HEALTH: i32 = 4;
    pub const BOMBER_VALUE: u32 = 400;
    /// Number of enemy sprite variants per color
    pub const SPRITE_VARIANTS: u32 = 5;
}

/// Rock hazard tuning
pub mod rock {
    /// Collision radius
    pub const RADIUS: f32 = 50.0;
    /// Fall speed range, per tick, before the global speed scale
    pub const MIN_SPEED: f32 = 2.0;
    pub const MAX_SPEED: f32 = 7.0;
}

/// Particle tuning (cosmetic only, never collides)
pub mod particle {
    use super::view::SPEED_SCALE;

    /// Radial speed of spray particles, per tick
    pub const SPEED: f32 = 20.0 * SPEED_SCALE;
    /// Nominal radius, used only for presentation
    pub const RADIUS: f32 = 1.0;
    /// Spray sizes for the different burst kinds
    pub const BURST_SMALL: usize = 8;
    pub const BURST_PLAYER_DEATH: usize = 10;
}

/// Power-up tuning
pub mod powerup {
    use super::view::SPEED_SCALE;

    /// Downward drift per tick
    pub const DRIFT_SPEED: f32 = 4.0 * SPEED_SCALE;
    /// Pickup radius
    pub const RADIUS: f32 = 30.0;
    /// Fire interval granted by FastFire, in ms
    pub const FAST_FIRE_INTERVAL_MS: i64 = 110;
    /// Maximum health granted by Shield
    pub const SHIELD_MAX_HEALTH: i32 = 4;
}

/// Phase cadence
pub mod phase {
    /// Length of the phase-intro banner countdown, in ms
    pub const START_TIME_MS: i64 = 4000;
    /// Enemy spawn interval: base and per-phase reduction, floored
    pub const ENEMY_INTERVAL_BASE_MS: i64 = 5250;
    pub const ENEMY_INTERVAL_STEP_MS: i64 = 150;
    pub const ENEMY_INTERVAL_MIN_MS: i64 = 1000;
    /// Rock spawn interval: base and per-phase reduction
    pub const ROCK_INTERVAL_BASE_MS: i64 = 6000;
    pub const ROCK_INTERVAL_STEP_MS: i64 = 25;
    /// Bomber pause at its bombing point: base and per-phase reduction
    pub const BOMBER_PAUSE_BASE_MS: i64 = 3000;
    pub const BOMBER_PAUSE_STEP_MS: i64 = 100;
    /// Enemy quota: base and per-phase growth
    pub const ENEMY_COUNT_BASE: i32 = 5;
    pub const ENEMY_COUNT_STEP: i32 = 2;
}
