//! Orbit Survivors - a top-down survival arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, combat, progression, shop)
//! - `snapshot`: Render-boundary state capture for an external presenter
//!
//! The crate ships no renderer. The binary is a headless runner that drives
//! the fixed-tick loop and can stream snapshots as JSON lines.

pub mod sim;
pub mod snapshot;

pub use snapshot::FrameSnapshot;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// World dimensions
    pub const MAP_WIDTH: f32 = 2400.0;
    pub const MAP_HEIGHT: f32 = 1800.0;

    /// Viewport (camera view rectangle) dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Minimap edge length in screen units
    pub const MINIMAP_SIZE: f32 = 150.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;

    /// Dash: speed while active, active window, and gate between uses (ticks)
    pub const DASH_SPEED: f32 = 10.0;
    pub const DASH_DURATION_TICKS: u32 = 10;
    pub const DASH_COOLDOWN_TICKS: u32 = 120;

    /// Healing amounts
    pub const POTION_HEAL: i32 = 30;
    pub const LEVEL_UP_HEAL: i32 = 20;

    /// Progression
    pub const XP_PER_KILL: u32 = 10;
    /// Experience required per level: `level * XP_LEVEL_STEP`
    pub const XP_LEVEL_STEP: u32 = 100;
    pub const GOLD_DROP_MIN: u32 = 5;
    pub const GOLD_DROP_MAX: u32 = 15;
    /// Kills required to advance a wave: `wave * WAVE_KILL_STEP`
    pub const WAVE_KILL_STEP: u32 = 10;

    /// Orbiting projectile defaults
    pub const ORBIT_RADIUS: f32 = 50.0;
    /// Degrees per tick
    pub const ORBIT_ROTATION_SPEED: f32 = 3.0;
    pub const PROJECTILE_SIZE: f32 = 5.0;
    pub const PROJECTILE_DAMAGE: i32 = 10;
    /// Ring size is `min(MAX_PROJECTILES, level + 2)`
    pub const MAX_PROJECTILES: u32 = 8;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 15.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_HEALTH: i32 = 30;
    /// Health drained per tick per overlapping enemy
    pub const ENEMY_CONTACT_DAMAGE: i32 = 1;

    /// Spawn scheduling
    pub const SPAWN_DISTANCE: f32 = 400.0;
    pub const SPAWN_DELAY_START: u32 = 60;
    pub const SPAWN_DELAY_FLOOR: u32 = 20;
    /// Wave advance lowers the floor by this much, to no less than the minimum
    pub const WAVE_FLOOR_STEP: u32 = 5;
    pub const WAVE_FLOOR_MIN: u32 = 15;

    /// Bomb area damage
    pub const BOMB_RADIUS: f32 = 150.0;
    pub const EXPLOSION_DURATION_TICKS: u32 = 30;

    /// Decorative map scatter
    pub const TREE_COUNT: usize = 100;
    pub const ROCK_COUNT: usize = 50;

    /// Shop prices (gold)
    pub const POTION_PRICE: u32 = 50;
    pub const BOMB_PRICE: u32 = 75;
    pub const DASH_PRICE: u32 = 150;
}

/// World dimensions as a vector
#[inline]
pub fn map_size() -> Vec2 {
    Vec2::new(consts::MAP_WIDTH, consts::MAP_HEIGHT)
}

/// Viewport dimensions as a vector
#[inline]
pub fn viewport_size() -> Vec2 {
    Vec2::new(consts::VIEWPORT_WIDTH, consts::VIEWPORT_HEIGHT)
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

/// Offset vector at `radius` along `degrees` (counterclockwise from +x)
#[inline]
pub fn polar_offset(radius: f32, degrees: f32) -> Vec2 {
    let theta = degrees.to_radians();
    Vec2::new(radius * theta.cos(), radius * theta.sin())
}
