//! Game state and core simulation types
//!
//! Everything that advances under the fixed-tick contract lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::shop::Shop;
use crate::consts::*;
use crate::{map_size, polar_offset, wrap_degrees};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player health hit zero; only restart is accepted
    GameOver,
}

/// A projectile orbiting the player at fixed angular velocity.
///
/// Position is derived from the owner position every time it is needed; only
/// the angle is state. `angle_offset` is immutable after construction and
/// encodes the projectile's phase within its ring.
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Fixed phase within the ring (degrees)
    pub angle_offset: f32,
    /// Current sweep angle (degrees, always in [0, 360))
    pub angle: f32,
    pub orbit_radius: f32,
    /// Degrees advanced per tick
    pub rotation_speed: f32,
    pub size: f32,
    pub damage: i32,
}

impl Projectile {
    pub fn new(angle_offset: f32) -> Self {
        Self {
            angle_offset,
            angle: 0.0,
            orbit_radius: ORBIT_RADIUS,
            rotation_speed: ORBIT_ROTATION_SPEED,
            size: PROJECTILE_SIZE,
            damage: PROJECTILE_DAMAGE,
        }
    }

    /// Advance the sweep angle by one tick, wrapping into [0, 360)
    pub fn advance(&mut self) {
        self.angle = wrap_degrees(self.angle + self.rotation_speed);
    }

    /// World position for a given owner position
    pub fn position(&self, owner: Vec2) -> Vec2 {
        owner + polar_offset(self.orbit_radius, self.angle + self.angle_offset)
    }
}

/// The player entity
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Always in [0, PLAYER_MAX_HEALTH]
    pub health: i32,
    pub experience: u32,
    pub level: u32,
    pub gold: u32,
    pub potions: u32,
    pub bombs: u32,
    pub has_dash: bool,
    /// Ticks until dash can trigger again
    pub dash_cooldown: u32,
    /// Ticks of boosted speed remaining
    pub dash_duration: u32,
    /// Insertion order is the angular layout order of the ring
    pub projectiles: Vec<Projectile>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        let mut player = Self {
            pos,
            speed: PLAYER_SPEED,
            radius: PLAYER_RADIUS,
            health: PLAYER_MAX_HEALTH,
            experience: 0,
            level: 1,
            gold: 0,
            potions: 0,
            bombs: 0,
            has_dash: false,
            dash_cooldown: 0,
            dash_duration: 0,
            projectiles: Vec::new(),
        };
        player.rebuild_projectile_ring();
        player
    }

    /// Ring size for the current level
    pub fn ring_size(&self) -> u32 {
        MAX_PROJECTILES.min(self.level + 2)
    }

    /// Replace the projectile set with an evenly spaced ring for the current
    /// level. Any prior set is discarded.
    pub fn rebuild_projectile_ring(&mut self) {
        let count = self.ring_size();
        let step = 360.0 / count as f32;
        self.projectiles = (0..count).map(|i| Projectile::new(i as f32 * step)).collect();
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_duration > 0
    }

    /// Integrate one tick of movement from held key state.
    ///
    /// Opposing keys cancel; diagonals are normalized so speed is uniform in
    /// every direction. This is the single decrement site for the dash
    /// timers: exactly one count per tick, nowhere else.
    pub fn step_movement(&mut self, up: bool, down: bool, left: bool, right: bool) {
        let speed = if self.is_dashing() { DASH_SPEED } else { self.speed };
        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);
        self.dash_duration = self.dash_duration.saturating_sub(1);

        let mut dir = Vec2::ZERO;
        if up {
            dir.y -= 1.0;
        }
        if down {
            dir.y += 1.0;
        }
        if left {
            dir.x -= 1.0;
        }
        if right {
            dir.x += 1.0;
        }

        self.pos += dir.normalize_or_zero() * speed;
        self.pos = self
            .pos
            .clamp(Vec2::splat(self.radius), map_size() - self.radius);
    }

    /// Start a dash if owned and off cooldown; otherwise a no-op
    pub fn trigger_dash(&mut self) {
        if self.has_dash && self.dash_cooldown == 0 {
            self.dash_duration = DASH_DURATION_TICKS;
            self.dash_cooldown = DASH_COOLDOWN_TICKS;
        }
    }

    /// Drink a potion if one is held and health is not already full
    pub fn use_potion(&mut self) {
        if self.potions > 0 && self.health < PLAYER_MAX_HEALTH {
            self.potions -= 1;
            self.heal(POTION_HEAL);
        }
    }

    /// Consume a bomb. Returns whether one was available; the caller resolves
    /// the area damage on success.
    pub fn use_bomb(&mut self) -> bool {
        if self.bombs > 0 {
            self.bombs -= 1;
            true
        } else {
            false
        }
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(PLAYER_MAX_HEALTH);
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    /// Award experience and resolve any level-ups. Each crossed threshold
    /// fires exactly once: the threshold moves with the level, so a second
    /// check at the same experience total cannot re-trigger.
    pub fn gain_experience(&mut self, amount: u32) -> bool {
        self.experience += amount;
        let mut leveled = false;
        while self.experience >= self.level * XP_LEVEL_STEP {
            self.level += 1;
            self.heal(LEVEL_UP_HEAL);
            self.rebuild_projectile_ring();
            leveled = true;
        }
        leveled
    }
}

/// A pursuing enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub health: i32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            speed: ENEMY_SPEED,
            radius: ENEMY_RADIUS,
            health: ENEMY_HEALTH,
        }
    }

    /// Step straight toward the player. Enemies overlap freely; there is no
    /// avoidance.
    pub fn pursue(&mut self, player_pos: Vec2) {
        let to_player = player_pos - self.pos;
        self.pos += to_player.normalize_or_zero() * self.speed;
    }
}

/// A timed area-damage marker left behind by a bomb, kept only so the
/// renderer can draw the blast fading out
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub ticks_left: u32,
}

impl Explosion {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: BOMB_RADIUS,
            ticks_left: EXPLOSION_DURATION_TICKS,
        }
    }

    /// Fraction of the blast's lifetime remaining, in [0, 1]
    pub fn remaining_fraction(&self) -> f32 {
        self.ticks_left as f32 / EXPLOSION_DURATION_TICKS as f32
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub camera: Camera,
    pub shop: Shop,
    /// Active enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    /// Active blast markers
    pub explosions: Vec<Explosion>,
    /// Difficulty epoch, 1-based
    pub wave: u32,
    pub enemies_killed: u32,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
    /// Ticks between spawns; monotonically non-increasing
    pub spawn_delay: u32,
    /// Lower bound the spawn delay decays toward; waves lower it further
    pub spawn_delay_floor: u32,
    /// Decorative scatter, fixed for the session
    pub trees: Vec<Vec2>,
    pub rocks: Vec<Vec2>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session from a seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let scatter = |rng: &mut Pcg32, count: usize| -> Vec<Vec2> {
            (0..count)
                .map(|_| {
                    Vec2::new(
                        rng.random_range(0.0..=MAP_WIDTH),
                        rng.random_range(0.0..=MAP_HEIGHT),
                    )
                })
                .collect()
        };
        let trees = scatter(&mut rng, TREE_COUNT);
        let rocks = scatter(&mut rng, ROCK_COUNT);

        let player = Player::new(map_size() / 2.0);
        let mut camera = Camera::new();
        camera.update(player.pos);

        Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player,
            camera,
            shop: Shop::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            wave: 1,
            enemies_killed: 0,
            spawn_timer: 0,
            spawn_delay: SPAWN_DELAY_START,
            spawn_delay_floor: SPAWN_DELAY_FLOOR,
            trees,
            rocks,
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Spawn one enemy at a fixed radial distance from the player at a
    /// uniformly random angle, clamped into map bounds
    pub fn spawn_enemy(&mut self) {
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let pos = self.player.pos + Vec2::new(angle.cos(), angle.sin()) * SPAWN_DISTANCE;
        let pos = pos.clamp(Vec2::ZERO, map_size());
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, pos));
    }

    /// Gold dropped by a kill, uniform in [GOLD_DROP_MIN, GOLD_DROP_MAX]
    pub fn roll_gold_drop(&mut self) -> u32 {
        self.rng.random_range(GOLD_DROP_MIN..=GOLD_DROP_MAX)
    }

    /// Leave a blast marker for the renderer
    pub fn record_explosion(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        self.explosions.push(Explosion::new(id, pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn projectile_angle_wraps_into_domain() {
        let mut p = Projectile::new(0.0);
        p.angle = 359.0;
        p.advance();
        assert!((0.0..360.0).contains(&p.angle));
        assert!((p.angle - 2.0).abs() < 1e-3);
    }

    #[test]
    fn projectile_position_matches_closed_form() {
        let mut p = Projectile::new(45.0);
        for _ in 0..7 {
            p.advance();
        }
        let owner = Vec2::new(100.0, 200.0);
        let theta = (p.angle + p.angle_offset).to_radians();
        let expected = owner + Vec2::new(theta.cos(), theta.sin()) * p.orbit_radius;
        assert!(p.position(owner).distance(expected) < 1e-3);
    }

    #[test]
    fn ring_grows_with_level_and_caps_at_eight() {
        let mut player = Player::new(map_size() / 2.0);
        assert_eq!(player.projectiles.len(), 3); // level 1

        player.level = 4;
        player.rebuild_projectile_ring();
        assert_eq!(player.projectiles.len(), 6);

        player.level = 20;
        player.rebuild_projectile_ring();
        assert_eq!(player.projectiles.len(), 8);

        // Evenly spaced by 360/count degrees of phase
        let step = 360.0 / 8.0;
        for (i, p) in player.projectiles.iter().enumerate() {
            assert!((p.angle_offset - i as f32 * step).abs() < 1e-3);
        }
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut player = Player::new(map_size() / 2.0);
        let start = player.pos;
        player.step_movement(true, true, true, true);
        assert_eq!(player.pos, start);
    }

    #[test]
    fn movement_clamps_to_map_margin() {
        let mut player = Player::new(Vec2::new(PLAYER_RADIUS + 1.0, PLAYER_RADIUS + 1.0));
        for _ in 0..10 {
            player.step_movement(true, false, true, false);
        }
        assert_eq!(player.pos, Vec2::splat(PLAYER_RADIUS));
    }

    #[test]
    fn dash_requires_ownership_and_cooldown() {
        let mut player = Player::new(map_size() / 2.0);
        player.trigger_dash();
        assert!(!player.is_dashing());

        player.has_dash = true;
        player.trigger_dash();
        assert!(player.is_dashing());
        assert_eq!(player.dash_cooldown, DASH_COOLDOWN_TICKS);

        // Re-trigger is gated while the cooldown runs
        player.dash_duration = 0;
        player.trigger_dash();
        assert!(!player.is_dashing());
    }

    #[test]
    fn dash_timers_count_down_once_per_movement_step() {
        let mut player = Player::new(map_size() / 2.0);
        player.has_dash = true;
        player.trigger_dash();
        player.step_movement(false, false, false, false);
        assert_eq!(player.dash_duration, DASH_DURATION_TICKS - 1);
        assert_eq!(player.dash_cooldown, DASH_COOLDOWN_TICKS - 1);
    }

    #[test]
    fn dash_speed_applies_while_active() {
        let mut player = Player::new(map_size() / 2.0);
        player.has_dash = true;
        player.trigger_dash();
        let start = player.pos;
        player.step_movement(false, false, false, true);
        assert!((player.pos.x - start.x - DASH_SPEED).abs() < 1e-3);
    }

    #[test]
    fn potion_heals_capped_and_requires_missing_health() {
        let mut player = Player::new(map_size() / 2.0);
        player.potions = 2;

        // Full health: no consumption
        player.use_potion();
        assert_eq!(player.potions, 2);

        player.health = 90;
        player.use_potion();
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
        assert_eq!(player.potions, 1);

        player.health = 40;
        player.use_potion();
        assert_eq!(player.health, 70);
        assert_eq!(player.potions, 0);

        // Empty inventory: no-op
        player.health = 10;
        player.use_potion();
        assert_eq!(player.health, 10);
    }

    #[test]
    fn bomb_consumes_and_reports() {
        let mut player = Player::new(map_size() / 2.0);
        assert!(!player.use_bomb());
        player.bombs = 1;
        assert!(player.use_bomb());
        assert_eq!(player.bombs, 0);
        assert!(!player.use_bomb());
    }

    #[test]
    fn leveling_is_monotonic_and_idempotent() {
        let mut player = Player::new(map_size() / 2.0);
        player.experience = 95;
        player.health = 70;

        assert!(player.gain_experience(XP_PER_KILL));
        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 105);
        assert_eq!(player.health, 90);
        assert_eq!(player.projectiles.len(), 4);

        // Same threshold cannot fire twice
        assert!(!player.gain_experience(XP_PER_KILL));
        assert_eq!(player.level, 2);

        // Next threshold is level * 100 = 200
        player.experience = 195;
        assert!(player.gain_experience(XP_PER_KILL));
        assert_eq!(player.level, 3);
    }

    #[test]
    fn spawn_stays_in_bounds_and_ids_are_unique() {
        let mut state = GameState::new(7);
        state.player.pos = Vec2::new(PLAYER_RADIUS, PLAYER_RADIUS);
        for _ in 0..64 {
            state.spawn_enemy();
        }
        for enemy in &state.enemies {
            assert!(enemy.pos.x >= 0.0 && enemy.pos.x <= MAP_WIDTH);
            assert!(enemy.pos.y >= 0.0 && enemy.pos.y <= MAP_HEIGHT);
        }
        let mut ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), state.enemies.len());
    }

    #[test]
    fn scatter_is_seeded_and_in_bounds() {
        let a = GameState::new(42);
        let b = GameState::new(42);
        assert_eq!(a.trees, b.trees);
        assert_eq!(a.rocks, b.rocks);
        assert_eq!(a.trees.len(), TREE_COUNT);
        assert_eq!(a.rocks.len(), ROCK_COUNT);
        for p in a.trees.iter().chain(a.rocks.iter()) {
            assert!(p.x >= 0.0 && p.x <= MAP_WIDTH && p.y >= 0.0 && p.y <= MAP_HEIGHT);
        }
    }

    proptest! {
        #[test]
        fn movement_never_leaves_bounds(
            x in 0.0f32..MAP_WIDTH,
            y in 0.0f32..MAP_HEIGHT,
            steps in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 0..64)
        ) {
            let mut player = Player::new(Vec2::new(x, y).clamp(
                Vec2::splat(PLAYER_RADIUS),
                map_size() - PLAYER_RADIUS,
            ));
            for (up, down, left, right) in steps {
                player.step_movement(up, down, left, right);
                prop_assert!(player.pos.x >= PLAYER_RADIUS && player.pos.x <= MAP_WIDTH - PLAYER_RADIUS);
                prop_assert!(player.pos.y >= PLAYER_RADIUS && player.pos.y <= MAP_HEIGHT - PLAYER_RADIUS);
            }
        }

        #[test]
        fn health_stays_clamped(deltas in proptest::collection::vec(-150i32..150, 0..64)) {
            let mut player = Player::new(map_size() / 2.0);
            for d in deltas {
                if d >= 0 { player.heal(d) } else { player.take_damage(-d) }
                prop_assert!((0..=PLAYER_MAX_HEALTH).contains(&player.health));
            }
        }

        #[test]
        fn projectile_angle_always_in_domain(ticks in 0u32..2048) {
            let mut p = Projectile::new(120.0);
            for _ in 0..ticks {
                p.advance();
                prop_assert!((0.0..360.0).contains(&p.angle));
            }
        }
    }
}
