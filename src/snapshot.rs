//! Render-boundary state capture
//!
//! Everything an external presenter needs to draw one frame, decoupled from
//! the simulation types: derived projectile positions, explosion fade
//! fractions, HUD scalars, and the minimap projection. Snapshots serialize,
//! so the headless runner can stream them as JSON lines.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::map_size;
use crate::sim::GameState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    /// Presenters tint the player while the dash is active
    pub dashing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Fraction of the blast's lifetime remaining, in [0, 1]
    pub remaining: f32,
}

/// HUD scalars for the overlay pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hud {
    pub health: i32,
    pub level: u32,
    pub experience: u32,
    pub gold: u32,
    pub potions: u32,
    pub bombs: u32,
    pub has_dash: bool,
    /// 0 = dash ready, 1 = full cooldown ahead
    pub dash_cooldown: f32,
    pub wave: u32,
    pub kills: u32,
    pub shop_open: bool,
}

/// Minimap-normalized projections (`world / map * MINIMAP_SIZE`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Minimap {
    pub player: Vec2,
    pub enemies: Vec<Vec2>,
}

/// One frame's worth of drawable state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub game_over: bool,
    /// World-space top-left of the visible region
    pub camera_origin: Vec2,
    pub player: PlayerView,
    pub projectiles: Vec<ProjectileView>,
    pub enemies: Vec<EnemyView>,
    pub explosions: Vec<ExplosionView>,
    pub hud: Hud,
    pub minimap: Minimap,
    /// Decorative scatter, fixed for the session
    pub trees: Vec<Vec2>,
    pub rocks: Vec<Vec2>,
}

impl FrameSnapshot {
    /// Capture the drawable view of the current state
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            tick: state.time_ticks,
            game_over: state.is_game_over(),
            camera_origin: state.camera.origin,
            player: PlayerView {
                pos: player.pos,
                radius: player.radius,
                dashing: player.is_dashing(),
            },
            projectiles: player
                .projectiles
                .iter()
                .map(|projectile| ProjectileView {
                    pos: projectile.position(player.pos),
                    size: projectile.size,
                })
                .collect(),
            enemies: state
                .enemies
                .iter()
                .map(|enemy| EnemyView {
                    id: enemy.id,
                    pos: enemy.pos,
                    radius: enemy.radius,
                })
                .collect(),
            explosions: state
                .explosions
                .iter()
                .map(|explosion| ExplosionView {
                    id: explosion.id,
                    pos: explosion.pos,
                    radius: explosion.radius,
                    remaining: explosion.remaining_fraction(),
                })
                .collect(),
            hud: Hud {
                health: player.health,
                level: player.level,
                experience: player.experience,
                gold: player.gold,
                potions: player.potions,
                bombs: player.bombs,
                has_dash: player.has_dash,
                dash_cooldown: player.dash_cooldown as f32 / DASH_COOLDOWN_TICKS as f32,
                wave: state.wave,
                kills: state.enemies_killed,
                shop_open: state.shop.is_open(),
            },
            minimap: Minimap {
                player: minimap_project(player.pos),
                enemies: state.enemies.iter().map(|e| minimap_project(e.pos)).collect(),
            },
            trees: state.trees.clone(),
            rocks: state.rocks.clone(),
        }
    }
}

/// Project a world position onto the minimap square
#[inline]
pub fn minimap_project(world: Vec2) -> Vec2 {
    world / map_size() * MINIMAP_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Enemy;
    use crate::sim::{TickInput, tick};

    #[test]
    fn projectile_views_match_closed_form_orbit() {
        let mut state = GameState::new(21);
        for _ in 0..50 {
            tick(&mut state, &TickInput::default());
        }

        let snapshot = FrameSnapshot::capture(&state);
        assert_eq!(snapshot.projectiles.len(), state.player.projectiles.len());
        for (view, projectile) in snapshot.projectiles.iter().zip(&state.player.projectiles) {
            let theta = (projectile.angle + projectile.angle_offset).to_radians();
            let expected =
                state.player.pos + Vec2::new(theta.cos(), theta.sin()) * projectile.orbit_radius;
            assert!(view.pos.distance(expected) < 1e-3);
        }
    }

    #[test]
    fn minimap_projection_stays_on_the_square() {
        let mut state = GameState::new(21);
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, Vec2::new(MAP_WIDTH, MAP_HEIGHT)));

        let snapshot = FrameSnapshot::capture(&state);
        let all = snapshot
            .minimap
            .enemies
            .iter()
            .chain(std::iter::once(&snapshot.minimap.player));
        for p in all {
            assert!(p.x >= 0.0 && p.x <= MINIMAP_SIZE);
            assert!(p.y >= 0.0 && p.y <= MINIMAP_SIZE);
        }
        // Corner enemy projects to the minimap corner
        assert_eq!(
            snapshot.minimap.enemies[0],
            Vec2::new(MINIMAP_SIZE, MINIMAP_SIZE)
        );
    }

    #[test]
    fn hud_mirrors_player_state() {
        let mut state = GameState::new(21);
        state.player.gold = 123;
        state.player.potions = 2;
        state.player.has_dash = true;
        state.player.dash_cooldown = DASH_COOLDOWN_TICKS / 2;

        let snapshot = FrameSnapshot::capture(&state);
        assert_eq!(snapshot.hud.gold, 123);
        assert_eq!(snapshot.hud.potions, 2);
        assert!(snapshot.hud.has_dash);
        assert!((snapshot.hud.dash_cooldown - 0.5).abs() < 1e-3);
        assert_eq!(snapshot.hud.wave, 1);
        assert!(!snapshot.hud.shop_open);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let state = GameState::new(21);
        let snapshot = FrameSnapshot::capture(&state);
        let json = serde_json::to_string(&snapshot).expect("serializes");
        let back: FrameSnapshot = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back.tick, snapshot.tick);
        assert_eq!(back.trees.len(), TREE_COUNT);
        assert_eq!(back.player.pos, snapshot.player.pos);
    }
}
