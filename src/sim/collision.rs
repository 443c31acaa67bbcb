//! Collision and combat resolution
//!
//! All combat is circle-circle overlap. Resolution never removes from a
//! collection while iterating it: damage is applied in a first sweep, then
//! the enemy collection is rebuilt from survivors and each casualty is
//! awarded exactly once.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Overlap test: center distance strictly under the radius sum
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

/// One tick of combat: orbiting projectiles damage overlapping enemies,
/// casualties are removed with their kill awards, and enemies in contact with
/// the player drain health. Drops the phase to `GameOver` when the player's
/// health reaches zero.
pub fn resolve_combat(state: &mut GameState) {
    let player_pos = state.player.pos;

    // Damage sweep over every (projectile, enemy) pair
    for projectile in &state.player.projectiles {
        let pos = projectile.position(player_pos);
        for enemy in &mut state.enemies {
            if circles_overlap(pos, projectile.size, enemy.pos, enemy.radius) {
                enemy.health -= projectile.damage;
            }
        }
    }

    // Rebuild from survivors; award each casualty once
    let (survivors, dead): (Vec<_>, Vec<_>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|enemy| enemy.health > 0);
    state.enemies = survivors;
    award_kills(state, dead.len());

    // Contact damage, one point per overlapping enemy per tick
    for enemy in &state.enemies {
        if circles_overlap(player_pos, state.player.radius, enemy.pos, enemy.radius) {
            state.player.take_damage(ENEMY_CONTACT_DAMAGE);
        }
    }
    if state.player.health <= 0 && state.phase == GamePhase::Playing {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {}: wave {}, level {}, {} kills",
            state.time_ticks,
            state.wave,
            state.player.level,
            state.enemies_killed
        );
    }
}

/// Remove every enemy whose center lies inside the blast radius, with the
/// same per-kill awards as projectile kills
pub fn resolve_area_damage(state: &mut GameState, center: Vec2, radius: f32) {
    let (survivors, dead): (Vec<_>, Vec<_>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|enemy| enemy.pos.distance_squared(center) >= radius * radius);
    state.enemies = survivors;
    award_kills(state, dead.len());
}

/// Per-kill bookkeeping: kill counter, gold roll, experience and any
/// resulting level-ups
fn award_kills(state: &mut GameState, dead: usize) {
    for _ in 0..dead {
        state.enemies_killed += 1;
        let gold = state.roll_gold_drop();
        state.player.gold += gold;
        if state.player.gain_experience(XP_PER_KILL) {
            log::debug!(
                "Level {} reached ({} projectiles)",
                state.player.level,
                state.player.projectiles.len()
            );
        }
    }
}
