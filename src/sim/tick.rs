//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically. The order
//! within one tick is load-bearing: input edges, movement, projectile
//! orbits, camera, spawning, pursuit, combat resolution, wave escalation,
//! timer decay. Leveling mutates the projectile ring that the same tick's
//! draw pass reads, so it must land before the snapshot is captured.

use super::collision::{resolve_area_damage, resolve_combat};
use super::shop::ShopSlot;
use super::state::GameState;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held movement keys
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Press-edge commands
    pub dash: bool,
    pub use_potion: bool,
    pub use_bomb: bool,
    pub toggle_shop: bool,
    /// At most one purchase per press edge
    pub buy_slot: Option<ShopSlot>,
    /// Only honored while the game is over
    pub restart: bool,
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Terminal state: nothing advances until an explicit restart swaps in a
    // freshly constructed session wholesale
    if state.is_game_over() {
        if input.restart {
            let seed = state.seed;
            *state = GameState::new(seed);
            log::info!("Session restarted (seed {seed})");
        }
        return;
    }

    // Shop overlay: the world freezes while it is open
    if input.toggle_shop {
        state.shop.toggle();
    }
    if state.shop.is_open() {
        if let Some(slot) = input.buy_slot {
            state.shop.buy(slot, &mut state.player);
        }
        return;
    }

    state.time_ticks += 1;

    // Press-edge items, then movement (which ticks the dash timers once)
    if input.dash {
        state.player.trigger_dash();
    }
    state
        .player
        .step_movement(input.up, input.down, input.left, input.right);
    if input.use_potion {
        state.player.use_potion();
    }
    if input.use_bomb && state.player.use_bomb() {
        let center = state.player.pos;
        resolve_area_damage(state, center, BOMB_RADIUS);
        state.record_explosion(center);
    }

    // Orbits advance around the post-movement anchor
    for projectile in &mut state.player.projectiles {
        projectile.advance();
    }

    state.camera.update(state.player.pos);

    run_spawn_scheduler(state);

    let player_pos = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.pursue(player_pos);
    }

    resolve_combat(state);

    run_wave_escalation(state);

    // Timer decay last; expired markers are rebuilt out
    for explosion in &mut state.explosions {
        explosion.ticks_left -= 1;
    }
    state.explosions.retain(|explosion| explosion.ticks_left > 0);
}

/// Count up toward the next spawn; each spawn tightens the delay toward the
/// current floor
fn run_spawn_scheduler(state: &mut GameState) {
    state.spawn_timer += 1;
    if state.spawn_timer >= state.spawn_delay {
        state.spawn_enemy();
        state.spawn_timer = 0;
        state.spawn_delay = state
            .spawn_delay
            .saturating_sub(1)
            .max(state.spawn_delay_floor);
    }
}

/// Advance the wave once enough kills accumulate; each wave lowers the spawn
/// floor and drops the current delay toward it
fn run_wave_escalation(state: &mut GameState) {
    while state.enemies_killed >= state.wave * WAVE_KILL_STEP {
        state.wave += 1;
        state.spawn_delay_floor = state
            .spawn_delay_floor
            .saturating_sub(WAVE_FLOOR_STEP)
            .max(WAVE_FLOOR_MIN);
        state.spawn_delay = state
            .spawn_delay
            .saturating_sub(WAVE_FLOOR_STEP)
            .max(state.spawn_delay_floor);
        log::info!(
            "Wave {} (spawn delay {}, floor {})",
            state.wave,
            state.spawn_delay,
            state.spawn_delay_floor
        );
    }
}
