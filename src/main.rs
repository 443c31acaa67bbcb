//! Orbit Survivors headless runner
//!
//! Drives the fixed-tick simulation without a renderer. A small built-in bot
//! can steer the player; snapshots can be streamed to stdout as JSON lines
//! for an external presenter or for inspection.

use std::io::Write;

use clap::Parser;

use orbit_survivors::FrameSnapshot;
use orbit_survivors::consts::*;
use orbit_survivors::map_size;
use orbit_survivors::sim::{GameState, TickInput, tick};

#[derive(Parser)]
#[command(name = "orbit-survivors", about = "Headless survival arcade simulation")]
struct Opts {
    /// Session seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of ticks to simulate (3600 = one minute of game time)
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Emit a JSON snapshot to stdout every N ticks
    #[arg(long)]
    snapshot_every: Option<u64>,

    /// Let the built-in bot steer (otherwise the player stands still)
    #[arg(long)]
    bot: bool,

    /// Restart on game over instead of stopping
    #[arg(long)]
    auto_restart: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opts = Opts::parse();

    let mut state = GameState::new(opts.seed);
    log::info!("Starting run: seed {}, {} ticks", opts.seed, opts.ticks);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for _ in 0..opts.ticks {
        let mut input = if opts.bot {
            bot_input(&state)
        } else {
            TickInput::default()
        };

        if state.is_game_over() {
            if opts.auto_restart {
                input.restart = true;
            } else {
                break;
            }
        }

        tick(&mut state, &input);

        if let Some(every) = opts.snapshot_every {
            if every > 0 && state.time_ticks % every == 0 {
                serde_json::to_writer(&mut out, &FrameSnapshot::capture(&state))?;
                out.write_all(b"\n")?;
            }
        }
    }

    log::info!(
        "Finished at tick {}: wave {}, level {}, {} kills, {} HP, {} gold{}",
        state.time_ticks,
        state.wave,
        state.player.level,
        state.enemies_killed,
        state.player.health,
        state.player.gold,
        if state.is_game_over() { " (game over)" } else { "" }
    );
    Ok(())
}

/// Minimal survival bot: back away from the nearest enemy, dash when crowded,
/// drink a potion when hurt, and bomb when surrounded.
fn bot_input(state: &GameState) -> TickInput {
    let player = &state.player;
    let mut input = TickInput::default();

    let nearest = state.enemies.iter().min_by(|a, b| {
        a.pos
            .distance_squared(player.pos)
            .partial_cmp(&b.pos.distance_squared(player.pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(enemy) = nearest {
        let away = player.pos - enemy.pos;
        if away.length() < 300.0 {
            input.right = away.x > 0.5;
            input.left = away.x < -0.5;
            input.down = away.y > 0.5;
            input.up = away.y < -0.5;
            input.dash = away.length() < 100.0;
        }
    } else {
        // Nothing chasing: drift back toward the middle of the map
        let to_center = map_size() / 2.0 - player.pos;
        input.right = to_center.x > 10.0;
        input.left = to_center.x < -10.0;
        input.down = to_center.y > 10.0;
        input.up = to_center.y < -10.0;
    }

    input.use_potion = player.potions > 0 && player.health < 40;

    let crowded = state
        .enemies
        .iter()
        .filter(|e| e.pos.distance_squared(player.pos) < BOMB_RADIUS * BOMB_RADIUS)
        .count();
    input.use_bomb = player.bombs > 0 && crowded >= 4;

    input
}
