//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` call = one step)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies
//!
//! Collection removals rebuild from survivors instead of removing in place,
//! so no iterator is ever invalidated mid-resolution.

pub mod camera;
pub mod collision;
pub mod shop;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{circles_overlap, resolve_area_damage, resolve_combat};
pub use shop::{Shop, ShopItem, ShopSlot};
pub use state::{Enemy, Explosion, GamePhase, GameState, Player, Projectile};
pub use tick::{TickInput, tick};
