//! Scrolling camera over the bounded world
//!
//! The camera keeps its target centered in a fixed-size view rectangle and
//! clamps the view origin so the rectangle never leaves the map. Screen
//! coordinates are world coordinates relative to the origin.

use glam::Vec2;

use crate::{map_size, viewport_size};

/// A view rectangle tracking a target position
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World-space top-left corner of the visible region
    pub origin: Vec2,
    /// Fixed view rectangle dimensions
    pub viewport: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        Self {
            origin: Vec2::ZERO,
            viewport: viewport_size(),
        }
    }

    /// Recenter on the target, clamped so the view stays inside
    /// `[0, map] x [0, map]`. A map smaller than the viewport pins the origin
    /// to zero instead of inverting the clamp.
    pub fn update(&mut self, target: Vec2) {
        let max_origin = (map_size() - self.viewport).max(Vec2::ZERO);
        self.origin = (target - self.viewport / 2.0).clamp(Vec2::ZERO, max_origin);
    }

    /// Map a world position into screen space
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.origin
    }

    /// Whether a world position lands inside the view rectangle, padded by
    /// `margin` (for culling at the draw boundary)
    pub fn is_visible(&self, world: Vec2, margin: f32) -> bool {
        let screen = self.world_to_screen(world);
        screen.x >= -margin
            && screen.y >= -margin
            && screen.x <= self.viewport.x + margin
            && screen.y <= self.viewport.y + margin
    }
}
