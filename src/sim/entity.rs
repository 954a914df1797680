//! Falling entities and the player
//!
//! Coordinates are playfield pixels with the origin at the top-left corner
//! and `y` growing downward. Positions are the top-left corner of the sprite.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A falling enemy or bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed in pixels per millisecond
    pub speed: f32,
    /// Set once the entity has left the playfield bottom
    pub destroyed: bool,
}

impl Entity {
    /// Create an entity at a spawn point
    pub fn falling(spot: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            pos: spot,
            size,
            speed,
            destroyed: false,
        }
    }

    /// Advance the fall by `dt_ms` milliseconds
    pub fn update(&mut self, dt_ms: f32, game_height: f32) {
        self.pos.y += self.speed * dt_ms;
        if self.pos.y > game_height {
            self.destroyed = true;
        }
    }

    /// Horizontal extent `[left, right)`
    pub fn span(&self) -> (f32, f32) {
        (self.pos.x, self.pos.x + self.size.x)
    }
}

/// The player sprite, moved by keyboard input only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Player {
    /// Place the player near the bottom of the playfield, two widths in
    pub fn new(size: Vec2, game_height: f32, bottom_margin: f32) -> Self {
        Self {
            pos: Vec2::new(2.0 * size.x, game_height - size.y - bottom_margin),
            size,
        }
    }

    /// Step one sprite width to the left, stopping at the wall
    pub fn move_left(&mut self) {
        self.pos.x = (self.pos.x - self.size.x).max(0.0);
    }

    /// Step one sprite width to the right, stopping at the wall
    pub fn move_right(&mut self, game_width: f32) {
        let max_x = (game_width - self.size.x).max(0.0);
        self.pos.x = (self.pos.x + self.size.x).min(max_x);
    }
}
