//! Burger Dash - a falling-objects dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, tick)
//! - `scheduler`: Fixed-delay periodic task and clocks
//! - `engine`: Owns one game and drives it from timestamps
//! - `platform`: Frontend seam (displays, audio, game-over notice)
//! - `settings`: Fixed configuration surface

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod engine;
pub mod platform;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use engine::Engine;
pub use platform::Frontend;
pub use settings::Settings;

/// Game configuration constants (defaults for `Settings`)
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const GAME_WIDTH: f32 = 525.0;
    pub const GAME_HEIGHT: f32 = 525.0;

    /// Population caps
    pub const MAX_ENEMIES: usize = 5;
    pub const MAX_BONUSES: usize = 1;
    /// Upper bound on spawn lanes per population
    pub const MAX_LANES: usize = 1024;

    /// Player sprite (the burger)
    pub const PLAYER_WIDTH: f32 = 75.0;
    pub const PLAYER_HEIGHT: f32 = 54.0;
    /// Gap between the player's feet and the playfield bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Enemy sprite (the cat)
    pub const ENEMY_WIDTH: f32 = 75.0;
    pub const ENEMY_HEIGHT: f32 = 156.0;

    /// Bonus sprite (the sauce)
    pub const BONUS_WIDTH: f32 = 75.0;
    pub const BONUS_HEIGHT: f32 = 75.0;

    /// Fall speed range, pixels per millisecond
    pub const MIN_FALL_SPEED: f32 = 0.25;
    pub const MAX_FALL_SPEED: f32 = 0.75;

    pub const STARTING_LIVES: i32 = 3;

    /// Fixed delay between ticks (~50 Hz)
    pub const TICK_INTERVAL_MS: f64 = 20.0;
    /// Debounce window for losing a life on enemy contact
    pub const LOSE_LIFE_WINDOW_MS: f64 = 25.0;
    /// Debounce window for gaining a life on bonus pickup
    pub const GAIN_LIFE_WINDOW_MS: f64 = 50.0;
}
