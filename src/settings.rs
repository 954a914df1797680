//! Game settings
//!
//! The fixed configuration surface of a game. Every field defaults to the
//! matching constant in `crate::consts`, so partial JSON files are accepted.

use std::path::Path;

use anyhow::{Context, ensure};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub game_width: f32,
    pub game_height: f32,

    // === Populations ===
    pub max_enemies: usize,
    pub max_bonuses: usize,

    // === Canonical sizes ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_margin: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub bonus_width: f32,
    pub bonus_height: f32,

    // === Motion ===
    /// Fall speed range in pixels per millisecond
    pub min_fall_speed: f32,
    pub max_fall_speed: f32,

    // === Rules ===
    pub starting_lives: i32,

    // === Timing (milliseconds) ===
    pub tick_interval_ms: f64,
    pub lose_life_window_ms: f64,
    pub gain_life_window_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,

            max_enemies: MAX_ENEMIES,
            max_bonuses: MAX_BONUSES,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            bonus_width: BONUS_WIDTH,
            bonus_height: BONUS_HEIGHT,

            min_fall_speed: MIN_FALL_SPEED,
            max_fall_speed: MAX_FALL_SPEED,

            starting_lives: STARTING_LIVES,

            tick_interval_ms: TICK_INTERVAL_MS,
            lose_life_window_ms: LOSE_LIFE_WINDOW_MS,
            gain_life_window_ms: GAIN_LIFE_WINDOW_MS,
        }
    }
}

impl Settings {
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    pub fn enemy_size(&self) -> Vec2 {
        Vec2::new(self.enemy_width, self.enemy_height)
    }

    pub fn bonus_size(&self) -> Vec2 {
        Vec2::new(self.bonus_width, self.bonus_height)
    }

    /// Number of spawn lanes for entities of the given width
    pub fn lane_count(&self, entity_width: f32) -> usize {
        if entity_width <= 0.0 {
            return 0;
        }
        (self.game_width / entity_width).floor() as usize
    }

    /// Reject settings the simulation cannot honor
    pub fn validate(&self) -> anyhow::Result<()> {
        let floats = [
            self.game_width,
            self.game_height,
            self.player_width,
            self.player_height,
            self.player_bottom_margin,
            self.enemy_width,
            self.enemy_height,
            self.bonus_width,
            self.bonus_height,
            self.min_fall_speed,
            self.max_fall_speed,
        ];
        ensure!(
            floats.iter().all(|v| v.is_finite())
                && [
                    self.tick_interval_ms,
                    self.lose_life_window_ms,
                    self.gain_life_window_ms,
                ]
                .iter()
                .all(|v| v.is_finite()),
            "settings contain a non-finite number"
        );
        ensure!(
            self.game_width > 0.0 && self.game_height > 0.0,
            "playfield must have a positive size, got {}x{}",
            self.game_width,
            self.game_height
        );
        for (name, size) in [
            ("player", self.player_size()),
            ("enemy", self.enemy_size()),
            ("bonus", self.bonus_size()),
        ] {
            ensure!(
                size.x > 0.0 && size.y > 0.0,
                "{name} must have a positive size, got {}x{}",
                size.x,
                size.y
            );
        }
        ensure!(
            self.player_width <= self.game_width,
            "player ({}) is wider than the playfield ({})",
            self.player_width,
            self.game_width
        );
        ensure!(
            self.min_fall_speed >= 0.0 && self.min_fall_speed < self.max_fall_speed,
            "fall speed range [{}, {}) is empty or negative",
            self.min_fall_speed,
            self.max_fall_speed
        );
        ensure!(
            self.tick_interval_ms > 0.0,
            "tick interval must be positive"
        );
        ensure!(
            self.lose_life_window_ms >= 0.0 && self.gain_life_window_ms >= 0.0,
            "debounce windows cannot be negative"
        );

        let enemy_lanes = self.lane_count(self.enemy_width);
        let bonus_lanes = self.lane_count(self.bonus_width);
        ensure!(
            enemy_lanes <= MAX_LANES && bonus_lanes <= MAX_LANES,
            "playfield {} wide is split into too many lanes ({} enemy, {} bonus, max {})",
            self.game_width,
            enemy_lanes,
            bonus_lanes,
            MAX_LANES
        );
        ensure!(
            enemy_lanes >= self.max_enemies,
            "{} enemy lanes cannot hold {} enemies",
            enemy_lanes,
            self.max_enemies
        );
        ensure!(
            bonus_lanes >= self.max_bonuses,
            "{} bonus lanes cannot hold {} bonuses",
            bonus_lanes,
            self.max_bonuses
        );
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Self = serde_json::from_str(json).context("malformed settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("loading {}", path.display()))
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.lane_count(settings.enemy_width), 7);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let settings = Settings::from_json(r#"{ "max_enemies": 3, "starting_lives": 5 }"#).unwrap();
        assert_eq!(settings.max_enemies, 3);
        assert_eq!(settings.starting_lives, 5);
        assert_eq!(settings.max_bonuses, MAX_BONUSES);
        assert_eq!(settings.tick_interval_ms, TICK_INTERVAL_MS);
    }

    #[test]
    fn test_rejects_more_enemies_than_lanes() {
        let err = Settings::from_json(r#"{ "max_enemies": 8 }"#).unwrap_err();
        assert!(format!("{err:#}").contains("enemy lanes"));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let settings = Settings {
            min_fall_speed: 1.0,
            max_fall_speed: 0.5,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_huge_playfield() {
        let err = Settings::from_json(r#"{ "game_width": 1e30 }"#).unwrap_err();
        assert!(format!("{err:#}").contains("too many lanes"));
    }

    #[test]
    fn test_rejects_non_finite_numbers() {
        let settings = Settings {
            game_height: f32::INFINITY,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
        let settings = Settings {
            tick_interval_ms: f64::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let settings = Settings::load_or_default(Path::new("/nonexistent/burger-dash.json"));
        assert_eq!(settings, Settings::default());
    }
}
