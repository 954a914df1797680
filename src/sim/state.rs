//! Game state and core simulation types
//!
//! One `GameState` is one game, from construction until game over. Nothing
//! here is global; a fresh game is a fresh `GameState`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::debounce::Debounced;
use super::entity::{Entity, Player};
use super::spawn::{next_bonus_spot, next_enemy_spot};
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Built, waiting for the start action
    Ready,
    /// Ticking
    Running,
    /// Run ended; only a full reset leaves this phase
    GameOver,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Background theme on start
    Theme,
    /// Player touched an enemy
    Collision,
    /// Player caught a bonus
    Pickup,
    /// Run ended
    GameOver,
}

/// Something the frontend should reflect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(i32),
    Sound(SoundEffect),
    GameOver,
}

/// Deferred effect of a debounced collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeChange {
    Lose,
    Gain,
}

impl LifeChange {
    pub fn delta(self) -> i32 {
        match self {
            LifeChange::Lose => -1,
            LifeChange::Gain => 1,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Not clamped; see `tick::is_player_dead`
    pub lives: i32,
    /// Timestamp of the previous tick
    pub last_frame_ms: Option<f64>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Entity>,
    pub bonuses: Vec<Entity>,
    pub lose_life: Debounced<LifeChange>,
    pub gain_life: Debounced<LifeChange>,
    /// Events not yet handed to the frontend
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given settings and seed
    pub fn new(settings: Settings, seed: u64) -> Self {
        let player = Player::new(
            settings.player_size(),
            settings.game_height,
            settings.player_bottom_margin,
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            score: 0,
            lives: settings.starting_lives,
            last_frame_ms: None,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            bonuses: Vec::new(),
            lose_life: Debounced::new(LifeChange::Lose, settings.lose_life_window_ms),
            gain_life: Debounced::new(LifeChange::Gain, settings.gain_life_window_ms),
            events: Vec::new(),
            settings,
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Draw a fall speed from the configured range
    fn roll_speed(&mut self) -> f32 {
        self.rng
            .random_range(self.settings.min_fall_speed..self.settings.max_fall_speed)
    }

    /// Top both populations back up to their caps
    pub fn backfill(&mut self) {
        while self.enemies.len() < self.settings.max_enemies {
            let Some(spot) = next_enemy_spot(&self.enemies, &self.settings, &mut self.rng) else {
                log::warn!("No free enemy lane with {} enemies alive", self.enemies.len());
                break;
            };
            let speed = self.roll_speed();
            self.enemies
                .push(Entity::falling(spot, self.settings.enemy_size(), speed));
        }

        while self.bonuses.len() < self.settings.max_bonuses {
            let Some(spot) = next_bonus_spot(&self.bonuses, &self.settings, &mut self.rng) else {
                log::warn!("No free bonus lane with {} bonuses alive", self.bonuses.len());
                break;
            };
            let speed = self.roll_speed();
            self.bonuses
                .push(Entity::falling(spot, self.settings.bonus_size(), speed));
        }
    }

    /// Earliest pending debounce deadline
    pub fn next_timer_deadline(&self) -> Option<f64> {
        match (self.lose_life.deadline(), self.gain_life.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire every debounced life change due at `now_ms`, earliest first.
    ///
    /// Returns the number of changes applied.
    pub fn fire_due_timers(&mut self, now_ms: f64) -> usize {
        let mut due: Vec<(f64, LifeChange)> = Vec::with_capacity(2);
        for debounced in [&mut self.lose_life, &mut self.gain_life] {
            if let Some(deadline) = debounced.deadline() {
                if let Some(change) = debounced.poll(now_ms) {
                    due.push((deadline, change));
                }
            }
        }
        due.sort_by(|a, b| a.0.total_cmp(&b.0));

        for &(_, change) in &due {
            self.apply_life_change(change);
        }
        due.len()
    }

    fn apply_life_change(&mut self, change: LifeChange) {
        self.lives += change.delta();
        log::debug!("{:?}: lives now {}", change, self.lives);
        self.emit(GameEvent::LivesChanged(self.lives));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(Settings::default(), 42);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert!(state.enemies.is_empty());
        assert!(state.last_frame_ms.is_none());
    }

    #[test]
    fn test_backfill_reaches_caps() {
        let mut state = GameState::new(Settings::default(), 42);
        state.backfill();
        assert_eq!(state.enemies.len(), 5);
        assert_eq!(state.bonuses.len(), 1);
        for e in state.enemies.iter().chain(&state.bonuses) {
            assert!(e.speed >= 0.25 && e.speed < 0.75);
            assert!(e.pos.y < 0.0);
        }
    }

    #[test]
    fn test_fire_due_timers_applies_in_deadline_order() {
        let mut state = GameState::new(Settings::default(), 1);
        state.gain_life.call(0.0); // due at 50
        state.lose_life.call(10.0); // due at 35
        assert_eq!(state.next_timer_deadline(), Some(35.0));

        assert_eq!(state.fire_due_timers(40.0), 1);
        assert_eq!(state.lives, 2);
        assert_eq!(state.fire_due_timers(60.0), 1);
        assert_eq!(state.lives, 3);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::LivesChanged(2), GameEvent::LivesChanged(3)]
        );
        assert!(state.drain_events().is_empty());
    }
}
