//! Game engine
//!
//! Owns one game, its tick scheduler and its frontend. The host only feeds
//! timestamps and input; the engine decides when debounced life changes
//! fire and when the next tick runs.

use crate::platform::{Frontend, dispatch};
use crate::scheduler::Scheduler;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, SoundEffect, TickOutcome, tick};

/// A running game and everything needed to drive it
pub struct Engine<F: Frontend> {
    state: GameState,
    scheduler: Scheduler,
    frontend: F,
}

impl<F: Frontend> Engine<F> {
    /// Build a game and show its initial score and lives
    pub fn new(settings: Settings, seed: u64, frontend: F) -> anyhow::Result<Self> {
        settings.validate()?;
        let scheduler = Scheduler::new(settings.tick_interval_ms);
        let mut engine = Self {
            state: GameState::new(settings, seed),
            scheduler,
            frontend,
        };
        engine.announce();
        Ok(engine)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts that script the game (demos and tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Whether a tick is still scheduled
    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Begin ticking; the first tick runs at `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        if self.state.phase != GamePhase::Ready {
            log::warn!("start() in {:?}, ignoring", self.state.phase);
            return;
        }
        log::info!("Starting game with seed {}", self.state.seed);
        self.state.phase = GamePhase::Running;
        self.state.emit(GameEvent::Sound(SoundEffect::Theme));
        self.scheduler.start(now_ms);
        self.flush();
    }

    pub fn move_left(&mut self) {
        if self.state.phase != GamePhase::GameOver {
            self.state.player.move_left();
        }
    }

    pub fn move_right(&mut self) {
        if self.state.phase != GamePhase::GameOver {
            let game_width = self.state.settings.game_width;
            self.state.player.move_right(game_width);
        }
    }

    /// Run everything due at `now_ms`: debounced life changes first, then at
    /// most one tick. Returns the number of ticks run.
    pub fn advance(&mut self, now_ms: f64) -> usize {
        self.state.fire_due_timers(now_ms);

        let mut ticks = 0;
        if self.scheduler.take_due(now_ms) {
            ticks = 1;
            match tick(&mut self.state, now_ms) {
                TickOutcome::Continue => self.scheduler.rearm(now_ms),
                TickOutcome::GameOver => self.scheduler.stop(),
            }
        }

        self.flush();
        ticks
    }

    /// Earliest timestamp at which `advance` has work to do
    pub fn next_wakeup_ms(&self) -> Option<f64> {
        match (self.scheduler.next_due_ms(), self.state.next_timer_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Dismiss the game-over notice: throw the game away and set up a fresh
    /// one, as if the page had been reloaded. Returns false outside game over.
    pub fn acknowledge_game_over(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            return false;
        }
        let seed = next_seed(self.state.seed);
        let settings = self.state.settings.clone();
        log::info!("Resetting game (seed {seed})");
        self.state = GameState::new(settings, seed);
        self.scheduler.stop();
        self.announce();
        true
    }

    fn announce(&mut self) {
        self.state.emit(GameEvent::ScoreChanged(self.state.score));
        self.state.emit(GameEvent::LivesChanged(self.state.lives));
        self.flush();
    }

    fn flush(&mut self) {
        let events = self.state.drain_events();
        dispatch(&events, &mut self.frontend);
    }
}

/// Seed for the game after `seed` (PCG multiplier/increment)
fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Entity, SoundEffect};
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        score: Vec<String>,
        life: Vec<String>,
        sounds: Vec<SoundEffect>,
        game_overs: usize,
    }

    impl Frontend for Recorder {
        fn score_text(&mut self, text: &str) {
            self.score.push(text.to_string());
        }
        fn life_text(&mut self, text: &str) {
            self.life.push(text.to_string());
        }
        fn play(&mut self, effect: SoundEffect) -> anyhow::Result<()> {
            self.sounds.push(effect);
            Ok(())
        }
        fn game_over(&mut self) {
            self.game_overs += 1;
        }
    }

    fn engine(seed: u64) -> Engine<Recorder> {
        Engine::new(Settings::default(), seed, Recorder::default()).unwrap()
    }

    #[test]
    fn test_new_announces_initial_displays() {
        let e = engine(1);
        assert_eq!(e.frontend().score, vec!["Score:0"]);
        assert_eq!(e.frontend().life, vec!["Life:3"]);
        assert_eq!(e.phase(), GamePhase::Ready);
        assert!(!e.is_ticking());
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = Settings {
            max_enemies: 100,
            ..Default::default()
        };
        assert!(Engine::new(settings, 1, Recorder::default()).is_err());
    }

    #[test]
    fn test_no_ticks_before_start() {
        let mut e = engine(1);
        assert_eq!(e.advance(1_000.0), 0);
        assert!(e.state().enemies.is_empty());
    }

    #[test]
    fn test_start_ticks_on_fixed_delay() {
        let mut e = engine(1);
        e.start(0.0);
        assert_eq!(e.frontend().sounds, vec![SoundEffect::Theme]);

        assert_eq!(e.advance(0.0), 1);
        assert_eq!(e.state().enemies.len(), 5);
        assert_eq!(e.advance(10.0), 0);
        assert_eq!(e.advance(20.0), 1);
        assert_eq!(e.next_wakeup_ms(), Some(40.0));
        assert_eq!(e.state().time_ticks, 2);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut e = engine(1);
        e.start(0.0);
        e.advance(0.0);
        e.state_mut().lives = 0;
        e.advance(20.0);
        assert_eq!(e.phase(), GamePhase::GameOver);

        let x = e.state().player.pos.x;
        e.move_left();
        e.move_right();
        assert_eq!(e.state().player.pos.x, x);
    }

    #[test]
    fn test_game_over_stops_scheduling() {
        let mut e = engine(2);
        e.start(0.0);
        e.advance(0.0);
        e.state_mut().lives = 0;

        assert_eq!(e.advance(20.0), 1);
        assert_eq!(e.phase(), GamePhase::GameOver);
        assert!(!e.is_ticking());
        assert_eq!(e.frontend().game_overs, 1);

        let ticks = e.state().time_ticks;
        for t in 1..50 {
            assert_eq!(e.advance(20.0 + t as f64 * 20.0), 0);
        }
        assert_eq!(e.state().time_ticks, ticks);
        assert_eq!(e.frontend().game_overs, 1);
    }

    #[test]
    fn test_acknowledge_resets_to_fresh_game() {
        let mut e = engine(3);
        assert!(!e.acknowledge_game_over());

        e.start(0.0);
        e.advance(0.0);
        e.state_mut().lives = 0;
        e.state_mut().score = 12;
        e.advance(20.0);
        assert!(e.acknowledge_game_over());

        assert_eq!(e.phase(), GamePhase::Ready);
        assert_eq!(e.state().score, 0);
        assert_eq!(e.state().lives, 3);
        assert!(e.state().enemies.is_empty());
        assert_ne!(e.state().seed, 3);
        assert_eq!(e.frontend().life.last().map(String::as_str), Some("Life:3"));

        e.start(100.0);
        assert_eq!(e.advance(100.0), 1);
    }

    #[test]
    fn test_debounced_loss_fires_between_ticks() {
        let mut e = engine(4);
        e.start(0.0);
        e.advance(0.0);

        // Park every enemy out of reach, then drop one on the player
        let player = e.state().player.clone();
        let state = e.state_mut();
        for enemy in state.enemies.iter_mut() {
            enemy.pos.y = -1_000.0;
            enemy.speed = 0.0;
        }
        for bonus in state.bonuses.iter_mut() {
            bonus.pos.y = -1_000.0;
            bonus.speed = 0.0;
        }
        state.enemies[0] = Entity::falling(
            Vec2::new(player.pos.x, player.pos.y - 10.0),
            state.settings.enemy_size(),
            0.0,
        );

        e.advance(20.0);
        assert_eq!(e.state().lives, 3);
        // Still overlapping at the next tick: the window restarts
        e.advance(40.0);
        assert_eq!(e.state().lives, 3);

        // Move the enemy away; the trailing call fires 25 ms after t=40
        e.state_mut().enemies[0].pos.y = -1_000.0;
        e.advance(60.0);
        assert_eq!(e.state().lives, 3);
        e.advance(65.0);
        assert_eq!(e.state().lives, 2);
        assert_eq!(e.frontend().life.last().map(String::as_str), Some("Life:2"));
        assert_eq!(
            e.frontend()
                .sounds
                .iter()
                .filter(|s| **s == SoundEffect::Collision)
                .count(),
            2
        );
    }
}
