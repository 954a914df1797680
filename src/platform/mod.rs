//! Platform abstraction layer
//!
//! The simulation only emits `GameEvent`s. A `Frontend` turns them into
//! visible text, sound and the game-over notice:
//! - `native`: logs everything (headless and terminal runs)
//! - `web`: DOM text, canvas and Web Audio (wasm32 only)

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::{GameEvent, SoundEffect};

/// The presentation side of a game
pub trait Frontend {
    /// Score display, receives `"Score:<n>"`
    fn score_text(&mut self, text: &str);

    /// Life display, receives `"Life:<n>"`
    fn life_text(&mut self, text: &str);

    /// Fire-and-forget sound playback
    fn play(&mut self, effect: SoundEffect) -> anyhow::Result<()>;

    /// Terminal notice; the game stays over until reset
    fn game_over(&mut self);
}

pub fn score_line(score: u64) -> String {
    format!("Score:{score}")
}

pub fn life_line(lives: i32) -> String {
    format!("Life:{lives}")
}

/// Hand events to the frontend in order. Audio failures are logged and
/// otherwise ignored.
pub fn dispatch(events: &[GameEvent], frontend: &mut dyn Frontend) {
    for event in events {
        match *event {
            GameEvent::ScoreChanged(score) => frontend.score_text(&score_line(score)),
            GameEvent::LivesChanged(lives) => frontend.life_text(&life_line(lives)),
            GameEvent::Sound(effect) => {
                if let Err(e) = frontend.play(effect) {
                    log::warn!("Failed to play {effect:?}: {e:#}");
                }
            }
            GameEvent::GameOver => frontend.game_over(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
        sounds: Vec<SoundEffect>,
        game_over: bool,
    }

    impl Frontend for Recorder {
        fn score_text(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }
        fn life_text(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }
        fn play(&mut self, effect: SoundEffect) -> anyhow::Result<()> {
            if effect == SoundEffect::Pickup {
                anyhow::bail!("asset missing");
            }
            self.sounds.push(effect);
            Ok(())
        }
        fn game_over(&mut self) {
            self.game_over = true;
        }
    }

    #[test]
    fn test_dispatch_formats_and_survives_audio_errors() {
        let mut frontend = Recorder::default();
        dispatch(
            &[
                GameEvent::ScoreChanged(4),
                GameEvent::Sound(SoundEffect::Pickup),
                GameEvent::LivesChanged(-1),
                GameEvent::Sound(SoundEffect::Collision),
                GameEvent::GameOver,
            ],
            &mut frontend,
        );
        assert_eq!(frontend.lines, vec!["Score:4", "Life:-1"]);
        assert_eq!(frontend.sounds, vec![SoundEffect::Collision]);
        assert!(frontend.game_over);
    }
}
