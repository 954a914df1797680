//! Native frontend: everything goes to the log

use super::Frontend;
use crate::sim::SoundEffect;

/// Frontend that logs displays and sounds and remembers the last lines
#[derive(Debug, Default)]
pub struct LogFrontend {
    pub score: String,
    pub life: String,
    pub game_over: bool,
}

impl Frontend for LogFrontend {
    fn score_text(&mut self, text: &str) {
        log::info!("{text}");
        self.score = text.to_string();
    }

    fn life_text(&mut self, text: &str) {
        log::info!("{text}");
        self.life = text.to_string();
    }

    fn play(&mut self, effect: SoundEffect) -> anyhow::Result<()> {
        log::debug!("♪ {effect:?}");
        Ok(())
    }

    fn game_over(&mut self) {
        log::info!("GAME OVER ({} / {})", self.score, self.life);
        self.game_over = true;
    }
}
