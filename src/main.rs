//! Burger Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = burger_dash::platform::web::run() {
        log::error!("Failed to start: {e:?}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::Duration;

    use clap::Parser;

    use burger_dash::platform::native::LogFrontend;
    use burger_dash::scheduler::{Clock, ManualClock, MonotonicClock};
    use burger_dash::sim::{GamePhase, GameState};
    use burger_dash::{Engine, Settings};

    /// Headless runner: a simple bot dodges cats until the burger runs out of lives
    #[derive(Parser, Debug)]
    #[command(name = "burger-dash", version)]
    pub struct Args {
        /// Settings JSON file (missing fields take defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Stop after this many ticks even if the game is still running
        #[arg(long, default_value_t = 10_000)]
        ticks: u64,

        /// Follow the wall clock instead of simulating time as fast as possible
        #[arg(long)]
        realtime: bool,

        /// Let the player sit still instead of dodging
        #[arg(long)]
        idle: bool,
    }

    /// Step away from the nearest enemy coming down the player's column
    fn dodge(state: &GameState) -> Option<bool> {
        let p = &state.player;
        let threat = state
            .enemies
            .iter()
            .filter(|e| e.pos.x < p.pos.x + p.size.x && e.pos.x + e.size.x > p.pos.x)
            .filter(|e| e.pos.y + e.size.y > p.pos.y - 150.0 && e.pos.y < p.pos.y + p.size.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

        let go_left = threat.pos.x + threat.size.x / 2.0 > p.pos.x + p.size.x / 2.0;
        let at_left_wall = p.pos.x <= 0.0;
        let at_right_wall = p.pos.x + p.size.x >= state.settings.game_width;
        Some((go_left && !at_left_wall) || at_right_wall)
    }

    fn steer(engine: &mut Engine<LogFrontend>) {
        match dodge(engine.state()) {
            Some(true) => engine.move_left(),
            Some(false) => engine.move_right(),
            None => {}
        }
    }

    pub fn run() -> anyhow::Result<()> {
        let args = Args::parse();
        let settings = match &args.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        let mut engine = Engine::new(settings, args.seed, LogFrontend::default())?;
        let interval = engine.state().settings.tick_interval_ms;

        if args.realtime {
            let clock = MonotonicClock::default();
            engine.start(clock.now_ms());
            while engine.phase() == GamePhase::Running && engine.state().time_ticks < args.ticks {
                if engine.advance(clock.now_ms()) > 0 && !args.idle {
                    steer(&mut engine);
                }
                let now = clock.now_ms();
                let wake = engine.next_wakeup_ms().unwrap_or(now + interval);
                std::thread::sleep(Duration::from_secs_f64(((wake - now).max(0.0) + 0.1) / 1000.0));
            }
        } else {
            let mut clock = ManualClock::default();
            engine.start(clock.now_ms());
            while engine.phase() == GamePhase::Running && engine.state().time_ticks < args.ticks {
                if engine.advance(clock.now_ms()) > 0 && !args.idle {
                    steer(&mut engine);
                }
                // Jump straight to whatever is due next
                let next = engine.next_wakeup_ms().unwrap_or(clock.now_ms() + interval);
                clock.advance((next - clock.now_ms()).max(0.0));
            }
        }

        let state = engine.state();
        log::info!(
            "Finished after {} ticks: score {}, lives {}, {:?}",
            state.time_ticks,
            state.score,
            state.lives,
            state.phase
        );
        println!("{}  {}", engine.frontend().score, engine.frontend().life);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Burger Dash (native) starting...");
    native::run()
}
