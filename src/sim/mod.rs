//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as explicit timestamps, never from a clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod debounce;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{rects_overlap, spans_overlap};
pub use debounce::Debounced;
pub use entity::{Entity, Player};
pub use spawn::{next_bonus_spot, next_enemy_spot, next_spot};
pub use state::{GameEvent, GamePhase, GameState, LifeChange, SoundEffect};
pub use tick::{TickOutcome, is_player_dead, tick};
