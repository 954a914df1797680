//! Per-tick simulation step
//!
//! Order within a tick is fixed: fall, prune, backfill, collide.

use super::collision::rects_overlap;
use super::state::{GameEvent, GamePhase, GameState, SoundEffect};

/// What the scheduler should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Re-arm for the next tick
    Continue,
    /// Stop ticking for good
    GameOver,
}

/// Advance the game to `now_ms`
pub fn tick(state: &mut GameState, now_ms: f64) -> TickOutcome {
    match state.phase {
        GamePhase::Running => {}
        GamePhase::GameOver => return TickOutcome::GameOver,
        GamePhase::Ready => {
            log::warn!("tick() before start, ignoring");
            return TickOutcome::Continue;
        }
    }

    // The first tick only establishes the baseline
    let last = *state.last_frame_ms.get_or_insert(now_ms);
    let dt = (now_ms - last).max(0.0) as f32;
    state.last_frame_ms = Some(now_ms);
    state.time_ticks += 1;

    let game_height = state.settings.game_height;
    for entity in state.enemies.iter_mut().chain(state.bonuses.iter_mut()) {
        entity.update(dt, game_height);
    }

    // Every enemy that made it off the bottom is a point
    let before = state.enemies.len();
    state.enemies.retain(|e| !e.destroyed);
    for _ in state.enemies.len()..before {
        state.score += 1;
        state.emit(GameEvent::ScoreChanged(state.score));
    }

    state.bonuses.retain(|b| !b.destroyed);

    state.backfill();

    if is_player_dead(state, now_ms) {
        log::info!("Game over at tick {} with score {}", state.time_ticks, state.score);
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::Sound(SoundEffect::GameOver));
        state.emit(GameEvent::GameOver);
        return TickOutcome::GameOver;
    }

    TickOutcome::Continue
}

/// Collision pass against the player.
///
/// Enemy contact requests a debounced life loss, bonus contact a debounced
/// life gain. Returns true when an enemy was checked while lives were at
/// zero, so a tick with no enemies never ends the game, and caught bonuses
/// keep paying out for as long as they overlap.
pub fn is_player_dead(state: &mut GameState, now_ms: f64) -> bool {
    let player_size = state.settings.player_size();
    let enemy_size = state.settings.enemy_size();
    let bonus_size = state.settings.bonus_size();

    let mut game_over = false;
    let mut hits = 0usize;
    let mut pickups = 0usize;

    state.player.size = player_size;
    for enemy in &mut state.enemies {
        enemy.size = enemy_size;
        if state.lives == 0 {
            game_over = true;
        } else if rects_overlap(enemy.pos, enemy.size, state.player.pos, state.player.size) {
            log::debug!("Collision with enemy at ({}, {})", enemy.pos.x, enemy.pos.y);
            state.lose_life.call(now_ms);
            hits += 1;
        }
    }

    for bonus in &mut state.bonuses {
        bonus.size = bonus_size;
        if rects_overlap(bonus.pos, bonus.size, state.player.pos, state.player.size) {
            state.gain_life.call(now_ms);
            pickups += 1;
        }
    }

    for _ in 0..hits {
        state.emit(GameEvent::Sound(SoundEffect::Collision));
    }
    for _ in 0..pickups {
        state.emit(GameEvent::Sound(SoundEffect::Pickup));
    }

    game_over
}
