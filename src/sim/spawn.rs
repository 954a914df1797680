//! Spawn-slot selection
//!
//! The playfield is split into lanes one sprite wide. A lane is free when no
//! live member of the population overlaps it horizontally; new entities are
//! dropped into a random free lane just above the playfield.

use glam::Vec2;
use rand::Rng;

use super::collision::spans_overlap;
use super::entity::Entity;
use crate::consts::MAX_LANES;
use crate::settings::Settings;

/// Pick a spawn point for a sprite of `size` that clears `population`.
///
/// Returns `None` when every lane is taken.
pub fn next_spot(
    population: &[Entity],
    size: Vec2,
    game_width: f32,
    rng: &mut impl Rng,
) -> Option<Vec2> {
    if !(size.x > 0.0) || !game_width.is_finite() {
        return None;
    }
    let lanes = ((game_width / size.x).floor() as usize).min(MAX_LANES);

    let is_free = |lane: usize| {
        let x = lane as f32 * size.x;
        let span = (x, x + size.x);
        !population
            .iter()
            .filter(|e| !e.destroyed)
            .any(|e| spans_overlap(span, e.span()))
    };

    let free_count = (0..lanes).filter(|&lane| is_free(lane)).count();
    if free_count == 0 {
        return None;
    }
    let pick = rng.random_range(0..free_count);
    let lane = (0..lanes).filter(|&lane| is_free(lane)).nth(pick)?;
    let x = lane as f32 * size.x;
    Some(Vec2::new(x, -size.y))
}

pub fn next_enemy_spot(enemies: &[Entity], settings: &Settings, rng: &mut impl Rng) -> Option<Vec2> {
    next_spot(enemies, settings.enemy_size(), settings.game_width, rng)
}

pub fn next_bonus_spot(bonuses: &[Entity], settings: &Settings, rng: &mut impl Rng) -> Option<Vec2> {
    next_spot(bonuses, settings.bonus_size(), settings.game_width, rng)
}
