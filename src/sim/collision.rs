//! Collision detection for axis-aligned rectangles
//!
//! Everything in the playfield is an upright rectangle, so a strict
//! bounding-box test is exact. Touching edges do not count as contact.

use glam::Vec2;

/// Strict AABB overlap between two rectangles given by top-left and size
pub fn rects_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Strict overlap of two half-open horizontal extents `[left, right)`
pub fn spans_overlap(a: (f32, f32), b: (f32, f32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rects_overlap_hit() {
        // Player at x=100 w=50, enemy at x=120 w=30 in the same band
        let player = (Vec2::new(100.0, 400.0), Vec2::new(50.0, 50.0));
        let enemy = (Vec2::new(120.0, 380.0), Vec2::new(30.0, 40.0));
        assert!(rects_overlap(enemy.0, enemy.1, player.0, player.1));
        assert!(rects_overlap(player.0, player.1, enemy.0, enemy.1));
    }

    #[test]
    fn test_rects_touching_edges_miss() {
        let a = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        // Right neighbour
        assert!(!rects_overlap(a.0, a.1, Vec2::new(10.0, 0.0), a.1));
        // Below neighbour
        assert!(!rects_overlap(a.0, a.1, Vec2::new(0.0, 10.0), a.1));
    }

    #[test]
    fn test_rects_same_column_different_band_miss() {
        let player = (Vec2::new(100.0, 400.0), Vec2::new(50.0, 50.0));
        let enemy = (Vec2::new(100.0, 0.0), Vec2::new(50.0, 100.0));
        assert!(!rects_overlap(enemy.0, enemy.1, player.0, player.1));
    }

    #[test]
    fn test_spans_overlap() {
        assert!(spans_overlap((0.0, 75.0), (74.0, 149.0)));
        assert!(!spans_overlap((0.0, 75.0), (75.0, 150.0)));
        assert!(spans_overlap((10.0, 20.0), (0.0, 100.0)));
    }
}
