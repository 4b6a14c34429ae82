//! Gap interval math
//!
//! A wave is survivable only through its gap: the horizontal interval the
//! player must occupy when the wave crosses the player band. All positions
//! are normalized to [0, 1].

use crate::consts::PLAYER_BAND_Y;

/// A horizontal gap, expanded from center/width form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gap {
    pub left: f32,
    pub right: f32,
}

impl Gap {
    pub fn new(center: f32, width: f32) -> Self {
        Self {
            left: center - width / 2.0,
            right: center + width / 2.0,
        }
    }

    /// Whether a position survives this gap. Edges are inclusive.
    pub fn contains(&self, position: f32) -> bool {
        position >= self.left && position <= self.right
    }

    /// Distance to the nearer gap edge. Only meaningful for contained positions.
    pub fn edge_distance(&self, position: f32) -> f32 {
        (position - self.left).min(self.right - position)
    }
}

/// Edge-triggered player-band crossing: true on the single tick where a wave's
/// y transits the band threshold, regardless of frame rate.
#[inline]
pub fn crossed_band(prev_y: f32, y: f32) -> bool {
    prev_y > PLAYER_BAND_Y && y <= PLAYER_BAND_Y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_contains_edges_inclusive() {
        let gap = Gap::new(0.5, 0.2);
        assert_eq!(gap.left, 0.4);
        assert_eq!(gap.right, 0.6);

        assert!(gap.contains(0.5));
        assert!(gap.contains(0.4));
        assert!(gap.contains(0.6));
        assert!(!gap.contains(0.39));
        assert!(!gap.contains(0.61));
    }

    #[test]
    fn test_edge_distance() {
        let gap = Gap::new(0.5, 0.2);
        assert!((gap.edge_distance(0.5) - 0.1).abs() < 1e-6);
        assert!((gap.edge_distance(0.495) - 0.095).abs() < 1e-6);
        assert!((gap.edge_distance(0.41) - 0.01).abs() < 1e-6);
        assert!((gap.edge_distance(0.59) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_crossed_band_fires_once() {
        // Above the band both before and after: no crossing
        assert!(!crossed_band(0.5, 0.4));
        // Transits the band this tick
        assert!(crossed_band(0.23, 0.21));
        // Landing exactly on the band counts
        assert!(crossed_band(0.23, PLAYER_BAND_Y));
        // Already below: must not re-fire
        assert!(!crossed_band(0.21, 0.15));
    }
}
