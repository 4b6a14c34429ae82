//! Read-only presentation snapshot
//!
//! Built once per frame for the presentation collaborator. Serializable so a
//! host can forward it across an embed boundary as JSON.

use serde::Serialize;

use super::state::{SessionStatus, SimState};
use crate::intensity;

/// A wave as the presentation layer sees it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WaveView {
    pub id: u32,
    pub y: f32,
    pub gap_center: f32,
    pub gap_width: f32,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub score: u32,
    pub best: u32,
    pub streak: u32,
    pub status: SessionStatus,
    pub message: String,
    pub session_seconds: f32,
    pub intensity: f32,
    pub player_position: f32,
    pub player_charge: f32,
    pub player_alive: bool,
    pub waves: Vec<WaveView>,
}

impl SimState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score.score,
            best: self.score.best,
            streak: self.score.streak,
            status: self.status,
            message: self.message.clone(),
            session_seconds: self.elapsed,
            intensity: intensity(self.score.score),
            player_position: self.player.position,
            player_charge: self.player.charge,
            player_alive: self.player.alive,
            waves: self
                .waves
                .iter()
                .map(|w| WaveView {
                    id: w.id,
                    y: w.y,
                    gap_center: w.gap_center,
                    gap_width: w.gap_width,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = SimState::new(5, 31);
        state.hold_start();
        state.spawn_wave();
        state.score.score = 400;

        let snap = state.snapshot();
        assert_eq!(snap.score, 400);
        assert_eq!(snap.best, 31);
        assert_eq!(snap.status, SessionStatus::Live);
        assert_eq!(snap.waves.len(), 1);
        assert_eq!(snap.waves[0].id, state.waves[0].id);
        assert!((snap.intensity - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_intensity_clamps() {
        assert_eq!(crate::intensity(0), 1.0);
        assert!((crate::intensity(400) - 1.5).abs() < 1e-6);
        assert_eq!(crate::intensity(10_000), 2.25);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = SimState::new(5, 0);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"player_position\":0.5"));
        assert!(json.contains("\"status\":\"Ready\""));
    }
}
