//! Game state and core simulation types
//!
//! All live-run state is owned by a single [`SimState`] aggregate, mutated
//! only through input edges and the per-frame tick. Everything is clamp-total:
//! no reachable state is out of range, so there is no error taxonomy here.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session phase gating whether the simulation advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Initial state, simulation frozen, awaiting the first hold
    Ready,
    /// Simulation advances every tick
    Live,
    /// Run ended on a miss; frozen until the next hold restarts
    Down,
}

/// The player marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Normalized horizontal position, clamped to [POS_MIN, POS_MAX]
    pub position: f32,
    /// Signed horizontal velocity (position units per tick after damping)
    pub velocity: f32,
    /// Accumulated dash potential, [0, 1]
    pub charge: f32,
    /// Decaying dash impulse, [0, DASH_MAX]
    pub dash: f32,
    pub alive: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: POS_START,
            velocity: 0.0,
            charge: 0.0,
            dash: 0.0,
            alive: true,
        }
    }
}

impl PlayerState {
    /// Advance one tick. `now` is seconds of session time, used by the
    /// ambient drift oscillator.
    pub fn integrate(&mut self, dt: f32, holding: bool, now: f32) {
        self.charge = if holding {
            (self.charge + dt * CHARGE_RATE).min(1.0)
        } else {
            (self.charge - dt * CHARGE_DECAY).max(0.0)
        };

        // Slow oscillating bias independent of input; keeps the arena breathing
        self.velocity += (now * DRIFT_RATE).sin() * DRIFT_GAIN * dt;

        if self.dash > 0.0 {
            // Dash is throttled while the input is still held, full once released
            let impulse = self.dash * if holding { DASH_HELD_THROTTLE } else { 1.0 };
            self.velocity += impulse * dt * DASH_ACCEL;
            self.dash = (self.dash - dt * DASH_DECAY).clamp(0.0, DASH_MAX);
        }

        // Frame-rate-independent exponential damping toward zero
        self.velocity *= DAMPING.powf(dt);
        self.position = (self.position + self.velocity).clamp(POS_MIN, POS_MAX);
    }
}

/// A gap barrier scrolling down toward the player band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    pub id: u32,
    /// Normalized vertical position, decreasing over time
    pub y: f32,
    pub gap_center: f32,
    pub gap_width: f32,
    pub speed: f32,
}

impl Wave {
    pub fn gap(&self) -> super::Gap {
        super::Gap::new(self.gap_center, self.gap_width)
    }
}

/// Score, streak and lifetime counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    /// Monotonically non-decreasing across runs; persisted on increase
    pub best: u32,
    /// Consecutive hits, reset by a miss
    pub streak: u32,
    pub hits: u32,
    pub near_misses: u32,
}

/// Events emitted by a tick, for audio/presentation feedback and persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Threaded a gap
    Hit { points: u32, near_miss: bool },
    /// Clipped a barrier; the run is over
    Miss,
    /// Score passed the previous best; carry the new value to storage
    NewBest(u32),
}

/// Complete simulation state, owned by the host loop
#[derive(Debug, Clone)]
pub struct SimState {
    pub seed: u64,
    pub status: SessionStatus,
    /// User-facing prompt for the current phase
    pub message: String,
    pub player: PlayerState,
    /// Active waves in spawn order (a valid proxy for descending y)
    pub waves: Vec<Wave>,
    pub score: ScoreState,
    /// Raw input flag; set/cleared by hold edges, read at tick boundaries
    pub holding: bool,
    /// Seconds of Live session time since the last reset
    pub elapsed: f32,
    rng: Pcg32,
    next_wave_id: u32,
}

impl SimState {
    /// Create a fresh Ready-state simulation. `best` comes from storage,
    /// read once at startup.
    pub fn new(seed: u64, best: u32) -> Self {
        Self {
            seed,
            status: SessionStatus::Ready,
            message: "Hold to charge, release to dash".to_string(),
            player: PlayerState::default(),
            waves: Vec::new(),
            score: ScoreState {
                best,
                ..ScoreState::default()
            },
            holding: false,
            elapsed: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_wave_id: 1,
        }
    }

    /// Start (or restart) a run: player back to center, field cleared,
    /// score zeroed. Best survives.
    pub fn reset(&mut self) {
        self.player = PlayerState::default();
        self.waves.clear();
        self.score = ScoreState {
            best: self.score.best,
            ..ScoreState::default()
        };
        self.elapsed = 0.0;
        self.message.clear();
        self.status = SessionStatus::Live;
    }

    /// Input edge: the hold began. Idempotent while already holding.
    /// From Ready or Down this starts a new run first.
    pub fn hold_start(&mut self) {
        if self.holding {
            return;
        }
        if self.status != SessionStatus::Live {
            self.reset();
        }
        self.holding = true;
    }

    /// Input edge: the hold was released. Idempotent while not holding.
    /// Converts charge into dash only while alive; charge drains regardless.
    pub fn hold_end(&mut self) {
        if !self.holding {
            return;
        }
        self.holding = false;
        if self.player.alive {
            let granted = self.player.dash + DASH_BASE + self.player.charge * DASH_PER_CHARGE;
            self.player.dash = granted.clamp(0.0, DASH_GRANT_MAX);
        }
        self.player.charge = 0.0;
    }

    /// Create the next wave above the visible top. Gaps narrow and waves
    /// speed up as score rises.
    pub fn spawn_wave(&mut self) {
        let score = self.score.score as f32;
        let id = self.next_wave_id;
        self.next_wave_id += 1;

        let roll: f32 = self.rng.random();
        self.waves.push(Wave {
            id,
            y: WAVE_SPAWN_Y,
            gap_center: (0.15 + roll * 0.70).clamp(GAP_CENTER_MIN, GAP_CENTER_MAX),
            gap_width: (GAP_WIDTH_BASE - score * GAP_WIDTH_PER_SCORE)
                .clamp(GAP_WIDTH_MIN, GAP_WIDTH_BASE),
            speed: (WAVE_SPEED_BASE + score * WAVE_SPEED_PER_SCORE)
                .clamp(WAVE_SPEED_BASE, WAVE_SPEED_MAX),
        });
    }

    /// Keep the field fed: spawn when empty, or once the newest wave has
    /// fallen past the follow threshold.
    pub fn wants_spawn(&self) -> bool {
        match self.waves.last() {
            None => true,
            Some(newest) => newest.y < WAVE_FOLLOW_Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_start_from_ready_resets_to_live() {
        let mut state = SimState::new(7, 42);
        assert_eq!(state.status, SessionStatus::Ready);

        state.hold_start();
        assert_eq!(state.status, SessionStatus::Live);
        assert!(state.holding);
        assert_eq!(state.score.best, 42);
        assert_eq!(state.score.score, 0);
    }

    #[test]
    fn test_hold_start_idempotent_while_holding() {
        let mut state = SimState::new(7, 0);
        state.hold_start();
        state.score.score = 50;

        // Second hold-start without an intervening release must not re-reset
        state.hold_start();
        assert_eq!(state.score.score, 50);
        assert!(state.holding);
    }

    #[test]
    fn test_hold_end_converts_charge_to_dash() {
        let mut state = SimState::new(7, 0);
        state.hold_start();
        state.player.charge = 0.5;

        state.hold_end();
        assert!(!state.holding);
        assert!((state.player.dash - (0.35 + 0.5 * 1.2)).abs() < 1e-6);
        assert_eq!(state.player.charge, 0.0);
    }

    #[test]
    fn test_hold_end_grant_is_capped() {
        let mut state = SimState::new(7, 0);
        state.hold_start();
        state.player.dash = 1.5;
        state.player.charge = 1.0;

        state.hold_end();
        assert_eq!(state.player.dash, DASH_GRANT_MAX);
    }

    #[test]
    fn test_hold_end_while_dead_drains_charge_without_dash() {
        let mut state = SimState::new(7, 0);
        state.hold_start();
        state.player.charge = 0.8;
        state.player.alive = false;

        state.hold_end();
        assert_eq!(state.player.dash, 0.0);
        assert_eq!(state.player.charge, 0.0);
    }

    #[test]
    fn test_hold_end_idempotent_while_released() {
        let mut state = SimState::new(7, 0);
        state.hold_start();
        state.player.charge = 1.0;
        state.hold_end();
        let dash = state.player.dash;

        // A stray second release must not stack another grant
        state.hold_end();
        assert_eq!(state.player.dash, dash);
    }

    #[test]
    fn test_reset_preserves_best() {
        let mut state = SimState::new(7, 0);
        state.hold_start();
        state.score.score = 120;
        state.score.best = 120;
        state.score.streak = 4;
        state.spawn_wave();

        state.reset();
        assert_eq!(state.score.score, 0);
        assert_eq!(state.score.streak, 0);
        assert_eq!(state.score.hits, 0);
        assert_eq!(state.score.near_misses, 0);
        assert_eq!(state.score.best, 120);
        assert!(state.waves.is_empty());
        assert_eq!(state.player.position, POS_START);
        assert!(state.player.alive);
    }

    #[test]
    fn test_spawn_wave_ranges_and_ids() {
        let mut state = SimState::new(99, 0);
        state.hold_start();
        for _ in 0..64 {
            state.spawn_wave();
        }

        let mut last_id = 0;
        for wave in &state.waves {
            assert!(wave.id > last_id, "ids must be monotonic");
            last_id = wave.id;
            assert_eq!(wave.y, WAVE_SPAWN_Y);
            assert!(wave.gap_center >= GAP_CENTER_MIN && wave.gap_center <= GAP_CENTER_MAX);
            assert!(wave.gap_width >= GAP_WIDTH_MIN && wave.gap_width <= GAP_WIDTH_BASE);
            assert!(wave.speed >= WAVE_SPEED_BASE && wave.speed <= WAVE_SPEED_MAX);
        }
    }

    #[test]
    fn test_spawn_scaling_with_score() {
        let mut state = SimState::new(1, 0);
        state.hold_start();
        state.score.score = 100;
        state.spawn_wave();

        let wave = state.waves[0];
        assert!((wave.gap_width - (0.26 - 100.0 * 0.0006)).abs() < 1e-6);
        assert!((wave.speed - (0.35 + 100.0 * 0.00015)).abs() < 1e-6);

        // Far enough along, both clamps engage
        state.score.score = 1_000_000;
        state.spawn_wave();
        let wave = state.waves[1];
        assert_eq!(wave.gap_width, GAP_WIDTH_MIN);
        assert_eq!(wave.speed, WAVE_SPEED_MAX);
    }
}
