//! Gap Dash - a hold-to-charge, release-to-dash arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, wave field, scoring)
//! - `best`: Best-score persistence (LocalStorage on web)

pub mod best;
pub mod sim;

pub use sim::{SimState, Snapshot, TickEvent};

/// Game tuning constants
pub mod consts {
    /// Largest delta-time a single frame may contribute (seconds).
    /// Bounds the damage a stalled or backgrounded host can deal.
    pub const MAX_DT: f32 = 0.033;

    /// Horizontal arena bounds for the player marker (normalized)
    pub const POS_MIN: f32 = 0.06;
    pub const POS_MAX: f32 = 0.94;
    /// Player spawn position (arena center)
    pub const POS_START: f32 = 0.5;

    /// Charge fill rate while holding (units/sec)
    pub const CHARGE_RATE: f32 = 0.85;
    /// Charge bleed rate while released (units/sec)
    pub const CHARGE_DECAY: f32 = 1.3;

    /// Dash impulse floor granted on any release
    pub const DASH_BASE: f32 = 0.35;
    /// Extra dash per unit of charge at release
    pub const DASH_PER_CHARGE: f32 = 1.2;
    /// Cap on dash granted by a single release
    pub const DASH_GRANT_MAX: f32 = 1.6;
    /// Absolute dash ceiling
    pub const DASH_MAX: f32 = 2.0;
    /// Dash effect while the input is still held (fraction of full)
    pub const DASH_HELD_THROTTLE: f32 = 0.25;
    /// Velocity gained per unit of dash impulse (per second)
    pub const DASH_ACCEL: f32 = 1.8;
    /// Dash bleed rate (units/sec)
    pub const DASH_DECAY: f32 = 1.6;

    /// Ambient drift oscillation rate (radians/sec)
    pub const DRIFT_RATE: f32 = 1.2;
    /// Ambient drift strength
    pub const DRIFT_GAIN: f32 = 0.02;
    /// Per-second velocity retention base; applied as `DAMPING.powf(dt)`
    pub const DAMPING: f32 = 0.08;

    /// Vertical position waves spawn at (just above the visible top)
    pub const WAVE_SPAWN_Y: f32 = 1.15;
    /// Spawn the next wave once the newest has fallen past this y
    pub const WAVE_FOLLOW_Y: f32 = 0.65;
    /// The player band: waves crossing this y resolve against the player
    pub const PLAYER_BAND_Y: f32 = 0.22;
    /// Waves below this y are pruned
    pub const WAVE_DISCARD_Y: f32 = -0.2;

    /// Gap width at score 0
    pub const GAP_WIDTH_BASE: f32 = 0.26;
    /// Gap narrowing per point of score
    pub const GAP_WIDTH_PER_SCORE: f32 = 0.0006;
    /// Narrowest gap ever dealt
    pub const GAP_WIDTH_MIN: f32 = 0.12;
    /// Gap centers are drawn from [0.15, 0.85] then clamped to this band
    pub const GAP_CENTER_MIN: f32 = 0.10;
    pub const GAP_CENTER_MAX: f32 = 0.90;

    /// Wave fall speed at score 0 (normalized units/sec)
    pub const WAVE_SPEED_BASE: f32 = 0.35;
    /// Speed gained per point of score
    pub const WAVE_SPEED_PER_SCORE: f32 = 0.00015;
    pub const WAVE_SPEED_MAX: f32 = 1.15;

    /// Points for threading a gap
    pub const HIT_SCORE: u32 = 18;
    /// Streak multiplier on the hit bonus: floor(streak * 0.9)
    pub const STREAK_BONUS: f32 = 0.9;
    /// Edge distance under which a hit also counts as a near-miss
    pub const NEAR_MISS_MARGIN: f32 = 0.03;
    /// Extra points for a near-miss
    pub const NEAR_MISS_BONUS: u32 = 9;

    /// Intensity rises one full step per this many points
    pub const INTENSITY_SCORE_SCALE: f32 = 800.0;
    pub const INTENSITY_MAX: f32 = 2.25;
}

/// Presentation-facing heat scalar, pure in score.
#[inline]
pub fn intensity(score: u32) -> f32 {
    (1.0 + score as f32 / consts::INTENSITY_SCORE_SCALE).clamp(1.0, consts::INTENSITY_MAX)
}

/// Clamp a raw frame delta (seconds) into the simulation's safe range.
#[inline]
pub fn clamp_dt(raw: f32) -> f32 {
    raw.clamp(0.0, consts::MAX_DT)
}
