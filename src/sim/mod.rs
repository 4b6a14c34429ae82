//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, dt clamped
//! - Seeded RNG only
//! - Input edges applied as flag writes, effects resolved at tick boundaries
//! - No rendering or platform dependencies

pub mod gap;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use gap::{Gap, crossed_band};
pub use snapshot::{Snapshot, WaveView};
pub use state::{PlayerState, ScoreState, SessionStatus, SimState, TickEvent, Wave};
pub use tick::tick;
