//! Per-frame simulation advance
//!
//! One `tick` per display frame, variable dt clamped to a safe ceiling.
//! Deterministic given state + dt sequence + input edges: no wall clock,
//! no ambient RNG, no platform dependencies.

use super::gap::crossed_band;
use super::state::{SessionStatus, SimState, TickEvent};
use crate::clamp_dt;
use crate::consts::*;

/// Advance the simulation by one frame. Returns the tick's outcome events in
/// the order they occurred. A no-op outside Live.
pub fn tick(state: &mut SimState, dt: f32) -> Vec<TickEvent> {
    let dt = clamp_dt(dt);
    if state.status != SessionStatus::Live || dt == 0.0 {
        return Vec::new();
    }

    state.elapsed += dt;
    let (elapsed, holding) = (state.elapsed, state.holding);
    state.player.integrate(dt, holding, elapsed);

    if state.wants_spawn() {
        state.spawn_wave();
    }

    let mut events = advance_waves(state, dt);
    state.waves.retain(|w| w.y > WAVE_DISCARD_Y);

    if state.score.score > state.score.best {
        state.score.best = state.score.score;
        events.push(TickEvent::NewBest(state.score.best));
    }
    events
}

/// Move every wave and resolve player-band crossings.
///
/// Crossings are edge-triggered, so each wave resolves at most once over its
/// lifetime. A miss ends the run immediately: the status change fires exactly
/// once per tick batch, and any further crossings in the same batch are
/// ignored (first miss wins).
fn advance_waves(state: &mut SimState, dt: f32) -> Vec<TickEvent> {
    let mut events = Vec::new();
    let position = state.player.position;

    for wave in &mut state.waves {
        let prev_y = wave.y;
        wave.y -= dt * wave.speed;

        if !state.player.alive || !crossed_band(prev_y, wave.y) {
            continue;
        }

        let gap = wave.gap();
        if gap.contains(position) {
            state.score.hits += 1;
            state.score.streak += 1;
            let mut points =
                HIT_SCORE + (state.score.streak as f32 * STREAK_BONUS).floor() as u32;

            // Shaving a gap edge pays extra; a hit can be both
            let near_miss = gap.edge_distance(position) < NEAR_MISS_MARGIN;
            if near_miss {
                state.score.near_misses += 1;
                points += NEAR_MISS_BONUS;
            }

            state.score.score += points;
            events.push(TickEvent::Hit { points, near_miss });
        } else {
            state.player.alive = false;
            state.score.streak = 0;
            state.status = SessionStatus::Down;
            state.message = "Clipped! Hold to go again".to_string();
            events.push(TickEvent::Miss);
        }
    }
    events
}
