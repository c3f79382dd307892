//! Capabilities the arena expects from the outside world.
//!
//! A [`Pilot`] turns what an agent sees into a jump signal, and a
//! [`Fitness`] handle receives the rewards and penalties the arena hands out.
//! Any neuro-evolution library (or a test stub) can provide both.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::obstacle::Obstacle;

/// What an agent senses each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Vertical position of the agent.
    pub y: f32,
    /// Distance to the upper edge of the reference gap.
    pub gap_top_distance: f32,
    /// Distance to the lower edge of the reference gap.
    pub gap_bottom_distance: f32,
}

impl Observation {
    /// Number of values in an observation.
    pub const SIZE: usize = 3;

    /// Observation of `agent` against the gap of `obstacle`.
    pub fn of(agent: &Agent, obstacle: &Obstacle) -> Self {
        Self {
            y: agent.y,
            gap_top_distance: (agent.y - obstacle.gap_top as f32).abs(),
            gap_bottom_distance: (agent.y - obstacle.gap_bottom as f32).abs(),
        }
    }

    /// The observation as a network input vector.
    pub fn to_array(&self) -> Array1<f32> {
        Array1::from_vec(vec![
            self.y,
            self.gap_top_distance,
            self.gap_bottom_distance,
        ])
    }
}

/// Decision function attached to an agent.
pub trait Pilot {
    /// Error reported when a decision cannot be made.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the jump signal for this tick; values above the arena's
    /// threshold make the agent jump.
    fn decide(&mut self, observation: &Observation) -> Result<f32, Self::Error>;
}

/// Accumulator that receives additive fitness deltas.
///
/// The arena never reads or resets a fitness handle.
pub trait Fitness {
    /// Adds `delta` to the accumulated fitness.
    fn adjust(&mut self, delta: f32);
}

impl Fitness for f32 {
    fn adjust(&mut self, delta: f32) {
        *self += delta;
    }
}

impl Fitness for f64 {
    fn adjust(&mut self, delta: f32) {
        *self += f64::from(delta);
    }
}
