//! Gapped barriers that scroll towards the agents.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::gaps::GapSampler;
use super::mask::{self, Mask};
use super::motion::Advance;

/// A top and bottom barrier pair separated by a vertical gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge of both barriers.
    pub x: f32,
    /// Upper edge of the gap (lower edge of the top barrier).
    pub gap_top: i32,
    /// Lower edge of the gap, where the bottom barrier starts.
    pub gap_bottom: i32,
    /// Origin of the top barrier sprite.
    pub top: i32,
    /// Size of the gap.
    pub gap_size: i32,
    /// Set once an agent has moved past the left edge.
    pub passed: bool,
}

impl Obstacle {
    /// Horizontal distance travelled per tick.
    pub const VELOCITY: f32 = 5.0;
    /// Width of both barriers.
    pub const WIDTH: f32 = mask::PIPE_WIDTH as f32;
    /// Height of each barrier sprite.
    pub const HEIGHT: i32 = mask::PIPE_HEIGHT as i32;

    /// Creates an obstacle at `x` whose gap top is drawn from `sampler`.
    pub fn new(x: f32, gap_size: i32, heights: Range<i32>, sampler: &mut dyn GapSampler) -> Self {
        Self::with_gap(x, gap_size, sampler.sample(heights))
    }

    /// Creates an obstacle at `x` with a known gap top.
    pub fn with_gap(x: f32, gap_size: i32, height: i32) -> Self {
        let mut obstacle = Self {
            x,
            gap_top: 0,
            gap_bottom: 0,
            top: 0,
            gap_size,
            passed: false,
        };
        obstacle.set_gap(height);
        obstacle
    }

    /// Places the gap so that it starts at `height`.
    pub fn set_gap(&mut self, height: i32) {
        self.gap_top = height;
        self.top = height - Self::HEIGHT;
        self.gap_bottom = height + self.gap_size;
    }

    /// Whether the trailing edge has left the field on the left.
    pub fn is_off_field(&self) -> bool {
        self.x + Self::WIDTH < 0.0
    }

    /// Whether `x` lies past the trailing edge.
    pub fn is_behind(&self, x: f32) -> bool {
        x > self.x + Self::WIDTH
    }

    /// Coverage of either barrier.
    pub fn mask(&self) -> &'static Mask {
        &mask::PIPE_MASK
    }

    /// Exact overlap of `agent` with the top or bottom barrier.
    pub fn collides_with(&self, agent: &Agent) -> bool {
        let (agent_x, agent_y) = agent.pixel_origin();
        let dx = self.x.round_ties_even() as i32 - agent_x;

        let bird = agent.mask();
        let barrier = self.mask();

        bird.overlap(barrier, (dx, self.top - agent_y))
            || bird.overlap(barrier, (dx, self.gap_bottom - agent_y))
    }
}

impl Advance for Obstacle {
    fn advance(&mut self) {
        self.x -= Self::VELOCITY;
    }
}
