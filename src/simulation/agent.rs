//! The bird: a free-falling, jump-capable agent.
//!
//! Each tick the agent falls along a parabola restarted by every jump. The
//! downward step is clamped and upward steps are exaggerated, which gives the
//! arc its asymmetric feel.

use serde::{Deserialize, Serialize};

use super::mask::{self, Mask};
use super::motion::Advance;

/// A simulated bird.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Slot index assigned at spawn; stable across removals.
    pub id: usize,
    /// Horizontal position, fixed for the agent's lifetime.
    pub x: f32,
    /// Vertical position of the sprite's top edge.
    pub y: f32,
    /// Vertical speed at the start of the current arc (negative = up).
    pub velocity: f32,
    /// Ticks since the last jump.
    pub tick_count: u32,
    /// Presentation tilt in degrees. Has no effect on physics.
    pub tilt: f32,
    /// Height at which the current arc started.
    pub launch_y: f32,
}

impl Agent {
    /// Velocity set by a jump.
    pub const JUMP_VELOCITY: f32 = -10.5;
    /// Gravity, so that the fall term is `0.5 * GRAVITY * t^2`.
    pub const GRAVITY: f32 = 3.0;
    /// Largest downward displacement per tick.
    pub const MAX_DISPLACEMENT: f32 = 16.0;
    /// Extra lift added to every upward displacement.
    pub const RISE_BOOST: f32 = 2.0;
    /// Tilt while climbing.
    pub const MAX_TILT: f32 = 25.0;
    /// Tilt lost per tick while falling.
    pub const TILT_VELOCITY: f32 = 20.0;
    /// Steepest nose-down tilt.
    pub const MIN_TILT: f32 = -90.0;
    /// Distance below the launch height that still counts as climbing.
    pub const CLIMB_WINDOW: f32 = 50.0;

    /// Creates an agent at rest.
    pub fn new(id: usize, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            velocity: 0.0,
            tick_count: 0,
            tilt: 0.0,
            launch_y: y,
        }
    }

    /// Displacement after `ticks` ticks of an arc started with `velocity`.
    pub fn displacement(velocity: f32, ticks: u32) -> f32 {
        let t = ticks as f32;
        let mut displacement = velocity * t + 0.5 * Self::GRAVITY * t * t;
        displacement = displacement.min(Self::MAX_DISPLACEMENT);
        if displacement < 0.0 {
            displacement -= Self::RISE_BOOST;
        }
        displacement
    }

    /// Starts a new arc with an upward impulse.
    pub fn jump(&mut self) {
        self.velocity = Self::JUMP_VELOCITY;
        self.tick_count = 0;
        self.launch_y = self.y;
    }

    /// Lower edge of the sprite.
    pub fn bottom(&self) -> f32 {
        self.y + mask::BIRD_HEIGHT as f32
    }

    /// Sprite origin on the pixel grid.
    pub fn pixel_origin(&self) -> (i32, i32) {
        (
            self.x.round_ties_even() as i32,
            self.y.round_ties_even() as i32,
        )
    }

    /// Coverage of the sprite relative to [`Agent::pixel_origin`].
    pub fn mask(&self) -> &'static Mask {
        &mask::BIRD_MASK
    }
}

impl Advance for Agent {
    fn advance(&mut self) {
        self.tick_count += 1;

        let displacement = Self::displacement(self.velocity, self.tick_count);
        self.y += displacement;

        if displacement < 0.0 || self.y < self.launch_y + Self::CLIMB_WINDOW {
            self.tilt = self.tilt.max(Self::MAX_TILT);
        } else if self.tilt > Self::MIN_TILT {
            self.tilt -= Self::TILT_VELOCITY;
        }
    }
}
