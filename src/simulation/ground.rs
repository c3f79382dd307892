//! Scrolling ground band. Cosmetic only.

use serde::{Deserialize, Serialize};

use super::motion::Advance;

/// Two ground tiles leapfrogging each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    /// Top edge of the band.
    pub y: f32,
    /// Left edge of the first tile.
    pub x1: f32,
    /// Left edge of the second tile.
    pub x2: f32,
}

impl Ground {
    /// Scroll speed, matching the obstacles.
    pub const VELOCITY: f32 = 5.0;
    /// Width of a single tile.
    pub const WIDTH: f32 = 672.0;

    /// Creates the band with its tiles side by side.
    pub fn new(y: f32) -> Self {
        Self {
            y,
            x1: 0.0,
            x2: Self::WIDTH,
        }
    }
}

impl Advance for Ground {
    fn advance(&mut self) {
        self.x1 -= Self::VELOCITY;
        self.x2 -= Self::VELOCITY;

        if self.x1 + Self::WIDTH < 0.0 {
            self.x1 = self.x2 + Self::WIDTH;
        }
        if self.x2 + Self::WIDTH < 0.0 {
            self.x2 = self.x1 + Self::WIDTH;
        }
    }
}
