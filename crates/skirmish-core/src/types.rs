//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position in world space (pixels). x grows rightward, y grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounding box extents, centred on the owning entity's position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulated time in milliseconds.
    pub elapsed_ms: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset by `dx`, `dy`.
    pub fn offset(&self, dx: f64, dy: f64) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl BoundingBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Box of a sprite frame of `frame_size` pixels, drawn at `scale` and with
    /// its physics body shrunk to `body_w` x `body_h` of the frame.
    pub fn from_frame(frame_size: f64, scale: f64, body_w: f64, body_h: f64) -> Self {
        Self::new(frame_size * scale * body_w, frame_size * scale * body_h)
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Strict AABB intersection of two boxes centred at `a` and `b`.
    /// Boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, a: &Position, other: &BoundingBox, b: &Position) -> bool {
        (a.x - b.x).abs() < self.half_width() + other.half_width()
            && (a.y - b.y).abs() < self.half_height() + other.half_height()
    }
}

impl SimTime {
    /// Milliseconds of simulated time per tick.
    pub fn dt_ms(&self) -> f64 {
        crate::constants::FIXED_DT_SECS * 1000.0
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_ms = self.tick as f64 * self.dt_ms();
    }
}
