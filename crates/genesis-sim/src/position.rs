use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for an NPC. Assigned by the caller; never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NpcId(pub u64);

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for NpcId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate, `0..=width`.
    pub x: f64,
    /// Vertical coordinate, `0..=height`.
    pub y: f64,
}

impl Position {
    /// Create a position from raw coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// This position clamped into `[0, width] x [0, height]`.
    pub fn clamped(self, width: u32, height: u32) -> Self {
        Self {
            x: self.x.clamp(0.0, f64::from(width)),
            y: self.y.clamp(0.0, f64::from(height)),
        }
    }

    /// Whether this position lies within `[0, width] x [0, height]`.
    pub fn within(self, width: u32, height: u32) -> bool {
        (0.0..=f64::from(width)).contains(&self.x) && (0.0..=f64::from(height)).contains(&self.y)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
