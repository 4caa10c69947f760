//! Accelerometer data types.

use serde::{Deserialize, Serialize};

/// Tri-axial accelerometer reading captured at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    /// Create a new sample from its three axis readings.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Get the readings in axis order `[x, y, z]`.
    pub fn axes(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Sample {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}
