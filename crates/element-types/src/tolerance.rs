use serde::{Deserialize, Serialize};

/// Tolerance configuration for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Points closer than this are considered coincident (millimetres).
    pub coincidence: f64,
    /// Angles smaller than this (radians) are considered zero. Also used as the
    /// sine threshold when testing unit vectors for parallelism.
    pub angular: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-6,
            angular: 1e-10,
        }
    }
}

impl Tolerance {
    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.coincidence
    }
}
