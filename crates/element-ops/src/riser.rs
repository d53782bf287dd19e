use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, ElementError};

/// Vertical budget of a stair: how many equal risers make up the total rise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiserPlan {
    /// Number of risers, at least 1.
    pub riser_count: usize,
    /// Exact height of each riser. `riser_count * riser_height == total_height`.
    pub riser_height: f64,
    /// Number of treads the stair may place. The top riser lands on the
    /// upper floor, so this is always `riser_count - 1`.
    pub tread_count: usize,
}

impl RiserPlan {
    /// Derive the plan from the requested total rise and a nominal riser height.
    ///
    /// The riser count is `total_height / nominal_riser_height` rounded to the
    /// nearest integer, ties rounding up, and never less than 1. The riser
    /// height is then recomputed so the risers add up to `total_height` exactly.
    pub fn new(total_height: f64, nominal_riser_height: f64) -> Result<Self, ElementError> {
        let total_height = require_positive("total_height", total_height)?;
        let nominal = require_positive("riser_height", nominal_riser_height)?;

        let ratio = total_height / nominal;
        if !ratio.is_finite() {
            return Err(ElementError::InvalidParameter {
                name: "riser_height",
                reason: format!("{nominal} is too small for a total height of {total_height}"),
            });
        }
        // `f64::round` rounds half away from zero, which is half up for the
        // strictly positive ratios reaching this point.
        let riser_count = (ratio.round() as usize).max(1);

        Ok(Self {
            riser_count,
            riser_height: total_height / riser_count as f64,
            tread_count: riser_count - 1,
        })
    }

    /// Total rise reproduced by the plan.
    pub fn total_height(&self) -> f64 {
        self.riser_height * self.riser_count as f64
    }
}
