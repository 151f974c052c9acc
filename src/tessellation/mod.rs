mod discretize_boundary;

pub use discretize_boundary::DiscretizeBoundary;

use crate::error::{DiscretizationError, Result};

/// Tolerances controlling boundary discretization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscretizationParams {
    /// Slack allowed when a chord exceeds an arc's diameter or a fillet
    /// radius exceeds an adjacent edge.
    pub length_tolerance: f64,
    /// Corners whose opening angle lies within this many radians of 0 or π
    /// cannot be filleted.
    pub angle_tolerance: f64,
    /// Fraction of the edge length within which a fillet tangent point counts
    /// as coincident with the neighbouring control point and is left out.
    pub cap_tolerance: f64,
    /// Half-angles closer than this to π/2 are nudged away from the semicircle.
    pub semicircle_epsilon: f64,
}

impl Default for DiscretizationParams {
    fn default() -> Self {
        Self {
            length_tolerance: 0.5,
            angle_tolerance: 0.5,
            cap_tolerance: 0.5,
            semicircle_epsilon: 1e-6,
        }
    }
}

impl DiscretizationParams {
    /// Checks that every tolerance is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`DiscretizationError::InvalidParameters`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("length_tolerance", self.length_tolerance),
            ("angle_tolerance", self.angle_tolerance),
            ("cap_tolerance", self.cap_tolerance),
            ("semicircle_epsilon", self.semicircle_epsilon),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(DiscretizationError::InvalidParameters(format!(
                    "{name} must be finite and non-negative, got {value}"
                ))
                .into());
            }
        }
        Ok(())
    }
}
