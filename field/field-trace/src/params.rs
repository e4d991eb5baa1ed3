//! Tracing parameters.

use field_types::{Vector3, normalize};

use crate::error::{TraceError, TraceResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for streamline tracing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceParams {
    /// Distance advanced per step.
    pub step_length: f64,

    /// Minimum length for a line to be accepted into a session.
    pub min_length: f64,

    /// Maximum number of steps per direction.
    pub max_steps: usize,

    /// Orientation hint for the first step. Zero means "as stored".
    pub initial_direction: Vector3<f64>,

    /// Stop before coming closer than this to an accepted streamline.
    /// Zero disables the check.
    pub proximity: f64,

    /// Stop when re-entering this radius around the seed after leaving it.
    /// Zero disables the check.
    pub self_proximity: f64,

    /// Largest distance from the mesh at which a seed is still accepted.
    pub seed_tolerance: f64,

    /// Trace both orientations from the seed and join the halves.
    pub bidirectional: bool,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            step_length: 0.05,
            min_length: 0.20,
            max_steps: 10_000,
            initial_direction: Vector3::zeros(),
            proximity: 0.0,
            self_proximity: 0.0,
            seed_tolerance: 1e-6,
            bidirectional: false,
        }
    }
}

impl TraceParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parameters with a specific step length.
    #[must_use]
    pub fn with_step_length(step_length: f64) -> Self {
        Self {
            step_length,
            ..Self::default()
        }
    }

    /// Create parameters for evenly spaced streamlines.
    ///
    /// Lines keep `spacing` apart from each other and from their own seed,
    /// and are traced in both directions.
    #[must_use]
    pub fn spaced(spacing: f64) -> Self {
        Self {
            proximity: spacing,
            self_proximity: spacing * 0.5,
            bidirectional: true,
            ..Self::default()
        }
    }

    /// Set the step length.
    #[must_use]
    pub const fn with_step(mut self, step_length: f64) -> Self {
        self.step_length = step_length;
        self
    }

    /// Set the minimum accepted length.
    #[must_use]
    pub const fn with_min_length(mut self, min_length: f64) -> Self {
        self.min_length = min_length;
        self
    }

    /// Set the step budget.
    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the orientation hint for the first step.
    #[must_use]
    pub const fn with_initial_direction(mut self, direction: Vector3<f64>) -> Self {
        self.initial_direction = direction;
        self
    }

    /// Set the proximity to other streamlines.
    #[must_use]
    pub const fn with_proximity(mut self, proximity: f64) -> Self {
        self.proximity = proximity;
        self
    }

    /// Set the proximity to the line's own seed.
    #[must_use]
    pub const fn with_self_proximity(mut self, self_proximity: f64) -> Self {
        self.self_proximity = self_proximity;
        self
    }

    /// Set the seed tolerance.
    #[must_use]
    pub const fn with_seed_tolerance(mut self, tolerance: f64) -> Self {
        self.seed_tolerance = tolerance;
        self
    }

    /// Enable or disable bidirectional tracing.
    #[must_use]
    pub const fn with_bidirectional(mut self, bidirectional: bool) -> Self {
        self.bidirectional = bidirectional;
        self
    }

    /// Check that all parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidStepLength`] for a non-positive step,
    /// [`TraceError::InvalidParams`] for negative or non-finite distances,
    /// and [`TraceError::Geometry`] for a non-finite initial direction.
    pub fn validate(&self) -> TraceResult<()> {
        if !self.step_length.is_finite() || self.step_length <= 0.0 {
            return Err(TraceError::InvalidStepLength(self.step_length));
        }

        let distances = [
            ("min_length", self.min_length),
            ("proximity", self.proximity),
            ("self_proximity", self.self_proximity),
            ("seed_tolerance", self.seed_tolerance),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(TraceError::InvalidParams { name, value });
            }
        }

        if self.initial_direction.iter().any(|c| !c.is_finite()) {
            normalize(&self.initial_direction)?;
        }
        Ok(())
    }
}
