//! Tuning constants for the cloth engine.

use crate::error::{ClothError, ClothResult};
use crate::float::Float;
use alloc::format;
use serde::{Deserialize, Serialize};

/// Viewport width below which the lighter lattice is used.
pub const COMPACT_VIEWPORT_WIDTH: f32 = 768.0;
/// Column count for compact (mobile-sized) viewports.
pub const COMPACT_COLUMNS: usize = 16;
/// Column count for wide viewports.
pub const WIDE_COLUMNS: usize = 45;

/// Tuning for integration, relaxation and the frame clock.
///
/// None of these values affect correctness, only feel and cost.
///
/// # Builder Pattern
/// ```
/// use tatter::config::ClothConfig;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_iterations(8)
///     .with_gravity(-0.00004)
///     .with_damping(0.982)
///     .with_speed_multiplier(1.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig<F: Float> {
    /// Velocity retained per fixed step, strictly in (0, 1). Default: 0.982.
    pub damping: F,
    /// Y displacement added per fixed step. Default: -0.000045.
    pub gravity: F,
    /// Relaxation sweeps per fixed step. Default: 8.
    pub iterations: usize,
    /// Scales wall time before accumulation. Default: 2.0.
    pub speed_multiplier: F,
    /// Ceiling on one frame's (scaled) contribution, in seconds. Default: 0.2.
    pub max_frame_delta: F,
    /// Duration of one fixed step, in seconds. Default: 1/60.
    pub fixed_step: F,
    /// Half-width of the square lattice. Default: 1.2.
    pub extent: F,
    /// Constraints shorter than this skip correction. Default: 1e-6.
    pub min_distance: F,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            damping: F::from_f32(0.982),
            gravity: F::from_f32(-0.000045),
            iterations: 8,
            speed_multiplier: F::two(),
            max_frame_delta: F::from_f32(0.2),
            fixed_step: F::one() / F::from_f32(60.0),
            extent: F::from_f32(1.2),
            min_distance: F::from_f32(1e-6),
        }
    }

    /// Set the fraction of velocity kept each fixed step.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Set the per-step vertical displacement.
    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the number of relaxation sweeps per fixed step.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the wall-time scale factor.
    pub fn with_speed_multiplier(mut self, speed_multiplier: F) -> Self {
        self.speed_multiplier = speed_multiplier;
        self
    }

    /// Set the ceiling on one frame's scaled time.
    pub fn with_max_frame_delta(mut self, max_frame_delta: F) -> Self {
        self.max_frame_delta = max_frame_delta;
        self
    }

    /// Set the fixed step duration in seconds.
    pub fn with_fixed_step(mut self, fixed_step: F) -> Self {
        self.fixed_step = fixed_step;
        self
    }

    /// Set the half-width of the lattice.
    pub fn with_extent(mut self, extent: F) -> Self {
        self.extent = extent;
        self
    }

    /// Set the length below which constraints are skipped.
    pub fn with_min_distance(mut self, min_distance: F) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Reject tuning that would stall, explode or never dissipate energy.
    pub fn validate(&self) -> ClothResult<()> {
        let positive = |v: F| v.is_finite() && v > F::zero();

        if !(self.damping.is_finite() && self.damping > F::zero() && self.damping < F::one()) {
            return Err(invalid("damping", self.damping, "must be in (0, 1)"));
        }
        if !self.gravity.is_finite() {
            return Err(invalid("gravity", self.gravity, "must be finite"));
        }
        if self.iterations == 0 {
            return Err(ClothError::InvalidConfig("iterations must be at least 1".into()));
        }
        if !positive(self.speed_multiplier) {
            return Err(invalid("speed_multiplier", self.speed_multiplier, "must be positive"));
        }
        if !positive(self.max_frame_delta) {
            return Err(invalid("max_frame_delta", self.max_frame_delta, "must be positive"));
        }
        if !positive(self.fixed_step) {
            return Err(invalid("fixed_step", self.fixed_step, "must be positive"));
        }
        if !positive(self.extent) {
            return Err(invalid("extent", self.extent, "must be positive"));
        }
        if !(self.min_distance.is_finite() && self.min_distance >= F::zero()) {
            return Err(invalid("min_distance", self.min_distance, "must not be negative"));
        }
        Ok(())
    }

    /// Column count for a viewport of the given width.
    pub fn columns_for_viewport(width: F) -> usize {
        if width < F::from_f32(COMPACT_VIEWPORT_WIDTH) {
            COMPACT_COLUMNS
        } else {
            WIDE_COLUMNS
        }
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid<F: Float>(field: &str, value: F, reason: &str) -> ClothError {
    ClothError::InvalidConfig(format!("{field} {reason} (got {})", value.to_f64()))
}
