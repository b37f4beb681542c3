//! Fixed-step accumulator that turns variable frame times into whole steps.

use crate::float::Float;

/// Unconsumed simulation time.
///
/// Each frame's wall time is scaled by the speed multiplier and clamped to
/// `max_frame_delta` before it is added, so the accumulator never exceeds
/// `fixed_step + max_frame_delta` and a stalled host cannot trigger an
/// unbounded catch-up burst.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock<F: Float> {
    accumulator: F,
    fixed_step: F,
    speed_multiplier: F,
    max_frame_delta: F,
}

impl<F: Float> SimulationClock<F> {
    pub fn new(fixed_step: F, speed_multiplier: F, max_frame_delta: F) -> Self {
        SimulationClock {
            accumulator: F::zero(),
            fixed_step,
            speed_multiplier,
            max_frame_delta,
        }
    }

    /// Add one frame's elapsed wall time. Returns the amount actually added.
    pub fn accumulate(&mut self, elapsed: F) -> F {
        let scaled = elapsed * self.speed_multiplier;
        let delta = scaled.clamp(F::zero(), self.max_frame_delta);
        if scaled > delta {
            tracing::debug!(
                requested = scaled.to_f64(),
                clamped = delta.to_f64(),
                "clamped frame delta after stall"
            );
        }
        self.accumulator = self.accumulator + delta;
        delta
    }

    /// Take one fixed step from the accumulator if enough time is banked.
    pub fn consume_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_step {
            self.accumulator = self.accumulator - self.fixed_step;
            true
        } else {
            false
        }
    }

    /// Drop any banked time.
    pub fn reset(&mut self) {
        self.accumulator = F::zero();
    }

    pub fn accumulator(&self) -> F { self.accumulator }
    pub fn fixed_step(&self) -> F { self.fixed_step }
}
