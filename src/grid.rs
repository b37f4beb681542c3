//! Rectangular cloth lattice with a pinned border.

use crate::constraint::{ConstraintStore, DistanceConstraint};
use crate::error::{ClothError, ClothResult};
use crate::float::Float;
use crate::particle::{Particle, ParticleStore};
use crate::vec::Vec2;

/// Largest particle count [`ClothGrid::build`] will allocate.
pub const MAX_PARTICLES: usize = 1 << 24;

/// A cloth lattice: particles plus the horizontal and vertical links between
/// neighbors.
#[derive(Clone, Debug)]
pub struct ClothGrid<F: Float> {
    pub(crate) particles: ParticleStore<F>,
    pub(crate) constraints: ConstraintStore<F>,
    cols: usize,
    rows: usize,
}

impl<F: Float> ClothGrid<F> {
    /// Build a lattice spanning `[-extent, extent]` on both axes.
    ///
    /// `rows = round(cols / aspect)`, raised to at least 1. The lattice has
    /// `(cols + 1) * (rows + 1)` particles; particle (col, row) has index
    /// `row * (cols + 1) + col` and row 0 is the bottom edge. Every particle
    /// on the outer ring is pinned.
    ///
    /// Constraints are emitted per particle in index order: the link to the
    /// right neighbor, then the link to the neighbor above. Rest lengths are
    /// measured from the initial positions.
    pub fn build(cols: usize, aspect: F, extent: F) -> ClothResult<Self> {
        if cols == 0 {
            return Err(ClothError::InvalidColumns { cols });
        }
        let rows = Self::rows_for(cols, aspect)?;
        let (particle_count, constraint_count) = Self::counts(cols, rows)
            .ok_or(ClothError::LatticeTooLarge { cols, rows: rows as f64 })?;

        let stride = cols + 1;
        let mut particles = ParticleStore::with_capacity(particle_count);
        let span = extent * F::two();
        for row in 0..=rows {
            for col in 0..=cols {
                let x = F::from_usize(col) / F::from_usize(cols) * span - extent;
                let y = F::from_usize(row) / F::from_usize(rows) * span - extent;
                let pos = Vec2::new(x, y);
                let on_border = col == 0 || col == cols || row == 0 || row == rows;
                let particle = if on_border { Particle::pinned(pos) } else { Particle::new(pos) };
                particles.push(particle);
            }
        }

        let mut constraints = ConstraintStore::with_capacity(constraint_count);
        for row in 0..=rows {
            for col in 0..=cols {
                let idx = row * stride + col;
                if col < cols {
                    let link =
                        DistanceConstraint::from_particles(idx, idx + 1, particles.as_slice());
                    constraints.push(link);
                }
                if row < rows {
                    let link =
                        DistanceConstraint::from_particles(idx, idx + stride, particles.as_slice());
                    constraints.push(link);
                }
            }
        }

        tracing::debug!(
            cols,
            rows,
            particles = particles.len(),
            constraints = constraints.len(),
            "built cloth lattice"
        );

        Ok(ClothGrid { particles, constraints, cols, rows })
    }

    /// Row count for a column count and viewport aspect ratio.
    ///
    /// Ratios so narrow that the row count would exceed [`MAX_PARTICLES`]
    /// are rejected with [`ClothError::LatticeTooLarge`].
    pub fn rows_for(cols: usize, aspect: F) -> ClothResult<usize> {
        if !(aspect.is_finite() && aspect > F::zero()) {
            return Err(ClothError::InvalidAspectRatio(aspect.to_f64()));
        }
        let rows = (F::from_usize(cols) / aspect).round().to_f64();
        if rows > MAX_PARTICLES as f64 {
            return Err(ClothError::LatticeTooLarge { cols, rows });
        }
        Ok((rows as usize).max(1))
    }

    /// Particle and constraint counts of a `cols` x `rows` lattice, or `None`
    /// if the particle count overflows or exceeds [`MAX_PARTICLES`].
    fn counts(cols: usize, rows: usize) -> Option<(usize, usize)> {
        let stride = cols.checked_add(1)?;
        let particles = stride.checked_mul(rows.checked_add(1)?)?;
        if particles > MAX_PARTICLES {
            return None;
        }
        let horizontal = cols.checked_mul(rows + 1)?;
        let vertical = rows.checked_mul(stride)?;
        Some((particles, horizontal.checked_add(vertical)?))
    }

    /// Particle index of lattice vertex (col, row).
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * (self.cols + 1) + col
    }

    /// Deactivate every constraint touching lattice vertex (col, row).
    /// Returns how many were still active.
    pub fn tear_at(&mut self, col: usize, row: usize) -> usize {
        let idx = self.index(col, row);
        let touching: alloc::vec::Vec<usize> = self
            .constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| c.p1 == idx || c.p2 == idx)
            .map(|(i, _)| i)
            .collect();
        let mut torn = 0;
        for i in touching {
            if self.constraints.deactivate(i) {
                torn += 1;
            }
        }
        torn
    }

    /// Current position of lattice vertex (col, row).
    pub fn position_at(&self, col: usize, row: usize) -> Vec2<F> {
        self.particles.position(self.index(col, row))
    }

    pub fn particles(&self) -> &ParticleStore<F> { &self.particles }
    pub fn constraints(&self) -> &ConstraintStore<F> { &self.constraints }
    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
}
