//! Verlet particles and the flat store that owns them.

use crate::float::Float;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// A Verlet particle: position-based dynamics with implicit velocity.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    pub pinned: bool,
}

impl<F: Float> Particle<F> {
    /// A free particle at rest.
    pub fn new(pos: Vec2<F>) -> Self {
        Particle { pos, prev_pos: pos, pinned: false }
    }

    /// An immovable anchor.
    pub fn pinned(pos: Vec2<F>) -> Self {
        Particle { pos, prev_pos: pos, pinned: true }
    }

    /// Advance one fixed step.
    ///
    /// The implicit velocity is damped, the previous position is rolled
    /// forward and `gravity` is added to y once. Gravity is a per-step
    /// displacement, not an acceleration scaled by the step duration.
    /// Pinned particles are skipped entirely, so their `prev_pos` never
    /// changes.
    pub fn integrate(&mut self, damping: F, gravity: F) {
        if self.pinned {
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(damping);
        self.prev_pos = self.pos;
        self.pos = self.pos + velocity;
        self.pos.y = self.pos.y + gravity;
    }
}

/// Dense, fixed-size particle storage addressed by index.
///
/// Indices are handed out once at build time and stay valid until the store
/// is dropped. Positions change only through [`ParticleStore::integrate`] and
/// the constraint relaxation in [`crate::constraint`].
#[derive(Clone, Debug, Default)]
pub struct ParticleStore<F: Float> {
    particles: AllocVec<Particle<F>>,
}

impl<F: Float> ParticleStore<F> {
    /// An empty store with room for `capacity` particles.
    pub fn with_capacity(capacity: usize) -> Self {
        ParticleStore { particles: AllocVec::with_capacity(capacity) }
    }

    /// Append a particle and return its index.
    pub fn push(&mut self, particle: Particle<F>) -> usize {
        let idx = self.particles.len();
        self.particles.push(particle);
        idx
    }

    /// Run the integrator over every free particle.
    pub fn integrate(&mut self, damping: F, gravity: F) {
        for p in self.particles.iter_mut() {
            p.integrate(damping, gravity);
        }
    }

    /// The particle at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Particle<F>> {
        self.particles.get(index)
    }

    /// Current position of particle `index`. Panics if out of range.
    pub fn position(&self, index: usize) -> Vec2<F> {
        self.particles[index].pos
    }

    /// Whether particle `index` is anchored. Panics if out of range.
    pub fn is_pinned(&self, index: usize) -> bool {
        self.particles[index].pinned
    }

    /// Snapshot of every position, in index order.
    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    /// Iterate particles in index order.
    pub fn iter(&self) -> core::slice::Iter<'_, Particle<F>> {
        self.particles.iter()
    }

    /// Number of particles.
    pub fn len(&self) -> usize { self.particles.len() }
    pub fn is_empty(&self) -> bool { self.particles.is_empty() }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Particle<F>] {
        &mut self.particles
    }

    pub(crate) fn as_slice(&self) -> &[Particle<F>] {
        &self.particles
    }
}
