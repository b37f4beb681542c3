//! Distance constraints between lattice neighbors and their store.

use crate::float::Float;
use crate::particle::Particle;
use alloc::vec::Vec as AllocVec;

/// Keeps two particles at their construction-time distance until cut.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint<F: Float> {
    pub p1: usize,
    pub p2: usize,
    pub rest_length: F,
    active: bool,
}

impl<F: Float> DistanceConstraint<F> {
    /// An active constraint between particles `p1` and `p2`.
    pub fn new(p1: usize, p2: usize, rest_length: F) -> Self {
        DistanceConstraint { p1, p2, rest_length, active: true }
    }

    /// Measure the rest length from the particles' current positions.
    pub fn from_particles(p1: usize, p2: usize, particles: &[Particle<F>]) -> Self {
        let rest_length = particles[p1].pos.distance(particles[p2].pos);
        DistanceConstraint::new(p1, p2, rest_length)
    }

    /// False once cut.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Project both endpoints halfway toward the rest length.
    ///
    /// Pinned endpoints are left in place, so a constraint against an anchor
    /// corrects only half of its error per pass. Lengths below `min_distance`
    /// are skipped to keep NaN out of the position state.
    pub fn solve(&self, particles: &mut [Particle<F>], min_distance: F) {
        let delta = particles[self.p2].pos - particles[self.p1].pos;
        let dist = delta.length();
        if dist <= min_distance {
            return; // degenerate
        }

        let fraction = (self.rest_length - dist) / dist * F::half();
        let offset = delta.scale(fraction);

        if !particles[self.p1].pinned {
            particles[self.p1].pos = particles[self.p1].pos - offset;
        }
        if !particles[self.p2].pinned {
            particles[self.p2].pos = particles[self.p2].pos + offset;
        }
    }
}

/// Dense constraint storage. Slots are never removed or reordered, only
/// deactivated, so a slot index identifies the same lattice edge for the
/// engine's whole lifetime.
#[derive(Clone, Debug, Default)]
pub struct ConstraintStore<F: Float> {
    constraints: AllocVec<DistanceConstraint<F>>,
    active: usize,
}

impl<F: Float> ConstraintStore<F> {
    /// An empty store with room for `capacity` constraints.
    pub fn with_capacity(capacity: usize) -> Self {
        ConstraintStore { constraints: AllocVec::with_capacity(capacity), active: 0 }
    }

    /// Append a constraint and return its slot.
    pub fn push(&mut self, constraint: DistanceConstraint<F>) -> usize {
        let idx = self.constraints.len();
        if constraint.active {
            self.active += 1;
        }
        self.constraints.push(constraint);
        idx
    }

    /// One Gauss-Seidel sweep over every active constraint, in slot order.
    pub fn relax(&self, particles: &mut [Particle<F>], min_distance: F) {
        for c in self.constraints.iter().filter(|c| c.active) {
            c.solve(particles, min_distance);
        }
    }

    /// Permanently disable a slot. Returns true if it was active.
    pub fn deactivate(&mut self, index: usize) -> bool {
        match self.constraints.get_mut(index) {
            Some(c) if c.active => {
                c.active = false;
                self.active -= 1;
                true
            }
            _ => false,
        }
    }

    /// The constraint in slot `index`, active or not.
    pub fn get(&self, index: usize) -> Option<&DistanceConstraint<F>> {
        self.constraints.get(index)
    }

    /// Whether slot `index` exists and is still active.
    pub fn is_active(&self, index: usize) -> bool {
        self.constraints.get(index).is_some_and(|c| c.active)
    }

    /// Slot of the constraint joining `a` and `b`, in either direction.
    pub fn find(&self, a: usize, b: usize) -> Option<usize> {
        self.constraints
            .iter()
            .position(|c| (c.p1 == a && c.p2 == b) || (c.p1 == b && c.p2 == a))
    }

    /// Iterate every slot, including deactivated ones.
    pub fn iter(&self) -> core::slice::Iter<'_, DistanceConstraint<F>> {
        self.constraints.iter()
    }

    /// Number of slots, active or not.
    pub fn len(&self) -> usize { self.constraints.len() }
    pub fn is_empty(&self) -> bool { self.constraints.is_empty() }
    /// Number of slots still active.
    pub fn active_count(&self) -> usize { self.active }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec2;

    fn anchored_pair(stretch: f32) -> [Particle<f32>; 2] {
        [
            Particle::pinned(Vec2::new(0.0, 0.0)),
            Particle::new(Vec2::new(1.0 + stretch, 0.0)),
        ]
    }

    #[test]
    fn stretched_constraint_pulls_free_end_back() {
        let mut particles = anchored_pair(1.0);
        let c = DistanceConstraint::new(0, 1, 1.0);
        c.solve(&mut particles, 1e-6);
        // Half the error per pass, anchor untouched.
        assert!(Float::abs(particles[1].pos.x - 1.5) < 1e-6);
        assert_eq!(particles[0].pos, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn coincident_endpoints_are_skipped() {
        let mut particles = [
            Particle::new(Vec2::new(0.5f32, 0.5)),
            Particle::new(Vec2::new(0.5f32, 0.5)),
        ];
        let c = DistanceConstraint::new(0, 1, 1.0);
        c.solve(&mut particles, 1e-6);
        assert!(particles[0].pos.x.is_finite() && particles[1].pos.y.is_finite());
        assert_eq!(particles[0].pos, particles[1].pos);
    }

    #[test]
    fn deactivation_is_one_way() {
        let particles = anchored_pair(0.0);
        let mut store = ConstraintStore::with_capacity(1);
        store.push(DistanceConstraint::from_particles(0, 1, &particles));
        assert_eq!(store.active_count(), 1);
        assert!(store.deactivate(0));
        assert!(!store.deactivate(0));
        assert!(!store.is_active(0));
        assert_eq!(store.active_count(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn inactive_constraints_do_not_relax() {
        let mut particles = anchored_pair(1.0);
        let mut store = ConstraintStore::with_capacity(1);
        store.push(DistanceConstraint::new(0, 1, 1.0));
        store.deactivate(0);
        store.relax(&mut particles, 1e-6);
        assert_eq!(particles[1].pos.x, 2.0);
    }

    #[test]
    fn find_matches_either_direction() {
        let mut store: ConstraintStore<f32> = ConstraintStore::with_capacity(2);
        store.push(DistanceConstraint::new(0, 1, 1.0));
        store.push(DistanceConstraint::new(1, 2, 1.0));
        assert_eq!(store.find(2, 1), Some(1));
        assert_eq!(store.find(0, 2), None);
    }
}
