//! Projection of constraint state into a line-segment vertex buffer.

use crate::constraint::ConstraintStore;
use crate::error::{ClothError, ClothResult};
use crate::float::Float;
use crate::particle::ParticleStore;

/// Floats written per constraint slot: two endpoints of (x, y, z).
pub const FLOATS_PER_SEGMENT: usize = 6;

/// Buffer length needed for `constraint_count` slots.
pub fn buffer_len(constraint_count: usize) -> usize {
    constraint_count * FLOATS_PER_SEGMENT
}

/// Write each constraint slot as `[x1, y1, 0, x2, y2, 0]`.
///
/// Inactive slots are zeroed rather than compacted, so the layout never
/// changes and a renderer can upload the same buffer every frame.
pub fn project_lines<F: Float>(
    particles: &ParticleStore<F>,
    constraints: &ConstraintStore<F>,
    out: &mut [F],
) -> ClothResult<()> {
    let expected = buffer_len(constraints.len());
    if out.len() != expected {
        return Err(ClothError::BufferSizeMismatch { expected, actual: out.len() });
    }

    for (c, slot) in constraints.iter().zip(out.chunks_exact_mut(FLOATS_PER_SEGMENT)) {
        if c.is_active() {
            let a = particles.position(c.p1);
            let b = particles.position(c.p2);
            slot.copy_from_slice(&[a.x, a.y, F::zero(), b.x, b.y, F::zero()]);
        } else {
            slot.fill(F::zero());
        }
    }
    Ok(())
}
