//! Pointer-drag cutting: segment intersection and drag tracking.

use crate::constraint::ConstraintStore;
use crate::float::Float;
use crate::particle::ParticleStore;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;
use serde::{Deserialize, Serialize};

/// Most drag segments [`CutTool`] queues between fixed steps. Past this the
/// newest segment is stretched to the pointer instead of queueing another.
pub const MAX_PENDING_SEGMENTS: usize = 128;

/// Pointer snapshot for one frame, already in simulation space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState<F: Float> {
    pub position: Vec2<F>,
    pub is_down: bool,
}

impl<F: Float> PointerState<F> {
    /// Pointer hovering at `position`.
    pub fn up(position: Vec2<F>) -> Self {
        PointerState { position, is_down: false }
    }

    /// Pointer pressed at `position`.
    pub fn down(position: Vec2<F>) -> Self {
        PointerState { position, is_down: true }
    }
}

/// A drag segment that severs every constraint it properly crosses.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CutSegment<F: Float> {
    pub from: Vec2<F>,
    pub to: Vec2<F>,
}

impl<F: Float> CutSegment<F> {
    pub fn new(from: Vec2<F>, to: Vec2<F>) -> Self {
        CutSegment { from, to }
    }

    /// Deactivate every active constraint whose current endpoint segment this
    /// segment crosses. Returns the number deactivated.
    pub fn apply(
        &self,
        particles: &ParticleStore<F>,
        constraints: &mut ConstraintStore<F>,
    ) -> usize {
        let mut hits = AllocVec::new();
        for (i, c) in constraints.iter().enumerate() {
            if !c.is_active() {
                continue;
            }
            let a = particles.position(c.p1);
            let b = particles.position(c.p2);
            if segments_intersect(self.to, self.from, a, b) {
                hits.push(i);
            }
        }
        for &i in &hits {
            constraints.deactivate(i);
        }
        hits.len()
    }
}

/// Proper crossing test for segments `p1-p2` and `p3-p4`.
///
/// Both parametric values must lie strictly inside (0, 1). Parallel and
/// collinear segments never intersect, and neither does a segment that only
/// touches the other at an endpoint.
pub fn segments_intersect<F: Float>(p1: Vec2<F>, p2: Vec2<F>, p3: Vec2<F>, p4: Vec2<F>) -> bool {
    let det = (p2.x - p1.x) * (p4.y - p3.y) - (p4.x - p3.x) * (p2.y - p1.y);
    if det == F::zero() {
        return false;
    }
    let lambda = ((p4.y - p3.y) * (p4.x - p1.x) + (p3.x - p4.x) * (p4.y - p1.y)) / det;
    let gamma = ((p1.y - p2.y) * (p4.x - p1.x) + (p2.x - p1.x) * (p4.y - p1.y)) / det;
    let inside = |t: F| t > F::zero() && t < F::one();
    inside(lambda) && inside(gamma)
}

/// Tracks one drag gesture and queues the segments it sweeps.
///
/// Pressing records the anchor without cutting. Each move while pressed
/// queues the segment from the previous pointer position to the new one.
/// The previous position follows the pointer even while released.
///
/// At most [`MAX_PENDING_SEGMENTS`] segments are held; a drag that keeps
/// moving while no step runs extends the last one instead.
#[derive(Clone, Debug, Default)]
pub struct CutTool<F: Float> {
    dragging: bool,
    previous: Option<Vec2<F>>,
    pending: AllocVec<CutSegment<F>>,
}

impl<F: Float> CutTool<F> {
    /// An idle tool with nothing queued.
    pub fn new() -> Self {
        CutTool { dragging: false, previous: None, pending: AllocVec::new() }
    }

    /// Begin a drag at `position`.
    pub fn press(&mut self, position: Vec2<F>) {
        self.dragging = true;
        self.previous = Some(position);
    }

    /// Move the pointer, queueing a cut if a drag is in progress.
    pub fn drag_to(&mut self, position: Vec2<F>) {
        if self.dragging {
            if let Some(prev) = self.previous {
                if prev != position {
                    self.queue(CutSegment::new(prev, position));
                }
            }
        }
        self.previous = Some(position);
    }

    fn queue(&mut self, segment: CutSegment<F>) {
        if self.pending.len() < MAX_PENDING_SEGMENTS {
            self.pending.push(segment);
        } else if let Some(last) = self.pending.last_mut() {
            last.to = segment.to;
        }
    }

    /// End the drag.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Feed a per-frame pointer snapshot.
    pub fn update(&mut self, pointer: PointerState<F>) {
        match (self.dragging, pointer.is_down) {
            (false, true) => self.press(pointer.position),
            (true, true) => self.drag_to(pointer.position),
            (_, false) => {
                self.release();
                self.previous = Some(pointer.position);
            }
        }
    }

    /// Apply and clear every queued segment. Returns the number of
    /// constraints deactivated.
    pub fn apply_pending(
        &mut self,
        particles: &ParticleStore<F>,
        constraints: &mut ConstraintStore<F>,
    ) -> usize {
        let mut total = 0;
        for segment in self.pending.drain(..) {
            total += segment.apply(particles, constraints);
        }
        total
    }

    /// Drop queued segments and forget the drag, e.g. after a rebuild.
    pub fn reset(&mut self) {
        self.dragging = false;
        self.previous = None;
        self.pending.clear();
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool { self.dragging }
    /// Segments waiting for the next fixed step.
    pub fn pending(&self) -> &[CutSegment<F>] { &self.pending }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2<f32> {
        Vec2::new(x, y)
    }

    #[test]
    fn crossing_segments_intersect() {
        assert!(segments_intersect(v(-1.0, 0.0), v(1.0, 0.0), v(0.0, -1.0), v(0.0, 1.0)));
    }

    #[test]
    fn touching_at_endpoint_is_not_a_cut() {
        // Second segment starts on the first one.
        assert!(!segments_intersect(v(0.0, 0.0), v(2.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)));
        // First segment ends on the second one.
        assert!(!segments_intersect(v(1.0, -1.0), v(1.0, 0.0), v(0.0, 0.0), v(2.0, 0.0)));
    }

    #[test]
    fn collinear_and_parallel_are_not_cuts() {
        assert!(!segments_intersect(v(0.0, 0.0), v(2.0, 0.0), v(1.0, 0.0), v(3.0, 0.0)));
        assert!(!segments_intersect(v(0.0, 0.0), v(2.0, 0.0), v(0.0, 1.0), v(2.0, 1.0)));
    }

    #[test]
    fn near_miss_is_not_a_cut() {
        assert!(!segments_intersect(v(-1.0, 0.0), v(-0.25, 0.0), v(0.0, -1.0), v(0.0, 1.0)));
    }

    #[test]
    fn press_does_not_queue_a_cut() {
        let mut tool = CutTool::new();
        tool.press(v(0.0, 0.0));
        assert!(tool.pending().is_empty());
        tool.drag_to(v(0.5, 0.0));
        tool.drag_to(v(0.5, 0.5));
        assert_eq!(tool.pending().len(), 2);
        assert_eq!(tool.pending()[1], CutSegment::new(v(0.5, 0.0), v(0.5, 0.5)));
    }

    #[test]
    fn released_moves_track_without_cutting() {
        let mut tool = CutTool::new();
        tool.update(PointerState::up(v(0.0, 0.0)));
        tool.update(PointerState::up(v(1.0, 0.0)));
        assert!(tool.pending().is_empty());
        tool.update(PointerState::down(v(1.0, 1.0)));
        assert!(tool.pending().is_empty());
        tool.update(PointerState::down(v(0.0, 1.0)));
        assert_eq!(tool.pending(), &[CutSegment::new(v(1.0, 1.0), v(0.0, 1.0))]);
        tool.update(PointerState::up(v(0.0, 0.0)));
        assert!(!tool.is_dragging());
    }

    #[test]
    fn long_drag_without_steps_stays_bounded() {
        let mut tool = CutTool::new();
        tool.update(PointerState::down(v(0.0, 0.0)));
        for i in 1..=1000 {
            tool.update(PointerState::down(v(i as f32 / 1000.0, 0.0)));
        }
        assert_eq!(tool.pending().len(), MAX_PENDING_SEGMENTS);
        let last = tool.pending()[MAX_PENDING_SEGMENTS - 1];
        assert_eq!(last.to, v(1.0, 0.0));
        assert_eq!(tool.pending()[0].from, v(0.0, 0.0));
    }
}
