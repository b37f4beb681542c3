//! Frame loop tying the lattice, clock, cutter and vertex buffer together.

use crate::clock::SimulationClock;
use crate::config::ClothConfig;
use crate::constraint::DistanceConstraint;
use crate::cut::{CutSegment, CutTool, PointerState};
use crate::error::ClothResult;
use crate::float::Float;
use crate::grid::ClothGrid;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::Particle;
use crate::render::{buffer_len, project_lines};
use crate::solver;
use crate::vec::Vec2;
use alloc::vec;
use alloc::vec::Vec as AllocVec;

/// A cuttable cloth driven one rendered frame at a time.
///
/// The host supplies elapsed wall time and a pointer snapshot per frame and
/// reads back a vertex buffer of `6 * constraint_count` floats. All state is
/// owned here; nothing is shared with event handlers.
///
/// ```
/// use tatter::{ClothEngine, ClothConfig, PointerState, Vec2};
///
/// let mut engine: ClothEngine<f32> = ClothEngine::new(16, 1.5, ClothConfig::new()).unwrap();
/// let pointer = PointerState::up(Vec2::new(0.0, 0.0));
/// engine.frame(1.0 / 60.0, pointer);
/// assert_eq!(engine.vertex_buffer().len(), 6 * engine.constraint_count());
/// ```
#[derive(Clone, Debug)]
pub struct ClothEngine<F: Float> {
    grid: ClothGrid<F>,
    config: ClothConfig<F>,
    clock: SimulationClock<F>,
    cutter: CutTool<F>,
    vertices: AllocVec<F>,
}

impl<F: Float> ClothEngine<F> {
    /// Validate `config` and build a `cols`-column lattice for a viewport
    /// of the given aspect ratio (width / height).
    pub fn new(cols: usize, aspect: F, config: ClothConfig<F>) -> ClothResult<Self> {
        config.validate()?;
        let grid = ClothGrid::build(cols, aspect, config.extent)?;
        let clock = SimulationClock::new(
            config.fixed_step,
            config.speed_multiplier,
            config.max_frame_delta,
        );
        let mut engine = ClothEngine {
            vertices: vec![F::zero(); buffer_len(grid.constraint_count())],
            grid,
            config,
            clock,
            cutter: CutTool::new(),
        };
        engine.refresh_vertex_buffer();
        Ok(engine)
    }

    /// Discard all state and rebuild the lattice. On error the current
    /// lattice is left untouched.
    pub fn rebuild(&mut self, cols: usize, aspect: F) -> ClothResult<()> {
        let grid = ClothGrid::build(cols, aspect, self.config.extent)?;
        tracing::debug!(cols, rows = grid.rows(), "rebuilt cloth");
        self.vertices = vec![F::zero(); buffer_len(grid.constraint_count())];
        self.grid = grid;
        self.clock.reset();
        self.cutter.reset();
        self.refresh_vertex_buffer();
        Ok(())
    }

    /// Rebuild for a new viewport aspect ratio, keeping the column count.
    pub fn resize(&mut self, aspect: F) -> ClothResult<()> {
        self.rebuild(self.grid.cols(), aspect)
    }

    /// Advance by one rendered frame. Returns the number of fixed steps run.
    pub fn frame(&mut self, elapsed: F, pointer: PointerState<F>) -> usize {
        self.frame_with_observer(elapsed, pointer, &mut NoOpStepObserver)
    }

    /// [`ClothEngine::frame`], reporting each fixed step to `observer`.
    pub fn frame_with_observer<O: StepObserver>(
        &mut self,
        elapsed: F,
        pointer: PointerState<F>,
        observer: &mut O,
    ) -> usize {
        self.cutter.update(pointer);
        self.clock.accumulate(elapsed);

        let mut steps = 0;
        while self.clock.consume_step() {
            self.step_with_observer(observer);
            steps += 1;
        }

        self.refresh_vertex_buffer();
        steps
    }

    /// Run exactly one fixed step outside the clock: integrate, relax,
    /// then apply queued cuts. The vertex buffer is not refreshed.
    pub fn step(&mut self) {
        self.step_with_observer(&mut NoOpStepObserver);
    }

    /// [`ClothEngine::step`], reporting its phases to `observer`.
    pub fn step_with_observer<O: StepObserver>(&mut self, observer: &mut O) {
        solver::step(&mut self.grid, &self.config, observer);

        let ClothGrid { particles, constraints, .. } = &mut self.grid;
        let cut = self.cutter.apply_pending(particles, constraints);
        if cut > 0 {
            tracing::trace!(cut, remaining = constraints.active_count(), "cut constraints");
        }
        observer.on_cut(cut);
        observer.on_step_complete();
    }

    /// Apply one cutting segment immediately and refresh the vertex buffer.
    /// Returns the number of constraints deactivated.
    pub fn cut(&mut self, from: Vec2<F>, to: Vec2<F>) -> usize {
        let ClothGrid { particles, constraints, .. } = &mut self.grid;
        let cut = CutSegment::new(from, to).apply(particles, constraints);
        self.refresh_vertex_buffer();
        cut
    }

    /// Deactivate every constraint touching lattice vertex (col, row).
    pub fn tear_at(&mut self, col: usize, row: usize) -> usize {
        let torn = self.grid.tear_at(col, row);
        self.refresh_vertex_buffer();
        torn
    }

    /// Begin a drag (event-style pointer input).
    pub fn press(&mut self, position: Vec2<F>) {
        self.cutter.press(position);
    }

    /// Move the pointer; queues a cut for the next fixed step while dragging.
    pub fn drag_to(&mut self, position: Vec2<F>) {
        self.cutter.drag_to(position);
    }

    /// End the drag. Segments already queued are still applied.
    pub fn release(&mut self) {
        self.cutter.release();
    }

    /// Copy the current line segments into a caller-owned buffer.
    pub fn project_into(&self, out: &mut [F]) -> ClothResult<()> {
        project_lines(self.grid.particles(), self.grid.constraints(), out)
    }

    fn refresh_vertex_buffer(&mut self) {
        let ClothGrid { particles, constraints, .. } = &self.grid;
        if let Err(err) = project_lines(particles, constraints, &mut self.vertices) {
            // The buffer is sized from the same constraint store.
            tracing::error!(%err, "vertex buffer out of sync with constraints");
        }
    }

    /// Flat `[x1, y1, z1, x2, y2, z2, ...]` per constraint slot.
    pub fn vertex_buffer(&self) -> &[F] {
        &self.vertices
    }

    /// The particle at `index`, if any.
    pub fn particle(&self, index: usize) -> Option<&Particle<F>> {
        self.grid.particles().get(index)
    }

    /// The constraint in slot `index`, active or not.
    pub fn constraint(&self, index: usize) -> Option<&DistanceConstraint<F>> {
        self.grid.constraints().get(index)
    }

    /// Slot of the constraint joining particles `a` and `b`.
    pub fn constraint_between(&self, a: usize, b: usize) -> Option<usize> {
        self.grid.constraints().find(a, b)
    }

    /// Particle index of lattice vertex (col, row).
    pub fn index(&self, col: usize, row: usize) -> usize {
        self.grid.index(col, row)
    }

    pub fn grid(&self) -> &ClothGrid<F> { &self.grid }
    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn clock(&self) -> &SimulationClock<F> { &self.clock }
    pub fn cutter(&self) -> &CutTool<F> { &self.cutter }
    pub fn cols(&self) -> usize { self.grid.cols() }
    pub fn rows(&self) -> usize { self.grid.rows() }
    pub fn particle_count(&self) -> usize { self.grid.particle_count() }
    pub fn constraint_count(&self) -> usize { self.grid.constraint_count() }
    pub fn active_constraint_count(&self) -> usize { self.grid.constraints().active_count() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClothError;

    #[test]
    fn invalid_config_is_rejected_eagerly() {
        let config = ClothConfig::<f32>::new().with_fixed_step(0.0);
        assert!(matches!(ClothEngine::new(4, 1.0, config), Err(ClothError::InvalidConfig(_))));
    }

    #[test]
    fn failed_rebuild_keeps_lattice() {
        let mut engine = ClothEngine::new(4, 1.0f32, ClothConfig::new()).unwrap();
        let count = engine.constraint_count();
        assert!(engine.rebuild(0, 1.0).is_err());
        assert_eq!(engine.constraint_count(), count);
    }

    #[test]
    fn resize_rebuilds_rows() {
        let mut engine = ClothEngine::new(8, 1.0f32, ClothConfig::new()).unwrap();
        engine.cut(Vec2::new(-1.0, 0.05), Vec2::new(1.0, 0.05));
        engine.resize(2.0).unwrap();
        assert_eq!(engine.rows(), 4);
        assert_eq!(engine.active_constraint_count(), engine.constraint_count());
        assert_eq!(engine.vertex_buffer().len(), 6 * engine.constraint_count());
    }
}
