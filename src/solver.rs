//! One fixed step of cloth dynamics: integrate, then relax.

use crate::config::ClothConfig;
use crate::float::Float;
use crate::grid::ClothGrid;
use crate::observer::StepObserver;

/// Advance every free particle one fixed step and run the configured number
/// of relaxation sweeps. Cuts are applied by the caller afterwards.
///
/// Sub-iterations belong to the fixed step, not to the rendered frame, so the
/// stiffness of the lattice does not depend on the host frame rate.
pub fn step<F: Float, O: StepObserver>(
    grid: &mut ClothGrid<F>,
    config: &ClothConfig<F>,
    observer: &mut O,
) {
    grid.particles.integrate(config.damping, config.gravity);
    observer.on_integrate();

    relax(grid, config, observer);
}

/// Run `config.iterations` Gauss-Seidel sweeps over the active constraints.
pub fn relax<F: Float, O: StepObserver>(
    grid: &mut ClothGrid<F>,
    config: &ClothConfig<F>,
    observer: &mut O,
) {
    let ClothGrid { particles, constraints, .. } = grid;
    for i in 0..config.iterations {
        constraints.relax(particles.as_mut_slice(), config.min_distance);
        observer.on_constraint_iteration(i);
    }
}
