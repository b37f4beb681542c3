//! Cuttable Verlet cloth for interactive backgrounds.
//!
//! `tatter` simulates a rectangular lattice of particles joined by distance
//! constraints, pinned along its border, sagging under a small constant pull
//! and torn by pointer drags. Each rendered frame produces a flat vertex
//! buffer of line segments ready for a `LINES` draw call.
//!
//! # Features
//!
//! - **Verlet integration**: Position-based dynamics with implicit velocity
//! - **Constraint relaxation**: Gauss-Seidel sweeps per fixed step
//! - **Cutting**: Drag segments sever every link they properly cross
//! - **Fixed timestep**: Accumulator with stall clamping and speed control
//! - **Stable render layout**: One 6-float slot per constraint, zeroed when cut
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod grid;
pub mod solver;
pub mod cut;
pub mod render;
pub mod clock;
pub mod engine;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use particle::{Particle, ParticleStore};
pub use constraint::{ConstraintStore, DistanceConstraint};
pub use grid::{ClothGrid, MAX_PARTICLES};
pub use cut::{segments_intersect, CutSegment, CutTool, PointerState, MAX_PENDING_SEGMENTS};
pub use render::{buffer_len, project_lines, FLOATS_PER_SEGMENT};
pub use clock::SimulationClock;
pub use engine::ClothEngine;
pub use config::ClothConfig;
pub use observer::{StepObserver, NoOpStepObserver, TracingObserver};
pub use error::{ClothError, ClothResult};
