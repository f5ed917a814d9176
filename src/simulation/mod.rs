//! Run-level driver around [`DgSolver`](crate::solver::DgSolver).
//!
//! [`Simulation`] steps the solver for a fixed number of iterations (or up
//! to an end time), logs progress and returns a [`RunSummary`] with the
//! relative error history.
//!
//! # Example
//! ```
//! use dg_flow::boundary::{BoundaryCondition, BoundaryConditions};
//! use dg_flow::equations::PhysicalModel;
//! use dg_flow::mesh::uniform_line;
//! use dg_flow::simulation::Simulation;
//! use dg_flow::solver::{DgSolver, InitialCondition, Primitive, SolverConfig};
//!
//! let model = PhysicalModel::default();
//! let mesh = uniform_line((0.0, 1.0), 16, 1, ["wall", "wall"]).unwrap();
//! let bcs = BoundaryConditions::new().with("wall", BoundaryCondition::adiabatic_slip_wall());
//! let mut solver = DgSolver::new(mesh, model, &bcs, SolverConfig::default()).unwrap();
//! solver
//!     .set_initial_condition(&InitialCondition::uniform(Primitive::from_pressure(&model, 1.0, [0.0], 1.0)))
//!     .unwrap();
//!
//! let summary = Simulation::new(solver).with_iterations(10).run().unwrap();
//! assert_eq!(summary.steps, 10);
//! ```

mod runner;

pub use runner::{RunConfig, RunSummary, Simulation};
