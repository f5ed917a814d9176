//! # dg-flow
//!
//! A high-order Discontinuous Galerkin core for compressible flow.
//!
//! This crate provides:
//! - Physical models (ideal gas, constant-cv thermodynamics, transport laws)
//! - Conserved, computational and primitive state conversions
//! - Convective numerical fluxes (central, Lax-Friedrichs, HLLC, Roe)
//! - Viscous fluxes with BR1/BR2 gradient reconstruction
//! - Boundary conditions for farfield, inflow, outflow and walls
//! - Explicit time integration (forward Euler, Heun RK2, SSP-RK3) with a
//!   CFL-limited time step
//! - A run driver with relative-error monitoring
//!
//! A reference mesh and modal basis (Gauss-Legendre quadrature, tensor
//! Legendre polynomials on lines and quadrangles) are included so the
//! solver can run on its own.
//!
//! # Example
//!
//! ```
//! use dg_flow::prelude::*;
//!
//! let model = PhysicalModel::default();
//! let mesh = uniform_line((0.0, 1.0), 20, 2, ["inlet", "outlet"]).unwrap();
//! let ambient = Primitive::from_pressure(&model, 1.4, [0.3], 1.0);
//! let farfield = BoundaryCondition::riemann_farfield(&model, ambient);
//! let bcs = BoundaryConditions::new().with("inlet", farfield).with("outlet", farfield);
//!
//! let mut solver = DgSolver::new(mesh, model, &bcs, SolverConfig::default()).unwrap();
//! solver.set_initial_condition(&InitialCondition::uniform(ambient)).unwrap();
//! let summary = Simulation::new(solver).with_iterations(5).run().unwrap();
//! assert!(!summary.diverged);
//! ```

pub mod basis;
pub mod boundary;
pub mod equations;
pub mod error;
pub mod flux;
pub mod mesh;
pub mod operators;
pub mod polynomial;
pub mod simulation;
pub mod solver;
pub mod time;
pub mod types;

pub use boundary::{BoundaryCondition, BoundaryConditions, FlowBoundaryCondition};
pub use equations::{PhysicalModel, TransportModel};
pub use error::{DgError, Result};
pub use flux::{ConvectiveFluxKind, NumericalFlux};
pub use mesh::{Mesh, uniform_line, uniform_rectangle};
pub use simulation::{RunConfig, RunSummary, Simulation};
pub use solver::{
    BoundaryFluxMode, Computational, Conserved, DgSolver, EquationModel, InitialCondition,
    Primitive, SolverConfig, VariableState, ViscousFluxKind,
};
pub use time::TimeIntegrationKind;
pub use types::{ElementIndex, FaceIndex};

/// Common imports for setting up and running a solver.
pub mod prelude {
    pub use crate::boundary::{BoundaryCondition, BoundaryConditions};
    pub use crate::equations::{PhysicalModel, TransportModel};
    pub use crate::error::{DgError, Result};
    pub use crate::flux::ConvectiveFluxKind;
    pub use crate::mesh::{uniform_line, uniform_rectangle};
    pub use crate::simulation::{RunConfig, Simulation};
    pub use crate::solver::{
        DgSolver, EquationModel, InitialCondition, Primitive, SolverConfig, ViscousFluxKind,
    };
    pub use crate::time::TimeIntegrationKind;
}
