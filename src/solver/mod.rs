//! DG solver for compressible flow.
//!
//! # Submodules
//!
//! - [`state`]: point-wise flow state in conserved, computational and
//!   primitive form, plus gradients
//! - `config`: [`SolverConfig`] and the scheme selectors
//! - `dg`: [`DgSolver`], residual assembly and stage updates
//! - `initial`: [`InitialCondition`] by mesh region
//!
//! The assembler and per-element storage are internal; read-only views of
//! the coefficients are exposed through [`ElementState`].

mod assembly;
mod config;
mod dg;
mod element;
mod initial;
mod parallel;
pub mod state;

pub use config::{BoundaryFluxMode, EquationModel, SolverConfig, ViscousFluxKind};
pub use dg::DgSolver;
pub use element::ElementState;
pub use initial::{InitialCondition, InitialState};
pub use state::{
    Computational, Conserved, ConservedGradient, Primitive, PrimitiveGradient, Representation,
    VariableState,
};
