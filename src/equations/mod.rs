//! Thermodynamic and transport closures of the compressible flow equations.
//!
//! A [`PhysicalModel`] composes three independent pieces:
//! - [`ThermodynamicModel`]: temperature ↔ internal energy
//! - [`IdealGas`]: density and internal energy ↔ pressure, sound speed,
//!   entropy and Riemann invariants
//! - [`TransportModel`]: temperature → viscosity and conductivity
//!
//! Every query is a closed-form expression. Invalid inputs (negative energy
//! or density) propagate as NaN to the caller; nothing here returns errors.

mod equation_of_state;
mod physical_model;
mod thermodynamic;
mod transport;

pub use equation_of_state::IdealGas;
pub use physical_model::PhysicalModel;
pub use thermodynamic::ThermodynamicModel;
pub use transport::{PRANDTL_NUMBER, SUTHERLAND_TEMPERATURE, TransportModel};
