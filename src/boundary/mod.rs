//! Boundary conditions for compressible flow.
//!
//! A boundary condition turns the interior state at a boundary face into a
//! boundary state that replaces the missing right neighbour in the interface
//! flux. It also supplies the face value and jump used by the gradient
//! phase, and adjusts the one-sided viscous inputs.
//!
//! # Available Boundary Conditions
//!
//! | BC Type | Description |
//! |---------|-------------|
//! | `RiemannFarfield` | Characteristic farfield from Riemann invariants |
//! | `VelocityInflow` | Prescribed density and velocity, extrapolated pressure |
//! | `PressureOutflow` | Prescribed back pressure for subsonic outflow |
//! | `IsothermalNoSlipWall` | Zero velocity, prescribed wall temperature |
//! | `AdiabaticSlipWall` | Normal velocity removed, zero heat flux |
//! | `AdiabaticNoSlipWall` | Zero velocity, zero heat flux |
//!
//! Conditions are assigned per named mesh surface through
//! [`BoundaryConditions`]; a surface without a condition is the only
//! failure and is reported at setup.

mod condition;
mod open;
mod traits;
mod wall;

pub use condition::{BoundaryCondition, BoundaryConditions};
pub use open::{PressureOutflow, RiemannFarfield, VelocityInflow};
pub use traits::{BCContext, FlowBoundaryCondition, GradientState};
pub use wall::{AdiabaticNoSlipWall, AdiabaticSlipWall, IsothermalNoSlipWall};
