//! Time integration methods.

mod cfl;
mod integrator;

pub use cfl::{check_time_step, local_time_step};
pub use integrator::{IntegratorInfo, StageCoefficients, StagedSystem, TimeIntegrationKind};
