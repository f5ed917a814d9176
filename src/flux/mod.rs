//! Numerical flux functions.
//!
//! Provides the interface fluxes of the compressible flow equations:
//! - Exact normal convective flux shared by every solver
//! - Riemann fluxes: central, Lax-Friedrichs, HLLC, Roe
//! - Viscous Navier-Stokes fluxes
//!
//! # Flux Trait
//!
//! The [`NumericalFlux`] trait provides a generic interface for Riemann fluxes.
//! [`ConvectiveFluxKind`] dispatches over the built-in ones through a `match`.

mod central;
mod convective;
mod hllc;
mod roe;
pub mod traits;
mod viscous;

pub use central::{CentralFlux, LaxFriedrichsFlux};
pub use convective::{normal_flux, spectral_radius};
pub use hllc::HllcFlux;
pub use roe::{HARTEN_DELTA_DIVISOR, RoeAverage, RoeFlux, harten_fix};
pub use traits::{ConvectiveFluxKind, Flux, FluxContext, NumericalFlux};
pub use viscous::{contract_normal, viscous_interface_flux, viscous_normal_flux, viscous_raw_flux};
