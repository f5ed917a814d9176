//! Trait-based numerical flux abstraction.
//!
//! Each algorithm is a zero-sized type implementing [`NumericalFlux`]; the
//! solver holds a [`ConvectiveFluxKind`] chosen once at setup and dispatches
//! through a `match`.
//!
//! # Example
//! ```
//! use dg_flow::equations::PhysicalModel;
//! use dg_flow::flux::{ConvectiveFluxKind, FluxContext, HllcFlux, NumericalFlux};
//! use dg_flow::solver::Computational;
//!
//! let model = PhysicalModel::default();
//! let left = Computational::<1>::from_pressure(&model, 1.0, [0.0], 1.0);
//! let right = Computational::<1>::from_pressure(&model, 0.125, [0.0], 0.1);
//! let ctx = FluxContext::new(&model, [1.0]);
//!
//! let direct = HllcFlux.compute(&left, &right, &ctx);
//! let dispatched = ConvectiveFluxKind::Hllc.compute(&left, &right, &ctx);
//! assert_eq!(direct, dispatched);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::convective::normal_flux;
use super::{CentralFlux, HllcFlux, LaxFriedrichsFlux, RoeFlux};
use crate::equations::PhysicalModel;
use crate::solver::{Computational, Conserved};

// =============================================================================
// Flux Context
// =============================================================================

/// Physical model and unit normal at one interface quadrature point.
#[derive(Clone, Copy, Debug)]
pub struct FluxContext<'a, const D: usize> {
    pub model: &'a PhysicalModel,
    /// Unit normal pointing from the left state to the right state.
    pub normal: [f64; D],
}

impl<'a, const D: usize> FluxContext<'a, D> {
    #[inline]
    pub fn new(model: &'a PhysicalModel, normal: [f64; D]) -> Self {
        Self { model, normal }
    }

    /// Same model, normal reversed.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            model: self.model,
            normal: self.normal.map(|n| -n),
        }
    }
}

// =============================================================================
// Flux scratch
// =============================================================================

/// Scratch values of one interface flux evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Flux<const D: usize> {
    /// Normal convective flux of the left state.
    pub left: Conserved<D>,
    /// Normal convective flux of the right state.
    pub right: Conserved<D>,
    /// Resolved convective interface flux.
    pub result: Conserved<D>,
    /// Resolved viscous interface flux, zero for inviscid runs.
    pub viscous: Conserved<D>,
}

impl<const D: usize> Flux<D> {
    /// Net normal flux `F_c - F_v`.
    #[inline(always)]
    pub fn total(&self) -> Conserved<D> {
        self.result - self.viscous
    }
}

// =============================================================================
// Numerical Flux Trait
// =============================================================================

/// A Riemann flux resolving a left/right state pair along a normal.
///
/// Implementations must be consistent, `F*(q, q; n) = F(q) · n`, and
/// conservative, `F*(q_l, q_r; n) = -F*(q_r, q_l; -n)`. None of them fail:
/// invalid states propagate NaN.
pub trait NumericalFlux<const D: usize>: Send + Sync {
    /// Resolve the interface flux given the precomputed one-sided normal fluxes.
    fn resolve(
        &self,
        left: &Computational<D>,
        right: &Computational<D>,
        f_left: &Conserved<D>,
        f_right: &Conserved<D>,
        ctx: &FluxContext<D>,
    ) -> Conserved<D>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Interface flux `F* · n`.
    #[inline]
    fn compute(
        &self,
        left: &Computational<D>,
        right: &Computational<D>,
        ctx: &FluxContext<D>,
    ) -> Conserved<D> {
        let f_left = normal_flux(left, &ctx.normal);
        let f_right = normal_flux(right, &ctx.normal);
        self.resolve(left, right, &f_left, &f_right, ctx)
    }

    /// Interface flux together with both one-sided fluxes.
    #[inline]
    fn evaluate(&self, left: &Computational<D>, right: &Computational<D>, ctx: &FluxContext<D>) -> Flux<D> {
        let f_left = normal_flux(left, &ctx.normal);
        let f_right = normal_flux(right, &ctx.normal);
        Flux {
            result: self.resolve(left, right, &f_left, &f_right, ctx),
            left: f_left,
            right: f_right,
            viscous: Conserved::zero(),
        }
    }
}

// =============================================================================
// Standard Flux Enum
// =============================================================================

/// Built-in convective fluxes, selected once at setup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConvectiveFluxKind {
    /// Arithmetic mean, no dissipation
    Central,
    /// Global Lax-Friedrichs
    LaxFriedrichs,
    /// Harten-Lax-van Leer-Contact
    #[default]
    Hllc,
    /// Roe with Harten entropy fix
    Roe,
}

impl ConvectiveFluxKind {
    pub const ALL: [ConvectiveFluxKind; 4] = [
        ConvectiveFluxKind::Central,
        ConvectiveFluxKind::LaxFriedrichs,
        ConvectiveFluxKind::Hllc,
        ConvectiveFluxKind::Roe,
    ];
}

impl<const D: usize> NumericalFlux<D> for ConvectiveFluxKind {
    #[inline]
    fn resolve(
        &self,
        left: &Computational<D>,
        right: &Computational<D>,
        f_left: &Conserved<D>,
        f_right: &Conserved<D>,
        ctx: &FluxContext<D>,
    ) -> Conserved<D> {
        match self {
            ConvectiveFluxKind::Central => CentralFlux.resolve(left, right, f_left, f_right, ctx),
            ConvectiveFluxKind::LaxFriedrichs => {
                LaxFriedrichsFlux.resolve(left, right, f_left, f_right, ctx)
            }
            ConvectiveFluxKind::Hllc => HllcFlux.resolve(left, right, f_left, f_right, ctx),
            ConvectiveFluxKind::Roe => RoeFlux.resolve(left, right, f_left, f_right, ctx),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ConvectiveFluxKind::Central => "central",
            ConvectiveFluxKind::LaxFriedrichs => "lax_friedrichs",
            ConvectiveFluxKind::Hllc => "hllc",
            ConvectiveFluxKind::Roe => "roe",
        }
    }
}

impl std::fmt::Display for ConvectiveFluxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(NumericalFlux::<1>::name(self))
    }
}
