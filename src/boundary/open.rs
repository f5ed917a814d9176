//! Open boundaries: farfield, velocity inflow and pressure outflow.
//!
//! All three take a target state and classify the interior flow by its
//! normal Mach number `Mₙ = vₙ / a` (negative for inflow).

use super::traits::{BCContext, FlowBoundaryCondition};
use crate::solver::Computational;

// =============================================================================
// Riemann farfield
// =============================================================================

/// Characteristic farfield condition.
///
/// # Mathematical Formulation
///
/// Supersonic (`|Mₙ| > 1`): the upwind state is taken whole, target for
/// inflow and interior for outflow.
///
/// Subsonic: with the outgoing invariant from the interior and the
/// incoming one from the target,
///
/// - R⁺ = vₙ_int + 2 a_int / (γ - 1)
/// - R⁻ = vₙ_tgt - 2 a_tgt / (γ - 1)
/// - vₙ_b = (R⁺ + R⁻) / 2,  2 a_b / (γ - 1) = (R⁺ - R⁻) / 2
///
/// Tangential velocity and entropy come from the upwind side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiemannFarfield<const D: usize> {
    pub target: Computational<D>,
}

impl<const D: usize> RiemannFarfield<D> {
    pub fn new(target: Computational<D>) -> Self {
        Self { target }
    }
}

impl<const D: usize> FlowBoundaryCondition<D> for RiemannFarfield<D> {
    fn boundary_state(&self, ctx: &BCContext<D>) -> Computational<D> {
        let model = ctx.model;
        let n = &ctx.normal;
        let interior = &ctx.interior;
        let target = &self.target;
        let mach = ctx.interior_normal_mach();

        if mach.abs() > 1.0 {
            return if mach < 0.0 { *target } else { *interior };
        }

        let vn_int = interior.normal_velocity(n);
        let vn_tgt = target.normal_velocity(n);
        let r_plus = vn_int + model.riemann_invariant_part(interior.internal_energy);
        let r_minus = vn_tgt - model.riemann_invariant_part(target.internal_energy);
        let vn_b = (r_plus + r_minus) / 2.0;
        let internal_energy = model.internal_energy_from_riemann_invariant_part((r_plus - r_minus) / 2.0);

        let upwind = if mach < 0.0 { target } else { interior };
        let vn_up = if mach < 0.0 { vn_tgt } else { vn_int };
        let velocity: [f64; D] = std::array::from_fn(|d| upwind.velocity[d] + (vn_b - vn_up) * n[d]);
        let entropy = model.entropy_from_density_pressure(upwind.density, upwind.pressure);
        let density = model.density_from_entropy_internal_energy(entropy, internal_energy);
        Computational::new(model, density, velocity, internal_energy)
    }

    fn name(&self) -> &'static str {
        "riemann_farfield"
    }
}

// =============================================================================
// Velocity inflow
// =============================================================================

/// Prescribed density and velocity.
///
/// Unless the inflow is supersonic, pressure is extrapolated from the
/// interior and internal energy follows from the target density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityInflow<const D: usize> {
    pub target: Computational<D>,
}

impl<const D: usize> VelocityInflow<D> {
    pub fn new(target: Computational<D>) -> Self {
        Self { target }
    }
}

impl<const D: usize> FlowBoundaryCondition<D> for VelocityInflow<D> {
    fn boundary_state(&self, ctx: &BCContext<D>) -> Computational<D> {
        if ctx.interior_normal_mach() > -1.0 {
            Computational::from_pressure(
                ctx.model,
                self.target.density,
                self.target.velocity,
                ctx.interior.pressure,
            )
        } else {
            self.target
        }
    }

    fn name(&self) -> &'static str {
        "velocity_inflow"
    }
}

// =============================================================================
// Pressure outflow
// =============================================================================

/// Prescribed back pressure for subsonic outflow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressureOutflow<const D: usize> {
    pub target: Computational<D>,
}

impl<const D: usize> PressureOutflow<D> {
    pub fn new(target: Computational<D>) -> Self {
        Self { target }
    }
}

impl<const D: usize> FlowBoundaryCondition<D> for PressureOutflow<D> {
    fn boundary_state(&self, ctx: &BCContext<D>) -> Computational<D> {
        if ctx.interior_normal_mach() < 1.0 {
            Computational::from_pressure(
                ctx.model,
                ctx.interior.density,
                ctx.interior.velocity,
                self.target.pressure,
            )
        } else {
            ctx.interior
        }
    }

    fn name(&self) -> &'static str {
        "pressure_outflow"
    }
}
