//! Solid walls.
//!
//! Walls replace the interior state by the boundary state for the viscous
//! flux and report the full boundary jump to the gradient phase. Adiabatic
//! walls zero the boundary temperature gradient.

use super::traits::{BCContext, FlowBoundaryCondition, GradientState, wall_gradient_state};
use crate::equations::PhysicalModel;
use crate::solver::{Computational, PrimitiveGradient};

/// No-slip wall at a prescribed temperature.
///
/// Density floats with the interior; `internal_energy` is the wall value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IsothermalNoSlipWall {
    pub internal_energy: f64,
}

impl IsothermalNoSlipWall {
    pub fn new(internal_energy: f64) -> Self {
        Self { internal_energy }
    }

    pub fn from_temperature(model: &PhysicalModel, temperature: f64) -> Self {
        Self::new(model.internal_energy_from_temperature(temperature))
    }
}

impl<const D: usize> FlowBoundaryCondition<D> for IsothermalNoSlipWall {
    fn boundary_state(&self, ctx: &BCContext<D>) -> Computational<D> {
        Computational::new(ctx.model, ctx.interior.density, [0.0; D], self.internal_energy)
    }

    fn gradient_state(&self, ctx: &BCContext<D>) -> GradientState<D> {
        wall_gradient_state(ctx, &self.boundary_state(ctx))
    }

    fn viscous_states(
        &self,
        left: &mut Computational<D>,
        boundary: &Computational<D>,
        left_gradient: &PrimitiveGradient<D>,
    ) -> PrimitiveGradient<D> {
        *left = *boundary;
        *left_gradient
    }

    fn name(&self) -> &'static str {
        "isothermal_no_slip_wall"
    }

    fn is_wall(&self) -> bool {
        true
    }
}

/// Inviscid wall: normal velocity removed, tangential velocity kept.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AdiabaticSlipWall;

impl<const D: usize> FlowBoundaryCondition<D> for AdiabaticSlipWall {
    fn boundary_state(&self, ctx: &BCContext<D>) -> Computational<D> {
        let vn = ctx.interior_normal_velocity();
        let mut state = ctx.interior;
        for d in 0..D {
            state.velocity[d] -= vn * ctx.normal[d];
        }
        state
    }

    fn gradient_state(&self, ctx: &BCContext<D>) -> GradientState<D> {
        wall_gradient_state(ctx, &self.boundary_state(ctx))
    }

    fn viscous_states(
        &self,
        left: &mut Computational<D>,
        boundary: &Computational<D>,
        left_gradient: &PrimitiveGradient<D>,
    ) -> PrimitiveGradient<D> {
        *left = *boundary;
        adiabatic(left_gradient)
    }

    fn name(&self) -> &'static str {
        "adiabatic_slip_wall"
    }

    fn is_wall(&self) -> bool {
        true
    }
}

/// Adiabatic no-slip wall.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AdiabaticNoSlipWall;

impl<const D: usize> FlowBoundaryCondition<D> for AdiabaticNoSlipWall {
    fn boundary_state(&self, ctx: &BCContext<D>) -> Computational<D> {
        Computational {
            velocity: [0.0; D],
            ..ctx.interior
        }
    }

    fn gradient_state(&self, ctx: &BCContext<D>) -> GradientState<D> {
        wall_gradient_state(ctx, &self.boundary_state(ctx))
    }

    fn viscous_states(
        &self,
        left: &mut Computational<D>,
        boundary: &Computational<D>,
        left_gradient: &PrimitiveGradient<D>,
    ) -> PrimitiveGradient<D> {
        *left = *boundary;
        adiabatic(left_gradient)
    }

    fn name(&self) -> &'static str {
        "adiabatic_no_slip_wall"
    }

    fn is_wall(&self) -> bool {
        true
    }
}

#[inline]
fn adiabatic<const D: usize>(gradient: &PrimitiveGradient<D>) -> PrimitiveGradient<D> {
    PrimitiveGradient {
        temperature: [0.0; D],
        ..*gradient
    }
}
