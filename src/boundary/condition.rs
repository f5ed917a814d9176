//! Closed set of boundary conditions and per-surface lookup.

use std::collections::HashMap;

use log::debug;

use super::open::{PressureOutflow, RiemannFarfield, VelocityInflow};
use super::traits::{BCContext, FlowBoundaryCondition, GradientState};
use super::wall::{AdiabaticNoSlipWall, AdiabaticSlipWall, IsothermalNoSlipWall};
use crate::equations::PhysicalModel;
use crate::error::{DgError, Result};
use crate::mesh::Mesh;
use crate::solver::{Computational, Primitive, PrimitiveGradient};

/// Built-in boundary conditions with `match` dispatch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryCondition<const D: usize> {
    RiemannFarfield(RiemannFarfield<D>),
    VelocityInflow(VelocityInflow<D>),
    PressureOutflow(PressureOutflow<D>),
    IsothermalNoSlipWall(IsothermalNoSlipWall),
    AdiabaticSlipWall(AdiabaticSlipWall),
    AdiabaticNoSlipWall(AdiabaticNoSlipWall),
}

impl<const D: usize> BoundaryCondition<D> {
    pub fn riemann_farfield(model: &PhysicalModel, target: Primitive<D>) -> Self {
        Self::RiemannFarfield(RiemannFarfield::new(target.to_computational(model)))
    }

    pub fn velocity_inflow(model: &PhysicalModel, target: Primitive<D>) -> Self {
        Self::VelocityInflow(VelocityInflow::new(target.to_computational(model)))
    }

    /// Outflow at back pressure `pressure`.
    pub fn pressure_outflow(model: &PhysicalModel, pressure: f64) -> Self {
        // Only the target pressure is read.
        let target = Computational::from_pressure(model, 1.0, [0.0; D], pressure);
        Self::PressureOutflow(PressureOutflow::new(target))
    }

    pub fn isothermal_no_slip_wall(model: &PhysicalModel, temperature: f64) -> Self {
        Self::IsothermalNoSlipWall(IsothermalNoSlipWall::from_temperature(model, temperature))
    }

    pub fn adiabatic_slip_wall() -> Self {
        Self::AdiabaticSlipWall(AdiabaticSlipWall)
    }

    pub fn adiabatic_no_slip_wall() -> Self {
        Self::AdiabaticNoSlipWall(AdiabaticNoSlipWall)
    }

    #[inline(always)]
    fn inner(&self) -> &dyn FlowBoundaryCondition<D> {
        match self {
            Self::RiemannFarfield(bc) => bc,
            Self::VelocityInflow(bc) => bc,
            Self::PressureOutflow(bc) => bc,
            Self::IsothermalNoSlipWall(bc) => bc,
            Self::AdiabaticSlipWall(bc) => bc,
            Self::AdiabaticNoSlipWall(bc) => bc,
        }
    }
}

impl<const D: usize> FlowBoundaryCondition<D> for BoundaryCondition<D> {
    #[inline]
    fn boundary_state(&self, ctx: &BCContext<D>) -> Computational<D> {
        self.inner().boundary_state(ctx)
    }

    #[inline]
    fn gradient_state(&self, ctx: &BCContext<D>) -> GradientState<D> {
        self.inner().gradient_state(ctx)
    }

    #[inline]
    fn viscous_states(
        &self,
        left: &mut Computational<D>,
        boundary: &Computational<D>,
        left_gradient: &PrimitiveGradient<D>,
    ) -> PrimitiveGradient<D> {
        self.inner().viscous_states(left, boundary, left_gradient)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn is_wall(&self) -> bool {
        self.inner().is_wall()
    }
}

/// Boundary conditions keyed by surface name.
///
/// Read-only once the solver is built.
#[derive(Clone, Debug, Default)]
pub struct BoundaryConditions<const D: usize> {
    conditions: HashMap<String, BoundaryCondition<D>>,
}

impl<const D: usize> BoundaryConditions<D> {
    pub fn new() -> Self {
        Self {
            conditions: HashMap::new(),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, surface: impl Into<String>, condition: BoundaryCondition<D>) -> Self {
        self.insert(surface, condition);
        self
    }

    /// Assign `condition` to `surface`, replacing any previous one.
    pub fn insert(&mut self, surface: impl Into<String>, condition: BoundaryCondition<D>) {
        self.conditions.insert(surface.into(), condition);
    }

    pub fn get(&self, surface: &str) -> Result<&BoundaryCondition<D>> {
        self.conditions
            .get(surface)
            .ok_or_else(|| DgError::boundary_not_found(surface))
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check that every boundary surface of `mesh` has a condition.
    pub fn validate(&self, mesh: &Mesh<D>) -> Result<()> {
        for surface in mesh.surfaces() {
            let bc = self.get(surface)?;
            debug!("surface {surface}: {}", bc.name());
        }
        Ok(())
    }
}
