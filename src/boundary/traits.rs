//! Boundary condition contract.

use crate::equations::PhysicalModel;
use crate::solver::{Computational, Conserved, PrimitiveGradient};

/// Context for boundary condition evaluation at one face quadrature point.
#[derive(Clone, Copy, Debug)]
pub struct BCContext<'a, const D: usize> {
    pub model: &'a PhysicalModel,
    /// Outward unit normal of the owning element.
    pub normal: [f64; D],
    /// Interior state traced onto the face.
    pub interior: Computational<D>,
}

impl<'a, const D: usize> BCContext<'a, D> {
    pub fn new(model: &'a PhysicalModel, normal: [f64; D], interior: Computational<D>) -> Self {
        Self {
            model,
            normal,
            interior,
        }
    }

    /// `v · n` of the interior state.
    #[inline]
    pub fn interior_normal_velocity(&self) -> f64 {
        self.interior.normal_velocity(&self.normal)
    }

    #[inline]
    pub fn interior_sound_speed(&self) -> f64 {
        self.interior.sound_speed(self.model)
    }

    /// Normal Mach number of the interior state; negative for inflow.
    #[inline]
    pub fn interior_normal_mach(&self) -> f64 {
        self.interior_normal_velocity() / self.interior_sound_speed()
    }
}

/// States used by the gradient phase at a boundary point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GradientState<const D: usize> {
    /// Face value entering the volume gradient.
    pub volume: Conserved<D>,
    /// Jump entering the gradient lifting.
    pub jump: Conserved<D>,
}

/// Trait for compressible flow boundary conditions.
///
/// Implementations are pure functions of their inputs and never fail;
/// invalid interior states propagate NaN.
pub trait FlowBoundaryCondition<const D: usize>: Send + Sync {
    /// State fed to the interface flux in place of a right neighbour.
    fn boundary_state(&self, ctx: &BCContext<D>) -> Computational<D>;

    /// Face value and jump for the gradient phase.
    fn gradient_state(&self, ctx: &BCContext<D>) -> GradientState<D> {
        GradientState {
            volume: ctx.interior.to_conserved(),
            jump: Conserved::zero(),
        }
    }

    /// Adjust the one-sided viscous inputs and return the boundary gradient.
    ///
    /// `left` is the interior state, which walls replace by `boundary`.
    fn viscous_states(
        &self,
        _left: &mut Computational<D>,
        _boundary: &Computational<D>,
        left_gradient: &PrimitiveGradient<D>,
    ) -> PrimitiveGradient<D> {
        *left_gradient
    }

    /// Name of this boundary condition for logging.
    fn name(&self) -> &'static str;

    /// Whether this condition is a solid wall.
    fn is_wall(&self) -> bool {
        false
    }
}

/// Gradient state shared by the wall conditions.
#[inline]
pub(super) fn wall_gradient_state<const D: usize>(
    ctx: &BCContext<D>,
    boundary: &Computational<D>,
) -> GradientState<D> {
    let b = boundary.to_conserved();
    GradientState {
        volume: b,
        jump: b - ctx.interior.to_conserved(),
    }
}
