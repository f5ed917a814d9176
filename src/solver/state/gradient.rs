//! Spatial gradients of the solution.

use super::variable::{Computational, Conserved};
use crate::equations::PhysicalModel;

/// Gradient of the conserved variables, one [`Conserved`] per direction.
pub type ConservedGradient<const D: usize> = [Conserved<D>; D];

/// Zero conserved gradient.
#[inline(always)]
pub fn zero_conserved_gradient<const D: usize>() -> ConservedGradient<D> {
    [Conserved::zero(); D]
}

/// Gradient of the primitive variables (ρ, v, T).
///
/// `velocity[d][j]` is `∂v_j / ∂x_d`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimitiveGradient<const D: usize> {
    pub density: [f64; D],
    pub velocity: [[f64; D]; D],
    pub temperature: [f64; D],
}

impl<const D: usize> Default for PrimitiveGradient<D> {
    fn default() -> Self {
        Self {
            density: [0.0; D],
            velocity: [[0.0; D]; D],
            temperature: [0.0; D],
        }
    }
}

impl<const D: usize> PrimitiveGradient<D> {
    /// Chain rule from the conserved gradient at a point with state `state`.
    pub fn from_conserved(
        model: &PhysicalModel,
        state: &Computational<D>,
        gradient: &ConservedGradient<D>,
    ) -> Self {
        let rho = state.density;
        let v = &state.velocity;
        let total_energy = state.total_energy();
        let cv = model.thermodynamic.specific_heat_constant_volume;

        let mut out = Self::default();
        for d in 0..D {
            let g = &gradient[d];
            out.density[d] = g.density;
            for j in 0..D {
                out.velocity[d][j] = (g.momentum[j] - g.density * v[j]) / rho;
            }
            // ∇e = (∇(ρE) - E ∇ρ) / ρ - ∇v · v
            let mut de = (g.density_total_energy - total_energy * g.density) / rho;
            for j in 0..D {
                de -= out.velocity[d][j] * v[j];
            }
            out.temperature[d] = de / cv;
        }
        out
    }

    /// Velocity divergence.
    #[inline]
    pub fn divergence(&self) -> f64 {
        (0..D).map(|d| self.velocity[d][d]).sum()
    }
}
