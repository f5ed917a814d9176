//! Central and Lax-Friedrichs fluxes.
//!
//! F* = (F_L + F_R) / 2 - (λ / 2) (U_R - U_L)
//!
//! with λ = 0 for the central flux and the larger of the two one-sided
//! spectral radii for Lax-Friedrichs.

use super::convective::spectral_radius;
use super::traits::{FluxContext, NumericalFlux};
use crate::solver::{Computational, Conserved};

/// Arithmetic mean of the one-sided fluxes.
///
/// Non-dissipative; only suited to smooth diagnostics.
#[derive(Clone, Copy, Debug, Default)]
pub struct CentralFlux;

impl<const D: usize> NumericalFlux<D> for CentralFlux {
    #[inline]
    fn resolve(
        &self,
        _left: &Computational<D>,
        _right: &Computational<D>,
        f_left: &Conserved<D>,
        f_right: &Conserved<D>,
        _ctx: &FluxContext<D>,
    ) -> Conserved<D> {
        (*f_left + *f_right) * 0.5
    }

    fn name(&self) -> &'static str {
        "central"
    }
}

/// Lax-Friedrichs flux with the interface-wide spectral radius.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaxFriedrichsFlux;

impl<const D: usize> NumericalFlux<D> for LaxFriedrichsFlux {
    #[inline]
    fn resolve(
        &self,
        left: &Computational<D>,
        right: &Computational<D>,
        f_left: &Conserved<D>,
        f_right: &Conserved<D>,
        ctx: &FluxContext<D>,
    ) -> Conserved<D> {
        let lambda = spectral_radius(ctx.model, left, &ctx.normal)
            .max(spectral_radius(ctx.model, right, &ctx.normal));
        let jump = right.to_conserved() - left.to_conserved();
        (*f_left + *f_right - jump * lambda) * 0.5
    }

    fn name(&self) -> &'static str {
        "lax_friedrichs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::PhysicalModel;
    use crate::flux::normal_flux;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_central_is_mean() {
        let model = PhysicalModel::default();
        let l = Computational::<1>::from_pressure(&model, 1.0, [1.0], 1.0);
        let r = Computational::<1>::from_pressure(&model, 0.5, [0.0], 0.5);
        let ctx = FluxContext::new(&model, [1.0]);
        let f = CentralFlux.compute(&l, &r, &ctx);
        let (fl, fr) = (normal_flux(&l, &[1.0]), normal_flux(&r, &[1.0]));
        for k in 0..3 {
            assert_relative_eq!(f[k], 0.5 * (fl[k] + fr[k]), epsilon = TOL);
        }
    }

    #[test]
    fn test_lax_friedrichs_density_dissipation() {
        // Both sides at rest with unit sound speed: λ = 1
        let model = PhysicalModel::default();
        let l = Computational::<1>::from_pressure(&model, 1.4, [0.0], 1.0);
        let r = Computational::<1>::from_pressure(&model, 0.7, [0.0], 0.5);
        let ctx = FluxContext::new(&model, [1.0]);
        let f = LaxFriedrichsFlux.compute(&l, &r, &ctx);
        assert_relative_eq!(f.density, 0.35, epsilon = TOL);
        assert_relative_eq!(f.momentum[0], 0.75, epsilon = TOL);
    }
}
