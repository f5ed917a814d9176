//! HLLC (Harten-Lax-van Leer-Contact) approximate Riemann solver.
//!
//! Wave speeds come from a pressure-based estimate,
//!
//! p* = max(0, (p_L + p_R)/2 - (vₙ_R - vₙ_L) ρ̄ ā)
//! S_K = vₙ_K ∓ a_K q_K,  q_K = sqrt(1 + (γ+1)/(2γ) (p*/p_K - 1)) if p* > p_K else 1
//!
//! and the contact speed S_M from the Rankine-Hugoniot conditions across both
//! acoustic waves. The interface falls in one of four regions; the two star
//! regions return `F_K + S_K (U*_K - U_K)`.
//!
//! Reference: Toro, "Riemann Solvers and Numerical Methods for Fluid Dynamics"

use super::traits::{FluxContext, NumericalFlux};
use crate::equations::PhysicalModel;
use crate::solver::{Computational, Conserved};

#[derive(Clone, Copy, Debug, Default)]
pub struct HllcFlux;

impl<const D: usize> NumericalFlux<D> for HllcFlux {
    #[inline]
    fn resolve(
        &self,
        left: &Computational<D>,
        right: &Computational<D>,
        f_left: &Conserved<D>,
        f_right: &Conserved<D>,
        ctx: &FluxContext<D>,
    ) -> Conserved<D> {
        let model = ctx.model;
        let n = &ctx.normal;
        let (rho_l, rho_r) = (left.density, right.density);
        let (p_l, p_r) = (left.pressure, right.pressure);
        let vn_l = left.normal_velocity(n);
        let vn_r = right.normal_velocity(n);
        let a_l = left.sound_speed(model);
        let a_r = right.sound_speed(model);

        let rho_avg = (rho_l + rho_r) / 2.0;
        let a_avg = (a_l + a_r) / 2.0;
        let p_star = ((p_l + p_r) / 2.0 - (vn_r - vn_l) * rho_avg * a_avg).max(0.0);

        let s_l = vn_l - a_l * pressure_factor(model, p_star, p_l);
        if s_l >= 0.0 {
            return *f_left;
        }
        let s_r = vn_r + a_r * pressure_factor(model, p_star, p_r);
        if s_r <= 0.0 {
            return *f_right;
        }

        let s_m = (p_r - p_l + rho_l * vn_l * (s_l - vn_l) - rho_r * vn_r * (s_r - vn_r))
            / (rho_l * (s_l - vn_l) - rho_r * (s_r - vn_r));

        if s_m >= 0.0 {
            *f_left + (star_state(left, n, vn_l, s_l, s_m, p_star) - left.to_conserved()) * s_l
        } else {
            *f_right + (star_state(right, n, vn_r, s_r, s_m, p_star) - right.to_conserved()) * s_r
        }
    }

    fn name(&self) -> &'static str {
        "hllc"
    }
}

/// Shock correction `q_K` of the acoustic wave speed.
#[inline(always)]
fn pressure_factor(model: &PhysicalModel, p_star: f64, p: f64) -> f64 {
    if p_star <= p {
        1.0
    } else {
        let gamma = model.specific_heat_ratio();
        (1.0 + (gamma + 1.0) * (p_star / p - 1.0) / 2.0 / gamma).sqrt()
    }
}

/// Conserved star state on side `K` with wave speed `s`.
#[inline(always)]
fn star_state<const D: usize>(
    state: &Computational<D>,
    normal: &[f64; D],
    vn: f64,
    s: f64,
    s_m: f64,
    p_star: f64,
) -> Conserved<D> {
    let rho = state.density;
    let inv = 1.0 / (s - s_m);
    Conserved {
        density: rho * (s - vn) * inv,
        momentum: std::array::from_fn(|d| {
            ((s - vn) * rho * state.velocity[d] + (p_star - state.pressure) * normal[d]) * inv
        }),
        density_total_energy: ((s - vn) * rho * state.total_energy() - state.pressure * vn + p_star * s_m)
            * inv,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::normal_flux;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_supersonic_left_returns_left_flux() {
        let model = PhysicalModel::default();
        let l = Computational::<1>::from_pressure(&model, 1.0, [5.0], 1.0);
        let r = Computational::<1>::from_pressure(&model, 0.5, [4.0], 0.5);
        let ctx = FluxContext::new(&model, [1.0]);
        assert_eq!(HllcFlux.compute(&l, &r, &ctx), normal_flux(&l, &[1.0]));
    }

    #[test]
    fn test_supersonic_right_returns_right_flux() {
        let model = PhysicalModel::default();
        let l = Computational::<1>::from_pressure(&model, 1.0, [-5.0], 1.0);
        let r = Computational::<1>::from_pressure(&model, 0.5, [-4.0], 0.5);
        let ctx = FluxContext::new(&model, [1.0]);
        assert_eq!(HllcFlux.compute(&l, &r, &ctx), normal_flux(&r, &[1.0]));
    }

    #[test]
    fn test_stationary_contact_is_exact() {
        // Equal pressure, zero velocity: only a pressure flux crosses.
        let model = PhysicalModel::default();
        let l = Computational::<2>::from_pressure(&model, 1.0, [0.0, 0.0], 1.0);
        let r = Computational::<2>::from_pressure(&model, 0.1, [0.0, 0.0], 1.0);
        let ctx = FluxContext::new(&model, [1.0, 0.0]);
        let f = HllcFlux.compute(&l, &r, &ctx);
        assert_relative_eq!(f.density, 0.0, epsilon = TOL);
        assert_relative_eq!(f.momentum[0], 1.0, epsilon = TOL);
        assert_relative_eq!(f.momentum[1], 0.0, epsilon = TOL);
        assert_relative_eq!(f.density_total_energy, 0.0, epsilon = TOL);
    }

    #[test]
    fn test_star_pressure_is_clipped() {
        // Strong expansion drives the raw estimate negative.
        let model = PhysicalModel::default();
        let l = Computational::<1>::from_pressure(&model, 1.0, [-10.0], 0.1);
        let r = Computational::<1>::from_pressure(&model, 1.0, [10.0], 0.1);
        let ctx = FluxContext::new(&model, [1.0]);
        let f = HllcFlux.compute(&l, &r, &ctx);
        assert!(f.is_finite());
        assert_relative_eq!(f.density, 0.0, epsilon = TOL);
    }
}
