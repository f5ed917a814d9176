//! Roe approximate Riemann solver for the Euler equations.
//!
//! F* = 0.5 * (F_L + F_R) - 0.5 * Σ |λ_i| α_i r_i
//!
//! over the acoustic (vₙ ∓ a), entropy and shear (vₙ) waves of the
//! Roe-averaged state. Acoustic eigenvalues use Harten's entropy fix with
//! δ = a_Roe / 20.
//!
//! Reference: Toro, "Riemann Solvers and Numerical Methods for Fluid Dynamics"

use super::traits::{FluxContext, NumericalFlux};
use crate::solver::{Computational, Conserved};

/// Divisor of the Roe sound speed giving the entropy-fix width.
pub const HARTEN_DELTA_DIVISOR: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default)]
pub struct RoeFlux;

/// Roe-averaged state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoeAverage<const D: usize> {
    pub density: f64,
    pub velocity: [f64; D],
    pub total_enthalpy: f64,
    pub sound_speed: f64,
}

impl<const D: usize> RoeAverage<D> {
    pub fn new(
        model: &crate::equations::PhysicalModel,
        left: &Computational<D>,
        right: &Computational<D>,
    ) -> Self {
        let gamma = model.specific_heat_ratio();
        let sl = left.density.sqrt();
        let sr = right.density.sqrt();
        let sum = sl + sr;

        let density = (left.density * right.density).sqrt();
        let velocity: [f64; D] = std::array::from_fn(|d| (sl * left.velocity[d] + sr * right.velocity[d]) / sum);
        let h_l = left.internal_energy * gamma + left.velocity_square_summation() / 2.0;
        let h_r = right.internal_energy * gamma + right.velocity_square_summation() / 2.0;
        let total_enthalpy = (sl * h_l + sr * h_r) / sum;

        let v2: f64 = velocity.iter().map(|v| v * v).sum();
        let internal_energy = (total_enthalpy - v2 / 2.0) / gamma;
        let pressure = model.pressure_from_density_internal_energy(density, internal_energy);
        Self {
            density,
            velocity,
            total_enthalpy,
            sound_speed: model.sound_speed_from_density_pressure(density, pressure),
        }
    }
}

/// Harten's regularized `|λ|`.
#[inline(always)]
pub fn harten_fix(lambda: f64, delta: f64) -> f64 {
    if lambda.abs() > delta {
        lambda.abs()
    } else {
        (lambda * lambda + delta * delta) / (2.0 * delta)
    }
}

impl<const D: usize> NumericalFlux<D> for RoeFlux {
    #[inline]
    fn resolve(
        &self,
        left: &Computational<D>,
        right: &Computational<D>,
        f_left: &Conserved<D>,
        f_right: &Conserved<D>,
        ctx: &FluxContext<D>,
    ) -> Conserved<D> {
        let n = &ctx.normal;
        let roe = RoeAverage::new(ctx.model, left, right);
        let (rho, a, h) = (roe.density, roe.sound_speed, roe.total_enthalpy);
        let v = &roe.velocity;
        let vn: f64 = (0..D).map(|d| v[d] * n[d]).sum();
        let v2: f64 = v.iter().map(|x| x * x).sum();

        let d_rho = right.density - left.density;
        let d_p = right.pressure - left.pressure;
        let d_v: [f64; D] = std::array::from_fn(|d| right.velocity[d] - left.velocity[d]);
        let d_vn: f64 = (0..D).map(|d| d_v[d] * n[d]).sum();

        let delta = a / HARTEN_DELTA_DIVISOR;
        let lambda_minus = harten_fix(vn - a, delta);
        let lambda_plus = harten_fix(vn + a, delta);
        let a2 = a * a;

        // acoustic -
        let alpha = lambda_minus * (d_p - rho * a * d_vn) / (2.0 * a2);
        let mut waves = Conserved::new(alpha, std::array::from_fn(|d| alpha * (v[d] - a * n[d])), alpha * (h - a * vn));

        // entropy
        let alpha = vn.abs() * (d_rho - d_p / a2);
        waves += Conserved::new(alpha, v.map(|x| alpha * x), alpha * v2 / 2.0);

        // shear
        if D >= 2 {
            let alpha = vn.abs() * rho;
            let v_dot_dv: f64 = (0..D).map(|d| v[d] * d_v[d]).sum();
            waves += Conserved::new(
                0.0,
                std::array::from_fn(|d| alpha * (d_v[d] - d_vn * n[d])),
                alpha * (v_dot_dv - vn * d_vn),
            );
        }

        // acoustic +
        let alpha = lambda_plus * (d_p + rho * a * d_vn) / (2.0 * a2);
        waves += Conserved::new(alpha, std::array::from_fn(|d| alpha * (v[d] + a * n[d])), alpha * (h + a * vn));

        (*f_left + *f_right - waves) * 0.5
    }

    fn name(&self) -> &'static str {
        "roe"
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
    fn test_roe_average_of_equal_states() {
        let model = PhysicalModel::default();
        let s = Computational::<2>::from_pressure(&model, 1.4, [0.5, 0.25], 1.0);
        let roe = RoeAverage::new(&model, &s, &s);
        assert_relative_eq!(roe.density, 1.4, epsilon = TOL);
        assert_relative_eq!(roe.velocity[1], 0.25, epsilon = TOL);
        assert_relative_eq!(roe.sound_speed, 1.0, epsilon = TOL);
    }

    #[test]
    fn test_harten_fix_smooths_small_eigenvalues() {
        assert_eq!(harten_fix(-2.0, 0.1), 2.0);
        assert_relative_eq!(harten_fix(0.0, 0.1), 0.05, epsilon = TOL);
        // continuous at |λ| = δ
        assert_relative_eq!(harten_fix(0.1, 0.1), 0.1, epsilon = TOL);
    }

    #[test]
    fn test_consistency() {
        let model = PhysicalModel::default();
        let s = Computational::<2>::from_pressure(&model, 0.9, [0.3, -0.7], 0.8);
        let n = [0.6, -0.8];
        let f = RoeFlux.compute(&s, &s, &FluxContext::new(&model, n));
        let exact = normal_flux(&s, &n);
        for k in 0..4 {
            assert_relative_eq!(f[k], exact[k], epsilon = TOL);
        }
    }

    #[test]
    fn test_sonic_acoustic_wave_uses_smoothed_eigenvalue() {
        // Weak ∓ acoustic wave about ρ = 1.4, p = 1, a = 1 with vₙ = ±a, so the
        // exact eigenvalue vanishes and only the entropy fix dissipates.
        let model = PhysicalModel::default();
        let eps = 1e-5;
        let delta = 1.0 / HARTEN_DELTA_DIVISOR;
        for sign in [1.0, -1.0] {
            let l = Computational::<1>::from_pressure(&model, 1.4, [sign], 1.0);
            let r = Computational::<1>::from_pressure(&model, 1.4 + eps, [sign - sign * eps / 1.4], 1.0 + eps);
            let roe = RoeAverage::new(&model, &l, &r);
            assert!((roe.velocity[0] - sign * roe.sound_speed).abs() < delta);

            let n = [1.0];
            let f = RoeFlux.compute(&l, &r, &FluxContext::new(&model, n));
            let central = (normal_flux(&l, &n) + normal_flux(&r, &n)) * 0.5;
            // Wave strength is eps, so the density dissipation is λ̃ eps / 2.
            let smoothed = (central.density - f.density) * 2.0 / eps;
            assert_relative_eq!(smoothed, delta / 2.0, max_relative = 1e-2);
        }
    }

    #[test]
    fn test_shear_wave_only_in_multi_d() {
        // Pure tangential velocity jump across a stationary interface.
        let model = PhysicalModel::default();
        let l = Computational::<2>::from_pressure(&model, 1.0, [0.0, 1.0], 1.0);
        let r = Computational::<2>::from_pressure(&model, 1.0, [0.0, -1.0], 1.0);
        let f = RoeFlux.compute(&l, &r, &FluxContext::new(&model, [1.0, 0.0]));
        assert_relative_eq!(f.density, 0.0, epsilon = TOL);
        assert_relative_eq!(f.momentum[0], 1.0, epsilon = TOL);
        // vₙ = 0 so the shear wave carries no dissipation
        assert_relative_eq!(f.momentum[1], 0.0, epsilon = TOL);
    }
}
