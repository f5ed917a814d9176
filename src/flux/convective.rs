//! Exact normal convective flux of the Euler equations.

use crate::solver::{Computational, Conserved};

/// `F(q) · n = [ρ vₙ, ρ v vₙ + p n, (ρE + p) vₙ]`.
#[inline(always)]
pub fn normal_flux<const D: usize>(state: &Computational<D>, normal: &[f64; D]) -> Conserved<D> {
    let rho = state.density;
    let vn = state.normal_velocity(normal);
    let p = state.pressure;
    Conserved {
        density: rho * vn,
        momentum: std::array::from_fn(|d| rho * vn * state.velocity[d] + p * normal[d]),
        density_total_energy: (rho * state.total_energy() + p) * vn,
    }
}

/// Largest characteristic speed `|vₙ| + a` along `normal`.
#[inline]
pub fn spectral_radius<const D: usize>(
    model: &crate::equations::PhysicalModel,
    state: &Computational<D>,
    normal: &[f64; D],
) -> f64 {
    state.normal_velocity(normal).abs() + state.sound_speed(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::PhysicalModel;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_fluid_at_rest_carries_only_pressure() {
        let model = PhysicalModel::default();
        let state = Computational::<2>::from_pressure(&model, 1.2, [0.0, 0.0], 3.0);
        let f = normal_flux(&state, &[0.6, 0.8]);
        assert_eq!(f.density, 0.0);
        assert_relative_eq!(f.momentum[0], 1.8, epsilon = TOL);
        assert_relative_eq!(f.momentum[1], 2.4, epsilon = TOL);
        assert_eq!(f.density_total_energy, 0.0);
    }

    #[test]
    fn test_one_dimensional_flux() {
        let model = PhysicalModel::default();
        // ρ = 1, u = 2, p = 0.4 → e = 1, E = 3
        let state = Computational::<1>::from_pressure(&model, 1.0, [2.0], 0.4);
        let f = normal_flux(&state, &[1.0]);
        assert_relative_eq!(f.density, 2.0, epsilon = TOL);
        assert_relative_eq!(f.momentum[0], 4.4, epsilon = TOL);
        assert_relative_eq!(f.density_total_energy, 6.8, epsilon = TOL);
    }

    #[test]
    fn test_spectral_radius() {
        let model = PhysicalModel::default();
        let state = Computational::<1>::from_pressure(&model, 1.4, [-0.5], 1.0);
        assert_relative_eq!(spectral_radius(&model, &state, &[1.0]), 1.5, epsilon = TOL);
    }
}
