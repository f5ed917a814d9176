//! Viscous (Navier-Stokes) fluxes.

use crate::equations::PhysicalModel;
use crate::solver::{Computational, Conserved, PrimitiveGradient};

/// Viscous flux along each coordinate direction.
///
/// Row `d` holds `[0, τ_d·, (τ v)_d + k ∂_d T]` with
/// `τ = μ (∇v + ∇vᵀ) - 2/3 μ (∇·v) I`.
pub fn viscous_raw_flux<const D: usize>(
    model: &PhysicalModel,
    state: &Computational<D>,
    gradient: &PrimitiveGradient<D>,
) -> [Conserved<D>; D] {
    let temperature = model.temperature_from_internal_energy(state.internal_energy);
    let mu = model.dynamic_viscosity(temperature);
    let k = model.thermal_conductivity(temperature);
    let g = &gradient.velocity;
    let bulk = 2.0 / 3.0 * mu * gradient.divergence();

    std::array::from_fn(|d| {
        let tau: [f64; D] = std::array::from_fn(|j| {
            let mut t = mu * (g[d][j] + g[j][d]);
            if j == d {
                t -= bulk;
            }
            t
        });
        let work: f64 = (0..D).map(|j| tau[j] * state.velocity[j]).sum();
        Conserved::new(0.0, tau, work + k * gradient.temperature[d])
    })
}

/// Contract a directional flux with a normal.
#[inline]
pub fn contract_normal<const D: usize>(raw: &[Conserved<D>; D], normal: &[f64; D]) -> Conserved<D> {
    let mut out = Conserved::zero();
    for d in 0..D {
        out += raw[d] * normal[d];
    }
    out
}

/// Normal viscous flux of one state.
#[inline]
pub fn viscous_normal_flux<const D: usize>(
    model: &PhysicalModel,
    state: &Computational<D>,
    gradient: &PrimitiveGradient<D>,
    normal: &[f64; D],
) -> Conserved<D> {
    contract_normal(&viscous_raw_flux(model, state, gradient), normal)
}

/// Interface viscous flux: mean of the two one-sided normal fluxes.
#[inline]
pub fn viscous_interface_flux<const D: usize>(
    model: &PhysicalModel,
    normal: &[f64; D],
    left: (&Computational<D>, &PrimitiveGradient<D>),
    right: (&Computational<D>, &PrimitiveGradient<D>),
) -> Conserved<D> {
    (viscous_normal_flux(model, left.0, left.1, normal) + viscous_normal_flux(model, right.0, right.1, normal))
        * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::TransportModel;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-12;

    fn viscous_model() -> PhysicalModel {
        PhysicalModel::default().with_transport(TransportModel::Constant {
            dynamic_viscosity: 0.5,
            thermal_conductivity: 2.0,
        })
    }

    #[test]
    fn test_pure_shear() {
        // u = y: τ_xy = τ_yx = μ
        let model = viscous_model();
        let state = Computational::<2>::new(&model, 1.0, [1.0, 0.0], 2.0);
        let mut g = PrimitiveGradient::<2>::default();
        g.velocity[1][0] = 1.0;
        let raw = viscous_raw_flux(&model, &state, &g);
        assert_relative_eq!(raw[0].momentum[1], 0.5, epsilon = TOL);
        assert_relative_eq!(raw[1].momentum[0], 0.5, epsilon = TOL);
        assert_relative_eq!(raw[0].momentum[0], 0.0, epsilon = TOL);
        // energy along y = τ_yx u
        assert_relative_eq!(raw[1].density_total_energy, 0.5, epsilon = TOL);
        assert_eq!(raw[0].density, 0.0);
    }

    #[test]
    fn test_one_dimensional_compression_and_heat() {
        // τ = μ (2 - 2/3) ∂u/∂x
        let model = viscous_model();
        let state = Computational::<1>::new(&model, 1.0, [0.0], 2.0);
        let mut g = PrimitiveGradient::<1>::default();
        g.velocity[0][0] = 3.0;
        g.temperature[0] = 0.25;
        let f = viscous_normal_flux(&model, &state, &g, &[-1.0]);
        assert_relative_eq!(f.momentum[0], -2.0, epsilon = TOL);
        assert_relative_eq!(f.density_total_energy, -0.5, epsilon = TOL);
    }

    #[test]
    fn test_inviscid_model_has_no_viscous_flux() {
        let model = PhysicalModel::default();
        let state = Computational::<2>::new(&model, 1.0, [1.0, 2.0], 2.0);
        let mut g = PrimitiveGradient::<2>::default();
        g.velocity = [[1.0, 2.0], [3.0, 4.0]];
        g.temperature = [1.0, 1.0];
        let f = viscous_interface_flux(&model, &[1.0, 0.0], (&state, &g), (&state, &g));
        assert_eq!(f, Conserved::zero());
    }
}
