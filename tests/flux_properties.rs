//! Consistency, conservation and regression checks for the convective fluxes.

use approx::assert_relative_eq;
use dg_flow::equations::PhysicalModel;
use dg_flow::flux::{ConvectiveFluxKind, FluxContext, HllcFlux, NumericalFlux, normal_flux};
use dg_flow::solver::Computational;

const TOL: f64 = 1e-12;

fn sample_states(model: &PhysicalModel) -> Vec<Computational<2>> {
    vec![
        Computational::from_pressure(model, 1.0, [0.75, 0.0], 1.0),
        Computational::from_pressure(model, 0.125, [0.0, 0.0], 0.1),
        Computational::from_pressure(model, 1.4, [0.3, -0.8], 2.5),
        Computational::from_pressure(model, 0.5, [-1.7, 0.4], 0.4),
        Computational::from_pressure(model, 2.0, [3.0, 1.0], 1.0),
    ]
}

fn normals() -> Vec<[f64; 2]> {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    vec![[1.0, 0.0], [0.0, 1.0], [s, s], [0.6, -0.8]]
}

fn assert_conserved_eq(a: &dg_flow::Conserved<2>, b: &dg_flow::Conserved<2>, tol: f64) {
    for k in 0..4 {
        assert_relative_eq!(a[k], b[k], epsilon = tol, max_relative = tol);
    }
}

#[test]
fn test_consistency_for_every_flux() {
    let model = PhysicalModel::default();
    for kind in ConvectiveFluxKind::ALL {
        for state in sample_states(&model) {
            for n in normals() {
                let ctx = FluxContext::new(&model, n);
                let f = kind.compute(&state, &state, &ctx);
                assert_conserved_eq(&f, &normal_flux(&state, &n), TOL);
            }
        }
    }
}

#[test]
fn test_antisymmetry_for_every_flux() {
    let model = PhysicalModel::default();
    let states = sample_states(&model);
    for kind in ConvectiveFluxKind::ALL {
        for l in &states {
            for r in &states {
                for n in normals() {
                    let ctx = FluxContext::new(&model, n);
                    let forward = kind.compute(l, r, &ctx);
                    let backward = kind.compute(r, l, &ctx.flipped());
                    assert_conserved_eq(&forward, &(-backward), 1e-11);
                }
            }
        }
    }
}

#[test]
fn test_hllc_sod_interface_flux() {
    let model = PhysicalModel::ideal_gas(1.4, 25.0 / 14.0);
    let left = Computational::from_pressure(&model, 1.0, [0.75, 0.0], 1.0);
    let right = Computational::from_pressure(&model, 0.125, [0.0, 0.0], 0.1);
    let ctx = FluxContext::new(&model, [1.0, 0.0]);
    let f = HllcFlux.compute(&left, &right, &ctx);

    // Left star region: p* = 1.02282, S_L = -0.44473, S_M = 1.12987
    let expected = [0.857_291_385_955_419_6, 1.649_413_792_872_063_4, 0.0, 3.248_915_370_042_487_5];
    for (k, &e) in expected.iter().enumerate() {
        assert_relative_eq!(f[k], e, epsilon = 1e-10, max_relative = 1e-10);
    }
}

#[test]
fn test_hllc_left_wave_at_rest_returns_left_flux() {
    // a = 1 and v = 1 give S_L = 0 exactly; the right state lowers p*.
    let model = PhysicalModel::default();
    let left = Computational::from_pressure(&model, 1.4, [1.0, 0.0], 1.0);
    let right = Computational::from_pressure(&model, 1.4, [1.5, 0.2], 1.0);
    let n = [1.0, 0.0];
    let f = HllcFlux.compute(&left, &right, &FluxContext::new(&model, n));
    assert_eq!(f, normal_flux(&left, &n));
}

#[test]
fn test_hllc_right_wave_at_rest_returns_right_flux() {
    // S_R = -1 + 1 = 0 exactly.
    let model = PhysicalModel::default();
    let left = Computational::from_pressure(&model, 1.4, [-1.5, 0.0], 1.0);
    let right = Computational::from_pressure(&model, 1.4, [-1.0, 0.3], 1.0);
    let n = [1.0, 0.0];
    let f = HllcFlux.compute(&left, &right, &FluxContext::new(&model, n));
    assert_eq!(f, normal_flux(&right, &n));
}

#[test]
fn test_dissipative_fluxes_differ_from_central_across_a_jump() {
    let model = PhysicalModel::default();
    let states = sample_states(&model);
    let ctx = FluxContext::new(&model, [1.0, 0.0]);
    let central = ConvectiveFluxKind::Central.compute(&states[0], &states[1], &ctx);
    for kind in [ConvectiveFluxKind::LaxFriedrichs, ConvectiveFluxKind::Hllc, ConvectiveFluxKind::Roe] {
        let f = kind.compute(&states[0], &states[1], &ctx);
        assert!((f.density - central.density).abs() > 1e-3, "{kind} matches central");
    }
}
