//! Benchmarks for the interface flux functions.
//!
//! Run with: `cargo bench --bench flux_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dg_flow::equations::PhysicalModel;
use dg_flow::flux::{ConvectiveFluxKind, FluxContext, NumericalFlux, viscous_interface_flux};
use dg_flow::solver::{Computational, PrimitiveGradient};

/// Generate left/right state pairs with rotating normals.
fn generate_test_states(model: &PhysicalModel, n: usize) -> Vec<(Computational<2>, Computational<2>, [f64; 2])> {
    (0..n)
        .map(|i| {
            let phase = i as f64 * 0.1;
            let left = Computational::from_pressure(
                model,
                1.0 + 0.2 * phase.sin(),
                [0.5 + 0.3 * phase.cos(), 0.2 - 0.1 * phase.sin()],
                1.0 + 0.1 * phase.cos(),
            );
            let right = Computational::from_pressure(
                model,
                0.8 + 0.15 * (phase + 0.5).sin(),
                [0.4 + 0.2 * (phase + 0.3).cos(), 0.3 - 0.15 * (phase + 0.2).sin()],
                0.7 + 0.1 * (phase + 0.1).sin(),
            );
            let angle = phase * 0.5;
            (left, right, [angle.cos(), angle.sin()])
        })
        .collect()
}

fn bench_convective_fluxes(c: &mut Criterion) {
    let mut group = c.benchmark_group("convective_flux");
    let model = PhysicalModel::default();
    let states = generate_test_states(&model, 1000);

    for kind in ConvectiveFluxKind::ALL {
        group.bench_function(kind.to_string(), |b| {
            b.iter(|| {
                let mut total = 0.0;
                for (left, right, normal) in &states {
                    let ctx = FluxContext::new(&model, *normal);
                    total += kind.compute(black_box(left), black_box(right), &ctx).density;
                }
                total
            });
        });
    }

    group.finish();
}

/// HLLC and Roe across increasing pressure ratios.
fn bench_pressure_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("flux_pressure_ratio");
    let model = PhysicalModel::default();
    let ctx = FluxContext::new(&model, [1.0, 0.0]);

    for ratio in [1.0, 2.0, 10.0, 100.0] {
        let left = Computational::from_pressure(&model, 1.0, [0.0, 0.0], ratio);
        let right = Computational::from_pressure(&model, 0.125, [0.0, 0.0], 1.0);
        for kind in [ConvectiveFluxKind::Hllc, ConvectiveFluxKind::Roe] {
            group.bench_with_input(BenchmarkId::new(kind.to_string(), ratio), &ratio, |b, _| {
                b.iter(|| kind.compute(black_box(&left), black_box(&right), &ctx));
            });
        }
    }

    group.finish();
}

fn bench_viscous_flux(c: &mut Criterion) {
    let model = PhysicalModel::default().with_transport(dg_flow::TransportModel::Sutherland {
        dynamic_viscosity: 1e-3,
        thermal_conductivity: 1.4e-3,
    });
    let states = generate_test_states(&model, 1000);
    let gradient = PrimitiveGradient {
        density: [0.1, -0.2],
        velocity: [[0.5, 0.1], [-0.3, 0.2]],
        temperature: [0.05, 0.01],
    };

    c.bench_function("viscous_interface_flux", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for (left, right, normal) in &states {
                let f = viscous_interface_flux(
                    &model,
                    normal,
                    (black_box(left), &gradient),
                    (black_box(right), &gradient),
                );
                total += f.density_total_energy;
            }
            total
        });
    });
}

criterion_group!(benches, bench_convective_fluxes, bench_pressure_ratio, bench_viscous_flux);
criterion_main!(benches);
