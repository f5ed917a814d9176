//! Residual assembly and time stepping benchmarks.
//!
//! Run with: `cargo bench --bench residual_bench`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dg_flow::prelude::*;
use dg_flow::time::StagedSystem;

fn vortex_solver(n: usize, order: usize, equation: EquationModel) -> DgSolver<2> {
    let model = PhysicalModel::default().with_transport(TransportModel::Constant {
        dynamic_viscosity: 1e-3,
        thermal_conductivity: 1.4e-3,
    });
    let ambient = Primitive::from_pressure(&model, 1.0, [0.5, 0.0], 1.0);
    let mesh = uniform_rectangle((-5.0, 5.0), (-5.0, 5.0), (n, n), order, ["farfield"; 4]).unwrap();
    let bcs = BoundaryConditions::new().with("farfield", BoundaryCondition::riemann_farfield(&model, ambient));
    let config = SolverConfig::default().with_equation(equation);
    let mut solver = DgSolver::new(mesh, model, &bcs, config).unwrap();

    let ic = InitialCondition::new().with_fallback(move |x: &[f64; 2]| {
        let r2 = x[0] * x[0] + x[1] * x[1];
        let s = 0.5 * (0.5 * (1.0 - r2)).exp();
        Primitive::from_pressure(&model, 1.0, [0.5 - s * x[1], s * x[0]], 1.0 - 0.1 * s * s)
    });
    solver.set_initial_condition(&ic).unwrap();
    solver
}

fn bench_residual(c: &mut Criterion) {
    let mut group = c.benchmark_group("residual_assembly");
    group.sample_size(20);

    for order in [1, 2, 3] {
        let mut euler = vortex_solver(16, order, EquationModel::Euler);
        group.bench_with_input(BenchmarkId::new("euler", order), &order, |b, _| {
            b.iter(|| euler.assemble_residual());
        });

        let mut ns = vortex_solver(16, order, EquationModel::NavierStokes);
        group.bench_with_input(BenchmarkId::new("navier_stokes", order), &order, |b, _| {
            b.iter(|| ns.assemble_residual());
        });
    }

    group.finish();
}

fn bench_time_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_step");
    group.sample_size(20);

    for n in [8, 16, 32] {
        let mut solver = vortex_solver(n, 2, EquationModel::Euler);
        group.bench_with_input(BenchmarkId::new("ssprk3_step", n * n), &n, |b, _| {
            b.iter(|| solver.step().unwrap());
        });

        let solver = vortex_solver(n, 2, EquationModel::Euler);
        group.bench_with_input(BenchmarkId::new("stable_time_step", n * n), &n, |b, _| {
            b.iter(|| solver.stable_time_step().unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_residual, bench_time_step);
criterion_main!(benches);
