//! Discontinuous Galerkin solver for compressible flow.

use faer::linalg::matmul::matmul;
use faer::{Accum, Mat, Par};
use log::{info, warn};

use super::assembly::{Assembler, FaceCoupling, face_point_counts, resolve_couplings};
use super::config::SolverConfig;
use super::element::{ElementState, evaluate};
use super::initial::InitialCondition;
use super::parallel::{for_each_mut, map_collect};
use super::state::Conserved;
use crate::boundary::{BoundaryConditions, GradientState};
use crate::equations::PhysicalModel;
use crate::error::{DgError, Result};
use crate::mesh::Mesh;
use crate::operators::{inverse_mass_matrix, mass_matrix};
use crate::time::{StageCoefficients, StagedSystem, check_time_step, local_time_step};
use crate::types::ElementIndex;

/// Slack on the reference cell bounds when locating a point.
const LOCATE_TOL: f64 = 1e-12;

/// Modal DG discretisation of the Euler or Navier-Stokes equations.
///
/// The solver owns the mesh and one [`ElementState`] per element. Each
/// stage assembles the residual in two fork-join phases (gradients, then
/// fluxes); interface values are resolved once per face into a per-face
/// buffer, and elements gather from those buffers, so no two tasks ever
/// write the same memory.
///
/// # Example
///
/// ```
/// use dg_flow::boundary::{BoundaryCondition, BoundaryConditions};
/// use dg_flow::equations::PhysicalModel;
/// use dg_flow::mesh::uniform_line;
/// use dg_flow::solver::{DgSolver, InitialCondition, Primitive, SolverConfig};
///
/// let model = PhysicalModel::default();
/// let mesh = uniform_line((0.0, 1.0), 8, 2, ["wall", "wall"]).unwrap();
/// let bcs = BoundaryConditions::new().with("wall", BoundaryCondition::adiabatic_slip_wall());
/// let mut solver = DgSolver::new(mesh, model, &bcs, SolverConfig::default()).unwrap();
/// solver
///     .set_initial_condition(&InitialCondition::uniform(Primitive::from_pressure(&model, 1.0, [0.0], 1.0)))
///     .unwrap();
/// let dt = solver.step().unwrap();
/// assert!(dt > 0.0);
/// ```
#[derive(Debug)]
pub struct DgSolver<const D: usize> {
    mesh: Mesh<D>,
    model: PhysicalModel,
    config: SolverConfig,
    couplings: Vec<FaceCoupling<D>>,
    elements: Vec<ElementState>,
    face_gradients: Vec<Vec<GradientState<D>>>,
    face_fluxes: Vec<Vec<Conserved<D>>>,
    time: f64,
    iteration: usize,
}

impl<const D: usize> DgSolver<D> {
    /// Set up the solver.
    ///
    /// Fails if the configuration or physical model is invalid, if a
    /// boundary surface of the mesh has no condition, or if a local mass
    /// matrix is singular.
    pub fn new(
        mesh: Mesh<D>,
        model: PhysicalModel,
        boundary_conditions: &BoundaryConditions<D>,
        config: SolverConfig,
    ) -> Result<Self> {
        config.validate()?;
        model.validate()?;
        if mesh.n_elements() == 0 {
            return Err(DgError::InvalidConfig("mesh has no elements".into()));
        }
        let viscous = config.equation.is_viscous();
        if viscous && !model.transport.is_viscous() {
            warn!("Navier-Stokes selected with zero transport coefficients");
        }

        boundary_conditions.validate(&mesh)?;
        let couplings = resolve_couplings(&mesh, boundary_conditions)?;

        let reference = mesh.reference();
        let (n_basis, n_faces) = (reference.n_basis(), reference.n_faces());
        let elements = mesh
            .elements()
            .iter()
            .map(|geometry| {
                let inverse_mass = inverse_mass_matrix(&mass_matrix(reference, geometry))?;
                Ok(ElementState::new(D + 2, D, n_basis, n_faces, inverse_mass, viscous))
            })
            .collect::<Result<Vec<_>>>()?;

        let counts = face_point_counts(&mesh);
        let face_gradients = if viscous {
            counts.iter().map(|&n| vec![GradientState::default(); n]).collect()
        } else {
            Vec::new()
        };
        let face_fluxes = counts.iter().map(|&n| vec![Conserved::zero(); n]).collect();

        info!(
            "DG solver: {} elements, {} faces, {} basis functions, {}",
            mesh.n_elements(),
            mesh.n_faces(),
            n_basis,
            config.summary()
        );

        Ok(Self {
            mesh,
            model,
            config,
            couplings,
            elements,
            face_gradients,
            face_fluxes,
            time: 0.0,
            iteration: 0,
        })
    }

    // =========================================================================
    // Initial state
    // =========================================================================

    /// L2-project `initial` onto every element and reset the clock.
    pub fn set_initial_condition(&mut self, initial: &InitialCondition<D>) -> Result<()> {
        let model = &self.model;
        let reference = self.mesh.reference();
        let n_basis = reference.n_basis();

        for (geometry, element) in self.mesh.elements().iter().zip(self.elements.iter_mut()) {
            let state = initial.get(&geometry.region)?;
            // rhs[k, b] = Σ_q U_k(x_q) φ_b(x_q) |J| w_q
            let mut rhs = Mat::<f64>::zeros(D + 2, n_basis);
            for (q, (x, &detw)) in geometry.points.iter().zip(geometry.detw.iter()).enumerate() {
                let u = state(x).to_conserved(model);
                for (b, &p) in reference.values_at(q).iter().enumerate() {
                    for k in 0..D + 2 {
                        rhs[(k, b)] += u[k] * p * detw;
                    }
                }
            }
            let [snapshot, working] = &mut element.coefficients;
            matmul(
                working.as_mut(),
                Accum::Replace,
                rhs.as_ref(),
                element.inverse_mass.as_ref(),
                1.0,
                Par::Seq,
            );
            snapshot.clone_from(working);
        }
        self.time = 0.0;
        self.iteration = 0;
        Ok(())
    }

    /// Overwrite the working coefficients of element `k`.
    pub fn set_coefficients(&mut self, k: ElementIndex, coefficients: Mat<f64>) -> Result<()> {
        let n_basis = self.mesh.reference().n_basis();
        if coefficients.nrows() != D + 2 {
            return Err(DgError::dimension_mismatch(D + 2, coefficients.nrows()));
        }
        if coefficients.ncols() != n_basis {
            return Err(DgError::dimension_mismatch(n_basis, coefficients.ncols()));
        }
        let element = self
            .elements
            .get_mut(k.get())
            .ok_or_else(|| DgError::dimension_mismatch(self.mesh.n_elements(), k.get() + 1))?;
        element.coefficients[0].clone_from(&coefficients);
        element.coefficients[1] = coefficients;
        Ok(())
    }

    // =========================================================================
    // Time stepping
    // =========================================================================

    /// CFL-limited time step with the configured CFL number.
    pub fn stable_time_step(&self) -> Result<f64> {
        self.time_step_for(self.config.cfl)
    }

    /// Minimum over all volume quadrature points of
    /// `CFL · h_min / ((|v| + a)(p + 1)²)`.
    ///
    /// A NaN anywhere in the state yields [`DgError::InvalidTimeStep`].
    pub fn time_step_for(&self, cfl: f64) -> Result<f64> {
        let model = &self.model;
        let reference = self.mesh.reference();
        let order = self.mesh.order();
        let geometries = self.mesh.elements();

        let local = map_collect(&self.elements, |k, element| {
            let h_min = geometries[k].h_min;
            (0..reference.n_quadrature())
                .map(|q| {
                    let state = evaluate::<D>(&element.coefficients[1], reference.values_at(q)).to_computational(model);
                    let radius = state.velocity_square_summation().sqrt() + state.sound_speed(model);
                    local_time_step(cfl, h_min, radius, order)
                })
                .fold(f64::INFINITY, nan_min)
        });
        check_time_step(local.into_iter().fold(f64::INFINITY, nan_min))
    }

    /// Advance one step with the stable time step; returns the step used.
    pub fn step(&mut self) -> Result<f64> {
        let dt = self.stable_time_step()?;
        self.step_with(dt)
    }

    /// Advance one step with a prescribed time step.
    pub fn step_with(&mut self, dt: f64) -> Result<f64> {
        let integrator = self.config.time_integration;
        integrator.step(self, dt)?;
        self.time += dt;
        self.iteration += 1;
        Ok(dt)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Mean absolute residual per conserved variable.
    ///
    /// Averaged over the volume quadrature points of each element, then over
    /// elements. Uses the residual of the last assembled stage.
    pub fn relative_error(&self) -> Vec<f64> {
        let reference = self.mesh.reference();
        let n_q = reference.n_quadrature() as f64;

        let per_element = map_collect(&self.elements, |_, element| {
            let mut sum = Conserved::<D>::zero();
            for q in 0..reference.n_quadrature() {
                sum += evaluate::<D>(&element.residual, reference.values_at(q)).map(f64::abs);
            }
            sum * (1.0 / n_q)
        });

        let n_elements = per_element.len() as f64;
        let total = per_element.into_iter().fold(Conserved::<D>::zero(), |acc, e| acc + e);
        (0..D + 2).map(|k| total[k] / n_elements).collect()
    }

    /// `∫ U dx` over the whole mesh.
    pub fn integral(&self) -> Conserved<D> {
        let reference = self.mesh.reference();
        self.mesh
            .elements()
            .iter()
            .zip(self.elements.iter())
            .fold(Conserved::zero(), |acc, (geometry, element)| {
                geometry.detw.iter().enumerate().fold(acc, |acc, (q, &detw)| {
                    acc + evaluate::<D>(&element.coefficients[1], reference.values_at(q)) * detw
                })
            })
    }

    /// Conserved state at physical point `x`, or `None` outside the mesh.
    pub fn evaluate_at(&self, x: &[f64; D]) -> Option<Conserved<D>> {
        let reference = self.mesh.reference();
        self.mesh
            .elements()
            .iter()
            .zip(self.elements.iter())
            .find_map(|(geometry, element)| {
                let xi = geometry.to_reference(x);
                xi.iter()
                    .all(|c| c.abs() <= 1.0 + LOCATE_TOL)
                    .then(|| evaluate::<D>(&element.coefficients[1], &reference.evaluate(&xi)))
            })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn mesh(&self) -> &Mesh<D> {
        &self.mesh
    }

    pub fn model(&self) -> &PhysicalModel {
        &self.model
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn elements(&self) -> &[ElementState] {
        &self.elements
    }

    pub fn element(&self, k: ElementIndex) -> &ElementState {
        &self.elements[k]
    }

    /// Simulated time since the initial condition.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Completed steps since the initial condition.
    pub fn iteration(&self) -> usize {
        self.iteration
    }
}

impl<const D: usize> StagedSystem for DgSolver<D> {
    fn snapshot(&mut self) {
        for_each_mut(&mut self.elements, |_, element| {
            let [snapshot, working] = &mut element.coefficients;
            snapshot.clone_from(working);
        });
    }

    fn assemble_residual(&mut self) {
        let assembler = Assembler {
            mesh: &self.mesh,
            model: &self.model,
            config: &self.config,
            couplings: &self.couplings,
        };

        if self.config.equation.is_viscous() {
            let elements = &self.elements;
            for_each_mut(&mut self.face_gradients, |f, out| {
                assembler.face_gradient_states(f, elements, out)
            });
            let face_gradients = &self.face_gradients;
            for_each_mut(&mut self.elements, |k, element| {
                assembler.element_gradient(k, element, face_gradients)
            });
        }

        let elements = &self.elements;
        for_each_mut(&mut self.face_fluxes, |f, out| assembler.face_fluxes(f, elements, out));
        let face_fluxes = &self.face_fluxes;
        for_each_mut(&mut self.elements, |k, element| {
            assembler.element_residual(k, element, face_fluxes)
        });
    }

    fn blend(&mut self, stage: &StageCoefficients, dt: f64) {
        for_each_mut(&mut self.elements, |_, element| {
            let ElementState {
                coefficients: [snapshot, working],
                residual,
                inverse_mass,
                ..
            } = element;
            for j in 0..working.ncols() {
                for i in 0..working.nrows() {
                    working[(i, j)] = stage.blend(working[(i, j)], snapshot[(i, j)], 0.0);
                }
            }
            matmul(
                working.as_mut(),
                Accum::Add,
                residual.as_ref(),
                inverse_mass.as_ref(),
                stage.residual * dt,
                Par::Seq,
            );
        });
    }
}

/// `min` that propagates NaN.
#[inline]
fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryCondition;
    use crate::mesh::{uniform_line, uniform_rectangle};
    use crate::solver::{EquationModel, Primitive};
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-12;

    fn farfield_line(order: usize, state: Primitive<1>) -> DgSolver<1> {
        let model = PhysicalModel::default();
        let mesh = uniform_line((0.0, 1.0), 6, order, ["inlet", "outlet"]).unwrap();
        let bc = BoundaryCondition::riemann_farfield(&model, state);
        let bcs = BoundaryConditions::new().with("inlet", bc).with("outlet", bc);
        let mut solver = DgSolver::new(mesh, model, &bcs, SolverConfig::default()).unwrap();
        solver.set_initial_condition(&InitialCondition::uniform(state)).unwrap();
        solver
    }

    #[test]
    fn test_missing_boundary_condition() {
        let mesh = uniform_line((0.0, 1.0), 4, 1, ["inlet", "outlet"]).unwrap();
        let bcs = BoundaryConditions::new().with("inlet", BoundaryCondition::adiabatic_slip_wall());
        let err = DgSolver::new(mesh, PhysicalModel::default(), &bcs, SolverConfig::default()).unwrap_err();
        assert_eq!(err, DgError::boundary_not_found("outlet"));
    }

    #[test]
    fn test_invalid_cfl_rejected_at_setup() {
        let mesh = uniform_line((0.0, 1.0), 4, 1, ["wall", "wall"]).unwrap();
        let bcs = BoundaryConditions::new().with("wall", BoundaryCondition::adiabatic_slip_wall());
        let config = SolverConfig::default().with_cfl(-1.0);
        assert!(DgSolver::new(mesh, PhysicalModel::default(), &bcs, config).is_err());
    }

    #[test]
    fn test_uniform_flow_has_zero_residual() {
        let model = PhysicalModel::default();
        let state = Primitive::from_pressure(&model, 1.2, [0.4], 1.0);
        let mut solver = farfield_line(2, state);
        solver.assemble_residual();
        for error in solver.relative_error() {
            assert!(error < 1e-11, "residual {error}");
        }
    }

    #[test]
    fn test_projection_reproduces_linear_field() {
        let model = PhysicalModel::default();
        let state = Primitive::from_pressure(&model, 1.0, [0.0], 1.0);
        let mut solver = farfield_line(1, state);
        let ic = InitialCondition::new().with_fallback(move |x: &[f64; 1]| {
            Primitive::from_pressure(&model, 1.0 + x[0], [0.0], 1.0)
        });
        solver.set_initial_condition(&ic).unwrap();
        let u = solver.evaluate_at(&[0.37]).unwrap();
        assert_relative_eq!(u.density, 1.37, epsilon = TOL);
        assert!(solver.evaluate_at(&[1.5]).is_none());
        assert_relative_eq!(solver.integral().density, 1.5, epsilon = TOL);
    }

    #[test]
    fn test_stable_time_step_formula() {
        let model = PhysicalModel::default();
        let state = Primitive::from_pressure(&model, 1.4, [0.5], 1.0);
        let solver = farfield_line(2, state);
        // a = 1 for ρ = 1.4, p = 1, γ = 1.4
        let expected = 0.5 * (1.0 / 6.0) / (1.5 * 9.0);
        assert_relative_eq!(solver.stable_time_step().unwrap(), expected, epsilon = TOL);
        assert_relative_eq!(solver.time_step_for(0.25).unwrap(), expected / 2.0, epsilon = TOL);
    }

    #[test]
    fn test_nan_state_gives_invalid_time_step() {
        let model = PhysicalModel::default();
        let mut solver = farfield_line(1, Primitive::from_pressure(&model, 1.0, [0.0], 1.0));
        let mut c = solver.element(ElementIndex::new(2)).coefficients().clone();
        c[(0, 0)] = f64::NAN;
        solver.set_coefficients(ElementIndex::new(2), c).unwrap();
        assert!(matches!(solver.step(), Err(DgError::InvalidTimeStep { .. })));
        assert_eq!(solver.iteration(), 0);
    }

    #[test]
    fn test_set_coefficients_checks_shape() {
        let model = PhysicalModel::default();
        let mut solver = farfield_line(1, Primitive::from_pressure(&model, 1.0, [0.0], 1.0));
        let err = solver.set_coefficients(ElementIndex::new(0), Mat::zeros(2, 2)).unwrap_err();
        assert_eq!(err, DgError::dimension_mismatch(3, 2));
    }

    #[test]
    fn test_step_advances_clock() {
        let model = PhysicalModel::default();
        let state = Primitive::from_pressure(&model, 1.0, [0.2], 1.0);
        let mut solver = farfield_line(1, state);
        let dt = solver.step().unwrap();
        let dt2 = solver.step().unwrap();
        assert_eq!(solver.iteration(), 2);
        assert_relative_eq!(solver.time(), dt + dt2, epsilon = TOL);
        assert_relative_eq!(solver.evaluate_at(&[0.5]).unwrap().density, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_navier_stokes_uniform_rest_state() {
        let model = PhysicalModel::default()
            .with_transport(crate::equations::TransportModel::Constant {
                dynamic_viscosity: 1e-2,
                thermal_conductivity: 1e-2,
            });
        let mesh = uniform_rectangle((0.0, 1.0), (0.0, 1.0), (3, 3), 1, ["wall"; 4]).unwrap();
        let bcs = BoundaryConditions::new().with("wall", BoundaryCondition::adiabatic_no_slip_wall());
        let config = SolverConfig::default().with_equation(EquationModel::NavierStokes);
        let mut solver = DgSolver::new(mesh, model, &bcs, config).unwrap();
        let state = Primitive::from_pressure(&model, 1.0, [0.0, 0.0], 1.0);
        solver.set_initial_condition(&InitialCondition::uniform(state)).unwrap();
        solver.step().unwrap();
        let u = solver.evaluate_at(&[0.5, 0.5]).unwrap();
        assert_relative_eq!(u.density, 1.0, epsilon = 1e-10);
        assert!(u.momentum.iter().all(|m| m.abs() < 1e-10));
        assert_eq!(solver.element(ElementIndex::new(0)).gradient().nrows(), 8);
    }
}
