//! Two-phase residual assembly.
//!
//! # Gradient phase (Navier-Stokes only)
//!
//! Per face and quadrature point the central value `U* = (U_L + U_R)/2` and
//! the half jump `(U_R - U_L)/2` are stored once (boundary faces take them
//! from the boundary condition). Each element then gathers
//!
//! ```text
//! G_vol = ( Σ_faces φ (n ⊗ U*) |J_f| w  -  Σ_q U ⊗ ∇φ |J| w ) M⁻¹
//! L_f   = ( Σ_{q ∈ f} φ (n ⊗ jump) |J_f| w ) M⁻¹
//! ```
//!
//! with `n` the element's outward normal for `U*` and the face's left
//! normal for the jump. The element gradient is `G_vol + Σ_f L_f`.
//!
//! # Flux phase
//!
//! Interface fluxes are resolved once per face point from the left side and
//! stored in a per-face buffer. Each element then gathers
//!
//! ```text
//! R = Σ_q (F_c - F_v) · ∇φ |J| w  -  Σ_faces ± F̂ φ |J_f| w
//! ```
//!
//! where the owner takes `+F̂` and the neighbour `-F̂`, so the two
//! contributions of an interior face cancel exactly.

use faer::linalg::matmul::matmul;
use faer::{Accum, Par};

use super::config::{BoundaryFluxMode, SolverConfig, ViscousFluxKind};
use super::element::{ElementState, add_gradients, evaluate, evaluate_gradient, set_zero};
use super::state::{Conserved, ConservedGradient, PrimitiveGradient};
use crate::boundary::{
    BCContext, BoundaryCondition, BoundaryConditions, FlowBoundaryCondition, GradientState,
};
use crate::equations::PhysicalModel;
use crate::error::Result;
use crate::flux::{FluxContext, NumericalFlux, normal_flux, viscous_interface_flux, viscous_raw_flux};
use crate::mesh::{ElementFace, Face, FaceKind, Mesh, Side};
use crate::types::FaceIndex;

/// What lies on the far side of a face, resolved once at setup.
#[derive(Clone, Copy, Debug)]
pub(crate) enum FaceCoupling<const D: usize> {
    Interior { right: ElementFace },
    Boundary(BoundaryCondition<D>),
}

/// Read-only view of everything the residual depends on besides the
/// coefficients.
pub(crate) struct Assembler<'a, const D: usize> {
    pub mesh: &'a Mesh<D>,
    pub model: &'a PhysicalModel,
    pub config: &'a SolverConfig,
    pub couplings: &'a [FaceCoupling<D>],
}

impl<const D: usize> Assembler<'_, D> {
    // =========================================================================
    // Gradient phase
    // =========================================================================

    /// Central value and half jump at every point of face `f`.
    pub fn face_gradient_states(&self, f: usize, elements: &[ElementState], out: &mut [GradientState<D>]) {
        let reference = self.mesh.reference();
        let face = &self.mesh.faces()[f];
        let left = &elements[face.left.element];
        let left_face = reference.face(face.left.face);

        match &self.couplings[f] {
            FaceCoupling::Interior { right } => {
                let right_el = &elements[right.element];
                let right_face = reference.face(right.face);
                for (qf, slot) in out.iter_mut().enumerate() {
                    let l: Conserved<D> = evaluate(&left.coefficients[1], left_face.values_at(qf));
                    let r: Conserved<D> = evaluate(
                        &right_el.coefficients[1],
                        right_face.values_at(face.sequence(Side::Right, qf)),
                    );
                    *slot = GradientState {
                        volume: (l + r) * 0.5,
                        jump: (r - l) * 0.5,
                    };
                }
            }
            FaceCoupling::Boundary(bc) => {
                for (qf, slot) in out.iter_mut().enumerate() {
                    let l: Conserved<D> = evaluate(&left.coefficients[1], left_face.values_at(qf));
                    let ctx = BCContext::new(self.model, face.normal, l.to_computational(self.model));
                    *slot = bc.gradient_state(&ctx);
                }
            }
        }
    }

    /// Gather volume gradient and liftings of element `k`.
    pub fn element_gradient(&self, k: usize, element: &mut ElementState, face_states: &[Vec<GradientState<D>>]) {
        let reference = self.mesh.reference();
        let geometry = &self.mesh.elements()[k];
        let n_basis = reference.n_basis();
        let n_vars = D + 2;

        let ElementState {
            coefficients,
            inverse_mass,
            volume_gradient,
            liftings,
            gradient,
            gradient_residual,
            lifting_residuals,
            ..
        } = element;

        set_zero(gradient_residual);
        for r in lifting_residuals.iter_mut() {
            set_zero(r);
        }

        // -Σ_q U ⊗ ∇φ |J| w
        for (q, &detw) in geometry.detw.iter().enumerate() {
            let u: Conserved<D> = evaluate(&coefficients[1], reference.values_at(q));
            for b in 0..n_basis {
                let grad_phi = geometry.physical_gradient(&reference.gradient(q, b));
                for var in 0..n_vars {
                    let uw = u[var] * detw;
                    for d in 0..D {
                        gradient_residual[(var * D + d, b)] -= uw * grad_phi[d];
                    }
                }
            }
        }

        for (slot, &(f, side)) in geometry.faces.iter().enumerate() {
            let face = self.mesh.face(f);
            let sign = side_sign(side);
            let reference_face = reference.face(slot);
            let lifting_residual = &mut lifting_residuals[slot];
            for (qf, state) in face_states[f].iter().enumerate() {
                let phi = reference_face.values_at(face.sequence(side, qf));
                let detw = face.detw[qf];
                for (b, &p) in phi.iter().enumerate() {
                    let w = p * detw;
                    for var in 0..n_vars {
                        for d in 0..D {
                            let n = face.normal[d] * w;
                            gradient_residual[(var * D + d, b)] += sign * n * state.volume[var];
                            lifting_residual[(var * D + d, b)] += n * state.jump[var];
                        }
                    }
                }
            }
        }

        matmul(
            volume_gradient.as_mut(),
            Accum::Replace,
            gradient_residual.as_ref(),
            inverse_mass.as_ref(),
            1.0,
            Par::Seq,
        );
        gradient.clone_from(volume_gradient);
        for (lifting, residual) in liftings.iter_mut().zip(lifting_residuals.iter()) {
            matmul(
                lifting.as_mut(),
                Accum::Replace,
                residual.as_ref(),
                inverse_mass.as_ref(),
                1.0,
                Par::Seq,
            );
            matmul(
                gradient.as_mut(),
                Accum::Add,
                residual.as_ref(),
                inverse_mass.as_ref(),
                1.0,
                Par::Seq,
            );
        }
    }

    // =========================================================================
    // Flux phase
    // =========================================================================

    /// Conserved gradient seen from local face `slot`.
    #[inline]
    fn trace_gradient(&self, element: &ElementState, slot: usize, phi: &[f64]) -> ConservedGradient<D> {
        match self.config.viscous_flux {
            ViscousFluxKind::BR1 => evaluate_gradient(&element.gradient, phi),
            ViscousFluxKind::BR2 => add_gradients(
                &evaluate_gradient(&element.volume_gradient, phi),
                &evaluate_gradient(&element.liftings[slot], phi),
            ),
        }
    }

    /// `(F̂_c - F̂_v) |J_f| w` at every point of face `f`, seen from the left.
    pub fn face_fluxes(&self, f: usize, elements: &[ElementState], out: &mut [Conserved<D>]) {
        let model = self.model;
        let reference = self.mesh.reference();
        let face: &Face<D> = &self.mesh.faces()[f];
        let normal = face.normal;
        let ctx = FluxContext::new(model, normal);
        let viscous = self.config.equation.is_viscous();
        let flux = &self.config.convective_flux;

        let left = &elements[face.left.element];
        let left_slot = face.left.face;
        let left_face = reference.face(left_slot);

        for (qf, slot) in out.iter_mut().enumerate() {
            let phi_l = left_face.values_at(qf);
            let l = evaluate::<D>(&left.coefficients[1], phi_l).to_computational(model);

            let total = match &self.couplings[f] {
                FaceCoupling::Interior { right } => {
                    let right_el = &elements[right.element];
                    let phi_r = reference.face(right.face).values_at(face.sequence(Side::Right, qf));
                    let r = evaluate::<D>(&right_el.coefficients[1], phi_r).to_computational(model);
                    let mut total = flux.compute(&l, &r, &ctx);
                    if viscous {
                        let gl = PrimitiveGradient::from_conserved(
                            model,
                            &l,
                            &self.trace_gradient(left, left_slot, phi_l),
                        );
                        let gr = PrimitiveGradient::from_conserved(
                            model,
                            &r,
                            &self.trace_gradient(right_el, right.face, phi_r),
                        );
                        total = total - viscous_interface_flux(model, &normal, (&l, &gl), (&r, &gr));
                    }
                    total
                }
                FaceCoupling::Boundary(bc) => {
                    let b = bc.boundary_state(&BCContext::new(model, normal, l));
                    let mut total = match self.config.boundary_flux {
                        BoundaryFluxMode::NumericalFlux => flux.compute(&l, &b, &ctx),
                        BoundaryFluxMode::BoundaryState => normal_flux(&b, &normal),
                    };
                    if viscous {
                        let gl = PrimitiveGradient::from_conserved(
                            model,
                            &l,
                            &self.trace_gradient(left, left_slot, phi_l),
                        );
                        let mut l_viscous = l;
                        let gb = bc.viscous_states(&mut l_viscous, &b, &gl);
                        total = total - viscous_interface_flux(model, &normal, (&l_viscous, &gl), (&b, &gb));
                    }
                    total
                }
            };
            *slot = total * face.detw[qf];
        }
    }

    /// Gather the residual of element `k`.
    pub fn element_residual(&self, k: usize, element: &mut ElementState, face_fluxes: &[Vec<Conserved<D>>]) {
        let model = self.model;
        let reference = self.mesh.reference();
        let geometry = &self.mesh.elements()[k];
        let n_basis = reference.n_basis();
        let n_vars = D + 2;
        let viscous = self.config.equation.is_viscous();
        let axes: [[f64; D]; D] = std::array::from_fn(|d| std::array::from_fn(|j| if j == d { 1.0 } else { 0.0 }));

        let residual = &mut element.residual;
        set_zero(residual);

        for (q, &detw) in geometry.detw.iter().enumerate() {
            let phi = reference.values_at(q);
            let state = evaluate::<D>(&element.coefficients[1], phi).to_computational(model);
            let mut fluxes: [Conserved<D>; D] = std::array::from_fn(|d| normal_flux(&state, &axes[d]));
            if viscous {
                let gradient =
                    PrimitiveGradient::from_conserved(model, &state, &evaluate_gradient(&element.gradient, phi));
                let viscous_flux = viscous_raw_flux(model, &state, &gradient);
                for d in 0..D {
                    fluxes[d] = fluxes[d] - viscous_flux[d];
                }
            }
            for b in 0..n_basis {
                let grad_phi = geometry.physical_gradient(&reference.gradient(q, b));
                for var in 0..n_vars {
                    let divergence: f64 = (0..D).map(|d| fluxes[d][var] * grad_phi[d]).sum();
                    residual[(var, b)] += divergence * detw;
                }
            }
        }

        for (slot, &(f, side)) in geometry.faces.iter().enumerate() {
            let face = self.mesh.face(f);
            let sign = side_sign(side);
            let reference_face = reference.face(slot);
            for (qf, flux) in face_fluxes[f].iter().enumerate() {
                let phi = reference_face.values_at(face.sequence(side, qf));
                for (b, &p) in phi.iter().enumerate() {
                    for var in 0..n_vars {
                        residual[(var, b)] -= sign * flux[var] * p;
                    }
                }
            }
        }
    }
}

#[inline(always)]
fn side_sign(side: Side) -> f64 {
    match side {
        Side::Left => 1.0,
        Side::Right => -1.0,
    }
}

/// Resolve the condition of every boundary face.
pub(crate) fn resolve_couplings<const D: usize>(
    mesh: &Mesh<D>,
    boundary_conditions: &BoundaryConditions<D>,
) -> Result<Vec<FaceCoupling<D>>> {
    mesh.faces()
        .iter()
        .map(|face| match &face.kind {
            FaceKind::Interior { right, .. } => Ok(FaceCoupling::Interior { right: *right }),
            FaceKind::Boundary { surface } => {
                boundary_conditions.get(surface).map(|bc| FaceCoupling::Boundary(*bc))
            }
        })
        .collect()
}

/// Number of quadrature points of every face.
pub(crate) fn face_point_counts<const D: usize>(mesh: &Mesh<D>) -> Vec<usize> {
    (0..mesh.n_faces())
        .map(|f| mesh.face(FaceIndex::new(f)).n_points())
        .collect()
}
