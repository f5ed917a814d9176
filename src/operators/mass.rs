//! Local mass matrix of a modal element.
//!
//! M_ab = Σ_q φ_a(ξ_q) φ_b(ξ_q) |J| w_q
//!
//! With an orthonormal basis and an affine map this is `|J| I`, but the
//! matrix is assembled from quadrature so that any tabulated basis works.

use faer::{Mat, linalg::solvers::Solve};

use crate::basis::ReferenceElement;
use crate::error::{DgError, Result};
use crate::mesh::ElementGeometry;

/// Largest accepted deviation of `M M⁻¹` from the identity.
const SINGULAR_TOL: f64 = 1e-8;

/// Assemble the local mass matrix of one element.
pub fn mass_matrix<const D: usize>(
    reference: &ReferenceElement<D>,
    element: &ElementGeometry<D>,
) -> Mat<f64> {
    let n = reference.n_basis();
    let mut m = Mat::zeros(n, n);
    for (q, &detw) in element.detw.iter().enumerate() {
        let phi = reference.values_at(q);
        for a in 0..n {
            for b in 0..n {
                m[(a, b)] += phi[a] * phi[b] * detw;
            }
        }
    }
    m
}

/// Invert a local mass matrix via LU decomposition.
///
/// Returns [`DgError::Singular`] if the inverse is not finite or does not
/// reproduce the identity.
pub fn inverse_mass_matrix(m: &Mat<f64>) -> Result<Mat<f64>> {
    let n = m.nrows();
    let lu = m.as_ref().full_piv_lu();

    let identity = Mat::<f64>::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 });
    let inverse = lu.solve(&identity);

    // A zero pivot shows up either as non-finite entries or as a bad product.
    let mut residual = 0.0_f64;
    for i in 0..n {
        for j in 0..n {
            let dot: f64 = (0..n).map(|k| m[(i, k)] * inverse[(k, j)]).sum();
            let expected = if i == j { 1.0 } else { 0.0 };
            let err = (dot - expected).abs();
            residual = if err.is_nan() { f64::INFINITY } else { residual.max(err) };
        }
    }
    if !(residual <= SINGULAR_TOL) {
        return Err(DgError::Singular(format!(
            "local mass matrix of size {n} is not invertible (residual {residual:e})"
        )));
    }
    Ok(inverse)
}
