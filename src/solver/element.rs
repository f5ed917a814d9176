//! Per-element solver storage and modal evaluation.

use faer::Mat;

use super::state::{Conserved, ConservedGradient, zero_conserved_gradient};

/// Persistent state of one element.
///
/// All coefficient matrices hold one row per variable component and one
/// column per basis function. Gradient matrices store `∂U_k/∂x_d` in row
/// `k·D + d`.
#[derive(Clone, Debug)]
pub struct ElementState {
    /// `[0]` step snapshot, `[1]` working coefficients.
    pub(crate) coefficients: [Mat<f64>; 2],
    pub(crate) residual: Mat<f64>,
    pub(crate) inverse_mass: Mat<f64>,
    /// Gradient from the central face value only.
    pub(crate) volume_gradient: Mat<f64>,
    /// One lifting per local face.
    pub(crate) liftings: Vec<Mat<f64>>,
    /// `volume_gradient + Σ liftings`
    pub(crate) gradient: Mat<f64>,
    // scratch for the gradient phase
    pub(crate) gradient_residual: Mat<f64>,
    pub(crate) lifting_residuals: Vec<Mat<f64>>,
}

impl ElementState {
    /// Zeroed state for `n_vars` variables in dimension `dim`.
    pub(crate) fn new(
        n_vars: usize,
        dim: usize,
        n_basis: usize,
        n_faces: usize,
        inverse_mass: Mat<f64>,
        viscous: bool,
    ) -> Self {
        // Inviscid runs never touch the gradient storage.
        let (g_rows, g_faces) = if viscous { (n_vars * dim, n_faces) } else { (0, 0) };
        Self {
            coefficients: [Mat::zeros(n_vars, n_basis), Mat::zeros(n_vars, n_basis)],
            residual: Mat::zeros(n_vars, n_basis),
            inverse_mass,
            volume_gradient: Mat::zeros(g_rows, n_basis),
            liftings: vec![Mat::zeros(g_rows, n_basis); g_faces],
            gradient: Mat::zeros(g_rows, n_basis),
            gradient_residual: Mat::zeros(g_rows, n_basis),
            lifting_residuals: vec![Mat::zeros(g_rows, n_basis); g_faces],
        }
    }

    /// Working coefficients.
    #[inline]
    pub fn coefficients(&self) -> &Mat<f64> {
        &self.coefficients[1]
    }

    /// Coefficients at the start of the current step.
    #[inline]
    pub fn snapshot(&self) -> &Mat<f64> {
        &self.coefficients[0]
    }

    /// Residual of the last assembled stage, before `M⁻¹`.
    #[inline]
    pub fn residual(&self) -> &Mat<f64> {
        &self.residual
    }

    #[inline]
    pub fn inverse_mass(&self) -> &Mat<f64> {
        &self.inverse_mass
    }

    /// Total gradient coefficients (empty for inviscid runs).
    #[inline]
    pub fn gradient(&self) -> &Mat<f64> {
        &self.gradient
    }
}

/// `Σ_b c[k, b] φ_b` for every variable `k`.
#[inline]
pub(crate) fn evaluate<const D: usize>(coefficients: &Mat<f64>, phi: &[f64]) -> Conserved<D> {
    Conserved::from_fn(|k| {
        phi.iter()
            .enumerate()
            .map(|(b, p)| coefficients[(k, b)] * p)
            .sum()
    })
}

/// Evaluate gradient coefficients laid out as `k·D + d` rows.
#[inline]
pub(crate) fn evaluate_gradient<const D: usize>(gradient: &Mat<f64>, phi: &[f64]) -> ConservedGradient<D> {
    let mut out = zero_conserved_gradient::<D>();
    for (d, g) in out.iter_mut().enumerate() {
        *g = Conserved::from_fn(|k| {
            phi.iter()
                .enumerate()
                .map(|(b, p)| gradient[(k * D + d, b)] * p)
                .sum()
        });
    }
    out
}

/// Sum of two evaluated gradients.
#[inline]
pub(crate) fn add_gradients<const D: usize>(
    a: &ConservedGradient<D>,
    b: &ConservedGradient<D>,
) -> ConservedGradient<D> {
    std::array::from_fn(|d| a[d] + b[d])
}

pub(crate) fn set_zero(m: &mut Mat<f64>) {
    for j in 0..m.ncols() {
        for i in 0..m.nrows() {
            m[(i, j)] = 0.0;
        }
    }
}
