//! Tabulated modal basis on a reference element.
//!
//! Basis functions are tensor products of normalized Legendre polynomials,
//! so the reference mass matrix is the identity and the physical mass
//! matrix of an affine element is `|J| I`. Volume quadrature uses `p + 1`
//! Gauss points per direction; face quadrature uses `p + 1` points along
//! each edge (one point for the end faces of a line).
//!
//! Index conventions (quadrangle):
//! - quadrature point `q = j * n1d + i` sits at `(ξ_i, η_j)`
//! - basis function `b = bj * (p + 1) + bi` is `P̃_bi(ξ) P̃_bj(η)`
//! - faces run counter-clockwise: `η = -1`, `ξ = 1`, `η = 1`, `ξ = -1`
//!   and each face parameter `s` follows the counter-clockwise direction

use crate::basis::ElementKind;
use crate::error::{DgError, Result};
use crate::polynomial::{GaussLegendre, gauss_legendre, normalized_legendre_and_derivative};

/// Face of a reference element with its own quadrature.
#[derive(Clone, Debug)]
pub struct ReferenceFace<const D: usize> {
    /// Reference coordinates of the face quadrature points.
    pub points: Vec<[f64; D]>,
    /// Face quadrature weights (in face parameter `s`).
    pub weights: Vec<f64>,
    /// Basis values, flat `[qf * n_basis + b]`.
    values: Vec<f64>,
    /// Outward normal on the reference element.
    pub normal: [f64; D],
    /// `dξ/ds` along the face (zero for point faces).
    pub tangent: [f64; D],
    n_basis: usize,
}

impl<const D: usize> ReferenceFace<D> {
    /// Number of face quadrature points.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.weights.len()
    }

    /// Basis function `b` at face quadrature point `qf`.
    #[inline(always)]
    pub fn value(&self, qf: usize, b: usize) -> f64 {
        self.values[qf * self.n_basis + b]
    }

    /// All basis values at face quadrature point `qf`.
    #[inline]
    pub fn values_at(&self, qf: usize) -> &[f64] {
        &self.values[qf * self.n_basis..(qf + 1) * self.n_basis]
    }
}

/// Basis and quadrature tables for one element kind and order.
#[derive(Clone, Debug)]
pub struct ReferenceElement<const D: usize> {
    kind: ElementKind,
    order: usize,
    n_basis: usize,
    /// Volume quadrature points in reference coordinates.
    pub points: Vec<[f64; D]>,
    /// Volume quadrature weights.
    pub weights: Vec<f64>,
    values: Vec<f64>,
    gradients: Vec<[f64; D]>,
    faces: Vec<ReferenceFace<D>>,
}

impl<const D: usize> ReferenceElement<D> {
    /// Tabulate the basis of `kind` at polynomial order `order`.
    pub fn new(kind: ElementKind, order: usize) -> Result<Self> {
        if kind.dimension() != D {
            return Err(DgError::dimension_mismatch(
                format!("{}D element", D),
                format!("{} ({}D)", kind.name(), kind.dimension()),
            ));
        }

        let n1 = order + 1;
        let rule = gauss_legendre(kind.n_quadrature_1d(order));
        let n_basis = kind.n_basis(order);

        let mut points = Vec::with_capacity(kind.n_quadrature(order));
        let mut weights = Vec::with_capacity(kind.n_quadrature(order));
        match kind {
            ElementKind::Line => {
                for (&x, &w) in rule.nodes.iter().zip(&rule.weights) {
                    points.push(to_point([x, 0.0]));
                    weights.push(w);
                }
            }
            ElementKind::Quadrangle => {
                for j in 0..rule.len() {
                    for i in 0..rule.len() {
                        points.push(to_point([rule.nodes[i], rule.nodes[j]]));
                        weights.push(rule.weights[i] * rule.weights[j]);
                    }
                }
            }
        }

        let mut values = Vec::with_capacity(points.len() * n_basis);
        let mut gradients = Vec::with_capacity(points.len() * n_basis);
        for xi in &points {
            let (v, g) = tabulate(kind, n1, xi);
            values.extend(v);
            gradients.extend(g);
        }

        let faces = (0..kind.n_faces())
            .map(|f| build_face(kind, n1, n_basis, f, &rule))
            .collect();

        Ok(Self {
            kind,
            order,
            n_basis,
            points,
            weights,
            values,
            gradients,
            faces,
        })
    }

    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    #[inline]
    pub fn n_basis(&self) -> usize {
        self.n_basis
    }

    #[inline]
    pub fn n_quadrature(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn face(&self, f: usize) -> &ReferenceFace<D> {
        &self.faces[f]
    }

    #[inline]
    pub fn faces(&self) -> &[ReferenceFace<D>] {
        &self.faces
    }

    /// Basis function `b` at volume quadrature point `q`.
    #[inline(always)]
    pub fn value(&self, q: usize, b: usize) -> f64 {
        self.values[q * self.n_basis + b]
    }

    /// All basis values at volume quadrature point `q`.
    #[inline]
    pub fn values_at(&self, q: usize) -> &[f64] {
        &self.values[q * self.n_basis..(q + 1) * self.n_basis]
    }

    /// Reference gradient `∇ξ φ_b` at volume quadrature point `q`.
    #[inline(always)]
    pub fn gradient(&self, q: usize, b: usize) -> [f64; D] {
        self.gradients[q * self.n_basis + b]
    }

    /// Basis values at an arbitrary reference point.
    pub fn evaluate(&self, xi: &[f64; D]) -> Vec<f64> {
        tabulate(self.kind, self.order + 1, xi).0
    }
}

fn to_point<const D: usize>(coords: [f64; 2]) -> [f64; D] {
    std::array::from_fn(|d| coords[d])
}

/// Values and reference gradients of every basis function at `xi`.
fn tabulate<const D: usize>(kind: ElementKind, n1: usize, xi: &[f64; D]) -> (Vec<f64>, Vec<[f64; D]>) {
    match kind {
        ElementKind::Line => {
            let mut values = Vec::with_capacity(n1);
            let mut gradients = Vec::with_capacity(n1);
            for b in 0..n1 {
                let (p, dp) = normalized_legendre_and_derivative(b, xi[0]);
                values.push(p);
                gradients.push(std::array::from_fn(|d| if d == 0 { dp } else { 0.0 }));
            }
            (values, gradients)
        }
        ElementKind::Quadrangle => {
            let px: Vec<(f64, f64)> = (0..n1)
                .map(|n| normalized_legendre_and_derivative(n, xi[0]))
                .collect();
            let py: Vec<(f64, f64)> = (0..n1)
                .map(|n| normalized_legendre_and_derivative(n, xi[D - 1]))
                .collect();
            let mut values = Vec::with_capacity(n1 * n1);
            let mut gradients = Vec::with_capacity(n1 * n1);
            for (vy, dy) in &py {
                for (vx, dx) in &px {
                    values.push(vx * vy);
                    let g = [dx * vy, vx * dy];
                    gradients.push(std::array::from_fn(|d| g[d]));
                }
            }
            (values, gradients)
        }
    }
}

fn build_face<const D: usize>(
    kind: ElementKind,
    n1: usize,
    n_basis: usize,
    face: usize,
    rule: &GaussLegendre,
) -> ReferenceFace<D> {
    let (points, weights, normal, tangent): (Vec<[f64; D]>, Vec<f64>, [f64; 2], [f64; 2]) =
        match kind {
            ElementKind::Line => {
                let x = if face == 0 { -1.0 } else { 1.0 };
                (vec![to_point([x, 0.0])], vec![1.0], [x, 0.0], [0.0, 0.0])
            }
            ElementKind::Quadrangle => {
                let (normal, tangent) = match face {
                    0 => ([0.0, -1.0], [1.0, 0.0]),
                    1 => ([1.0, 0.0], [0.0, 1.0]),
                    2 => ([0.0, 1.0], [-1.0, 0.0]),
                    _ => ([-1.0, 0.0], [0.0, -1.0]),
                };
                let points = rule
                    .nodes
                    .iter()
                    .map(|&s| {
                        // Edge midpoint is the outward normal; move along the tangent.
                        to_point([normal[0] + s * tangent[0], normal[1] + s * tangent[1]])
                    })
                    .collect();
                (points, rule.weights.clone(), normal, tangent)
            }
        };

    let mut values = Vec::with_capacity(points.len() * n_basis);
    for xi in &points {
        values.extend(tabulate(kind, n1, xi).0);
    }

    ReferenceFace {
        points,
        weights,
        values,
        normal: to_point(normal),
        tangent: to_point(tangent),
        n_basis,
    }
}
