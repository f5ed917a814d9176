//! Element kind descriptor.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of a volume element.
///
/// Quantities depending on the polynomial order `p` are derived here so
/// that solver arrays can be sized from `(kind, p)` alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElementKind {
    /// Interval [-1, 1].
    Line,
    /// Square [-1, 1]², vertices counter-clockwise from (-1, -1).
    Quadrangle,
}

impl ElementKind {
    /// Spatial dimension.
    pub const fn dimension(self) -> usize {
        match self {
            ElementKind::Line => 1,
            ElementKind::Quadrangle => 2,
        }
    }

    /// Number of faces (adjacency slots).
    pub const fn n_faces(self) -> usize {
        match self {
            ElementKind::Line => 2,
            ElementKind::Quadrangle => 4,
        }
    }

    /// Number of corner vertices.
    pub const fn n_vertices(self) -> usize {
        match self {
            ElementKind::Line => 2,
            ElementKind::Quadrangle => 4,
        }
    }

    /// Number of modal basis functions for order `p` (tensor Legendre).
    pub const fn n_basis(self, order: usize) -> usize {
        match self {
            ElementKind::Line => order + 1,
            ElementKind::Quadrangle => (order + 1) * (order + 1),
        }
    }

    /// Number of Gauss points per direction for order `p`.
    pub const fn n_quadrature_1d(self, order: usize) -> usize {
        order + 1
    }

    /// Number of volume quadrature points.
    pub const fn n_quadrature(self, order: usize) -> usize {
        match self {
            ElementKind::Line => self.n_quadrature_1d(order),
            ElementKind::Quadrangle => self.n_quadrature_1d(order) * self.n_quadrature_1d(order),
        }
    }

    /// Number of quadrature points on a single face.
    pub const fn n_face_quadrature(self, order: usize) -> usize {
        match self {
            ElementKind::Line => 1,
            ElementKind::Quadrangle => self.n_quadrature_1d(order),
        }
    }

    /// Local vertex indices spanning each face, in counter-clockwise order.
    pub fn face_vertices(self, face: usize) -> &'static [usize] {
        const LINE: [&[usize]; 2] = [&[0], &[1]];
        const QUAD: [&[usize]; 4] = [&[0, 1], &[1, 2], &[2, 3], &[3, 0]];
        match self {
            ElementKind::Line => LINE[face],
            ElementKind::Quadrangle => QUAD[face],
        }
    }

    /// Human-readable name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            ElementKind::Line => "line",
            ElementKind::Quadrangle => "quadrangle",
        }
    }
}
