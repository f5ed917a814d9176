//! Element and face geometry.

use std::collections::BTreeSet;

use crate::basis::ReferenceElement;
use crate::types::{ElementIndex, FaceIndex};

/// Reference to an element and one of its local faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementFace {
    pub element: ElementIndex,
    /// Local face slot (0..n_faces)
    pub face: usize,
}

impl ElementFace {
    pub fn new(element: ElementIndex, face: usize) -> Self {
        Self { element, face }
    }
}

/// Which side of a face an element sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Owner; the face normal points out of this element.
    Left,
    /// Neighbour; sees the face normal pointing inwards.
    Right,
}

/// Connectivity of a face.
#[derive(Clone, Debug, PartialEq)]
pub enum FaceKind {
    /// Shared by two elements.
    Interior {
        right: ElementFace,
        /// `right_sequence[qf]` is the right-face quadrature index located
        /// at the same physical point as left-face quadrature point `qf`.
        right_sequence: Vec<usize>,
    },
    /// On the domain boundary, tagged with a named surface.
    Boundary { surface: String },
}

/// A face with its quadrature in physical space.
#[derive(Clone, Debug)]
pub struct Face<const D: usize> {
    pub left: ElementFace,
    pub kind: FaceKind,
    /// Unit normal, outward from the left element.
    pub normal: [f64; D],
    /// Physical coordinates of the left-face quadrature points.
    pub points: Vec<[f64; D]>,
    /// Surface Jacobian times face quadrature weight.
    pub detw: Vec<f64>,
}

impl<const D: usize> Face<D> {
    #[inline]
    pub fn is_boundary(&self) -> bool {
        matches!(self.kind, FaceKind::Boundary { .. })
    }

    #[inline]
    pub fn n_points(&self) -> usize {
        self.detw.len()
    }

    /// Quadrature index on `side` matching left quadrature point `qf`.
    #[inline]
    pub fn sequence(&self, side: Side, qf: usize) -> usize {
        match (&self.kind, side) {
            (FaceKind::Interior { right_sequence, .. }, Side::Right) => right_sequence[qf],
            _ => qf,
        }
    }
}

/// Affine geometry of a single element.
#[derive(Clone, Debug)]
pub struct ElementGeometry<const D: usize> {
    pub vertices: Vec<usize>,
    pub region: String,
    /// Image of the reference origin.
    pub center: [f64; D],
    /// `jacobian[i][j] = ∂x_i/∂ξ_j`
    pub jacobian: [[f64; D]; D],
    /// `(J⁻¹)ᵀ`, maps reference gradients to physical gradients.
    pub inverse_jacobian_transpose: [[f64; D]; D],
    pub jacobian_det: f64,
    /// Physical volume quadrature points.
    pub points: Vec<[f64; D]>,
    /// `|J| w_q` per volume quadrature point.
    pub detw: Vec<f64>,
    /// Smallest edge length (element length in 1D).
    pub h_min: f64,
    /// Face index and side for each local face slot.
    pub faces: Vec<(FaceIndex, Side)>,
}

impl<const D: usize> ElementGeometry<D> {
    /// Map a reference point to physical space.
    #[inline]
    pub fn to_physical(&self, xi: &[f64; D]) -> [f64; D] {
        std::array::from_fn(|i| {
            self.center[i] + (0..D).map(|j| self.jacobian[i][j] * xi[j]).sum::<f64>()
        })
    }

    /// Map a physical point to reference coordinates.
    #[inline]
    pub fn to_reference(&self, x: &[f64; D]) -> [f64; D] {
        // ξ = J⁻¹ (x - c), and J⁻¹[j][i] = (J⁻ᵀ)[i][j]
        std::array::from_fn(|j| {
            (0..D)
                .map(|i| self.inverse_jacobian_transpose[i][j] * (x[i] - self.center[i]))
                .sum::<f64>()
        })
    }

    /// Physical gradient from a reference gradient.
    #[inline(always)]
    pub fn physical_gradient(&self, reference: &[f64; D]) -> [f64; D] {
        std::array::from_fn(|i| {
            (0..D)
                .map(|j| self.inverse_jacobian_transpose[i][j] * reference[j])
                .sum::<f64>()
        })
    }

    /// Element measure (length or area).
    pub fn measure(&self) -> f64 {
        self.detw.iter().sum()
    }
}

/// Mesh of affine elements sharing one reference element.
#[derive(Clone, Debug)]
pub struct Mesh<const D: usize> {
    pub(crate) reference: ReferenceElement<D>,
    pub(crate) vertices: Vec<[f64; D]>,
    pub(crate) elements: Vec<ElementGeometry<D>>,
    pub(crate) faces: Vec<Face<D>>,
}

impl<const D: usize> Mesh<D> {
    #[inline]
    pub fn reference(&self) -> &ReferenceElement<D> {
        &self.reference
    }

    #[inline]
    pub fn vertices(&self) -> &[[f64; D]] {
        &self.vertices
    }

    #[inline]
    pub fn elements(&self) -> &[ElementGeometry<D>] {
        &self.elements
    }

    #[inline]
    pub fn element(&self, k: ElementIndex) -> &ElementGeometry<D> {
        &self.elements[k]
    }

    #[inline]
    pub fn faces(&self) -> &[Face<D>] {
        &self.faces
    }

    #[inline]
    pub fn face(&self, f: FaceIndex) -> &Face<D> {
        &self.faces[f]
    }

    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// Polynomial order of the basis.
    #[inline]
    pub fn order(&self) -> usize {
        self.reference.order()
    }

    /// Number of boundary faces.
    pub fn n_boundary_faces(&self) -> usize {
        self.faces.iter().filter(|f| f.is_boundary()).count()
    }

    /// Names of all boundary surfaces, sorted.
    pub fn surfaces(&self) -> BTreeSet<&str> {
        self.faces
            .iter()
            .filter_map(|f| match &f.kind {
                FaceKind::Boundary { surface } => Some(surface.as_str()),
                FaceKind::Interior { .. } => None,
            })
            .collect()
    }

    /// Names of all element regions, sorted.
    pub fn regions(&self) -> BTreeSet<&str> {
        self.elements.iter().map(|e| e.region.as_str()).collect()
    }

    /// Smallest element size in the mesh.
    pub fn h_min(&self) -> f64 {
        self.elements
            .iter()
            .map(|e| e.h_min)
            .fold(f64::INFINITY, f64::min)
    }

    /// Total measure of the domain.
    pub fn measure(&self) -> f64 {
        self.elements.iter().map(|e| e.measure()).sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::mesh::{RectangleSurfaces, uniform_line, uniform_rectangle};
    use crate::types::{ElementIndex, FaceIndex};
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_reference_roundtrip() {
        let mesh = uniform_rectangle(
            (0.0, 2.0),
            (0.0, 1.0),
            (4, 2),
            1,
            RectangleSurfaces::uniform("wall"),
        )
        .unwrap();
        let e = mesh.element(ElementIndex::new(5));
        let x = e.to_physical(&[0.3, -0.7]);
        let xi = e.to_reference(&x);
        assert_relative_eq!(xi[0], 0.3, epsilon = TOL);
        assert_relative_eq!(xi[1], -0.7, epsilon = TOL);
    }

    #[test]
    fn test_measure() {
        let mesh = uniform_rectangle(
            (0.0, 2.0),
            (0.0, 1.0),
            (4, 2),
            2,
            RectangleSurfaces::uniform("wall"),
        )
        .unwrap();
        assert_relative_eq!(mesh.measure(), 2.0, epsilon = TOL);
        assert_relative_eq!(mesh.h_min(), 0.5, epsilon = TOL);
    }

    #[test]
    fn test_physical_gradient_scaling() {
        let mesh = uniform_line((0.0, 1.0), 4, 1, ["left", "right"]).unwrap();
        let e = mesh.element(ElementIndex::new(0));
        // J = h/2 = 0.125
        assert_relative_eq!(e.physical_gradient(&[1.0])[0], 8.0, epsilon = TOL);
        assert_relative_eq!(e.jacobian_det, 0.125, epsilon = TOL);
    }

    #[test]
    fn test_face_normals_point_out_of_left() {
        let mesh = uniform_rectangle(
            (0.0, 1.0),
            (0.0, 1.0),
            (2, 2),
            1,
            RectangleSurfaces::uniform("wall"),
        )
        .unwrap();
        for (i, face) in mesh.faces().iter().enumerate() {
            let left = mesh.element(face.left.element);
            let mid = face.points[0];
            let outward: f64 = (0..2).map(|d| (mid[d] - left.center[d]) * face.normal[d]).sum();
            assert!(outward > 0.0, "face {}", FaceIndex::new(i));
        }
    }
}
