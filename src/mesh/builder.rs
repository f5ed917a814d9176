//! Mesh assembly from vertices and element connectivity.
//!
//! Faces are discovered by their sorted vertex sets: a set seen twice is an
//! interior face, a set seen once must carry a boundary surface name.
//! Geometry is affine, so quadrangles must be parallelograms.

use std::collections::HashMap;

use log::{debug, warn};

use super::geometry::{ElementFace, ElementGeometry, Face, FaceKind, Mesh, Side};
use crate::basis::{ElementKind, ReferenceElement};
use crate::error::{DgError, Result};
use crate::types::{ElementIndex, FaceIndex};

/// Relative tolerance for geometric coincidence tests.
const GEOMETRY_TOL: f64 = 1e-9;

/// Incremental mesh builder.
///
/// ```
/// use dg_flow::basis::ElementKind;
/// use dg_flow::mesh::MeshBuilder;
///
/// let mut builder = MeshBuilder::<1>::new(ElementKind::Line, 2);
/// let a = builder.add_vertex([0.0]);
/// let b = builder.add_vertex([0.5]);
/// let c = builder.add_vertex([1.0]);
/// let e0 = builder.add_element(&[a, b], "fluid");
/// let e1 = builder.add_element(&[b, c], "fluid");
/// builder.set_boundary(e0, 0, "inlet");
/// builder.set_boundary(e1, 1, "outlet");
/// let mesh = builder.build().unwrap();
/// assert_eq!(mesh.n_faces(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct MeshBuilder<const D: usize> {
    kind: ElementKind,
    order: usize,
    vertices: Vec<[f64; D]>,
    elements: Vec<(Vec<usize>, String)>,
    boundaries: HashMap<(usize, usize), String>,
}

impl<const D: usize> MeshBuilder<D> {
    pub fn new(kind: ElementKind, order: usize) -> Self {
        Self {
            kind,
            order,
            vertices: Vec::new(),
            elements: Vec::new(),
            boundaries: HashMap::new(),
        }
    }

    /// Add a vertex, returning its index.
    pub fn add_vertex(&mut self, x: [f64; D]) -> usize {
        self.vertices.push(x);
        self.vertices.len() - 1
    }

    /// Add an element from vertex indices (counter-clockwise for quadrangles).
    pub fn add_element(&mut self, vertices: &[usize], region: impl Into<String>) -> ElementIndex {
        self.elements.push((vertices.to_vec(), region.into()));
        ElementIndex::new(self.elements.len() - 1)
    }

    /// Tag local face `face` of `element` with a boundary surface name.
    pub fn set_boundary(&mut self, element: ElementIndex, face: usize, surface: impl Into<String>) {
        self.boundaries
            .insert((element.get(), face), surface.into());
    }

    /// Compute geometry and connectivity.
    pub fn build(mut self) -> Result<Mesh<D>> {
        let reference = ReferenceElement::<D>::new(self.kind, self.order)?;
        if self.elements.is_empty() {
            return Err(DgError::InvalidConfig("mesh has no elements".into()));
        }

        let mut elements = Vec::with_capacity(self.elements.len());
        for (k, (vertices, region)) in self.elements.iter().enumerate() {
            elements.push(self.element_geometry(k, vertices, region, &reference)?);
        }

        // Sorted vertex set -> every (element, face) touching it.
        let mut by_key: HashMap<Vec<usize>, Vec<ElementFace>> = HashMap::new();
        for (k, (vertices, _)) in self.elements.iter().enumerate() {
            for f in 0..self.kind.n_faces() {
                let mut key: Vec<usize> = self
                    .kind
                    .face_vertices(f)
                    .iter()
                    .map(|&v| vertices[v])
                    .collect();
                key.sort_unstable();
                by_key
                    .entry(key)
                    .or_default()
                    .push(ElementFace::new(ElementIndex::new(k), f));
            }
        }

        let n_faces = self.kind.n_faces();
        let mut slots: Vec<Vec<Option<(FaceIndex, Side)>>> =
            vec![vec![None; n_faces]; elements.len()];
        let mut faces: Vec<Face<D>> = Vec::new();

        for k in 0..elements.len() {
            for f in 0..n_faces {
                if slots[k][f].is_some() {
                    continue;
                }
                let left = ElementFace::new(ElementIndex::new(k), f);
                let mut key: Vec<usize> = self
                    .kind
                    .face_vertices(f)
                    .iter()
                    .map(|&v| self.elements[k].0[v])
                    .collect();
                key.sort_unstable();
                let sharing = by_key.get(&key).map(Vec::as_slice).unwrap_or(&[]);
                let index = FaceIndex::new(faces.len());

                let kind = match sharing {
                    [_] => {
                        let surface = self.boundaries.remove(&(k, f)).ok_or_else(|| {
                            DgError::InvalidConfig(format!(
                                "face {} of element {} has no neighbour and no boundary surface",
                                f, left.element
                            ))
                        })?;
                        FaceKind::Boundary { surface }
                    }
                    [a, b] => {
                        let right = if *a == left { *b } else { *a };
                        if let Some(surface) = self.boundaries.remove(&(k, f)) {
                            warn!("ignoring boundary surface {surface} on interior face {index}");
                        }
                        self.boundaries
                            .remove(&(right.element.get(), right.face));
                        let right_sequence =
                            match_sequence(&reference, &elements[k], f, &elements[right.element.get()], right.face)
                                .ok_or_else(|| {
                                    DgError::InvalidConfig(format!(
                                        "face quadrature of elements {} and {} does not match",
                                        left.element, right.element
                                    ))
                                })?;
                        slots[right.element.get()][right.face] = Some((index, Side::Right));
                        FaceKind::Interior {
                            right,
                            right_sequence,
                        }
                    }
                    _ => {
                        return Err(DgError::InvalidConfig(format!(
                            "face {} of element {} is shared by {} elements",
                            f,
                            left.element,
                            sharing.len()
                        )));
                    }
                };

                slots[k][f] = Some((index, Side::Left));
                faces.push(face_geometry(&reference, &elements[k], left, kind));
            }
        }

        for (element, slots) in elements.iter_mut().zip(slots) {
            element.faces = slots.into_iter().flatten().collect();
        }

        let mesh = Mesh {
            reference,
            vertices: self.vertices,
            elements,
            faces,
        };
        debug!(
            "built {} mesh: {} elements, {} faces ({} boundary), order {}",
            self.kind.name(),
            mesh.n_elements(),
            mesh.n_faces(),
            mesh.n_boundary_faces(),
            mesh.order()
        );
        Ok(mesh)
    }

    fn element_geometry(
        &self,
        k: usize,
        vertices: &[usize],
        region: &str,
        reference: &ReferenceElement<D>,
    ) -> Result<ElementGeometry<D>> {
        if vertices.len() != self.kind.n_vertices() {
            return Err(DgError::dimension_mismatch(
                format!("{} vertices for a {}", self.kind.n_vertices(), self.kind.name()),
                format!("{} vertices on element {}", vertices.len(), k),
            ));
        }
        let mut coords = Vec::with_capacity(vertices.len());
        for &v in vertices {
            let x = self.vertices.get(v).ok_or_else(|| {
                DgError::InvalidConfig(format!("element {k} references missing vertex {v}"))
            })?;
            coords.push(*x);
        }

        let (center, jacobian) = affine_map(self.kind, &coords)
            .ok_or_else(|| DgError::InvalidConfig(format!("element {k} is not affine")))?;
        let padded = pad(&jacobian);
        let det = padded[0][0] * padded[1][1] - padded[0][1] * padded[1][0];
        if !(det > 0.0) {
            return Err(DgError::InvalidConfig(format!(
                "element {k} has non-positive Jacobian determinant {det}"
            )));
        }
        let inv_t = [
            [padded[1][1] / det, -padded[1][0] / det],
            [-padded[0][1] / det, padded[0][0] / det],
        ];
        let inverse_jacobian_transpose = std::array::from_fn(|i| std::array::from_fn(|j| inv_t[i][j]));

        let h_min = (0..self.kind.n_faces())
            .map(|f| match self.kind.face_vertices(f) {
                [a, b] => distance(&coords[*a], &coords[*b]),
                _ => distance(&coords[0], &coords[1]),
            })
            .fold(f64::INFINITY, f64::min);

        let mut geometry = ElementGeometry {
            vertices: vertices.to_vec(),
            region: region.to_string(),
            center,
            jacobian,
            inverse_jacobian_transpose,
            jacobian_det: det,
            points: Vec::new(),
            detw: reference.weights.iter().map(|w| w * det).collect(),
            h_min,
            faces: Vec::new(),
        };
        geometry.points = reference
            .points
            .iter()
            .map(|xi| geometry.to_physical(xi))
            .collect();
        Ok(geometry)
    }
}

/// Center and Jacobian of the affine map of an element, or `None` when the
/// vertices do not describe an affine image of the reference element.
fn affine_map<const D: usize>(
    kind: ElementKind,
    coords: &[[f64; D]],
) -> Option<([f64; D], [[f64; D]; D])> {
    match kind {
        ElementKind::Line => {
            let center = std::array::from_fn(|i| 0.5 * (coords[0][i] + coords[1][i]));
            let jacobian =
                std::array::from_fn(|i| std::array::from_fn(|_| 0.5 * (coords[1][i] - coords[0][i])));
            Some((center, jacobian))
        }
        ElementKind::Quadrangle => {
            let e1: [f64; D] = std::array::from_fn(|i| 0.5 * (coords[1][i] - coords[0][i]));
            let e2: [f64; D] = std::array::from_fn(|i| 0.5 * (coords[3][i] - coords[0][i]));
            let scale = distance(&coords[0], &coords[2]);
            let skew = (0..D)
                .map(|i| (coords[2][i] - (coords[1][i] + coords[3][i] - coords[0][i])).abs())
                .fold(0.0, f64::max);
            if skew > GEOMETRY_TOL * scale {
                return None;
            }
            let center = std::array::from_fn(|i| coords[0][i] + e1[i] + e2[i]);
            let jacobian = std::array::from_fn(|i| std::array::from_fn(|j| if j == 0 { e1[i] } else { e2[i] }));
            Some((center, jacobian))
        }
    }
}

/// Embed a 1x1 or 2x2 Jacobian into a 2x2 matrix, padding with the identity.
fn pad<const D: usize>(j: &[[f64; D]; D]) -> [[f64; 2]; 2] {
    std::array::from_fn(|r| {
        std::array::from_fn(|c| {
            if r < D && c < D {
                j[r][c]
            } else if r == c {
                1.0
            } else {
                0.0
            }
        })
    })
}

fn distance<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    (0..D).map(|i| (a[i] - b[i]).powi(2)).sum::<f64>().sqrt()
}

fn face_geometry<const D: usize>(
    reference: &ReferenceElement<D>,
    element: &ElementGeometry<D>,
    left: ElementFace,
    kind: FaceKind,
) -> Face<D> {
    let rf = reference.face(left.face);
    let n: [f64; D] = element.physical_gradient(&rf.normal);
    let norm = n.iter().map(|v| v * v).sum::<f64>().sqrt();
    let normal = std::array::from_fn(|d| n[d] / norm);

    let surface_jacobian = if D == 1 {
        1.0
    } else {
        (0..D)
            .map(|i| {
                (0..D)
                    .map(|j| element.jacobian[i][j] * rf.tangent[j])
                    .sum::<f64>()
                    .powi(2)
            })
            .sum::<f64>()
            .sqrt()
    };

    Face {
        left,
        kind,
        normal,
        points: rf.points.iter().map(|xi| element.to_physical(xi)).collect(),
        detw: rf.weights.iter().map(|w| w * surface_jacobian).collect(),
    }
}

/// Match left-face quadrature points to right-face points by position.
fn match_sequence<const D: usize>(
    reference: &ReferenceElement<D>,
    left: &ElementGeometry<D>,
    left_face: usize,
    right: &ElementGeometry<D>,
    right_face: usize,
) -> Option<Vec<usize>> {
    let left_points: Vec<[f64; D]> = reference
        .face(left_face)
        .points
        .iter()
        .map(|xi| left.to_physical(xi))
        .collect();
    let right_points: Vec<[f64; D]> = reference
        .face(right_face)
        .points
        .iter()
        .map(|xi| right.to_physical(xi))
        .collect();
    let tol = GEOMETRY_TOL * left.h_min.min(right.h_min);

    left_points
        .iter()
        .map(|x| {
            right_points
                .iter()
                .position(|y| distance(x, y) <= tol)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_quads_share_face() {
        let mut b = MeshBuilder::<2>::new(ElementKind::Quadrangle, 2);
        let v: Vec<usize> = [[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 1.0]]
            .into_iter()
            .map(|x| b.add_vertex(x))
            .collect();
        let e0 = b.add_element(&[v[0], v[1], v[4], v[3]], "fluid");
        let e1 = b.add_element(&[v[1], v[2], v[5], v[4]], "fluid");
        for f in [0, 2, 3] {
            b.set_boundary(e0, f, "wall");
        }
        for f in [0, 1, 2] {
            b.set_boundary(e1, f, "wall");
        }
        let mesh = b.build().unwrap();
        assert_eq!(mesh.n_faces(), 7);
        assert_eq!(mesh.n_boundary_faces(), 6);

        let shared = mesh.faces().iter().find(|f| !f.is_boundary()).unwrap();
        assert_eq!(shared.left, ElementFace::new(e0, 1));
        assert_relative_eq!(shared.normal[0], 1.0, epsilon = 1e-14);
        let FaceKind::Interior { right, right_sequence } = &shared.kind else {
            panic!("expected interior face");
        };
        assert_eq!(*right, ElementFace::new(e1, 3));
        // Opposite traversal directions reverse the point order.
        assert_eq!(right_sequence, &vec![2, 1, 0]);
        assert_relative_eq!(shared.detw.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_boundary_is_error() {
        let mut b = MeshBuilder::<1>::new(ElementKind::Line, 1);
        let a = b.add_vertex([0.0]);
        let c = b.add_vertex([1.0]);
        let e = b.add_element(&[a, c], "fluid");
        b.set_boundary(e, 0, "inlet");
        assert!(matches!(b.build(), Err(DgError::InvalidConfig(_))));
    }

    #[test]
    fn test_inverted_element_is_error() {
        let mut b = MeshBuilder::<1>::new(ElementKind::Line, 1);
        let a = b.add_vertex([1.0]);
        let c = b.add_vertex([0.0]);
        b.add_element(&[a, c], "fluid");
        assert!(b.build().is_err());
    }

    #[test]
    fn test_non_affine_quad_is_error() {
        let mut b = MeshBuilder::<2>::new(ElementKind::Quadrangle, 1);
        let v: Vec<usize> = [[0.0, 0.0], [1.0, 0.0], [1.5, 1.2], [0.0, 1.0]]
            .into_iter()
            .map(|x| b.add_vertex(x))
            .collect();
        b.add_element(&v, "fluid");
        assert!(b.build().is_err());
    }

    #[test]
    fn test_empty_mesh_is_error() {
        let b = MeshBuilder::<2>::new(ElementKind::Quadrangle, 1);
        assert!(b.build().is_err());
    }
}
