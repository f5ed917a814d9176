//! Structured mesh generators.

use super::builder::MeshBuilder;
use super::geometry::Mesh;
use super::surfaces::{LineSurfaces, RectangleSurfaces};
use crate::basis::ElementKind;
use crate::error::{DgError, Result};
use crate::types::ElementIndex;

/// Region name given to every element of a structured mesh.
pub const DEFAULT_REGION: &str = "domain";

/// Uniform mesh of `[x0, x1]` with `n` line elements.
pub fn uniform_line(
    (x0, x1): (f64, f64),
    n: usize,
    order: usize,
    surfaces: impl Into<LineSurfaces>,
) -> Result<Mesh<1>> {
    if n == 0 || !(x1 > x0) {
        return Err(DgError::InvalidConfig(format!(
            "invalid line mesh [{x0}, {x1}] with {n} elements"
        )));
    }
    let surfaces = surfaces.into();
    let dx = (x1 - x0) / n as f64;

    let mut builder = MeshBuilder::<1>::new(ElementKind::Line, order);
    for i in 0..=n {
        builder.add_vertex([x0 + i as f64 * dx]);
    }
    for i in 0..n {
        builder.add_element(&[i, i + 1], DEFAULT_REGION);
    }
    builder.set_boundary(ElementIndex::new(0), 0, surfaces.left.clone());
    builder.set_boundary(ElementIndex::new(n - 1), 1, surfaces.right.clone());
    builder.build()
}

/// Uniform mesh of `[x0, x1] × [y0, y1]` with `nx × ny` quadrangles.
///
/// Elements are numbered row by row from the south-west corner.
pub fn uniform_rectangle(
    (x0, x1): (f64, f64),
    (y0, y1): (f64, f64),
    (nx, ny): (usize, usize),
    order: usize,
    surfaces: impl Into<RectangleSurfaces>,
) -> Result<Mesh<2>> {
    if nx == 0 || ny == 0 || !(x1 > x0 && y1 > y0) {
        return Err(DgError::InvalidConfig(format!(
            "invalid rectangle mesh [{x0}, {x1}] x [{y0}, {y1}] with {nx} x {ny} elements"
        )));
    }
    let surfaces = surfaces.into();
    let dx = (x1 - x0) / nx as f64;
    let dy = (y1 - y0) / ny as f64;

    let mut builder = MeshBuilder::<2>::new(ElementKind::Quadrangle, order);
    for j in 0..=ny {
        for i in 0..=nx {
            builder.add_vertex([x0 + i as f64 * dx, y0 + j as f64 * dy]);
        }
    }

    for j in 0..ny {
        for i in 0..nx {
            let v0 = j * (nx + 1) + i; // bottom-left
            let v1 = v0 + 1; // bottom-right
            let v2 = v1 + (nx + 1); // top-right
            let v3 = v0 + (nx + 1); // top-left
            let k = builder.add_element(&[v0, v1, v2, v3], DEFAULT_REGION);

            let on_side = [j == 0, i == nx - 1, j == ny - 1, i == 0];
            for (face, _) in on_side.iter().enumerate().filter(|(_, s)| **s) {
                if let Some(name) = surfaces.get(face) {
                    builder.set_boundary(k, face, name);
                }
            }
        }
    }
    builder.build()
}
