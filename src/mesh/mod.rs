//! Affine element geometry and face connectivity.
//!
//! Elements store their vertex indices, physical quadrature points and the
//! constant inverse-Jacobian-transpose of the affine reference map. Every
//! face is stored once with a "left" owner; interior faces carry the
//! right-side quadrature sequence that lines up point-for-point with the
//! left, so flux results can be scattered to both neighbours.

mod builder;
mod geometry;
mod surfaces;
mod uniform;

pub use builder::MeshBuilder;
pub use geometry::{ElementFace, ElementGeometry, Face, FaceKind, Mesh, Side};
pub use surfaces::{LineSurfaces, RectangleSurfaces};
pub use uniform::{uniform_line, uniform_rectangle};
