//! Modal basis tables on reference elements.
//!
//! An [`ElementKind`] describes the shape (dimension, face count) and,
//! together with a polynomial order, sizes every per-element array. The
//! [`ReferenceElement`] holds the tabulated basis values and gradients at
//! volume and face quadrature points, shared by all elements of a mesh.

mod element_kind;
mod reference;

pub use element_kind::ElementKind;
pub use reference::{ReferenceElement, ReferenceFace};
