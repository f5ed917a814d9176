//! One-dimensional polynomial building blocks.
//!
//! - Legendre polynomials and their derivatives (modal basis factors)
//! - Gauss-Legendre quadrature on [-1, 1]

mod legendre;
mod quadrature;

pub use legendre::{legendre, legendre_and_derivative, normalized_legendre_and_derivative};
pub use quadrature::{GaussLegendre, gauss_legendre};
