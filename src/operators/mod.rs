//! Dense element operators.

mod mass;

pub use mass::{inverse_mass_matrix, mass_matrix};
