//! Point-wise flow state in three co-derivable representations.
//!
//! - [`Conserved`]: (ρ, ρv, ρE), the variables the residual is built for
//! - [`Computational`]: (ρ, v, e, p), the form fluxes operate on
//! - [`Primitive`]: (ρ, v, T), the form boundary and initial data use
//!
//! [`VariableState`] bundles all three with a record of which one was set
//! last. Gradients live in [`PrimitiveGradient`], derived from the
//! gradients of the conserved variables by the chain rule.

mod gradient;
mod variable;

pub use gradient::{ConservedGradient, PrimitiveGradient, zero_conserved_gradient};
pub use variable::{Computational, Conserved, Primitive, Representation, VariableState};
