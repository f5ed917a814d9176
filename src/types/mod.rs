//! Strongly-typed index newtypes.
//!
//! Elements and faces live in flat arrays; these wrappers keep the two
//! index spaces from being mixed up when a face refers back to its parent
//! elements.

mod indices;

pub use indices::{ElementIndex, FaceIndex};
