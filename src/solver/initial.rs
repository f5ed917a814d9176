//! Initial conditions by mesh region.

use std::collections::HashMap;
use std::fmt;

use super::state::Primitive;
use crate::error::{DgError, Result};

/// Primitive state as a function of physical position.
pub type InitialState<const D: usize> = Box<dyn Fn(&[f64; D]) -> Primitive<D> + Send + Sync>;

/// Initial state per element region, with an optional fallback.
///
/// The solver projects the state onto the modal basis of every element in
/// the L2 sense.
///
/// # Example
///
/// ```
/// use dg_flow::equations::PhysicalModel;
/// use dg_flow::solver::{InitialCondition, Primitive};
///
/// let model = PhysicalModel::default();
/// let ambient = Primitive::from_pressure(&model, 1.4, [0.5], 1.0);
/// let ic = InitialCondition::uniform(ambient)
///     .with_region("bubble", move |_x: &[f64; 1]| Primitive::from_pressure(&model, 2.0, [0.0], 1.0));
/// assert_eq!(ic.state("domain", &[0.3]).unwrap(), ambient);
/// ```
pub struct InitialCondition<const D: usize> {
    regions: HashMap<String, InitialState<D>>,
    fallback: Option<InitialState<D>>,
}

impl<const D: usize> InitialCondition<D> {
    /// Empty map: every region must be registered.
    pub fn new() -> Self {
        Self {
            regions: HashMap::new(),
            fallback: None,
        }
    }

    /// Same constant state everywhere.
    pub fn uniform(state: Primitive<D>) -> Self {
        Self::new().with_fallback(move |_| state)
    }

    pub fn with_fallback<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64; D]) -> Primitive<D> + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(f));
        self
    }

    pub fn with_region<F>(mut self, region: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[f64; D]) -> Primitive<D> + Send + Sync + 'static,
    {
        self.regions.insert(region.into(), Box::new(f));
        self
    }

    /// Initial state function of `region`.
    pub fn get(&self, region: &str) -> Result<&InitialState<D>> {
        self.regions
            .get(region)
            .or(self.fallback.as_ref())
            .ok_or_else(|| DgError::InvalidConfig(format!("no initial condition for region {region}")))
    }

    /// Evaluate the initial state of `region` at `x`.
    pub fn state(&self, region: &str, x: &[f64; D]) -> Result<Primitive<D>> {
        self.get(region).map(|f| f(x))
    }
}

impl<const D: usize> Default for InitialCondition<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> fmt::Debug for InitialCondition<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut regions: Vec<&str> = self.regions.keys().map(String::as_str).collect();
        regions.sort_unstable();
        f.debug_struct("InitialCondition")
            .field("regions", &regions)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::PhysicalModel;

    #[test]
    fn test_region_overrides_fallback() {
        let model = PhysicalModel::default();
        let left = Primitive::from_pressure(&model, 1.0, [0.0], 1.0);
        let right = Primitive::from_pressure(&model, 0.125, [0.0], 0.1);
        let ic = InitialCondition::uniform(left).with_region("right", move |_| right);
        assert_eq!(ic.state("left", &[0.1]).unwrap(), left);
        assert_eq!(ic.state("right", &[0.9]).unwrap(), right);
    }

    #[test]
    fn test_missing_region_without_fallback() {
        let ic = InitialCondition::<2>::new();
        assert!(matches!(ic.state("domain", &[0.0, 0.0]), Err(DgError::InvalidConfig(_))));
        assert!(format!("{ic:?}").contains("fallback: false"));
    }

    #[test]
    fn test_position_dependent_state() {
        let ic = InitialCondition::<1>::new().with_fallback(|x| Primitive::new(1.0 + x[0], [0.0], 1.0));
        assert_eq!(ic.state("any", &[0.5]).unwrap().density, 1.5);
    }
}
