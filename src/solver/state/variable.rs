//! Conserved, computational and primitive variables.

use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub};

use crate::equations::PhysicalModel;

#[inline(always)]
fn dot<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    let mut s = 0.0;
    for d in 0..D {
        s += a[d] * b[d];
    }
    s
}

// =============================================================================
// Conserved
// =============================================================================

/// Conserved variables (ρ, ρv, ρE).
///
/// Indexing runs over the `D + 2` components in that order, matching the
/// row layout of the basis-coefficient matrices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conserved<const D: usize> {
    pub density: f64,
    pub momentum: [f64; D],
    pub density_total_energy: f64,
}

impl<const D: usize> Default for Conserved<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const D: usize> Conserved<D> {
    /// Number of conserved variables.
    pub const N: usize = D + 2;

    #[inline(always)]
    pub fn new(density: f64, momentum: [f64; D], density_total_energy: f64) -> Self {
        Self {
            density,
            momentum,
            density_total_energy,
        }
    }

    #[inline(always)]
    pub fn zero() -> Self {
        Self::new(0.0, [0.0; D], 0.0)
    }

    /// Build from a component function `f(k)`, `k` in `0..D + 2`.
    #[inline(always)]
    pub fn from_fn(mut f: impl FnMut(usize) -> f64) -> Self {
        Self {
            density: f(0),
            momentum: std::array::from_fn(|d| f(d + 1)),
            density_total_energy: f(D + 1),
        }
    }

    /// Apply `f` to every component.
    #[inline(always)]
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self {
            density: f(self.density),
            momentum: self.momentum.map(&mut f),
            density_total_energy: f(self.density_total_energy),
        }
    }

    /// Largest absolute component.
    pub fn max_abs(&self) -> f64 {
        (0..Self::N).map(|k| self[k].abs()).fold(0.0, f64::max)
    }

    pub fn is_finite(&self) -> bool {
        (0..Self::N).all(|k| self[k].is_finite())
    }

    /// (ρ, v, e, p)
    #[inline]
    pub fn to_computational(&self, model: &PhysicalModel) -> Computational<D> {
        let density = self.density;
        let velocity = self.momentum.map(|m| m / density);
        let internal_energy = self.density_total_energy / density - dot(&velocity, &velocity) / 2.0;
        Computational {
            density,
            velocity,
            internal_energy,
            pressure: model.pressure_from_density_internal_energy(density, internal_energy),
        }
    }

    /// (ρ, v, T)
    #[inline]
    pub fn to_primitive(&self, model: &PhysicalModel) -> Primitive<D> {
        let density = self.density;
        let velocity = self.momentum.map(|m| m / density);
        let internal_energy = self.density_total_energy / density - dot(&velocity, &velocity) / 2.0;
        Primitive {
            density,
            velocity,
            temperature: model.temperature_from_internal_energy(internal_energy),
        }
    }
}

impl<const D: usize> Index<usize> for Conserved<D> {
    type Output = f64;

    #[inline(always)]
    fn index(&self, k: usize) -> &f64 {
        if k == 0 {
            &self.density
        } else if k <= D {
            &self.momentum[k - 1]
        } else {
            &self.density_total_energy
        }
    }
}

impl<const D: usize> IndexMut<usize> for Conserved<D> {
    #[inline(always)]
    fn index_mut(&mut self, k: usize) -> &mut f64 {
        if k == 0 {
            &mut self.density
        } else if k <= D {
            &mut self.momentum[k - 1]
        } else {
            &mut self.density_total_energy
        }
    }
}

impl<const D: usize> Add for Conserved<D> {
    type Output = Self;

    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Self::from_fn(|k| self[k] + other[k])
    }
}

impl<const D: usize> AddAssign for Conserved<D> {
    #[inline(always)]
    fn add_assign(&mut self, other: Self) {
        for k in 0..Self::N {
            self[k] += other[k];
        }
    }
}

impl<const D: usize> Sub for Conserved<D> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Self::from_fn(|k| self[k] - other[k])
    }
}

impl<const D: usize> Mul<f64> for Conserved<D> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, scalar: f64) -> Self {
        self.map(|v| v * scalar)
    }
}

impl<const D: usize> Mul<Conserved<D>> for f64 {
    type Output = Conserved<D>;

    #[inline(always)]
    fn mul(self, state: Conserved<D>) -> Conserved<D> {
        state * self
    }
}

impl<const D: usize> Neg for Conserved<D> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

// =============================================================================
// Computational
// =============================================================================

/// Computational variables (ρ, v, e, p).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Computational<const D: usize> {
    pub density: f64,
    pub velocity: [f64; D],
    pub internal_energy: f64,
    pub pressure: f64,
}

impl<const D: usize> Default for Computational<D> {
    fn default() -> Self {
        Self {
            density: 0.0,
            velocity: [0.0; D],
            internal_energy: 0.0,
            pressure: 0.0,
        }
    }
}

impl<const D: usize> Computational<D> {
    /// Fill pressure from the equation of state.
    pub fn new(model: &PhysicalModel, density: f64, velocity: [f64; D], internal_energy: f64) -> Self {
        Self {
            density,
            velocity,
            internal_energy,
            pressure: model.pressure_from_density_internal_energy(density, internal_energy),
        }
    }

    /// Fill internal energy from the equation of state.
    pub fn from_pressure(model: &PhysicalModel, density: f64, velocity: [f64; D], pressure: f64) -> Self {
        Self {
            density,
            velocity,
            internal_energy: model.internal_energy_from_density_pressure(density, pressure),
            pressure,
        }
    }

    /// `|v|²`
    #[inline(always)]
    pub fn velocity_square_summation(&self) -> f64 {
        dot(&self.velocity, &self.velocity)
    }

    /// `v · n`
    #[inline(always)]
    pub fn normal_velocity(&self, normal: &[f64; D]) -> f64 {
        dot(&self.velocity, normal)
    }

    /// `e + |v|² / 2`
    #[inline(always)]
    pub fn total_energy(&self) -> f64 {
        self.internal_energy + self.velocity_square_summation() / 2.0
    }

    #[inline(always)]
    pub fn sound_speed(&self, model: &PhysicalModel) -> f64 {
        model.sound_speed_from_density_pressure(self.density, self.pressure)
    }

    /// Normal Mach number `v · n / a`.
    #[inline]
    pub fn normal_mach_number(&self, model: &PhysicalModel, normal: &[f64; D]) -> f64 {
        self.normal_velocity(normal) / self.sound_speed(model)
    }

    #[inline]
    pub fn to_conserved(&self) -> Conserved<D> {
        let rho = self.density;
        Conserved {
            density: rho,
            momentum: self.velocity.map(|v| rho * v),
            density_total_energy: rho * self.total_energy(),
        }
    }

    #[inline]
    pub fn to_primitive(&self, model: &PhysicalModel) -> Primitive<D> {
        Primitive {
            density: self.density,
            velocity: self.velocity,
            temperature: model.temperature_from_internal_energy(self.internal_energy),
        }
    }
}

// =============================================================================
// Primitive
// =============================================================================

/// Primitive variables (ρ, v, T).
///
/// Pressure is derived through the physical model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive<const D: usize> {
    pub density: f64,
    pub velocity: [f64; D],
    pub temperature: f64,
}

impl<const D: usize> Default for Primitive<D> {
    fn default() -> Self {
        Self {
            density: 0.0,
            velocity: [0.0; D],
            temperature: 0.0,
        }
    }
}

impl<const D: usize> Primitive<D> {
    pub fn new(density: f64, velocity: [f64; D], temperature: f64) -> Self {
        Self {
            density,
            velocity,
            temperature,
        }
    }

    /// Primitive state from density, velocity and pressure.
    pub fn from_pressure(model: &PhysicalModel, density: f64, velocity: [f64; D], pressure: f64) -> Self {
        let e = model.internal_energy_from_density_pressure(density, pressure);
        Self {
            density,
            velocity,
            temperature: model.temperature_from_internal_energy(e),
        }
    }

    pub fn pressure(&self, model: &PhysicalModel) -> f64 {
        model.pressure_from_density_internal_energy(
            self.density,
            model.internal_energy_from_temperature(self.temperature),
        )
    }

    #[inline]
    pub fn to_conserved(&self, model: &PhysicalModel) -> Conserved<D> {
        let rho = self.density;
        let e = model.internal_energy_from_temperature(self.temperature);
        Conserved {
            density: rho,
            momentum: self.velocity.map(|v| rho * v),
            density_total_energy: rho * (e + dot(&self.velocity, &self.velocity) / 2.0),
        }
    }

    #[inline]
    pub fn to_computational(&self, model: &PhysicalModel) -> Computational<D> {
        Computational::new(
            model,
            self.density,
            self.velocity,
            model.internal_energy_from_temperature(self.temperature),
        )
    }
}

// =============================================================================
// VariableState
// =============================================================================

/// Which representation of a [`VariableState`] was set last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Representation {
    Conserved,
    Computational,
    Primitive,
}

/// One physical state held in all three representations.
///
/// Each `x_from_y` call overwrites `x` completely from `y`; the other
/// representations are left untouched. The constructors populate all three.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariableState<const D: usize> {
    pub conserved: Conserved<D>,
    pub computational: Computational<D>,
    pub primitive: Primitive<D>,
    authority: Representation,
}

impl<const D: usize> Default for VariableState<D> {
    fn default() -> Self {
        Self {
            conserved: Conserved::zero(),
            computational: Computational::default(),
            primitive: Primitive::default(),
            authority: Representation::Conserved,
        }
    }
}

impl<const D: usize> VariableState<D> {
    pub fn from_conserved(model: &PhysicalModel, conserved: Conserved<D>) -> Self {
        let mut state = Self {
            conserved,
            authority: Representation::Conserved,
            ..Self::default()
        };
        state.computational_from_conserved(model);
        state.primitive_from_conserved(model);
        state
    }

    pub fn from_computational(model: &PhysicalModel, computational: Computational<D>) -> Self {
        let mut state = Self {
            computational,
            authority: Representation::Computational,
            ..Self::default()
        };
        state.conserved_from_computational();
        state.primitive_from_computational(model);
        state
    }

    pub fn from_primitive(model: &PhysicalModel, primitive: Primitive<D>) -> Self {
        let mut state = Self {
            primitive,
            authority: Representation::Primitive,
            ..Self::default()
        };
        state.conserved_from_primitive(model);
        state.computational_from_primitive(model);
        state
    }

    /// Representation that was set last.
    #[inline]
    pub fn authority(&self) -> Representation {
        self.authority
    }

    /// Replace the computational variables and make them authoritative.
    pub fn set_computational(&mut self, computational: Computational<D>) {
        self.computational = computational;
        self.authority = Representation::Computational;
    }

    /// Replace the conserved variables and make them authoritative.
    pub fn set_conserved(&mut self, conserved: Conserved<D>) {
        self.conserved = conserved;
        self.authority = Representation::Conserved;
    }

    #[inline]
    pub fn conserved_from_computational(&mut self) {
        self.conserved = self.computational.to_conserved();
    }

    #[inline]
    pub fn computational_from_conserved(&mut self, model: &PhysicalModel) {
        self.computational = self.conserved.to_computational(model);
    }

    #[inline]
    pub fn conserved_from_primitive(&mut self, model: &PhysicalModel) {
        self.conserved = self.primitive.to_conserved(model);
    }

    #[inline]
    pub fn computational_from_primitive(&mut self, model: &PhysicalModel) {
        self.computational = self.primitive.to_computational(model);
    }

    #[inline]
    pub fn primitive_from_conserved(&mut self, model: &PhysicalModel) {
        self.primitive = self.conserved.to_primitive(model);
    }

    #[inline]
    pub fn primitive_from_computational(&mut self, model: &PhysicalModel) {
        self.primitive = self.computational.to_primitive(model);
    }

    /// `|v|²` of the computational variables.
    #[inline(always)]
    pub fn velocity_square_summation(&self) -> f64 {
        self.computational.velocity_square_summation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-12;

    fn model() -> PhysicalModel {
        PhysicalModel::default()
    }

    #[test]
    fn test_indexing_layout() {
        let mut u = Conserved::<2>::new(1.0, [2.0, 3.0], 4.0);
        assert_eq!(Conserved::<2>::N, 4);
        assert_eq!(u[0], 1.0);
        assert_eq!(u[2], 3.0);
        assert_eq!(u[3], 4.0);
        u[1] = -2.0;
        assert_eq!(u.momentum[0], -2.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Conserved::<1>::new(1.0, [2.0], 3.0);
        let b = Conserved::<1>::new(0.5, [1.0], 1.0);
        assert_eq!(a - b, Conserved::new(0.5, [1.0], 2.0));
        assert_eq!(2.0 * b, Conserved::new(1.0, [2.0], 2.0));
        assert_eq!(-a + a, Conserved::zero());
    }

    #[test]
    fn test_computational_roundtrip() {
        let m = model();
        let c = Computational::<2>::new(&m, 1.2, [0.3, -0.4], 2.0);
        let back = c.to_conserved().to_computational(&m);
        assert_relative_eq!(back.density, c.density, epsilon = TOL);
        assert_relative_eq!(back.velocity[0], c.velocity[0], epsilon = TOL);
        assert_relative_eq!(back.velocity[1], c.velocity[1], epsilon = TOL);
        assert_relative_eq!(back.internal_energy, c.internal_energy, epsilon = TOL);
        assert_relative_eq!(back.pressure, c.pressure, epsilon = TOL);
    }

    #[test]
    fn test_primitive_roundtrip() {
        let m = model();
        let p = Primitive::<2>::from_pressure(&m, 1.4, [1.0, 0.0], 1.0);
        assert_relative_eq!(p.pressure(&m), 1.0, epsilon = TOL);
        let back = p.to_conserved(&m).to_primitive(&m);
        assert_relative_eq!(back.temperature, p.temperature, epsilon = TOL);
        let comp = p.to_computational(&m).to_primitive(&m);
        assert_relative_eq!(comp.temperature, p.temperature, epsilon = TOL);
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let m = model();
        let mut state = VariableState::<2>::from_primitive(&m, Primitive::new(0.9, [0.2, 0.1], 1.1));
        state.computational_from_conserved(&m);
        let once = state;
        state.computational_from_conserved(&m);
        assert_eq!(state, once);
        assert_eq!(state.authority(), Representation::Primitive);
    }

    #[test]
    fn test_representations_agree() {
        let m = model();
        let state = VariableState::<1>::from_conserved(&m, Conserved::new(1.0, [0.5], 2.5));
        assert_relative_eq!(state.computational.velocity[0], 0.5, epsilon = TOL);
        assert_relative_eq!(state.computational.internal_energy, 2.375, epsilon = TOL);
        assert_relative_eq!(
            state.primitive.temperature,
            m.temperature_from_internal_energy(2.375),
            epsilon = TOL
        );
    }
}
