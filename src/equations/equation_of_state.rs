//! Ideal-gas equation of state.
//!
//! With `γ` the specific heat ratio:
//! - `p = (γ - 1) ρ e`
//! - `a = sqrt(γ (γ - 1) e) = sqrt(γ p / ρ)`
//! - `h = γ e`
//! - `s = p / ρ^γ`
//! - Riemann invariant part `2 a / (γ - 1)`

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ideal gas with constant specific heat ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IdealGas {
    pub specific_heat_ratio: f64,
}

impl Default for IdealGas {
    fn default() -> Self {
        Self {
            specific_heat_ratio: 1.4,
        }
    }
}

impl IdealGas {
    pub fn new(specific_heat_ratio: f64) -> Self {
        Self {
            specific_heat_ratio,
        }
    }

    #[inline(always)]
    pub fn pressure_from_density_internal_energy(&self, density: f64, internal_energy: f64) -> f64 {
        (self.specific_heat_ratio - 1.0) * density * internal_energy
    }

    #[inline(always)]
    pub fn internal_energy_from_density_pressure(&self, density: f64, pressure: f64) -> f64 {
        pressure / ((self.specific_heat_ratio - 1.0) * density)
    }

    #[inline(always)]
    pub fn enthalpy_from_internal_energy(&self, internal_energy: f64) -> f64 {
        internal_energy * self.specific_heat_ratio
    }

    #[inline(always)]
    pub fn internal_energy_from_enthalpy(&self, enthalpy: f64) -> f64 {
        enthalpy / self.specific_heat_ratio
    }

    /// Sound speed; NaN for negative internal energy.
    #[inline(always)]
    pub fn sound_speed_from_internal_energy(&self, internal_energy: f64) -> f64 {
        let g = self.specific_heat_ratio;
        (g * (g - 1.0) * internal_energy).sqrt()
    }

    #[inline(always)]
    pub fn sound_speed_from_density_pressure(&self, density: f64, pressure: f64) -> f64 {
        (self.specific_heat_ratio * pressure / density).sqrt()
    }

    #[inline(always)]
    pub fn internal_energy_from_sound_speed(&self, sound_speed: f64) -> f64 {
        let g = self.specific_heat_ratio;
        sound_speed * sound_speed / (g * (g - 1.0))
    }

    /// `2 a / (γ - 1)`
    #[inline(always)]
    pub fn riemann_invariant_part(&self, internal_energy: f64) -> f64 {
        2.0 * self.sound_speed_from_internal_energy(internal_energy) / (self.specific_heat_ratio - 1.0)
    }

    #[inline(always)]
    pub fn internal_energy_from_riemann_invariant_part(&self, part: f64) -> f64 {
        self.internal_energy_from_sound_speed((self.specific_heat_ratio - 1.0) * part / 2.0)
    }

    /// `s = p / ρ^γ`
    #[inline(always)]
    pub fn entropy_from_density_pressure(&self, density: f64, pressure: f64) -> f64 {
        pressure / density.powf(self.specific_heat_ratio)
    }

    /// Inverse of [`entropy_from_density_pressure`](Self::entropy_from_density_pressure) at fixed `e`.
    #[inline(always)]
    pub fn density_from_entropy_internal_energy(&self, entropy: f64, internal_energy: f64) -> f64 {
        let g = self.specific_heat_ratio;
        ((g - 1.0) * internal_energy / entropy).powf(1.0 / (g - 1.0))
    }

    /// Isentropic density at sound speed `a`: `(a² / (γ s))^(1 / (γ - 1))`.
    #[inline(always)]
    pub fn density_from_entropy_sound_speed(&self, entropy: f64, sound_speed: f64) -> f64 {
        let g = self.specific_heat_ratio;
        (sound_speed * sound_speed / (g * entropy)).powf(1.0 / (g - 1.0))
    }
}
