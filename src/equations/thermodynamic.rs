//! Caloric equation of state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calorically perfect gas: `e = cv T`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThermodynamicModel {
    /// Specific heat at constant volume `cv`.
    pub specific_heat_constant_volume: f64,
}

impl Default for ThermodynamicModel {
    /// Non-dimensional air, `cv = 1 / (γ (γ - 1))` with γ = 1.4.
    fn default() -> Self {
        Self {
            specific_heat_constant_volume: 25.0 / 14.0,
        }
    }
}

impl ThermodynamicModel {
    pub fn new(specific_heat_constant_volume: f64) -> Self {
        Self {
            specific_heat_constant_volume,
        }
    }

    #[inline(always)]
    pub fn internal_energy_from_temperature(&self, temperature: f64) -> f64 {
        self.specific_heat_constant_volume * temperature
    }

    #[inline(always)]
    pub fn temperature_from_internal_energy(&self, internal_energy: f64) -> f64 {
        internal_energy / self.specific_heat_constant_volume
    }
}
