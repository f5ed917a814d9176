//! Composite physical model shared read-only by the whole solver.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{IdealGas, ThermodynamicModel, TransportModel};
use crate::error::{DgError, Result};

/// Thermodynamic, state and transport closure of the flow equations.
///
/// Immutable after construction; `Send + Sync` so a single instance is
/// shared across worker threads.
///
/// ```
/// use dg_flow::equations::{PhysicalModel, TransportModel};
///
/// let model = PhysicalModel::default().with_transport(TransportModel::Constant {
///     dynamic_viscosity: 1e-3,
///     thermal_conductivity: 0.0,
/// }).with_conductivity_from_viscosity();
/// let p = model.pressure_from_density_internal_energy(1.0, 2.5);
/// assert!((p - 1.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicalModel {
    pub thermodynamic: ThermodynamicModel,
    pub equation_of_state: IdealGas,
    pub transport: TransportModel,
}

impl PhysicalModel {
    /// Inviscid ideal gas.
    pub fn ideal_gas(specific_heat_ratio: f64, specific_heat_constant_volume: f64) -> Self {
        Self {
            thermodynamic: ThermodynamicModel::new(specific_heat_constant_volume),
            equation_of_state: IdealGas::new(specific_heat_ratio),
            transport: TransportModel::None,
        }
    }

    pub fn with_transport(mut self, transport: TransportModel) -> Self {
        self.transport = transport;
        self
    }

    /// Derive the reference conductivity as `cp μ_ref / Pr`.
    pub fn with_conductivity_from_viscosity(mut self) -> Self {
        self.transport = self
            .transport
            .with_conductivity_from_viscosity(self.specific_heat_constant_pressure());
        self
    }

    /// Check that the model parameters describe a physical gas.
    pub fn validate(&self) -> Result<()> {
        let gamma = self.specific_heat_ratio();
        if !(gamma > 1.0) {
            return Err(DgError::InvalidConfig(format!(
                "specific heat ratio must exceed 1, got {gamma}"
            )));
        }
        let cv = self.thermodynamic.specific_heat_constant_volume;
        if !(cv > 0.0) {
            return Err(DgError::InvalidConfig(format!(
                "specific heat at constant volume must be positive, got {cv}"
            )));
        }
        self.transport.validate()
    }

    #[inline(always)]
    pub fn specific_heat_ratio(&self) -> f64 {
        self.equation_of_state.specific_heat_ratio
    }

    /// `cp = γ cv`
    #[inline]
    pub fn specific_heat_constant_pressure(&self) -> f64 {
        self.specific_heat_ratio() * self.thermodynamic.specific_heat_constant_volume
    }

    #[inline(always)]
    pub fn internal_energy_from_temperature(&self, temperature: f64) -> f64 {
        self.thermodynamic.internal_energy_from_temperature(temperature)
    }

    #[inline(always)]
    pub fn temperature_from_internal_energy(&self, internal_energy: f64) -> f64 {
        self.thermodynamic.temperature_from_internal_energy(internal_energy)
    }

    #[inline(always)]
    pub fn pressure_from_density_internal_energy(&self, density: f64, internal_energy: f64) -> f64 {
        self.equation_of_state
            .pressure_from_density_internal_energy(density, internal_energy)
    }

    #[inline(always)]
    pub fn internal_energy_from_density_pressure(&self, density: f64, pressure: f64) -> f64 {
        self.equation_of_state
            .internal_energy_from_density_pressure(density, pressure)
    }

    #[inline(always)]
    pub fn enthalpy_from_internal_energy(&self, internal_energy: f64) -> f64 {
        self.equation_of_state.enthalpy_from_internal_energy(internal_energy)
    }

    #[inline(always)]
    pub fn internal_energy_from_enthalpy(&self, enthalpy: f64) -> f64 {
        self.equation_of_state.internal_energy_from_enthalpy(enthalpy)
    }

    #[inline(always)]
    pub fn sound_speed_from_internal_energy(&self, internal_energy: f64) -> f64 {
        self.equation_of_state
            .sound_speed_from_internal_energy(internal_energy)
    }

    #[inline(always)]
    pub fn sound_speed_from_density_pressure(&self, density: f64, pressure: f64) -> f64 {
        self.equation_of_state
            .sound_speed_from_density_pressure(density, pressure)
    }

    #[inline(always)]
    pub fn internal_energy_from_sound_speed(&self, sound_speed: f64) -> f64 {
        self.equation_of_state
            .internal_energy_from_sound_speed(sound_speed)
    }

    #[inline(always)]
    pub fn riemann_invariant_part(&self, internal_energy: f64) -> f64 {
        self.equation_of_state.riemann_invariant_part(internal_energy)
    }

    #[inline(always)]
    pub fn internal_energy_from_riemann_invariant_part(&self, part: f64) -> f64 {
        self.equation_of_state
            .internal_energy_from_riemann_invariant_part(part)
    }

    #[inline(always)]
    pub fn entropy_from_density_pressure(&self, density: f64, pressure: f64) -> f64 {
        self.equation_of_state
            .entropy_from_density_pressure(density, pressure)
    }

    #[inline(always)]
    pub fn density_from_entropy_internal_energy(&self, entropy: f64, internal_energy: f64) -> f64 {
        self.equation_of_state
            .density_from_entropy_internal_energy(entropy, internal_energy)
    }

    #[inline(always)]
    pub fn density_from_entropy_sound_speed(&self, entropy: f64, sound_speed: f64) -> f64 {
        self.equation_of_state
            .density_from_entropy_sound_speed(entropy, sound_speed)
    }

    #[inline(always)]
    pub fn dynamic_viscosity(&self, temperature: f64) -> f64 {
        self.transport.dynamic_viscosity(temperature)
    }

    #[inline(always)]
    pub fn thermal_conductivity(&self, temperature: f64) -> f64 {
        self.transport.thermal_conductivity(temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_unit_sound_speed_at_unit_temperature() {
        let model = PhysicalModel::default();
        let e = model.internal_energy_from_temperature(1.0);
        assert_relative_eq!(model.sound_speed_from_internal_energy(e), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_conductivity_uses_cp() {
        let model = PhysicalModel::ideal_gas(1.4, 2.0)
            .with_transport(TransportModel::Constant {
                dynamic_viscosity: 0.71,
                thermal_conductivity: 0.0,
            })
            .with_conductivity_from_viscosity();
        assert_relative_eq!(model.thermal_conductivity(3.0), 2.8, epsilon = 1e-14);
    }

    #[test]
    fn test_validate() {
        assert!(PhysicalModel::default().validate().is_ok());
        assert!(PhysicalModel::ideal_gas(1.0, 1.0).validate().is_err());
        assert!(PhysicalModel::ideal_gas(1.4, -1.0).validate().is_err());
        let bad = PhysicalModel::default().with_transport(TransportModel::Constant {
            dynamic_viscosity: -1.0,
            thermal_conductivity: 0.0,
        });
        assert!(bad.validate().is_err());
        let sutherland = PhysicalModel::default().with_transport(TransportModel::Sutherland {
            dynamic_viscosity: 1e-3,
            thermal_conductivity: -1e-3,
        });
        assert!(sutherland.validate().is_err());
    }
}
