//! Molecular transport coefficients.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DgError, Result};

/// Sutherland constant for air, non-dimensionalised by 273.15 K.
pub const SUTHERLAND_TEMPERATURE: f64 = 110.4 / 273.15;

/// Prandtl number used when conductivity is derived from viscosity.
pub const PRANDTL_NUMBER: f64 = 0.71;

/// Viscosity and conductivity as functions of temperature.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransportModel {
    /// Inviscid flow.
    #[default]
    None,
    /// Temperature-independent coefficients.
    Constant {
        dynamic_viscosity: f64,
        thermal_conductivity: f64,
    },
    /// Sutherland's law, scaling both reference coefficients.
    Sutherland {
        dynamic_viscosity: f64,
        thermal_conductivity: f64,
    },
}

impl TransportModel {
    /// `T^1.5 (1 + S) / (T + S)`, equal to one at `T = 1`.
    #[inline]
    pub fn sutherland_ratio(temperature: f64) -> f64 {
        (temperature * temperature * temperature).sqrt() * (1.0 + SUTHERLAND_TEMPERATURE)
            / (temperature + SUTHERLAND_TEMPERATURE)
    }

    /// Whether the model carries any viscosity.
    pub fn is_viscous(&self) -> bool {
        !matches!(self, TransportModel::None)
    }

    #[inline]
    pub fn dynamic_viscosity(&self, temperature: f64) -> f64 {
        match *self {
            TransportModel::None => 0.0,
            TransportModel::Constant {
                dynamic_viscosity, ..
            } => dynamic_viscosity,
            TransportModel::Sutherland {
                dynamic_viscosity, ..
            } => dynamic_viscosity * Self::sutherland_ratio(temperature),
        }
    }

    #[inline]
    pub fn thermal_conductivity(&self, temperature: f64) -> f64 {
        match *self {
            TransportModel::None => 0.0,
            TransportModel::Constant {
                thermal_conductivity,
                ..
            } => thermal_conductivity,
            TransportModel::Sutherland {
                thermal_conductivity,
                ..
            } => thermal_conductivity * Self::sutherland_ratio(temperature),
        }
    }

    /// Reference coefficients `(μ_ref, k_ref)`; zero for inviscid flow.
    pub fn reference_coefficients(&self) -> (f64, f64) {
        match *self {
            TransportModel::None => (0.0, 0.0),
            TransportModel::Constant {
                dynamic_viscosity,
                thermal_conductivity,
            }
            | TransportModel::Sutherland {
                dynamic_viscosity,
                thermal_conductivity,
            } => (dynamic_viscosity, thermal_conductivity),
        }
    }

    /// Both reference coefficients must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let (mu, k) = self.reference_coefficients();
        for (name, value) in [("dynamic viscosity", mu), ("thermal conductivity", k)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(DgError::InvalidConfig(format!(
                    "{} {name} must be finite and non-negative, got {value}",
                    self.name()
                )));
            }
        }
        Ok(())
    }

    /// Replace the reference conductivity with `cp μ_ref / Pr`.
    pub fn with_conductivity_from_viscosity(self, specific_heat_constant_pressure: f64) -> Self {
        let k = |mu: f64| specific_heat_constant_pressure * mu / PRANDTL_NUMBER;
        match self {
            TransportModel::None => TransportModel::None,
            TransportModel::Constant {
                dynamic_viscosity, ..
            } => TransportModel::Constant {
                dynamic_viscosity,
                thermal_conductivity: k(dynamic_viscosity),
            },
            TransportModel::Sutherland {
                dynamic_viscosity, ..
            } => TransportModel::Sutherland {
                dynamic_viscosity,
                thermal_conductivity: k(dynamic_viscosity),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransportModel::None => "none",
            TransportModel::Constant { .. } => "constant",
            TransportModel::Sutherland { .. } => "sutherland",
        }
    }
}
