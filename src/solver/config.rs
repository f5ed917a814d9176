//! Solver configuration.
//!
//! Set once before the first time step. The solver copies the config at
//! construction and never mutates it afterwards.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DgError, Result};
use crate::flux::{ConvectiveFluxKind, NumericalFlux};
use crate::time::{IntegratorInfo, TimeIntegrationKind};

/// Governing equations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EquationModel {
    /// Inviscid compressible flow
    #[default]
    Euler,
    /// Compressible flow with viscous and heat fluxes
    NavierStokes,
}

impl EquationModel {
    #[inline]
    pub fn is_viscous(&self) -> bool {
        matches!(self, EquationModel::NavierStokes)
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquationModel::Euler => "euler",
            EquationModel::NavierStokes => "navier_stokes",
        }
    }
}

/// Bassi-Rebay gradient reconstruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViscousFluxKind {
    /// One shared lifting: face gradients use the full element gradient.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "br1"))]
    BR1,
    /// One lifting per face: the face gradient on face f adds only lifting f.
    #[cfg_attr(feature = "serde", serde(rename = "br2"))]
    BR2,
}

impl ViscousFluxKind {
    pub fn name(&self) -> &'static str {
        match self {
            ViscousFluxKind::BR1 => "br1",
            ViscousFluxKind::BR2 => "br2",
        }
    }
}

/// Convective flux at boundary faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BoundaryFluxMode {
    /// Numerical flux with the boundary state as the right state.
    #[default]
    NumericalFlux,
    /// Exact normal flux of the boundary state.
    BoundaryState,
}

/// Configuration of a [`DgSolver`](super::DgSolver).
///
/// # Example
///
/// ```
/// use dg_flow::flux::ConvectiveFluxKind;
/// use dg_flow::solver::{EquationModel, SolverConfig, ViscousFluxKind};
/// use dg_flow::time::TimeIntegrationKind;
///
/// let config = SolverConfig::default()
///     .with_equation(EquationModel::NavierStokes)
///     .with_convective_flux(ConvectiveFluxKind::Roe)
///     .with_viscous_flux(ViscousFluxKind::BR2)
///     .with_time_integration(TimeIntegrationKind::HeunRK2)
///     .with_cfl(0.2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    pub equation: EquationModel,
    pub convective_flux: ConvectiveFluxKind,
    pub viscous_flux: ViscousFluxKind,
    pub boundary_flux: BoundaryFluxMode,
    pub time_integration: TimeIntegrationKind,
    /// CFL number used by [`DgSolver::stable_time_step`](super::DgSolver::stable_time_step).
    pub cfl: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            equation: EquationModel::Euler,
            convective_flux: ConvectiveFluxKind::Hllc,
            viscous_flux: ViscousFluxKind::BR1,
            boundary_flux: BoundaryFluxMode::NumericalFlux,
            time_integration: TimeIntegrationKind::SSPRK3,
            cfl: 0.5,
        }
    }
}

impl SolverConfig {
    pub fn with_equation(mut self, equation: EquationModel) -> Self {
        self.equation = equation;
        self
    }

    pub fn with_convective_flux(mut self, flux: ConvectiveFluxKind) -> Self {
        self.convective_flux = flux;
        self
    }

    pub fn with_viscous_flux(mut self, flux: ViscousFluxKind) -> Self {
        self.viscous_flux = flux;
        self
    }

    pub fn with_boundary_flux(mut self, mode: BoundaryFluxMode) -> Self {
        self.boundary_flux = mode;
        self
    }

    pub fn with_time_integration(mut self, kind: TimeIntegrationKind) -> Self {
        self.time_integration = kind;
        self
    }

    pub fn with_cfl(mut self, cfl: f64) -> Self {
        self.cfl = cfl;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.cfl > 0.0 && self.cfl.is_finite()) {
            return Err(DgError::InvalidConfig(format!(
                "CFL number must be positive and finite, got {}",
                self.cfl
            )));
        }
        Ok(())
    }

    /// One-line description for logging.
    pub fn summary(&self) -> String {
        let viscous = if self.equation.is_viscous() {
            format!(", viscous {}", self.viscous_flux.name())
        } else {
            String::new()
        };
        format!(
            "{} with {} flux{}, {} order {} in {} stages (CFL {})",
            self.equation.name(),
            NumericalFlux::<1>::name(&self.convective_flux),
            viscous,
            self.time_integration.name(),
            self.time_integration.order(),
            self.time_integration.n_stages(),
            self.cfl
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.equation, EquationModel::Euler);
        assert_eq!(config.convective_flux, ConvectiveFluxKind::Hllc);
        assert_eq!(config.boundary_flux, BoundaryFluxMode::NumericalFlux);
        assert_eq!(config.time_integration, TimeIntegrationKind::SSPRK3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_cfl() {
        for cfl in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let err = SolverConfig::default().with_cfl(cfl).validate().unwrap_err();
            assert!(matches!(err, DgError::InvalidConfig(_)));
        }
    }

    #[test]
    fn test_summary_mentions_choices() {
        let s = SolverConfig::default()
            .with_equation(EquationModel::NavierStokes)
            .with_viscous_flux(ViscousFluxKind::BR2)
            .summary();
        assert!(s.contains("navier_stokes"));
        assert!(s.contains("hllc"));
        assert!(s.contains("br2"));
        assert!(s.contains("ssp-rk3 order 3 in 3 stages"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let config = SolverConfig::default()
            .with_equation(EquationModel::NavierStokes)
            .with_boundary_flux(BoundaryFluxMode::BoundaryState);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"navier_stokes\""));
        assert!(json.contains("\"ssprk3\""));
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
