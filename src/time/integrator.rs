//! Explicit multi-stage time integrators.
//!
//! Every scheme is written in the blended form used by the DG coefficient
//! update. With `u⁰` the snapshot taken once at the start of the step and
//! `u` the working coefficients, stage `i` applies
//!
//! ```text
//! u ← bᵢ u + aᵢ u⁰ + cᵢ Δt R(u) M⁻¹
//! ```
//!
//! | Scheme | Stages `(a, b, c)` |
//! |--------|--------------------|
//! | Forward Euler | `(1, 0, 1)` |
//! | Heun RK2 | `(1, 0, 1)`, `(½, ½, ½)` |
//! | SSP-RK3 | `(1, 0, 1)`, `(¾, ¼, ¼)`, `(⅓, ⅔, ⅔)` |

use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::cfl::check_time_step;
use crate::error::Result;

// =============================================================================
// Stage Coefficients
// =============================================================================

/// Blend coefficients of one stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageCoefficients {
    /// `a`, weight of the step snapshot
    pub snapshot: f64,
    /// `b`, weight of the working coefficients
    pub working: f64,
    /// `c`, weight of `Δt R M⁻¹`
    pub residual: f64,
}

impl StageCoefficients {
    pub const fn new(snapshot: f64, working: f64, residual: f64) -> Self {
        Self {
            snapshot,
            working,
            residual,
        }
    }

    /// `b u + a u⁰ + c Δt r` for one scalar.
    #[inline(always)]
    pub fn blend(&self, working: f64, snapshot: f64, dt_residual: f64) -> f64 {
        self.working * working + self.snapshot * snapshot + self.residual * dt_residual
    }
}

const FORWARD_EULER: [StageCoefficients; 1] = [StageCoefficients::new(1.0, 0.0, 1.0)];

const HEUN_RK2: [StageCoefficients; 2] = [
    StageCoefficients::new(1.0, 0.0, 1.0),
    StageCoefficients::new(0.5, 0.5, 0.5),
];

const SSPRK3: [StageCoefficients; 3] = [
    StageCoefficients::new(1.0, 0.0, 1.0),
    StageCoefficients::new(3.0 / 4.0, 1.0 / 4.0, 1.0 / 4.0),
    StageCoefficients::new(1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0),
];

// =============================================================================
// Integrator Info
// =============================================================================

/// Non-generic information about a time integrator.
pub trait IntegratorInfo: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    fn order(&self) -> usize;

    fn n_stages(&self) -> usize;
}

// =============================================================================
// Staged System
// =============================================================================

/// A semi-discrete system advanced by the blended stage update.
pub trait StagedSystem {
    /// Copy the working coefficients into the snapshot.
    fn snapshot(&mut self);

    /// Assemble the residual from the working coefficients.
    fn assemble_residual(&mut self);

    /// Apply one stage blend with time step `dt`.
    fn blend(&mut self, stage: &StageCoefficients, dt: f64);
}

// =============================================================================
// Integrator Kind
// =============================================================================

/// Built-in explicit integrators, selected once at setup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeIntegrationKind {
    /// Forward Euler (1st order, for testing)
    ForwardEuler,
    /// Heun's two-stage method
    #[cfg_attr(feature = "serde", serde(rename = "heun_rk2"))]
    HeunRK2,
    /// SSP-RK3 (default, recommended for hyperbolic problems)
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "ssprk3"))]
    SSPRK3,
}

impl TimeIntegrationKind {
    pub const ALL: [TimeIntegrationKind; 3] = [
        TimeIntegrationKind::ForwardEuler,
        TimeIntegrationKind::HeunRK2,
        TimeIntegrationKind::SSPRK3,
    ];

    /// Stage table of this scheme.
    pub fn stages(&self) -> &'static [StageCoefficients] {
        match self {
            TimeIntegrationKind::ForwardEuler => &FORWARD_EULER,
            TimeIntegrationKind::HeunRK2 => &HEUN_RK2,
            TimeIntegrationKind::SSPRK3 => &SSPRK3,
        }
    }

    /// Advance `system` by one full step of size `dt`.
    ///
    /// The snapshot is taken once before the first stage; `dt` is fixed for
    /// all stages. Fails with [`DgError::InvalidTimeStep`] before any stage
    /// runs if `dt` is not a positive finite number.
    ///
    /// [`DgError::InvalidTimeStep`]: crate::error::DgError::InvalidTimeStep
    pub fn step<S: StagedSystem>(&self, system: &mut S, dt: f64) -> Result<()> {
        let dt = check_time_step(dt)?;
        system.snapshot();
        let n = self.n_stages();
        for (i, stage) in self.stages().iter().enumerate() {
            system.assemble_residual();
            system.blend(stage, dt);
            trace!("{} stage {}/{n} done (dt = {dt:e})", self.name(), i + 1);
        }
        Ok(())
    }
}

impl IntegratorInfo for TimeIntegrationKind {
    fn name(&self) -> &'static str {
        match self {
            TimeIntegrationKind::ForwardEuler => "forward-euler",
            TimeIntegrationKind::HeunRK2 => "heun-rk2",
            TimeIntegrationKind::SSPRK3 => "ssp-rk3",
        }
    }

    fn order(&self) -> usize {
        self.stages().len()
    }

    fn n_stages(&self) -> usize {
        self.stages().len()
    }
}

impl std::fmt::Display for TimeIntegrationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
