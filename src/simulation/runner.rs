//! Simulation runner implementation.

use log::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{DgError, Result};
use crate::solver::DgSolver;
use crate::time::IntegratorInfo;

// =============================================================================
// Run Configuration
// =============================================================================

/// Configuration of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Maximum number of time steps.
    pub iterations: usize,
    /// CFL number overriding the solver's.
    pub cfl: Option<f64>,
    /// Stop once the simulated time reaches this value; the last step is
    /// shortened to land on it.
    pub end_time: Option<f64>,
    /// Steps between progress log lines (0 disables them).
    pub log_interval: usize,
    /// Stop as soon as the relative error is not finite.
    pub stop_on_divergence: bool,
    /// Stop once every component of the relative error drops below this.
    pub tolerance: Option<f64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            cfl: None,
            end_time: None,
            log_interval: 10,
            stop_on_divergence: true,
            tolerance: None,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(cfl) = self.cfl
            && !(cfl > 0.0 && cfl.is_finite())
        {
            return Err(DgError::InvalidConfig(format!("CFL override must be positive, got {cfl}")));
        }
        if let Some(tol) = self.tolerance
            && !(tol > 0.0)
        {
            return Err(DgError::InvalidConfig(format!("tolerance must be positive, got {tol}")));
        }
        if let Some(t) = self.end_time
            && !t.is_finite()
        {
            return Err(DgError::InvalidConfig(format!("end time must be finite, got {t}")));
        }
        Ok(())
    }
}

// =============================================================================
// Run Summary
// =============================================================================

/// Outcome of a simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunSummary {
    /// Steps taken in this run.
    pub steps: usize,
    /// Simulated time at the end of the run.
    pub final_time: f64,
    pub dt_min: f64,
    pub dt_max: f64,
    /// Relative error after the last step.
    pub relative_error: Vec<f64>,
    /// Relative error after every step.
    pub error_history: Vec<Vec<f64>>,
    /// The relative error became NaN or infinite.
    pub diverged: bool,
    /// The relative error fell below the configured tolerance.
    pub converged: bool,
    /// Wall-clock time in seconds.
    pub wall_time: f64,
}

impl RunSummary {
    fn empty(final_time: f64) -> Self {
        Self {
            steps: 0,
            final_time,
            dt_min: f64::INFINITY,
            dt_max: 0.0,
            relative_error: Vec::new(),
            error_history: Vec::new(),
            diverged: false,
            converged: false,
            wall_time: 0.0,
        }
    }

    /// Largest component of the final relative error.
    pub fn max_relative_error(&self) -> f64 {
        self.relative_error.iter().copied().fold(0.0, f64::max)
    }
}

// =============================================================================
// Simulation Runner
// =============================================================================

/// Drives a [`DgSolver`] through a run.
///
/// Each step recomputes Δt from the CFL condition, advances the solver and
/// records the relative error. Time-step failures are returned as errors;
/// divergence of the relative error is reported in the summary.
#[derive(Debug)]
pub struct Simulation<const D: usize> {
    solver: DgSolver<D>,
    config: RunConfig,
}

impl<const D: usize> Simulation<D> {
    pub fn new(solver: DgSolver<D>) -> Self {
        Self {
            solver,
            config: RunConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    pub fn with_cfl(mut self, cfl: f64) -> Self {
        self.config.cfl = Some(cfl);
        self
    }

    pub fn with_end_time(mut self, end_time: f64) -> Self {
        self.config.end_time = Some(end_time);
        self
    }

    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.config.log_interval = interval;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = Some(tolerance);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn solver(&self) -> &DgSolver<D> {
        &self.solver
    }

    pub fn solver_mut(&mut self) -> &mut DgSolver<D> {
        &mut self.solver
    }

    pub fn into_solver(self) -> DgSolver<D> {
        self.solver
    }

    /// Run without a callback.
    pub fn run(&mut self) -> Result<RunSummary> {
        self.run_with_callback(|_, _| {})
    }

    /// Run, calling `callback(solver, relative_error)` after every step.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Result<RunSummary>
    where
        F: FnMut(&DgSolver<D>, &[f64]),
    {
        self.config.validate()?;
        let config = self.config;
        let cfl = config.cfl.unwrap_or(self.solver.config().cfl);
        let start_wall = std::time::Instant::now();
        let mut summary = RunSummary::empty(self.solver.time());

        info!(
            "Starting run: {} steps, {} integrator, CFL {}",
            config.iterations,
            self.solver.config().time_integration.name(),
            cfl
        );

        for _ in 0..config.iterations {
            let t = self.solver.time();
            if let Some(end) = config.end_time
                && t >= end
            {
                break;
            }

            let mut dt = self.solver.time_step_for(cfl)?;
            if let Some(end) = config.end_time
                && t + dt > end
            {
                dt = end - t;
            }
            self.solver.step_with(dt)?;

            summary.steps += 1;
            summary.dt_min = summary.dt_min.min(dt);
            summary.dt_max = summary.dt_max.max(dt);

            let error = self.solver.relative_error();
            callback(&self.solver, &error);

            if config.log_interval > 0 && summary.steps % config.log_interval == 0 {
                debug!(
                    "step {}: t = {:.6e}, dt = {:.3e}, relative error = {:?}",
                    self.solver.iteration(),
                    self.solver.time(),
                    dt,
                    error
                );
            }

            let diverged = error.iter().any(|e| !e.is_finite());
            let converged = !diverged
                && config
                    .tolerance
                    .is_some_and(|tol| error.iter().all(|&e| e < tol));
            summary.error_history.push(error);

            if diverged {
                summary.diverged = true;
                warn!(
                    "relative error is not finite at step {} (t = {:.6e})",
                    self.solver.iteration(),
                    self.solver.time()
                );
                if config.stop_on_divergence {
                    break;
                }
            }
            if converged {
                summary.converged = true;
                break;
            }
        }

        summary.final_time = self.solver.time();
        summary.relative_error = summary.error_history.last().cloned().unwrap_or_default();
        summary.wall_time = start_wall.elapsed().as_secs_f64();

        let reached_end = config.end_time.is_some_and(|end| summary.final_time >= end);
        if config.tolerance.is_some() && !summary.converged && !summary.diverged && !reached_end {
            warn!(
                "iteration limit of {} reached without converging (relative error {:.3e})",
                config.iterations,
                summary.max_relative_error()
            );
        }
        info!(
            "Run complete: {} steps, t = {:.6e}, dt in [{:.3e}, {:.3e}], {:.2}s",
            summary.steps, summary.final_time, summary.dt_min, summary.dt_max, summary.wall_time
        );

        Ok(summary)
    }
}
