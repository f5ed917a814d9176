//! CFL-limited time step.

use crate::error::{DgError, Result};

/// Stable time step of one quadrature point.
///
/// `Δt = CFL · h_min / (λ (p + 1)²)` with `λ = |v| + a` the local spectral
/// radius and `p` the polynomial order.
#[inline]
pub fn local_time_step(cfl: f64, h_min: f64, spectral_radius: f64, order: usize) -> f64 {
    let p1 = order as f64 + 1.0;
    cfl * h_min / (spectral_radius * p1 * p1)
}

/// Reject a time step that is zero, negative or not finite.
#[inline]
pub fn check_time_step(dt: f64) -> Result<f64> {
    if dt > 0.0 && dt.is_finite() {
        Ok(dt)
    } else {
        Err(DgError::InvalidTimeStep { dt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-14;

    #[test]
    fn test_dt_scaling_with_order() {
        let dt_p1 = local_time_step(0.5, 0.1, 2.0, 1);
        let dt_p3 = local_time_step(0.5, 0.1, 2.0, 3);
        assert_relative_eq!(dt_p1, 0.5 * 0.1 / (2.0 * 4.0), epsilon = TOL);
        assert_relative_eq!(dt_p3 / dt_p1, 4.0 / 16.0, epsilon = TOL);
    }

    #[test]
    fn test_check_time_step() {
        assert_eq!(check_time_step(1e-3), Ok(1e-3));
        assert!(check_time_step(0.0).is_err());
        assert!(check_time_step(-1e-3).is_err());
        assert!(check_time_step(f64::NAN).is_err());
        // A vanishing spectral radius gives an unbounded step.
        assert!(check_time_step(local_time_step(0.5, 0.1, 0.0, 1)).is_err());
    }
}
