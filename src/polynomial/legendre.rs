//! Legendre polynomial evaluation.
//!
//! Legendre polynomials are orthogonal on [-1, 1]:
//! ∫ P_m P_n dx = 2/(2n+1) δ_mn

/// Evaluate P_n(x) with the three-term recurrence
/// (k+1) P_{k+1} = (2k+1) x P_k - k P_{k-1}.
pub fn legendre(n: usize, x: f64) -> f64 {
    legendre_and_derivative(n, x).0
}

/// Evaluate P_n(x) and P'_n(x) in a single recurrence pass.
///
/// The derivative uses the recurrence P'_{k+1} = P'_{k-1} + (2k+1) P_k,
/// which stays finite at x = ±1.
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    let (mut p_prev, mut p_curr) = (1.0, x);
    let (mut dp_prev, mut dp_curr) = (0.0, 1.0);

    if n == 0 {
        return (p_prev, dp_prev);
    }

    for k in 1..n {
        let kf = k as f64;
        let p_next = ((2.0 * kf + 1.0) * x * p_curr - kf * p_prev) / (kf + 1.0);
        let dp_next = dp_prev + (2.0 * kf + 1.0) * p_curr;
        p_prev = p_curr;
        p_curr = p_next;
        dp_prev = dp_curr;
        dp_curr = dp_next;
    }

    (p_curr, dp_curr)
}

/// Orthonormal Legendre factor φ_n = sqrt((2n+1)/2) P_n and its derivative.
#[inline]
pub fn normalized_legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    let norm = ((2 * n + 1) as f64 / 2.0).sqrt();
    let (p, dp) = legendre_and_derivative(n, x);
    (norm * p, norm * dp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-13;

    #[test]
    fn test_low_order_closed_forms() {
        let x: f64 = 0.3;
        assert_relative_eq!(legendre(0, x), 1.0, epsilon = TOL);
        assert_relative_eq!(legendre(1, x), x, epsilon = TOL);
        assert_relative_eq!(legendre(2, x), 0.5 * (3.0 * x * x - 1.0), epsilon = TOL);
        assert_relative_eq!(
            legendre(3, x),
            0.5 * (5.0 * x.powi(3) - 3.0 * x),
            epsilon = TOL
        );
    }

    #[test]
    fn test_derivative_closed_forms() {
        let x: f64 = -0.7;
        assert_relative_eq!(legendre_and_derivative(0, x).1, 0.0, epsilon = TOL);
        assert_relative_eq!(legendre_and_derivative(1, x).1, 1.0, epsilon = TOL);
        assert_relative_eq!(legendre_and_derivative(2, x).1, 3.0 * x, epsilon = TOL);
        assert_relative_eq!(
            legendre_and_derivative(3, x).1,
            0.5 * (15.0 * x * x - 3.0),
            epsilon = TOL
        );
    }

    #[test]
    fn test_endpoint_derivative() {
        // P'_n(1) = n(n+1)/2
        for n in 0..8 {
            let (p, dp) = legendre_and_derivative(n, 1.0);
            assert_relative_eq!(p, 1.0, epsilon = TOL);
            assert_relative_eq!(dp, (n * (n + 1)) as f64 / 2.0, epsilon = 1e-11);
        }
    }

    #[test]
    fn test_normalization() {
        let (phi, _) = normalized_legendre_and_derivative(0, 0.1);
        assert_relative_eq!(phi * phi * 2.0, 1.0, epsilon = TOL);
    }
}
