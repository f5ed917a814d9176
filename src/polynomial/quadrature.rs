//! Gauss-Legendre quadrature.
//!
//! The n-point rule integrates polynomials up to degree 2n-1 exactly. Nodes
//! are the roots of P_n, found by Newton iteration from Chebyshev guesses;
//! weights are w_j = 2 / ((1 - x_j²) P'_n(x_j)²).

use super::legendre::legendre_and_derivative;
use std::f64::consts::PI;

/// Nodes and weights of a one-dimensional Gauss-Legendre rule on [-1, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct GaussLegendre {
    pub nodes: Vec<f64>,
    pub weights: Vec<f64>,
}

impl GaussLegendre {
    /// Number of quadrature points.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Integrate `f` over [-1, 1].
    pub fn integrate<F: Fn(f64) -> f64>(&self, f: F) -> f64 {
        self.nodes
            .iter()
            .zip(&self.weights)
            .map(|(&x, &w)| w * f(x))
            .sum()
    }
}

/// Build the `n`-point Gauss-Legendre rule, nodes sorted ascending.
pub fn gauss_legendre(n: usize) -> GaussLegendre {
    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];

    for i in 0..n {
        // Root i counted from the right end.
        let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        for _ in 0..100 {
            let (p, dp) = legendre_and_derivative(n, x);
            let dx = p / dp;
            x -= dx;
            if dx.abs() < 1e-16 {
                break;
            }
        }
        let (_, dp) = legendre_and_derivative(n, x);
        nodes[n - 1 - i] = x;
        weights[n - 1 - i] = 2.0 / ((1.0 - x * x) * dp * dp);
    }

    GaussLegendre { nodes, weights }
}
