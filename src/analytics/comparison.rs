// src/analytics/comparison.rs
//! Cross-validation of a Monte Carlo estimate against the closed form

use crate::mc::mc_engine::McEstimate;

/// One Monte Carlo run set against the Black-Scholes price of the same contract
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Comparison {
    pub analytic_price: f64,
    pub monte_carlo_price: f64,
    /// `100 * |mc - analytic| / analytic`
    pub relative_error_percent: f64,
    pub standard_error: f64,
    pub num_simulations: usize,
}

impl Comparison {
    pub fn new(analytic_price: f64, estimate: &McEstimate) -> Self {
        Comparison {
            analytic_price,
            monte_carlo_price: estimate.price,
            relative_error_percent: relative_error_percent(analytic_price, estimate.price),
            standard_error: estimate.standard_error,
            num_simulations: estimate.num_simulations,
        }
    }

    /// Distance between the two prices in Monte Carlo standard errors
    pub fn z_score(&self) -> f64 {
        let diff = self.monte_carlo_price - self.analytic_price;
        if self.standard_error > 0.0 {
            diff / self.standard_error
        } else if diff == 0.0 {
            0.0
        } else {
            diff.signum() * f64::INFINITY
        }
    }

    pub fn within_standard_errors(&self, k: f64) -> bool {
        self.z_score().abs() <= k
    }
}

/// Relative error in percent; a zero reference yields 0 % for a zero estimate, ∞ otherwise
pub fn relative_error_percent(reference: f64, estimate: f64) -> f64 {
    let diff = (estimate - reference).abs();
    if reference != 0.0 {
        100.0 * diff / reference.abs()
    } else if diff == 0.0 {
        0.0
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(price: f64, standard_error: f64) -> McEstimate {
        McEstimate {
            price,
            standard_error,
            num_simulations: 1_000,
        }
    }

    #[test]
    fn test_relative_error() {
        let c = Comparison::new(4.0, &estimate(4.2, 0.1));
        assert!((c.relative_error_percent - 5.0).abs() < 1e-10);
        assert!((c.z_score() - 2.0).abs() < 1e-10);
        assert!(c.within_standard_errors(3.0));
        assert!(!c.within_standard_errors(1.5));
        assert_eq!(c.num_simulations, 1_000);
    }

    #[test]
    fn test_zero_reference() {
        assert_eq!(relative_error_percent(0.0, 0.0), 0.0);
        assert_eq!(relative_error_percent(0.0, 1e-3), f64::INFINITY);
    }

    #[test]
    fn test_zero_standard_error() {
        assert_eq!(Comparison::new(1.0, &estimate(1.0, 0.0)).z_score(), 0.0);
        assert_eq!(
            Comparison::new(1.0, &estimate(0.5, 0.0)).z_score(),
            f64::NEG_INFINITY
        );
    }
}
