// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For European options, this has closed-form solutions involving
//! the cumulative normal distribution function Φ(x).

use crate::error::ValidationResult;
use crate::math_utils::{norm_cdf, norm_pdf};
use crate::models::contract::{ContractParameters, OptionType};
use std::collections::BTreeMap;

/// The `d₁`, `d₂` pair shared by the price and every Greek
///
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct D1D2 {
    pub d1: f64,
    pub d2: f64,
}

impl D1D2 {
    pub fn new(params: &ContractParameters) -> Self {
        let s = params.spot();
        let k = params.strike();
        let r = params.risk_free_rate();
        let sigma = params.volatility();
        let t = params.time_to_expiry();

        let vol_sqrt_t = sigma * t.sqrt();
        let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
        D1D2 {
            d1,
            d2: d1 - vol_sqrt_t,
        }
    }
}

/// First-order sensitivities of the option price
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t, per year
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

impl Greeks {
    pub const NAMES: [&'static str; 5] = ["delta", "gamma", "vega", "theta", "rho"];

    /// Look up a sensitivity by name
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "delta" => Some(self.delta),
            "gamma" => Some(self.gamma),
            "vega" => Some(self.vega),
            "theta" => Some(self.theta),
            "rho" => Some(self.rho),
            _ => None,
        }
    }

    /// `(name, value)` pairs in the order of [`Greeks::NAMES`]
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        let values = [self.delta, self.gamma, self.vega, self.theta, self.rho];
        Self::NAMES.into_iter().zip(values)
    }

    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        self.iter().collect()
    }
}

/// Closed-form pricer for one validated contract
///
/// Every call recomputes `d₁`/`d₂`; nothing is cached between calls.
#[derive(Clone, Copy, Debug)]
pub struct AnalyticPricer {
    params: ContractParameters,
}

impl AnalyticPricer {
    pub fn new(params: ContractParameters) -> Self {
        AnalyticPricer { params }
    }

    /// Validate raw inputs and build a pricer
    pub fn from_inputs(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> ValidationResult<Self> {
        let params = ContractParameters::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            option_type,
        )?;
        Ok(Self::new(params))
    }

    pub fn params(&self) -> &ContractParameters {
        &self.params
    }

    pub fn d1_d2(&self) -> D1D2 {
        D1D2::new(&self.params)
    }

    /// Black-Scholes price
    ///
    /// # Formula
    /// ```text
    /// C = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
    /// P = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
    /// ```
    pub fn price(&self) -> f64 {
        let D1D2 { d1, d2 } = self.d1_d2();
        let s = self.params.spot();
        let k_disc = self.params.strike() * self.params.discount_factor();

        match self.params.option_type() {
            OptionType::Call => s * norm_cdf(d1) - k_disc * norm_cdf(d2),
            OptionType::Put => k_disc * norm_cdf(-d2) - s * norm_cdf(-d1),
        }
    }

    /// Black-Scholes Greeks
    ///
    /// # Formulas
    /// ```text
    /// Δ_call = Φ(d₁)                Δ_put = Φ(d₁) - 1
    /// Γ      = φ(d₁) / (S σ √T)
    /// ν      = S φ(d₁) √T
    /// Θ_call = -S φ(d₁) σ / (2√T) - r K e^(-rT) Φ(d₂)
    /// Θ_put  = -S φ(d₁) σ / (2√T) + r K e^(-rT) Φ(-d₂)
    /// ρ_call =  K T e^(-rT) Φ(d₂)
    /// ρ_put  = -K T e^(-rT) Φ(-d₂)
    /// ```
    ///
    /// Gamma and vega are the same for calls and puts. Theta is per year.
    pub fn greeks(&self) -> Greeks {
        let D1D2 { d1, d2 } = self.d1_d2();
        let s = self.params.spot();
        let k = self.params.strike();
        let r = self.params.risk_free_rate();
        let sigma = self.params.volatility();
        let t = self.params.time_to_expiry();
        let sqrt_t = t.sqrt();
        let k_disc = k * self.params.discount_factor();
        let pdf_d1 = norm_pdf(d1);

        let gamma = pdf_d1 / (s * sigma * sqrt_t);
        let vega = s * pdf_d1 * sqrt_t;
        let time_decay = -s * pdf_d1 * sigma / (2.0 * sqrt_t);

        match self.params.option_type() {
            OptionType::Call => Greeks {
                delta: norm_cdf(d1),
                gamma,
                vega,
                theta: time_decay - r * k_disc * norm_cdf(d2),
                rho: t * k_disc * norm_cdf(d2),
            },
            OptionType::Put => Greeks {
                delta: norm_cdf(d1) - 1.0,
                gamma,
                vega,
                theta: time_decay + r * k_disc * norm_cdf(-d2),
                rho: -t * k_disc * norm_cdf(-d2),
            },
        }
    }

    /// Zero-volatility limit of the price
    ///
    /// ```text
    /// call: max(S - K e^(-rT), 0)      put: max(K e^(-rT) - S, 0)
    /// ```
    pub fn discounted_intrinsic(&self) -> f64 {
        let forward_gap = self.params.spot() - self.params.strike() * self.params.discount_factor();
        match self.params.option_type() {
            OptionType::Call => forward_gap.max(0.0),
            OptionType::Put => (-forward_gap).max(0.0),
        }
    }
}

pub fn bs_price(params: &ContractParameters) -> f64 {
    AnalyticPricer::new(*params).price()
}

pub fn bs_greeks(params: &ContractParameters) -> Greeks {
    AnalyticPricer::new(*params).greeks()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pricer(option_type: OptionType) -> AnalyticPricer {
        AnalyticPricer::from_inputs(100.0, 100.0, 1.0, 0.05, 0.20, option_type).unwrap()
    }

    #[test]
    fn test_atm_reference_values() {
        let call = pricer(OptionType::Call);
        let put = pricer(OptionType::Put);

        assert_relative_eq!(call.price(), 10.450583572185565, max_relative = 1e-9);
        assert_relative_eq!(put.price(), 5.573526022256971, max_relative = 1e-9);

        let g = call.greeks();
        assert_relative_eq!(g.delta, 0.6368306511756191, max_relative = 1e-9);
        assert_relative_eq!(g.gamma, 0.018762017345846895, max_relative = 1e-9);
        assert_relative_eq!(g.vega, 37.52403469169379, max_relative = 1e-9);
        assert_relative_eq!(g.theta, -6.414027546438197, max_relative = 1e-9);
        assert_relative_eq!(g.rho, 53.232481545376345, max_relative = 1e-9);
    }

    #[test]
    fn test_put_greeks() {
        let g = pricer(OptionType::Put).greeks();
        assert_relative_eq!(g.delta, -0.3631693488243809, max_relative = 1e-9);
        assert_relative_eq!(g.theta, -1.657880423934626, max_relative = 1e-9);
        assert_relative_eq!(g.rho, -41.89046090469506, max_relative = 1e-9);
    }

    #[test]
    fn test_d1_d2_spacing() {
        let D1D2 { d1, d2 } = pricer(OptionType::Call).d1_d2();
        assert_relative_eq!(d1 - d2, 0.2, epsilon = 1e-14);
        assert_relative_eq!(d1, 0.35, epsilon = 1e-14);
    }

    #[test]
    fn test_greeks_mapping() {
        let g = pricer(OptionType::Call).greeks();
        let map = g.to_map();
        assert_eq!(map.len(), 5);
        for name in Greeks::NAMES {
            assert_eq!(map.get(name).copied(), g.get(name));
        }
        assert_eq!(g.get("vanna"), None);
        let names: Vec<&str> = g.iter().map(|(n, _)| n).collect();
        assert_eq!(names, Greeks::NAMES);
    }

    #[test]
    fn test_discounted_intrinsic() {
        let call = AnalyticPricer::from_inputs(120.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
        assert_relative_eq!(
            call.discounted_intrinsic(),
            120.0 - 100.0 * (-0.05_f64).exp(),
            epsilon = 1e-12
        );
        let put = call.params().with_option_type(OptionType::Put);
        assert_eq!(AnalyticPricer::new(put).discounted_intrinsic(), 0.0);
    }
}
