//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! - **Call**: max(S_T - K, 0) - right to buy at strike K
//! - **Put**: max(K - S_T, 0) - right to sell at strike K
//!
//! Payoffs look at the terminal price only; a full path can be passed to
//! [`Payoff::on_path`], which reads its last element.

use crate::models::contract::{ContractParameters, OptionType};
use ndarray::{Array1, ArrayView1};

/// European vanilla payoff
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Payoff {
    /// European call option: max(S_T - K, 0)
    EuropeanCall { k: f64 },

    /// European put option: max(K - S_T, 0)
    EuropeanPut { k: f64 },
}

impl Payoff {
    pub fn for_contract(params: &ContractParameters) -> Self {
        let k = params.strike();
        match params.option_type() {
            OptionType::Call => Payoff::EuropeanCall { k },
            OptionType::Put => Payoff::EuropeanPut { k },
        }
    }

    /// Payoff at a single terminal price; never negative
    #[inline]
    pub fn calculate(&self, terminal_price: f64) -> f64 {
        match self {
            Payoff::EuropeanCall { k } => (terminal_price - k).max(0.0),
            Payoff::EuropeanPut { k } => (k - terminal_price).max(0.0),
        }
    }

    /// Payoff of a full path `[S_0, S_1, ..., S_T]`; an empty path pays nothing
    pub fn on_path(&self, path: &[f64]) -> f64 {
        path.last().map_or(0.0, |&s_t| self.calculate(s_t))
    }

    /// Elementwise payoff over a vector of terminal prices
    pub fn apply(&self, terminal_prices: ArrayView1<f64>) -> Array1<f64> {
        terminal_prices.mapv(|s_t| self.calculate(s_t))
    }
}
