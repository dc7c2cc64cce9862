// src/models/contract.rs
//! European option contract terms
//!
//! A [`ContractParameters`] value is validated once, at construction, and is
//! immutable afterwards. Both pricing engines take it by reference, so any
//! contract that reaches the pricing math is known to satisfy:
//!
//! ```text
//! S > 0,  K > 0,  T > 0,  σ > 0,  r finite
//! ```
//!
//! which keeps `σ√T` away from zero and `ln(S/K)` finite.

use crate::error::{validation::*, ValidationError, ValidationResult};
use std::fmt;
use std::str::FromStr;

/// Exercise direction of a European option
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// Right to buy the underlying at the strike
    Call,
    /// Right to sell the underlying at the strike
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(ValidationError::UnknownOptionType {
                label: s.to_string(),
            }),
        }
    }
}

/// Validated terms of a European option
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContractParameters {
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
    option_type: OptionType,
}

impl ContractParameters {
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> ValidationResult<Self> {
        validate_positive("spot", spot)?;
        validate_positive("strike", strike)?;
        validate_positive("time_to_expiry", time_to_expiry)?;
        validate_finite("risk_free_rate", risk_free_rate)?;
        validate_positive("volatility", volatility)?;

        Ok(ContractParameters {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            option_type,
        })
    }

    /// Build from a textual option type such as `"call"` or `"put"`
    pub fn from_label(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: &str,
    ) -> ValidationResult<Self> {
        let option_type = option_type.parse::<OptionType>()?;
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            option_type,
        )
    }

    /// Same contract at a different spot
    pub fn with_spot(&self, spot: f64) -> ValidationResult<Self> {
        Self::new(
            spot,
            self.strike,
            self.time_to_expiry,
            self.risk_free_rate,
            self.volatility,
            self.option_type,
        )
    }

    /// Same contract with a different time remaining
    pub fn with_time_to_expiry(&self, time_to_expiry: f64) -> ValidationResult<Self> {
        Self::new(
            self.spot,
            self.strike,
            time_to_expiry,
            self.risk_free_rate,
            self.volatility,
            self.option_type,
        )
    }

    /// Same terms, other side (call <-> put or identity)
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        ContractParameters {
            option_type,
            ..*self
        }
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Discount factor `e^(-rT)`
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }
}
