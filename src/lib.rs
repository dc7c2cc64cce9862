//! # european-mc: Closed-Form and Monte Carlo Pricing of European Options
//!
//! Prices a European call or put two independent ways and compares them:
//!
//! - **Analytic**: Black-Scholes-Merton price and Greeks
//!   ([`analytics::bs_analytic::AnalyticPricer`])
//! - **Monte Carlo**: exact-step GBM simulation under the risk-neutral measure
//!   with a standard error on the estimate ([`mc::mc_engine::MonteCarloEngine`])
//! - **Comparison**: relative error of the simulation against the closed form
//!   ([`analytics::comparison::Comparison`])
//!
//! ## Quick Start
//!
//! ```rust
//! use european_mc::analytics::bs_analytic::AnalyticPricer;
//! use european_mc::mc::mc_engine::MonteCarloEngine;
//! use european_mc::models::contract::ContractParameters;
//! use european_mc::rng::seed_rng_from_u64;
//!
//! let params = ContractParameters::from_label(150.0, 155.0, 0.25, 0.05, 0.20, "call")
//!     .expect("valid contract");
//!
//! let pricer = AnalyticPricer::new(params);
//! println!("BS price {:.4}, delta {:.4}", pricer.price(), pricer.greeks().delta);
//!
//! let engine = MonteCarloEngine::new(params);
//! let cmp = engine
//!     .compare_with_analytic(50_000, &mut seed_rng_from_u64(42))
//!     .expect("valid simulation size");
//! println!(
//!     "BS {:.6} | MC {:.6} | error {:.4}%",
//!     cmp.analytic_price, cmp.monte_carlo_price, cmp.relative_error_percent
//! );
//! ```
//!
//! Randomness is always injected. Pass a seeded generator for reproducible
//! runs, or use [`rng::entropy_rng`] at the outermost call site.

pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod rng;

pub use analytics::bs_analytic::{AnalyticPricer, Greeks};
pub use analytics::comparison::Comparison;
pub use error::{ValidationError, ValidationResult};
pub use mc::mc_engine::{McConfig, McEstimate, MonteCarloEngine};
pub use models::contract::{ContractParameters, OptionType};
