// src/mc/mc_engine.rs
use crate::analytics::bs_analytic::AnalyticPricer;
use crate::analytics::comparison::Comparison;
use crate::error::{validation::*, ValidationResult};
use crate::mc::paths::{self, PathGrid, PathStream};
use crate::mc::payoffs::Payoff;
use crate::models::contract::{ContractParameters, OptionType};
use crate::models::gbm::Gbm;
use crate::rng;
use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug)]
pub struct McConfig {
    /// Time steps per path used by the price estimators
    pub steps: usize,
    /// Seed used by `compare_with_analytic_default`; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Fan seeded rows out over rayon
    pub parallel: bool,
}

impl McConfig {
    /// Validate the Monte Carlo configuration
    pub fn validate(&self) -> ValidationResult<()> {
        validate_steps(self.steps)
    }
}

impl Default for McConfig {
    fn default() -> Self {
        McConfig {
            steps: 100,
            seed: None,
            parallel: true,
        }
    }
}

/// Discounted mean payoff and its standard error
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct McEstimate {
    pub price: f64,
    pub standard_error: f64,
    pub num_simulations: usize,
}

impl McEstimate {
    /// Discount the payoff sample and summarise it
    ///
    /// ```text
    /// price = e^(-rT) * mean(payoff)
    /// se    = e^(-rT) * std(payoff) / √n
    /// ```
    /// `std` is the population standard deviation (ddof = 0).
    pub fn from_payoffs(payoffs: ArrayView1<f64>, discount: f64) -> ValidationResult<Self> {
        let n = payoffs.len();
        validate_simulations(n)?;
        let mean = payoffs.sum() / n as f64;
        let std = payoffs.std(0.0);
        Ok(McEstimate {
            price: discount * mean,
            standard_error: discount * std / (n as f64).sqrt(),
            num_simulations: n,
        })
    }

    /// Symmetric interval `price ± z * se`
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        let half_width = z * self.standard_error;
        (self.price - half_width, self.price + half_width)
    }
}

/// Monte Carlo pricer for a European option under risk-neutral GBM
///
/// # Math Framework
///
/// Simulates the GBM SDE:
/// ```text
/// dS_t = r S_t dt + σ S_t dW_t
/// ```
///
/// on `m` uniform steps with the exact transition
/// ```text
/// S_{i+1} = S_i * exp((r - σ²/2)dt + σ√dt * Z),   dt = T/m
/// ```
/// where Z ~ N(0,1), then discounts the average terminal payoff.
/// Plain simulation only: no antithetic or control variates.
#[derive(Clone, Copy, Debug)]
pub struct MonteCarloEngine {
    params: ContractParameters,
    config: McConfig,
    payoff: Payoff,
    gbm: Gbm,
}

impl MonteCarloEngine {
    pub fn new(params: ContractParameters) -> Self {
        MonteCarloEngine {
            params,
            config: McConfig::default(),
            payoff: Payoff::for_contract(&params),
            gbm: Gbm::risk_neutral(&params),
        }
    }

    pub fn with_config(params: ContractParameters, config: McConfig) -> ValidationResult<Self> {
        config.validate()?;
        Ok(MonteCarloEngine {
            config,
            ..Self::new(params)
        })
    }

    /// Validate raw inputs and build an engine with the default configuration
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

    pub fn config(&self) -> &McConfig {
        &self.config
    }

    fn grid(&self, num_steps: usize) -> ValidationResult<PathGrid> {
        PathGrid::new(&self.gbm, self.params.time_to_expiry(), num_steps)
    }

    /// Simulated trajectories as an `(num_simulations, num_steps + 1)` matrix
    ///
    /// Column 0 is the spot for every row.
    pub fn generate_paths<R: Rng + ?Sized>(
        &self,
        num_simulations: usize,
        num_steps: usize,
        rng: &mut R,
    ) -> ValidationResult<Array2<f64>> {
        let grid = self.grid(num_steps)?;
        paths::dense_paths(&grid, num_simulations, rng)
    }

    /// Like [`generate_paths`](Self::generate_paths) with row `i` seeded from `seed + i`
    pub fn generate_paths_seeded(
        &self,
        num_simulations: usize,
        num_steps: usize,
        seed: u64,
    ) -> ValidationResult<Array2<f64>> {
        let grid = self.grid(num_steps)?;
        paths::dense_paths_seeded(&grid, num_simulations, seed, self.config.parallel)
    }

    /// Lazy path producer, one row per simulation
    pub fn path_stream<R: Rng>(
        &self,
        num_simulations: usize,
        num_steps: usize,
        rng: R,
    ) -> ValidationResult<PathStream<R>> {
        let grid = self.grid(num_steps)?;
        PathStream::new(grid, num_simulations, rng)
    }

    /// Elementwise payoff of terminal prices
    pub fn gain<'a>(&self, terminal_prices: impl Into<ArrayView1<'a, f64>>) -> Array1<f64> {
        self.payoff.apply(terminal_prices.into())
    }

    /// Discounted mean payoff over `num_simulations` paths of `config.steps` steps
    ///
    /// Only terminal prices are kept, so memory does not grow with the step count.
    pub fn price_estimate<R: Rng + ?Sized>(
        &self,
        num_simulations: usize,
        rng: &mut R,
    ) -> ValidationResult<McEstimate> {
        validate_simulations(num_simulations)?;
        let grid = self.grid(self.config.steps)?;
        let terminals = PathStream::new(grid, num_simulations, rng)?.terminal_prices();
        self.summarise(terminals)
    }

    /// Reproducible estimate; identical across thread counts for a given seed
    pub fn price_estimate_seeded(
        &self,
        num_simulations: usize,
        seed: u64,
    ) -> ValidationResult<McEstimate> {
        let grid = self.grid(self.config.steps)?;
        let terminals =
            paths::terminal_prices_seeded(&grid, num_simulations, seed, self.config.parallel)?;
        self.summarise(terminals)
    }

    fn summarise(&self, terminals: Array1<f64>) -> ValidationResult<McEstimate> {
        let payoffs = self.gain(terminals.view());
        let estimate = McEstimate::from_payoffs(payoffs.view(), self.params.discount_factor())?;
        debug!(
            option_type = %self.params.option_type(),
            num_simulations = estimate.num_simulations,
            price = estimate.price,
            standard_error = estimate.standard_error,
            "monte carlo estimate"
        );
        Ok(estimate)
    }

    /// Price with both engines and report the relative error of the simulation
    ///
    /// A single run is reported as-is; sampling noise is not corrected.
    pub fn compare_with_analytic<R: Rng + ?Sized>(
        &self,
        num_simulations: usize,
        rng: &mut R,
    ) -> ValidationResult<Comparison> {
        let estimate = self.price_estimate(num_simulations, rng)?;
        Ok(self.compare(&estimate))
    }

    pub fn compare_with_analytic_seeded(
        &self,
        num_simulations: usize,
        seed: u64,
    ) -> ValidationResult<Comparison> {
        let estimate = self.price_estimate_seeded(num_simulations, seed)?;
        Ok(self.compare(&estimate))
    }

    /// Outermost entry point: seeded from `config.seed` when set, OS entropy otherwise
    pub fn compare_with_analytic_default(
        &self,
        num_simulations: usize,
    ) -> ValidationResult<Comparison> {
        match self.config.seed {
            Some(seed) => self.compare_with_analytic_seeded(num_simulations, seed),
            None => self.compare_with_analytic(num_simulations, &mut rng::entropy_rng()),
        }
    }

    fn compare(&self, estimate: &McEstimate) -> Comparison {
        let analytic_price = AnalyticPricer::new(self.params).price();
        let comparison = Comparison::new(analytic_price, estimate);
        if !comparison.within_standard_errors(3.0) {
            warn!(
                analytic_price,
                monte_carlo_price = comparison.monte_carlo_price,
                standard_error = comparison.standard_error,
                "monte carlo price more than 3 standard errors from closed form"
            );
        }
        debug!(
            relative_error_percent = comparison.relative_error_percent,
            "compared with analytic"
        );
        comparison
    }

    /// One estimate per simulation count, drawn in order from the same generator
    pub fn convergence_study<R: Rng + ?Sized>(
        &self,
        simulation_counts: &[usize],
        rng: &mut R,
    ) -> ValidationResult<Vec<McEstimate>> {
        for &n in simulation_counts {
            validate_simulations(n)?;
        }
        simulation_counts
            .iter()
            .map(|&n| self.price_estimate(n, &mut *rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::rng::seed_rng_from_u64;
    use ndarray::array;

    fn engine(option_type: OptionType) -> MonteCarloEngine {
        MonteCarloEngine::from_inputs(150.0, 155.0, 0.25, 0.05, 0.20, option_type).unwrap()
    }

    #[test]
    fn test_gain_by_option_type() {
        let terminals = array![140.0, 155.0, 170.0];
        assert_eq!(
            engine(OptionType::Call).gain(&terminals),
            array![0.0, 0.0, 15.0]
        );
        assert_eq!(
            engine(OptionType::Put).gain(&[140.0, 155.0, 170.0][..]),
            array![15.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_estimate_from_constant_payoffs() {
        let payoffs = array![2.0, 2.0, 2.0, 2.0];
        let est = McEstimate::from_payoffs(payoffs.view(), 0.5).unwrap();
        assert_eq!(est.price, 1.0);
        assert_eq!(est.standard_error, 0.0);
        assert_eq!(est.num_simulations, 4);
        assert_eq!(est.confidence_interval(1.96), (1.0, 1.0));
    }

    #[test]
    fn test_estimate_uses_population_std() {
        let payoffs = array![0.0, 2.0];
        let est = McEstimate::from_payoffs(payoffs.view(), 1.0).unwrap();
        // population std of {0, 2} is 1
        assert!((est.standard_error - 1.0 / 2f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_single_simulation_is_valid() {
        let est = engine(OptionType::Call)
            .price_estimate(1, &mut seed_rng_from_u64(5))
            .unwrap();
        assert_eq!(est.num_simulations, 1);
        assert_eq!(est.standard_error, 0.0);
    }

    #[test]
    fn test_zero_simulations_rejected() {
        let e = engine(OptionType::Call);
        let mut rng = seed_rng_from_u64(1);
        assert!(matches!(
            e.price_estimate(0, &mut rng),
            Err(ValidationError::InvalidConfiguration { .. })
        ));
        assert!(e.generate_paths(10, 0, &mut rng).is_err());
        assert!(e.compare_with_analytic(0, &mut rng).is_err());
        assert!(e.convergence_study(&[100, 0], &mut rng).is_err());
    }

    #[test]
    fn test_config_validation() {
        let params = *engine(OptionType::Call).params();
        let bad = McConfig {
            steps: 0,
            ..Default::default()
        };
        assert!(MonteCarloEngine::with_config(params, bad).is_err());
        let ok = McConfig {
            steps: 1,
            parallel: false,
            ..Default::default()
        };
        assert_eq!(MonteCarloEngine::with_config(params, ok).unwrap().config().steps, 1);
    }

    #[test]
    fn test_seeded_estimate_is_reproducible() {
        let e = engine(OptionType::Put);
        let a = e.price_estimate_seeded(2_000, 11).unwrap();
        let b = e.price_estimate_seeded(2_000, 11).unwrap();
        assert_eq!(a, b);

        let sequential = MonteCarloEngine::with_config(
            *e.params(),
            McConfig {
                parallel: false,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(sequential.price_estimate_seeded(2_000, 11).unwrap(), a);
    }

    #[test]
    fn test_convergence_study_lengths() {
        let study = engine(OptionType::Call)
            .convergence_study(&[100, 500, 1000], &mut seed_rng_from_u64(2))
            .unwrap();
        let counts: Vec<usize> = study.iter().map(|e| e.num_simulations).collect();
        assert_eq!(counts, vec![100, 500, 1000]);
    }
}
