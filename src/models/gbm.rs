// src/models/gbm.rs
use super::contract::ContractParameters;

/// Risk-neutral geometric Brownian motion on a uniform time grid
///
/// Uses the exact lognormal transition rather than an Euler step:
/// ```text
/// S_{i+1} = S_i * exp((r - σ²/2)dt + σ√dt * Z)
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Gbm {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, mu: f64, sigma: f64) -> Self {
        Gbm { s0, mu, sigma }
    }

    /// Drift set to the risk-free rate
    pub fn risk_neutral(params: &ContractParameters) -> Self {
        Gbm::new(params.spot(), params.risk_free_rate(), params.volatility())
    }

    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        s_t * ((self.mu - 0.5 * self.sigma * self.sigma) * dt + self.sigma * dt.sqrt() * normal_draw)
            .exp()
    }

    /// Step coefficients for a fixed `dt`, hoisted out of the path loop
    pub fn stepper(&self, dt: f64) -> GbmStepper {
        GbmStepper {
            drift: (self.mu - 0.5 * self.sigma * self.sigma) * dt,
            vol: self.sigma * dt.sqrt(),
        }
    }
}

/// Precomputed `(r - σ²/2)dt` and `σ√dt`
#[derive(Clone, Copy, Debug)]
pub struct GbmStepper {
    drift: f64,
    vol: f64,
}

impl GbmStepper {
    #[inline]
    pub fn step(&self, s_t: f64, normal_draw: f64) -> f64 {
        s_t * (self.drift + self.vol * normal_draw).exp()
    }
}
