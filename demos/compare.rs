// demos/compare.rs
//! Closed form vs Monte Carlo walkthrough for a single European contract.
//!
//! Prints the tables behind the usual analysis charts: the headline comparison,
//! delta and call/put value across spot, time decay, Monte Carlo convergence
//! and a terminal price summary. Set `RUST_LOG=european_mc=debug` to see the
//! per-estimate events.

use european_mc::analytics::bs_analytic::AnalyticPricer;
use european_mc::math_utils::Timer;
use european_mc::mc::mc_engine::{McConfig, MonteCarloEngine};
use european_mc::models::contract::{ContractParameters, OptionType};
use european_mc::rng;
use european_mc::ValidationResult;
use tracing_subscriber::EnvFilter;

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

fn main() -> ValidationResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed = std::env::args().nth(1).and_then(|s| s.parse::<u64>().ok());
    let call = ContractParameters::from_label(150.0, 155.0, 0.25, 0.05, 0.20, "call")?;
    let engine = MonteCarloEngine::with_config(
        call,
        McConfig {
            seed,
            ..Default::default()
        },
    )?;

    // --- Headline comparison ---
    let mut timer = Timer::new();
    timer.start();
    let cmp = engine.compare_with_analytic_default(50_000)?;
    println!(
        "BS: ${:.6} | MC: ${:.6} | Error: {:.4}% ({:.1} ms)",
        cmp.analytic_price,
        cmp.monte_carlo_price,
        cmp.relative_error_percent,
        timer.elapsed_ms()
    );

    // --- Spot sweep: delta, call and put value ---
    println!("\n{:>8} {:>8} {:>10} {:>10}", "Spot", "Delta", "Call", "Put");
    for spot in linspace(135.0, 175.0, 9) {
        let c = AnalyticPricer::new(call.with_spot(spot)?);
        let p = AnalyticPricer::new(call.with_spot(spot)?.with_option_type(OptionType::Put));
        println!(
            "{:>8.2} {:>8.4} {:>10.4} {:>10.4}",
            spot,
            c.greeks().delta,
            c.price(),
            p.price()
        );
    }

    // --- Time decay ---
    println!("\n{:>8} {:>10}", "T", "Call");
    for t in linspace(0.25, 0.01, 7) {
        let c = AnalyticPricer::new(call.with_time_to_expiry(t)?);
        println!("{:>8.4} {:>10.4}", t, c.price());
    }

    // --- Monte Carlo convergence ---
    let mut convergence_rng = match seed {
        Some(s) => rng::seed_rng_from_u64(s),
        None => rng::entropy_rng(),
    };
    let sizes = [100, 500, 1_000, 5_000, 10_000, 50_000];
    println!("\n{:>8} {:>10} {:>10}   (BS {:.4})", "Sims", "MC", "StdErr", cmp.analytic_price);
    for est in engine.convergence_study(&sizes, &mut convergence_rng)? {
        println!(
            "{:>8} {:>10.4} {:>10.4}",
            est.num_simulations, est.price, est.standard_error
        );
    }

    // --- Simulated paths and terminal distribution ---
    let paths = engine.generate_paths(100, 100, &mut convergence_rng)?;
    let terminal = paths.column(100);
    let mean = terminal.sum() / terminal.len() as f64;
    let lo = terminal.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = terminal.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let in_the_money = engine.gain(terminal).iter().filter(|&&g| g > 0.0).count();
    println!(
        "\n100 paths: mean final ${:.2}, range [{:.2}, {:.2}], {} finish above strike {:.0}",
        mean,
        lo,
        hi,
        in_the_money,
        call.strike()
    );

    Ok(())
}
