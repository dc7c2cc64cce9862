// scripts/benchmark.rs
use european_mc::analytics::bs_analytic::AnalyticPricer;
use european_mc::math_utils::Timer;
use european_mc::mc::mc_engine::{McConfig, MonteCarloEngine};
use european_mc::models::contract::{ContractParameters, OptionType};
use std::env;
use std::error::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    paths: usize,
    time_ms: f64,
    throughput_paths_per_sec: f64,
    value: f64,
    analytic_value: f64,
    relative_error_percent: f64,
}

fn run_benchmarks(seed: u64) -> Result<Vec<BenchmarkResult>, Box<dyn Error>> {
    let path_counts = [10_000, 100_000, 1_000_000];
    let mut results = Vec::new();

    for option_type in [OptionType::Call, OptionType::Put] {
        let params = ContractParameters::new(150.0, 155.0, 0.25, 0.05, 0.20, option_type)?;
        let analytic = AnalyticPricer::new(params).price();

        for parallel in [false, true] {
            let engine = MonteCarloEngine::with_config(
                params,
                McConfig {
                    parallel,
                    ..Default::default()
                },
            )?;

            for &paths in &path_counts {
                let mut timer = Timer::new();
                timer.start();
                let cmp = engine.compare_with_analytic_seeded(paths, seed)?;
                let time_ms = timer.elapsed_ms();

                let name = format!(
                    "European {} ({})",
                    option_type,
                    if parallel { "rayon" } else { "serial" }
                );
                info!(%name, paths, time_ms, "benchmark finished");

                results.push(BenchmarkResult {
                    name,
                    paths,
                    time_ms,
                    throughput_paths_per_sec: paths as f64 / (time_ms / 1000.0),
                    value: cmp.monte_carlo_price,
                    analytic_value: analytic,
                    relative_error_percent: cmp.relative_error_percent,
                });
            }
        }
    }

    Ok(results)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed = match env::args().nth(1) {
        Some(arg) => arg.parse::<u64>()?,
        None => 42,
    };

    println!("european-mc Benchmark Suite");
    println!("===========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!(
        "  Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Seed: {}\n", seed);

    let results = run_benchmarks(seed)?;

    println!("{:=<96}", "");
    println!(
        "{:<28} {:>9} {:>12} {:>15} {:>10} {:>10} {:>9}",
        "Benchmark", "Paths", "Time (ms)", "Throughput", "Value", "Analytic", "Rel Err"
    );
    println!("{:-<96}", "");
    for result in &results {
        println!(
            "{:<28} {:>9} {:>12.2} {:>15.0} {:>10.4} {:>10.4} {:>8.3}%",
            result.name,
            result.paths,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.value,
            result.analytic_value,
            result.relative_error_percent
        );
    }
    println!("{:=<96}", "");
    println!("\nRun with: cargo run --bin benchmark --release [seed]");

    Ok(())
}
