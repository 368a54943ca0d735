// scripts/benchmark.rs
use anyhow::{Context, Result};
use energy_risk::config::OptionParams;
use energy_risk::math_utils::Timer;
use energy_risk::RiskCalculator;
use std::env;
use std::fs::File;
use std::io::Write;
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rust_version: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    paths: usize,
    time_ms: f64,
    throughput_paths_per_sec: f64,
    var: f64,
    cvar: f64,
}

fn run_risk_benchmarks() -> Result<Vec<BenchmarkResult>> {
    let mut results = Vec::new();

    for &paths in &[10_000, 100_000, 500_000] {
        println!("Running benchmarks with {} paths...", paths);

        let params = OptionParams {
            simulation_count: paths,
            ..OptionParams::example()
        };

        for parallel in [false, true] {
            let calculator = RiskCalculator::from_params(&params)?
                .with_seed(42)
                .parallel(parallel);

            let timer = Timer::new();
            let metrics = calculator.compute()?;
            let time_ms = timer.elapsed_ms();

            results.push(BenchmarkResult {
                name: format!(
                    "{} ({}k paths)",
                    if parallel { "Parallel" } else { "Sequential" },
                    paths / 1000
                ),
                paths,
                time_ms,
                throughput_paths_per_sec: paths as f64 / (time_ms / 1000.0),
                var: metrics.var,
                cvar: metrics.cvar,
            });
        }
    }

    Ok(results)
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> Result<()> {
    let mut file =
        File::create(filename).with_context(|| format!("creating {}", filename))?;

    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "Benchmark,Paths,Time_ms,Throughput_paths_per_sec,VaR,CVaR")?;

    for result in results {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.6},{:.6}",
            result.name,
            result.paths,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.var,
            result.cvar
        )?;
    }

    println!("Results written to {}", filename);
    Ok(())
}

fn main() -> Result<()> {
    println!("energy-risk Benchmark Suite");
    println!("===========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let results = run_risk_benchmarks()?;

    println!("\n{:=<80}", "");
    println!(
        "{:<30} {:>8} {:>12} {:>15} {:>8} {:>8}",
        "Benchmark", "Paths", "Time (ms)", "Throughput", "VaR", "CVaR"
    );
    println!("{:-<80}", "");
    for result in &results {
        println!(
            "{:<30} {:>8} {:>12.2} {:>15.0} {:>8.2} {:>8.2}",
            result.name,
            result.paths,
            result.time_ms,
            result.throughput_paths_per_sec,
            result.var,
            result.cvar
        );
    }
    println!("{:=<80}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    write_results_to_csv(&results, &system_info, &filename)?;

    Ok(())
}
