//! energy-risk CLI
//!
//! # Commands
//!
//! - `energy-risk run` - simulate and print VaR/CVaR for one option position
//! - `energy-risk check` - validate a configuration without simulating

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use energy_risk::output::{write_ensemble_to_csv, write_summary_to_csv};
use energy_risk::{RiskCalculator, RiskConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Monte Carlo VaR/CVaR for energy options
#[derive(Parser)]
#[command(name = "energy-risk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file with [option] and [simulation] tables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the position and print VaR and CVaR
    Run {
        #[command(flatten)]
        overrides: Overrides,

        /// Write every path (price, payoff, loss) to this CSV file
        #[arg(long)]
        dump_paths: Option<PathBuf>,

        /// Write a key/value summary to this CSV file
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Validate the configuration and exit
    Check {
        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Command-line values that take precedence over the configuration file
#[derive(Args)]
struct Overrides {
    /// Strike price
    #[arg(long)]
    strike: Option<f64>,

    /// Spot price of the underlying
    #[arg(long)]
    spot: Option<f64>,

    /// Annualised volatility
    #[arg(long)]
    volatility: Option<f64>,

    /// Annualised interest rate (drift)
    #[arg(long)]
    rate: Option<f64>,

    /// Days to expiration, one simulated step per day
    #[arg(long)]
    days: Option<u32>,

    /// Option type: call or put
    #[arg(short = 't', long)]
    option_type: Option<String>,

    /// Number of Monte Carlo paths
    #[arg(short = 'n', long)]
    simulations: Option<usize>,

    /// Confidence level in (0, 1)
    #[arg(long)]
    confidence: Option<f64>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Generate paths in parallel
    #[arg(long)]
    parallel: bool,

    /// Generate paths on the calling thread, even if the file enables parallel
    #[arg(long, conflicts_with = "parallel")]
    sequential: bool,

    /// Worker threads for parallel runs (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,
}

impl Overrides {
    fn apply(self, mut config: RiskConfig) -> RiskConfig {
        let option = &mut config.option;
        if let Some(v) = self.strike {
            option.strike_price = v;
        }
        if let Some(v) = self.spot {
            option.spot_price = v;
        }
        if let Some(v) = self.volatility {
            option.volatility = v;
        }
        if let Some(v) = self.rate {
            option.interest_rate = v;
        }
        if let Some(v) = self.days {
            option.days_to_expiration = v;
        }
        if let Some(v) = self.option_type {
            option.option_type = v;
        }
        if let Some(v) = self.simulations {
            option.simulation_count = v;
        }

        let simulation = &mut config.simulation;
        if let Some(v) = self.confidence {
            simulation.confidence_level = v;
        }
        if self.seed.is_some() {
            simulation.seed = self.seed;
        }
        if self.parallel {
            simulation.parallel = true;
        } else if self.sequential {
            simulation.parallel = false;
        }
        if self.threads.is_some() {
            simulation.threads = self.threads;
        }
        config
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<RiskConfig> {
    match path {
        Some(path) => RiskConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(RiskConfig::example()),
    }
}

fn run(
    config: RiskConfig,
    dump_paths: Option<PathBuf>,
    summary: Option<PathBuf>,
) -> Result<()> {
    let calculator = RiskCalculator::from_config(&config)?;
    let settings = &config.simulation;
    let confidence_level = settings.confidence_level;

    let run = if settings.parallel {
        let threads = settings.threads.unwrap_or_else(num_cpus::get);
        info!(threads, "using parallel path generation");
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("building worker pool")?
            .install(|| calculator.run(confidence_level))?
    } else {
        calculator.run(confidence_level)?
    };

    let pct = (confidence_level * 1000.0).round() / 10.0;
    println!("VaR ({}% confidence level): {:.2}", pct, run.metrics.var);
    println!("CVaR ({}% confidence level): {:.2}", pct, run.metrics.cvar);
    println!("Black-Scholes premium: {:.2}", calculator.analytic_premium());

    if let Some(path) = dump_paths {
        write_ensemble_to_csv(&path, &run)
            .with_context(|| format!("writing paths to {}", path.display()))?;
        info!(path = %path.display(), "wrote path ensemble");
    }

    if let Some(path) = summary {
        let spec = calculator.spec();
        let rows = [
            ("option_type", spec.option_type().to_string()),
            ("strike_price", spec.strike_price().to_string()),
            ("spot_price", spec.spot_price().to_string()),
            ("volatility", spec.volatility().to_string()),
            ("interest_rate", spec.interest_rate().to_string()),
            ("days_to_expiration", spec.days_to_expiration().to_string()),
            ("simulation_count", spec.simulation_count().to_string()),
            ("confidence_level", confidence_level.to_string()),
            ("var", run.metrics.var.to_string()),
            ("cvar", run.metrics.cvar.to_string()),
            ("analytic_premium", calculator.analytic_premium().to_string()),
        ];
        write_summary_to_csv(&path, &rows)
            .with_context(|| format!("writing summary to {}", path.display()))?;
        info!(path = %path.display(), "wrote summary");
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Run {
            overrides,
            dump_paths,
            summary,
        } => run(overrides.apply(config), dump_paths, summary),
        Commands::Check { overrides } => {
            let config = overrides.apply(config);
            let spec = config.validate()?;
            info!(
                option_type = %spec.option_type(),
                paths = spec.simulation_count(),
                days = spec.days_to_expiration(),
                "configuration is valid"
            );
            println!("OK");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_overrides(args: &[&str]) -> Overrides {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        match cli.command {
            Commands::Run { overrides, .. } => overrides,
            Commands::Check { .. } => panic!("expected run command"),
        }
    }

    fn parallel_config() -> RiskConfig {
        let mut config = RiskConfig::example();
        config.simulation.parallel = true;
        config
    }

    #[test]
    fn test_sequential_flag_overrides_parallel_file_setting() {
        let config = run_overrides(&["energy-risk", "run", "--sequential"]).apply(parallel_config());
        assert!(!config.simulation.parallel);
    }

    #[test]
    fn test_no_flag_keeps_file_setting() {
        let config = run_overrides(&["energy-risk", "run"]).apply(parallel_config());
        assert!(config.simulation.parallel);

        let config = run_overrides(&["energy-risk", "run", "--parallel"]).apply(RiskConfig::example());
        assert!(config.simulation.parallel);
    }

    #[test]
    fn test_parallel_and_sequential_conflict() {
        assert!(Cli::try_parse_from(["energy-risk", "run", "--parallel", "--sequential"]).is_err());
    }

    #[test]
    fn test_overrides_replace_option_terms() {
        let config = run_overrides(&["energy-risk", "run", "--strike", "60", "-t", "put", "-n", "500"])
            .apply(RiskConfig::example());
        assert_eq!(config.option.strike_price, 60.0);
        assert_eq!(config.option.option_type, "put");
        assert_eq!(config.option.simulation_count, 500);
        assert_eq!(config.option.spot_price, 55.0);
    }
}
