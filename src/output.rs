// src/output.rs
use crate::calculator::SimulationRun;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write one row per path: `path_id,terminal_price,payoff,loss`
pub fn write_ensemble_to_csv(path: impl AsRef<Path>, run: &SimulationRun) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "path_id,terminal_price,payoff,loss")?;
    for (i, ((s_t, payoff), loss)) in run
        .prices
        .iter()
        .zip(&run.payoffs)
        .zip(&run.losses())
        .enumerate()
    {
        writeln!(file, "{},{},{},{}", i, s_t, payoff, loss)?;
    }
    file.flush()
}

/// Write `key,value` rows preceded by a `generated_at` UTC timestamp
pub fn write_summary_to_csv(
    path: impl AsRef<Path>,
    summary_data: &[(&str, String)],
) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(
        file,
        "generated_at,{}",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    )?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptionParams;
    use crate::RiskCalculator;

    #[test]
    fn test_write_ensemble_and_summary() {
        let calc = RiskCalculator::from_params(&OptionParams {
            simulation_count: 25,
            ..OptionParams::example()
        })
        .unwrap()
        .with_seed(1);
        let run = calc.run(0.95).unwrap();

        let dir = std::env::temp_dir();
        let paths_file = dir.join(format!("energy-risk-paths-{}.csv", std::process::id()));
        write_ensemble_to_csv(&paths_file, &run).unwrap();
        let text = std::fs::read_to_string(&paths_file).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("path_id,terminal_price,payoff,loss"));
        assert_eq!(lines.count(), 25);

        let summary_file = dir.join(format!("energy-risk-summary-{}.csv", std::process::id()));
        write_summary_to_csv(&summary_file, &[("var", run.metrics.var.to_string())]).unwrap();
        let text = std::fs::read_to_string(&summary_file).unwrap();
        assert!(text.starts_with("generated_at,"));
        assert!(text.contains(&format!("var,{}", run.metrics.var)));

        let _ = std::fs::remove_file(paths_file);
        let _ = std::fs::remove_file(summary_file);
    }
}
