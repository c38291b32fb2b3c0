use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod bench;
mod config;
mod log;
mod report;

use config::{BenchConfig, Workload, load_config};
use log::{LogFormat, LogLevel, Logger};

#[derive(Parser, Debug)]
#[command(name = "skipset-bench")]
#[command(about = "Time SkipSet against BTreeSet on insert, erase, find and iterate workloads.", long_about = None)]
struct Cli {
    /// JSON or YAML settings file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Comma-separated element counts.
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,
    /// Repetitions per size.
    #[arg(long)]
    rounds: Option<usize>,
    /// Seed for input generation and promotion draws.
    #[arg(long)]
    seed: Option<u64>,
    /// Comma-separated subset of workloads to run.
    #[arg(long, value_enum, value_delimiter = ',')]
    workloads: Option<Vec<Workload>>,
    /// Results and log line format.
    #[arg(long, value_enum)]
    format: Option<LogFormat>,
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
    /// Level cap for the skip sets.
    #[arg(long)]
    max_level: Option<usize>,
    /// Promotion probability denominator for the skip sets.
    #[arg(long)]
    skip_factor: Option<u32>,
}

impl Cli {
    fn into_config(self) -> Result<BenchConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BenchConfig::default(),
        };
        if let Some(sizes) = self.sizes {
            config.sizes = sizes;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(workloads) = self.workloads {
            config.workloads = workloads;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(max_level) = self.max_level {
            config.levels.max_level = max_level;
        }
        if let Some(skip_factor) = self.skip_factor {
            config.levels.skip_factor = skip_factor;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    let logger = Logger::new(config.log_level, config.format);
    let seed = config.seed.unwrap_or_else(rand::random);
    logger.info(
        "bench",
        format!(
            "sizes {:?}, {} round(s), seed {seed}",
            config.sizes, config.rounds
        ),
    );

    let records = bench::run(&config, seed, &logger).context("benchmark run failed")?;
    print!("{}", report::render(&records, seed, config.format)?);
    logger.info("bench", format!("{} measurements", records.len()));
    Ok(())
}
