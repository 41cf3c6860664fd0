//! BondFlow CLI — feed generation and pipeline run commands.
//!
//! Commands:
//! - `generate` — write the four synthetic feed files
//! - `run` — generate feeds if missing, execute the pipeline, print a summary
//! - `bucketed-risk` — run, then report PV01 per curve sector

use anyhow::Result;
use bondflow_runner::{generate_all, RunnerConfig, TradingPipeline};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bondflow",
    about = "BondFlow CLI — deterministic bond trading pipeline"
)]
struct Cli {
    /// Path to a TOML config file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for generated feed files.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory for persisted sink files.
    #[arg(long)]
    result_dir: Option<PathBuf>,

    /// Seed for the synthetic data generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip bad feed records instead of aborting the feed.
    #[arg(long, default_value_t = false)]
    skip_bad_records: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the four synthetic feed files.
    Generate,
    /// Generate feeds if missing, run the pipeline, print a summary.
    Run,
    /// Run the pipeline, then report bucketed PV01 per curve sector.
    BucketedRisk,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    match cli.command {
        Commands::Generate => {
            generate_all(&config)?;
            println!("feeds written to {}", config.data_dir.display());
            Ok(())
        }
        Commands::Run => {
            let summary = execute(&config)?.1;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Commands::BucketedRisk => {
            let (pipeline, _) = execute(&config)?;
            for bucket in pipeline.sector_risk() {
                println!("{bucket}");
            }
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> Result<RunnerConfig> {
    let mut config = match &cli.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(result_dir) = &cli.result_dir {
        config.result_dir = result_dir.clone();
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.skip_bad_records {
        config.error_policy = bondflow_core::feeds::ErrorPolicy::Skip;
    }
    Ok(config)
}

fn execute(config: &RunnerConfig) -> Result<(TradingPipeline, bondflow_runner::RunSummary)> {
    if !config.data_dir.join(bondflow_runner::datagen::PRICES_FILE).exists() {
        tracing::info!(dir = %config.data_dir.display(), "no feeds found, generating");
        generate_all(config)?;
    }
    let mut pipeline = TradingPipeline::build(&config.result_dir)?;
    let summary = pipeline.run(config)?;
    Ok((pipeline, summary))
}
