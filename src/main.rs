//! lpwan-metrics CLI
//!
//! Command-line interface for extracting and comparing LPWAN simulation
//! results.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use lpwan_metrics::{
    config::AnalysisConfig,
    experiment::Technology,
    extract::Extractor,
    pipeline::run_analysis,
    report::{text_report, ReportContext},
    Error,
};

#[derive(Parser)]
#[command(name = "lpwan-metrics")]
#[command(version)]
#[command(about = "Metric extraction and comparative statistics for LPWAN simulation logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a directory of raw results and write tables and reports
    Analyze {
        /// Directory with raw simulator outputs
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for tables and reports
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Extension of raw files
        #[arg(long)]
        extension: Option<String>,

        /// Skip the HTML chart page
        #[arg(long)]
        no_html: bool,

        /// Skip the Parquet table
        #[arg(long)]
        no_parquet: bool,
    },

    /// Extract one raw file and print its record(s) as JSON
    Extract {
        /// Raw simulator output
        file: PathBuf,

        /// Technology, when neither the file nor its name says
        #[arg(short, long)]
        tech: Option<Technology>,
    },

    /// Print the statistics report of a directory without writing files
    Summary {
        /// Directory with raw simulator outputs
        input: PathBuf,

        /// Extension of raw files
        #[arg(long, default_value = "txt")]
        extension: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            config,
            extension,
            no_html,
            no_parquet,
        } => {
            let mut config = match config {
                Some(path) => AnalysisConfig::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => AnalysisConfig::default(),
            };
            if let Some(input) = input {
                config.input_dir = input;
            }
            if let Some(output) = output {
                config.output_dir = output;
            }
            if let Some(extension) = extension {
                config.extension = extension;
            }
            config.write_html &= !no_html;
            config.write_parquet &= !no_parquet;
            analyze(&config)?;
        }

        Commands::Extract { file, tech } => {
            extract(&file, tech)?;
        }

        Commands::Summary { input, extension } => {
            summary(&input, &extension)?;
        }
    }

    Ok(())
}

fn analyze(config: &AnalysisConfig) -> Result<()> {
    info!("Input:     {}", config.input_dir.display());
    info!("Output:    {}", config.output_dir.display());
    info!("Extension: .{}", config.extension);

    let output = match run_analysis(config) {
        Ok(output) => output,
        Err(Error::EmptyDataset) => {
            error!(
                "No records extracted from {}; no reports written",
                config.input_dir.display()
            );
            bail!("empty dataset");
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Analysis of {} failed", config.input_dir.display())
            })
        }
    };

    println!();
    println!(
        "Records: {} (skipped inputs: {})",
        output.outcome.succeeded(),
        output.outcome.skipped_count()
    );
    for skipped in &output.outcome.skipped {
        println!("  skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    println!("Files written:");
    for path in &output.written {
        println!("  {}", path.display());
    }
    println!();

    Ok(())
}

fn extract(file: &std::path::Path, tech: Option<Technology>) -> Result<()> {
    let extractor = Extractor::new()?;
    let text = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let text = String::from_utf8_lossy(&text);

    let hint = tech.or_else(|| {
        file.file_name()
            .and_then(|name| name.to_str())
            .and_then(Technology::from_file_name)
    });
    let records = extractor
        .extract_blocks(&text, hint)
        .with_context(|| format!("Failed to extract {}", file.display()))?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn summary(input: &std::path::Path, extension: &str) -> Result<()> {
    let extractor = Extractor::new()?;
    let outcome = extractor
        .extract_dir(input, extension.trim_start_matches('.'))
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let title = AnalysisConfig::default().title;
    let ctx = ReportContext::from_outcome(&outcome, &title);
    match text_report(&ctx) {
        Ok(report) => {
            print!("{report}");
            Ok(())
        }
        Err(Error::EmptyDataset) => {
            error!("No records extracted from {}", input.display());
            bail!("empty dataset");
        }
        Err(e) => Err(e.into()),
    }
}
