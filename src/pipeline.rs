//! End-to-end analysis: extract a directory, aggregate, write every output

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::aggregate::comparative_table;
use crate::config::AnalysisConfig;
use crate::extract::{BatchOutcome, Extractor};
use crate::report::{html_report, markdown_report, text_report, ReportContext};
use crate::storage::{write_comparative_csv, write_csv, write_technology_csvs, StorageEngine};
use crate::{Error, Result};

/// Combined dataset as CSV.
pub const COMBINED_CSV: &str = "resultados_completo.csv";
/// Combined dataset as Parquet.
pub const COMBINED_PARQUET: &str = "resultados_completo.parquet";
/// Technology × distance means.
pub const COMPARATIVE_CSV: &str = "tabela_comparativa.csv";
/// Plain-text statistics report.
pub const TEXT_REPORT: &str = "relatorio_experimentos.txt";
/// Markdown summary report.
pub const MARKDOWN_REPORT: &str = "RELATORIO_FINAL_ANALISE.md";
/// Chart page.
pub const HTML_REPORT: &str = "graficos.html";

/// What one analysis run produced.
#[derive(Debug)]
pub struct AnalysisOutput {
    /// Extraction result (dataset and skipped inputs)
    pub outcome: BatchOutcome,
    /// Every file written, in write order
    pub written: Vec<PathBuf>,
}

/// Run the full analysis described by `config`.
///
/// # Errors
///
/// Returns [`Error::InputUnavailable`] if the input directory cannot be
/// listed, [`Error::EmptyDataset`] if no input produced a record (nothing is
/// written), or the first I/O or encoding failure while writing outputs
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisOutput> {
    config.validate()?;

    let extractor = Extractor::new()?;
    let extension = config.extension.trim_start_matches('.');
    let outcome = extractor.extract_dir(&config.input_dir, extension)?;

    if outcome.dataset.is_empty() {
        warn!(
            input = %config.input_dir.display(),
            skipped = outcome.skipped_count(),
            "no input produced a record"
        );
        return Err(Error::EmptyDataset);
    }

    let written = write_outputs(&outcome, config)?;
    info!(
        records = outcome.succeeded(),
        skipped = outcome.skipped_count(),
        files = written.len(),
        "analysis complete"
    );

    Ok(AnalysisOutput { outcome, written })
}

/// Write tables and reports for an already extracted batch.
///
/// # Errors
///
/// Returns [`Error::EmptyDataset`] for an empty batch, or the first write
/// failure
pub fn write_outputs(outcome: &BatchOutcome, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let dataset = &outcome.dataset;
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let dir = config.output_dir.as_path();
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let path = dir.join(COMBINED_CSV);
    write_csv(File::create(&path)?, dataset)?;
    info!(path = %path.display(), rows = dataset.len(), "wrote combined csv");
    written.push(path);

    if config.write_parquet {
        let path = dir.join(COMBINED_PARQUET);
        StorageEngine::from_dataset(dataset)?.write_parquet(&path)?;
        written.push(path);
    }

    written.extend(write_technology_csvs(dataset, dir)?);

    let path = dir.join(COMPARATIVE_CSV);
    write_comparative_csv(File::create(&path)?, &comparative_table(dataset))?;
    info!(path = %path.display(), "wrote comparative table");
    written.push(path);

    let ctx = ReportContext::from_outcome(outcome, &config.title);
    written.push(write_text(dir, TEXT_REPORT, &text_report(&ctx)?)?);
    written.push(write_text(dir, MARKDOWN_REPORT, &markdown_report(&ctx)?)?);
    if config.write_html {
        let html = html_report(&ctx, &config.radar_metrics)?;
        written.push(write_text(dir, HTML_REPORT, &html)?);
    }

    Ok(written)
}

fn write_text(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    info!(path = %path.display(), "wrote report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_dir_writes_nothing() {
        let root = std::env::temp_dir().join(format!("lpwan_pipeline_empty_{}", std::process::id()));
        let input = root.join("in");
        let output = root.join("out");
        fs::create_dir_all(&input).unwrap();

        let config = AnalysisConfig {
            input_dir: input,
            output_dir: output.clone(),
            ..AnalysisConfig::default()
        };
        let err = run_analysis(&config).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset));
        assert!(!output.exists());

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_missing_input_dir() {
        let config = AnalysisConfig {
            input_dir: PathBuf::from("/nonexistent/lpwan/input"),
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            run_analysis(&config),
            Err(Error::InputUnavailable { .. })
        ));
    }
}
