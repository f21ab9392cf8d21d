//! Report generation
//!
//! Three renderings of the same finalized dataset:
//!
//! - [`text_report`]: per-technology statistics (`relatorio_experimentos.txt`)
//! - [`markdown_report`]: best technology per metric and configuration
//!   summary (`RELATORIO_FINAL_ANALISE.md`)
//! - [`html_report`]: Chart.js scatter and radar charts (`graficos.html`)
//!
//! Every report refuses an empty dataset with [`Error::EmptyDataset`].
//! Undefined statistics are printed as `n/a`.

mod html;
mod markdown;
mod text;

pub use html::html_report;
pub use markdown::markdown_report;
pub use text::text_report;

use chrono::{DateTime, Local};

use crate::experiment::{Dataset, Direction, Metric};
use crate::extract::BatchOutcome;
use crate::{Error, Result};

/// Metrics with a full statistics block in the text report.
pub const REPORT_METRICS: [Metric; 5] = [
    Metric::Pdr,
    Metric::Plr,
    Metric::Vazao,
    Metric::Atraso,
    Metric::Energia,
];

/// Metrics of the "best technology" table, with their direction.
pub const BEST_METRICS: [(Metric, Direction); 4] = [
    (Metric::Pdr, Direction::Maximize),
    (Metric::Vazao, Direction::Maximize),
    (Metric::Energia, Direction::Minimize),
    (Metric::Atraso, Direction::Minimize),
];

/// Everything a report needs besides the dataset itself.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Finalized dataset
    pub dataset: &'a Dataset,
    /// Report title
    pub title: &'a str,
    /// Inputs that produced a record
    pub succeeded: usize,
    /// Inputs that were skipped
    pub skipped: usize,
    /// Generation timestamp
    pub generated_at: DateTime<Local>,
}

impl<'a> ReportContext<'a> {
    /// Context for a dataset whose every row came from a readable input.
    #[must_use]
    pub fn new(dataset: &'a Dataset, title: &'a str) -> Self {
        Self {
            dataset,
            title,
            succeeded: dataset.len(),
            skipped: 0,
            generated_at: Local::now(),
        }
    }

    /// Context carrying the success/skip counts of a batch extraction.
    #[must_use]
    pub fn from_outcome(outcome: &'a BatchOutcome, title: &'a str) -> Self {
        Self {
            skipped: outcome.skipped_count(),
            ..Self::new(&outcome.dataset, title)
        }
    }

    /// Fix the generation timestamp (reproducible output).
    #[must_use]
    pub fn with_timestamp(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    fn non_empty(&self) -> Result<&'a Dataset> {
        if self.dataset.is_empty() {
            Err(Error::EmptyDataset)
        } else {
            Ok(self.dataset)
        }
    }
}

/// Human name of a "best technology" row.
const fn best_metric_title(metric: Metric) -> &'static str {
    match metric {
        Metric::Energia => "Eficiência Energética",
        Metric::Atraso => "Menor Atraso",
        other => other.label(),
    }
}

/// Value with the unit the reports print for it.
fn with_unit(metric: Metric, value: f64) -> String {
    match metric {
        Metric::Pdr | Metric::Plr | Metric::Utilizacao | Metric::Retransmissao => {
            format!("{value:.1}%")
        }
        Metric::Vazao => format!("{value:.0} bps"),
        Metric::Energia => format!("{value:.1} J"),
        Metric::Atraso => format!("{value:.3} s"),
        _ => format!("{value:.2}"),
    }
}

fn join_values<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
