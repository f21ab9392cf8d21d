//! Summary statistics over one metric of a group

use serde::{Deserialize, Serialize};

use crate::experiment::{ExperimentRecord, Metric};

/// Per (group, metric) summary.
///
/// Undefined values are `None`, never a misleading `0.0`:
/// - `count == 0`: every statistic is `None`
/// - `count == 1`: `std` is `None` (sample deviation needs two values)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStat {
    /// Number of values
    pub count: usize,
    /// Arithmetic mean
    pub mean: Option<f64>,
    /// Sample standard deviation (n-1 denominator)
    pub std: Option<f64>,
    /// Minimum
    pub min: Option<f64>,
    /// Maximum
    pub max: Option<f64>,
    /// Median (mean of the two middle values for even counts)
    pub median: Option<f64>,
}

impl SummaryStat {
    /// Summary of nothing.
    pub const EMPTY: Self = Self {
        count: 0,
        mean: None,
        std: None,
        min: None,
        max: None,
        median: None,
    };

    /// Summarize raw values.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self::EMPTY;
        }

        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;

        let std = (count > 1).then(|| {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sum_sq / (n - 1.0)).sqrt()
        });

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Self {
            count,
            mean: Some(mean),
            std,
            min: sorted.first().copied(),
            max: sorted.last().copied(),
            median: Some(median),
        }
    }

    /// Check if the summary covers no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Summarize one metric over a group of records.
#[must_use]
pub fn summarize<'a, I>(records: I, metric: Metric) -> SummaryStat
where
    I: IntoIterator<Item = &'a ExperimentRecord>,
{
    let values: Vec<f64> = records.into_iter().map(|r| r.value(metric)).collect();
    SummaryStat::from_values(&values)
}

/// Render an optional statistic, `n/a` when undefined.
#[must_use]
pub fn fmt_stat(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}"))
}
