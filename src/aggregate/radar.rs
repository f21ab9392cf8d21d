//! Normalized per-technology scores for radar charts

use serde::{Deserialize, Serialize};

use super::group::{group_by, GroupDimension};
use crate::experiment::{Dataset, Direction, Metric, Technology};
use crate::{Error, Result};

/// Metrics drawn on the comparative radar chart.
pub const RADAR_METRICS: [Metric; 4] = [Metric::Pdr, Metric::Vazao, Metric::Energia, Metric::Atraso];

/// Normalize a group mean against the group maximum.
///
/// - higher is better: `mean / max`
/// - lower is better: `1 - mean / max`
///
/// A zero (or non-finite) maximum yields the sentinel `0.0`. Scores are
/// clamped to `[0, 1]` against rounding in the mean.
#[must_use]
pub fn normalize(mean: f64, max: f64, direction: Direction) -> f64 {
    if max == 0.0 || !max.is_finite() || !mean.is_finite() {
        return 0.0;
    }
    let ratio = mean / max;
    let score = match direction {
        Direction::Maximize => ratio,
        Direction::Minimize => 1.0 - ratio,
    };
    score.clamp(0.0, 1.0)
}

/// Normalized scores of one technology, one per radar metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    /// Technology
    pub technology: Technology,
    /// (metric, normalized score) in the requested metric order
    pub scores: Vec<(Metric, f64)>,
}

/// Normalized scores per technology (priority order) for `metrics`.
///
/// Each technology is normalized against its own maximum, with the
/// metric's natural [`Direction`].
///
/// # Errors
///
/// Returns [`Error::EmptyDataset`] if the dataset has no records
pub fn radar_scores(dataset: &Dataset, metrics: &[Metric]) -> Result<Vec<RadarSeries>> {
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut groups = group_by(dataset, &[GroupDimension::Technology]);
    groups.sort_by_key(|g| g.key.technology);

    let series = groups
        .iter()
        .filter_map(|group| {
            let technology = group.key.technology?;
            let scores = metrics
                .iter()
                .map(|&metric| {
                    let stat = group.summarize(metric);
                    let score = match (stat.mean, stat.max) {
                        (Some(mean), Some(max)) => {
                            normalize(mean, max, Direction::for_metric(metric))
                        }
                        _ => 0.0,
                    };
                    (metric, score)
                })
                .collect();
            Some(RadarSeries { technology, scores })
        })
        .collect();

    Ok(series)
}
