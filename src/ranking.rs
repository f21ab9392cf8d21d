//! Technology rankings by group mean
//!
//! Ranks the technologies present in a dataset by the mean of one metric.
//! Ties are broken by the fixed technology priority (NBIOT, LORAWAN,
//! SIGFOX), never by map iteration or input order.
//!
//! Rankings compare plain arithmetic means; no significance testing is
//! applied across executions.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::aggregate::{group_by, GroupDimension};
use crate::experiment::{Dataset, Direction, Metric, Technology};

/// Mean of one metric for one technology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnologyScore {
    /// Technology
    pub technology: Technology,
    /// Mean of the metric over the technology's records
    pub mean: f64,
    /// Number of records averaged
    pub count: usize,
}

/// Rank technologies by the mean of `metric`, best first.
///
/// Technologies absent from the dataset do not appear. An empty dataset
/// yields an empty ranking.
///
/// # Examples
///
/// ```rust
/// use lpwan_metrics::experiment::{Dataset, Direction, ExperimentRecord, Metric, Technology};
/// use lpwan_metrics::ranking::rank_technologies;
///
/// let dataset = Dataset::new(vec![
///     ExperimentRecord::builder(Technology::Sigfox).metric(Metric::Energia, 12.0).build(),
///     ExperimentRecord::builder(Technology::Lorawan).metric(Metric::Energia, 3.0).build(),
/// ]);
///
/// let ranking = rank_technologies(&dataset, Metric::Energia, Direction::Minimize);
/// assert_eq!(ranking[0].technology, Technology::Lorawan);
/// ```
#[must_use]
pub fn rank_technologies(
    dataset: &Dataset,
    metric: Metric,
    direction: Direction,
) -> Vec<TechnologyScore> {
    let mut scores: Vec<TechnologyScore> = group_by(dataset, &[GroupDimension::Technology])
        .into_iter()
        .filter_map(|group| {
            let technology = group.key.technology?;
            let stat = group.summarize(metric);
            stat.mean.map(|mean| TechnologyScore {
                technology,
                mean,
                count: stat.count,
            })
        })
        .collect();

    scores.sort_by(|a, b| compare_scores(a, b, direction));
    scores
}

/// Technology with the best mean of `metric` in the given direction.
///
/// Ties go to the technology earlier in {NBIOT, LORAWAN, SIGFOX}.
/// Returns `None` for an empty dataset.
#[must_use]
pub fn best_by_metric(
    dataset: &Dataset,
    metric: Metric,
    direction: Direction,
) -> Option<Technology> {
    rank_technologies(dataset, metric, direction)
        .first()
        .map(|score| score.technology)
}

/// Best technology score (technology and its mean) for reporting.
#[must_use]
pub fn best_score(
    dataset: &Dataset,
    metric: Metric,
    direction: Direction,
) -> Option<TechnologyScore> {
    rank_technologies(dataset, metric, direction).into_iter().next()
}

fn compare_scores(a: &TechnologyScore, b: &TechnologyScore, direction: Direction) -> Ordering {
    let by_mean = match direction {
        Direction::Maximize => b.mean.total_cmp(&a.mean),
        Direction::Minimize => a.mean.total_cmp(&b.mean),
    };
    by_mean.then_with(|| a.technology.priority().cmp(&b.technology.priority()))
}
