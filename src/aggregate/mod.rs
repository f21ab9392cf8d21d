//! Aggregation over a finalized dataset
//!
//! Grouping, per-group summary statistics, radar normalization and the
//! technology × distance comparative table. Every function here is a pure
//! read of the [`Dataset`](crate::experiment::Dataset).
//!
//! ## Example
//!
//! ```rust
//! use lpwan_metrics::aggregate::{group_by, GroupDimension};
//! use lpwan_metrics::experiment::{Dataset, ExperimentRecord, Metric, Technology};
//!
//! let dataset = Dataset::new(vec![
//!     ExperimentRecord::builder(Technology::Nbiot).distance(3000.0).metric(Metric::Pdr, 90.0).build(),
//!     ExperimentRecord::builder(Technology::Nbiot).distance(10000.0).metric(Metric::Pdr, 70.0).build(),
//! ]);
//!
//! let groups = group_by(&dataset, &[GroupDimension::Technology, GroupDimension::Distance]);
//! assert_eq!(groups.len(), 2);
//!
//! let stat = groups[0].summarize(Metric::Pdr);
//! assert_eq!(stat.mean, Some(90.0));
//! assert!(stat.std.is_none()); // one record: sample std undefined
//! ```

mod comparative;
mod group;
mod radar;
mod stats;

pub use comparative::{comparative_headers, comparative_table, ComparativeRow, COMPARATIVE_METRICS};
pub use group::{group_by, sorted_for_presentation, Group, GroupDimension, GroupKey};
pub use radar::{normalize, radar_scores, RadarSeries, RADAR_METRICS};
pub use stats::{fmt_stat, summarize, SummaryStat};

use crate::experiment::{Dataset, Metric};

/// Summarize one metric for every group of a grouping, in group order.
#[must_use]
pub fn summarize_groups(
    dataset: &Dataset,
    dims: &[GroupDimension],
    metric: Metric,
) -> Vec<(GroupKey, SummaryStat)> {
    group_by(dataset, dims)
        .iter()
        .map(|g| (g.key, g.summarize(metric)))
        .collect()
}
