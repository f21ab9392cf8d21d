//! Group-by over experiment dimensions

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::stats::{summarize, SummaryStat};
use crate::experiment::{Dataset, ExperimentRecord, Metric, Technology};

/// A dimension a dataset can be partitioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupDimension {
    /// LPWAN technology
    Technology,
    /// Gateway distance
    Distance,
    /// Device count
    Devices,
}

/// Key of one group. Dimensions not grouped on are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupKey {
    /// Technology, if grouped on
    pub technology: Option<Technology>,
    /// Distance (m), if grouped on
    pub distance: Option<f64>,
    /// Device count, if grouped on
    pub devices: Option<u64>,
}

impl GroupKey {
    fn of(record: &ExperimentRecord, dims: &[GroupDimension]) -> Self {
        let has = |d: GroupDimension| dims.contains(&d);
        Self {
            technology: has(GroupDimension::Technology).then_some(record.technology),
            distance: has(GroupDimension::Distance).then_some(record.distancia),
            devices: has(GroupDimension::Devices).then_some(record.dispositivos),
        }
    }

    /// Hashable identity (f64 by bit pattern).
    fn identity(&self) -> (Option<Technology>, Option<u64>, Option<u64>) {
        (self.technology, self.distance.map(f64::to_bits), self.devices)
    }

    /// Presentation order: technology priority, then ascending distance and
    /// device count.
    #[must_use]
    pub fn presentation_cmp(&self, other: &Self) -> Ordering {
        self.technology
            .cmp(&other.technology)
            .then_with(|| match (self.distance, other.distance) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            })
            .then_with(|| self.devices.cmp(&other.devices))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(t) = self.technology {
            parts.push(t.to_string());
        }
        if let Some(d) = self.distance {
            parts.push(format!("{d} m"));
        }
        if let Some(n) = self.devices {
            parts.push(format!("{n} dispositivos"));
        }
        if parts.is_empty() {
            f.write_str("(todos)")
        } else {
            f.write_str(&parts.join(" / "))
        }
    }
}

/// One partition of a dataset.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    /// Key shared by every record of the group
    pub key: GroupKey,
    /// Records in dataset order
    pub records: Vec<&'a ExperimentRecord>,
}

impl Group<'_> {
    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the group has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Summarize one metric over the group.
    #[must_use]
    pub fn summarize(&self, metric: Metric) -> SummaryStat {
        summarize(self.records.iter().copied(), metric)
    }
}

/// Partition a dataset by the given dimensions.
///
/// Groups appear in order of first occurrence of their key in the dataset;
/// records keep dataset order inside each group. An empty `dims` slice
/// yields one group holding every record. The dataset is not modified.
#[must_use]
pub fn group_by<'a>(dataset: &'a Dataset, dims: &[GroupDimension]) -> Vec<Group<'a>> {
    let mut index: FxHashMap<(Option<Technology>, Option<u64>, Option<u64>), usize> =
        FxHashMap::default();
    let mut groups: Vec<Group<'a>> = Vec::new();

    for record in dataset {
        let key = GroupKey::of(record, dims);
        let slot = *index.entry(key.identity()).or_insert_with(|| {
            groups.push(Group {
                key,
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].records.push(record);
    }

    groups
}

/// Groups re-ordered for presentation (technology priority, ascending
/// distance, ascending devices). The input groups are consumed; the dataset
/// is untouched.
#[must_use]
pub fn sorted_for_presentation(mut groups: Vec<Group<'_>>) -> Vec<Group<'_>> {
    groups.sort_by(|a, b| a.key.presentation_cmp(&b.key));
    groups
}
