//! Dataset - ordered, read-only collection of experiment records

use serde::{Deserialize, Serialize};

use super::{ExperimentRecord, Metric, Technology};

/// Ordered collection of trials.
///
/// Built once from raw inputs, then only read. Uniqueness by
/// (technology, distance, devices, execution) is intended but not enforced:
/// every extracted input contributes exactly one row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    records: Vec<ExperimentRecord>,
}

impl Dataset {
    /// Create a dataset from records, keeping their order.
    #[must_use]
    pub const fn new(records: Vec<ExperimentRecord>) -> Self {
        Self { records }
    }

    /// Check if the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// All rows in input order.
    #[must_use]
    pub fn records(&self) -> &[ExperimentRecord] {
        &self.records
    }

    /// Iterate over rows in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExperimentRecord> {
        self.records.iter()
    }

    /// Rows of one technology, in input order.
    #[must_use]
    pub fn for_technology(&self, technology: Technology) -> Vec<&ExperimentRecord> {
        self.records
            .iter()
            .filter(|r| r.technology == technology)
            .collect()
    }

    /// Technologies present, in priority order.
    #[must_use]
    pub fn technologies(&self) -> Vec<Technology> {
        Technology::ALL
            .into_iter()
            .filter(|t| self.records.iter().any(|r| r.technology == *t))
            .collect()
    }

    /// Technologies present, in order of first occurrence.
    #[must_use]
    pub fn technologies_by_occurrence(&self) -> Vec<Technology> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.technology) {
                seen.push(record.technology);
            }
        }
        seen
    }

    /// Values of one metric over all rows, in input order.
    #[must_use]
    pub fn column(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().map(|r| r.value(metric)).collect()
    }

    /// Distinct distances, ascending.
    #[must_use]
    pub fn distances(&self) -> Vec<f64> {
        sorted_distinct(self.column(Metric::Distancia))
    }

    /// Distinct device counts, ascending.
    #[must_use]
    pub fn device_counts(&self) -> Vec<u64> {
        let mut counts: Vec<u64> = self.records.iter().map(|r| r.dispositivos).collect();
        counts.sort_unstable();
        counts.dedup();
        counts
    }

    /// Number of distinct (distance, devices) configurations.
    #[must_use]
    pub fn configuration_count(&self) -> usize {
        let mut configs: Vec<(u64, u64)> = self
            .records
            .iter()
            .map(|r| (r.distancia.to_bits(), r.dispositivos))
            .collect();
        configs.sort_unstable();
        configs.dedup();
        configs.len()
    }
}

impl FromIterator<ExperimentRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = ExperimentRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ExperimentRecord;
    type IntoIter = std::slice::Iter<'a, ExperimentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn sorted_distinct(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| a.total_cmp(b).is_eq());
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(technology: Technology, distance: f64, devices: u64) -> ExperimentRecord {
        ExperimentRecord::builder(technology)
            .distance(distance)
            .devices(devices)
            .build()
    }

    #[test]
    fn test_dataset_default() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
        assert!(dataset.technologies().is_empty());
        assert_eq!(dataset.configuration_count(), 0);
    }

    #[test]
    fn test_axes_are_sorted_and_distinct() {
        let dataset: Dataset = vec![
            record(Technology::Sigfox, 10_000.0, 100),
            record(Technology::Nbiot, 3_000.0, 50),
            record(Technology::Sigfox, 3_000.0, 100),
        ]
        .into_iter()
        .collect();

        assert_eq!(dataset.distances(), vec![3_000.0, 10_000.0]);
        assert_eq!(dataset.device_counts(), vec![50, 100]);
        assert_eq!(dataset.configuration_count(), 3);
    }

    #[test]
    fn test_technology_orders() {
        let dataset = Dataset::new(vec![
            record(Technology::Sigfox, 1.0, 1),
            record(Technology::Nbiot, 1.0, 1),
        ]);
        assert_eq!(dataset.technologies(), vec![Technology::Nbiot, Technology::Sigfox]);
        assert_eq!(
            dataset.technologies_by_occurrence(),
            vec![Technology::Sigfox, Technology::Nbiot]
        );
        assert_eq!(dataset.for_technology(Technology::Sigfox).len(), 1);
        assert!(dataset.for_technology(Technology::Lorawan).is_empty());
    }
}
