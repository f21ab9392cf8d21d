//! Comparative table: technology × distance → mean metrics

use serde::{Deserialize, Serialize};

use super::group::{group_by, sorted_for_presentation, GroupDimension};
use crate::experiment::{Dataset, Metric, Technology};

/// Metrics averaged in the comparative table, in column order.
pub const COMPARATIVE_METRICS: [Metric; 6] = [
    Metric::Pdr,
    Metric::Plr,
    Metric::Vazao,
    Metric::Atraso,
    Metric::Energia,
    Metric::Utilizacao,
];

/// One row of the comparative table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeRow {
    /// Technology
    pub technology: Technology,
    /// Distance (m)
    pub distance: f64,
    /// Number of trials averaged
    pub count: usize,
    /// Means of [`COMPARATIVE_METRICS`], in that order
    pub means: Vec<Option<f64>>,
}

impl ComparativeRow {
    /// Mean of one comparative metric, if it is part of the table.
    #[must_use]
    pub fn mean(&self, metric: Metric) -> Option<f64> {
        COMPARATIVE_METRICS
            .iter()
            .position(|&m| m == metric)
            .and_then(|i| self.means.get(i).copied().flatten())
    }
}

/// Column headers of the comparative table.
#[must_use]
pub fn comparative_headers() -> Vec<String> {
    let mut headers = vec![
        "Tecnologia".to_string(),
        Metric::Distancia.label().to_string(),
        "Execuções".to_string(),
    ];
    headers.extend(COMPARATIVE_METRICS.iter().map(|m| format!("{} médio", m.label())));
    headers
}

/// Build the comparative table, technologies in priority order and
/// distances ascending.
#[must_use]
pub fn comparative_table(dataset: &Dataset) -> Vec<ComparativeRow> {
    let groups = group_by(dataset, &[GroupDimension::Technology, GroupDimension::Distance]);

    sorted_for_presentation(groups)
        .into_iter()
        .filter_map(|group| {
            let technology = group.key.technology?;
            let distance = group.key.distance?;
            let means = COMPARATIVE_METRICS
                .iter()
                .map(|&m| group.summarize(m).mean)
                .collect();
            Some(ComparativeRow {
                technology,
                distance,
                count: group.len(),
                means,
            })
        })
        .collect()
}
