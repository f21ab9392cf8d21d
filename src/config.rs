//! Analysis configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::aggregate::RADAR_METRICS;
use crate::experiment::Metric;
use crate::{Error, Result};

/// Configuration of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory holding the raw simulator outputs
    pub input_dir: PathBuf,

    /// Directory receiving tables and reports
    pub output_dir: PathBuf,

    /// Extension of raw files to pick up (without the dot)
    pub extension: String,

    /// Write `resultados_completo.parquet`
    pub write_parquet: bool,

    /// Write `graficos.html`
    pub write_html: bool,

    /// Title printed at the top of every report
    pub title: String,

    /// Metrics drawn on the radar chart
    pub radar_metrics: Vec<Metric>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("resultados"),
            output_dir: PathBuf::from("analise"),
            extension: "txt".to_string(),
            write_parquet: true,
            write_html: true,
            title: "Análise Comparativa de Tecnologias LPWAN".to_string(),
            radar_metrics: RADAR_METRICS.to_vec(),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file. Missing keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid JSON, or
    /// names no radar metric
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] on an empty extension or radar list
    pub fn validate(&self) -> Result<()> {
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(Error::InvalidInput("extension must not be empty".to_string()));
        }
        if self.radar_metrics.is_empty() {
            return Err(Error::InvalidInput("radar_metrics must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.extension, "txt");
        assert!(config.write_parquet);
        assert_eq!(config.radar_metrics, RADAR_METRICS.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"output_dir": "out", "write_html": false}"#).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(!config.write_html);
        assert_eq!(config.extension, "txt");
    }

    #[test]
    fn test_load_missing_file() {
        let err = AnalysisConfig::load("/nonexistent/lpwan.json").unwrap_err();
        assert!(matches!(err, Error::InputUnavailable { .. }));
    }

    #[test]
    fn test_empty_radar_rejected() {
        let config = AnalysisConfig {
            radar_metrics: Vec::new(),
            ..AnalysisConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));
    }
}
