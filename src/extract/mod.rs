//! Metric extraction from raw simulator output
//!
//! Turns one free-text result block into one [`ExperimentRecord`].
//!
//! Two raw layouts exist and are detected by a format sniff:
//!
//! ```text
//! MarkerBlock                          KeyValue
//! ──────────────────────────────       ──────────────────────────
//! === RESULTADOS LORAWAN ===           Distancia: 3000m
//! Execução: 1                          Dispositivos: 100
//! Distância (m): 3000                  PDR(%): 91.2
//! ...                                  ...
//! (technology from the marker)         (technology from file name / caller)
//! ```
//!
//! A field that is missing, or whose value cannot be coerced, resolves to
//! zero. This lossy default is the documented contract, not an error.

mod batch;
mod metric_spec;

pub use batch::{BatchOutcome, SkippedInput};
pub use metric_spec::{label_pattern, Coerced, MetricSpec};

use regex::Regex;
use std::path::Path;
use tracing::debug;

use crate::experiment::{ExperimentRecord, Technology};
use crate::{Error, Result};

/// `=== RESULTADOS <TECH> [anything] ===`
const MARKER_PATTERN: &str = r"(?m)^[ \t]*===[ \t]*RESULTADOS[ \t]+([A-Za-z][A-Za-z0-9_-]*)[^=\n]*===";

/// Raw record layout, detected by [`Extractor::sniff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFormat {
    /// `=== RESULTADOS <TECH> ===` header followed by `Label: value` lines
    MarkerBlock(Technology),
    /// Plain `Label: value` block; technology supplied externally
    KeyValue,
}

/// Extractor over a metric spec table.
///
/// Compiles its patterns once; `Regex` is `Sync`, so one extractor can be
/// shared by every worker of a parallel batch.
#[derive(Debug, Clone)]
pub struct Extractor {
    specs: Vec<MetricSpec>,
    marker: Regex,
}

impl Extractor {
    /// Create an extractor with the default 14-metric table.
    ///
    /// # Errors
    ///
    /// Returns error if a label pattern fails to compile
    pub fn new() -> Result<Self> {
        Self::with_specs(MetricSpec::default_table()?)
    }

    /// Create an extractor over a custom spec table.
    ///
    /// Metrics without a spec keep their zero default.
    ///
    /// # Errors
    ///
    /// Returns error if the marker pattern fails to compile
    pub fn with_specs(specs: Vec<MetricSpec>) -> Result<Self> {
        Ok(Self {
            specs,
            marker: Regex::new(MARKER_PATTERN)?,
        })
    }

    /// The spec table, in extraction order.
    #[must_use]
    pub fn specs(&self) -> &[MetricSpec] {
        &self.specs
    }

    /// Detect the layout of `text` and return the body to scan.
    ///
    /// A marker naming a known technology wins: the body is the text after
    /// it, up to the next marker. A missing marker, or one naming an
    /// unknown technology, falls back to a key:value scan of the whole text.
    #[must_use]
    pub fn sniff<'t>(&self, text: &'t str) -> (RawFormat, &'t str) {
        let mut markers = self.marker.captures_iter(text);
        let Some(first) = markers.next() else {
            return (RawFormat::KeyValue, text);
        };

        let (Some(whole), Some(label)) = (first.get(0), first.get(1)) else {
            return (RawFormat::KeyValue, text);
        };

        match Technology::from_label(label.as_str()) {
            Some(technology) => {
                let end = markers
                    .next()
                    .and_then(|next| next.get(0))
                    .map_or(text.len(), |m| m.start());
                (RawFormat::MarkerBlock(technology), &text[whole.end()..end])
            }
            None => {
                debug!(
                    marker = label.as_str(),
                    "unknown technology in marker, scanning as key:value"
                );
                (RawFormat::KeyValue, text)
            }
        }
    }

    /// Extract one record from a raw text block.
    ///
    /// # Arguments
    ///
    /// * `text` - Raw simulator output
    /// * `hint` - Technology to use when the text has no usable marker
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTechnology`] if neither the marker nor the
    /// hint determine the technology. Missing fields never fail.
    pub fn extract(&self, text: &str, hint: Option<Technology>) -> Result<ExperimentRecord> {
        let (format, body) = self.sniff(text);
        let technology = match format {
            RawFormat::MarkerBlock(technology) => technology,
            RawFormat::KeyValue => hint.ok_or_else(|| {
                Error::UnknownTechnology("no result marker and no technology hint".to_string())
            })?,
        };

        let record = self.fill(technology, body);
        debug!(?format, %technology, zero_filled = record.is_zero_filled(), "extracted record");
        Ok(record)
    }

    /// Extract every marker-delimited block of a multi-run log.
    ///
    /// Text without a usable marker yields a single key:value record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTechnology`] if a key:value text has no hint
    pub fn extract_blocks(
        &self,
        text: &str,
        hint: Option<Technology>,
    ) -> Result<Vec<ExperimentRecord>> {
        let starts: Vec<usize> = self
            .marker
            .find_iter(text)
            .map(|m| m.start())
            .collect();

        if starts.is_empty() {
            return Ok(vec![self.extract(text, hint)?]);
        }

        starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(text.len());
                self.extract(&text[start..end], hint)
            })
            .collect()
    }

    /// Read and extract one input file.
    ///
    /// The technology hint comes from the file name
    /// (see [`Technology::from_file_name`]). Invalid UTF-8 is replaced
    /// rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputUnavailable`] if the file cannot be read, or
    /// [`Error::UnknownTechnology`] as for [`Extractor::extract`]
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<ExperimentRecord> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);

        let hint = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(Technology::from_file_name);

        self.extract(&text, hint).map_err(|e| match e {
            Error::UnknownTechnology(_) => Error::UnknownTechnology(format!(
                "{}: no result marker and no technology in file name",
                path.display()
            )),
            other => other,
        })
    }

    fn fill(&self, technology: Technology, body: &str) -> ExperimentRecord {
        let mut record = ExperimentRecord::zeroed(technology);
        for spec in &self.specs {
            match spec.capture(body).and_then(|raw| spec.coerce(raw)) {
                Some(Coerced::Count(count)) => record.set_count(spec.metric(), count),
                Some(Coerced::Real(value)) => record.set_real(spec.metric(), value),
                None => {}
            }
        }
        record
    }
}
