//! # lpwan-metrics: Comparative Analysis of Simulated LPWAN Trials
//!
//! **Version**: 0.1.0
//!
//! Turns the raw text logs printed by NB-IoT, LoRaWAN and Sigfox network
//! simulations into a typed dataset, then computes per-configuration
//! statistics, technology rankings and normalized radar scores, and writes
//! CSV/Parquet tables plus text, markdown and HTML reports.
//!
//! ## Pipeline
//!
//! - **Extract**: one [`ExperimentRecord`](experiment::ExperimentRecord) per
//!   raw file. Missing or unparseable fields become zero; they never drop
//!   the record.
//! - **Aggregate**: group by technology, distance and device count;
//!   summarize any metric; normalize for radar charts.
//! - **Rank**: best technology per metric, ties broken by the fixed
//!   priority NBIOT, LORAWAN, SIGFOX.
//! - **Store / Report**: Arrow/Parquet, CSV, text, markdown, Chart.js.
//!
//! ## Example Usage
//!
//! ```rust
//! use lpwan_metrics::extract::Extractor;
//! use lpwan_metrics::experiment::{Dataset, Direction, Metric, Technology};
//! use lpwan_metrics::ranking::best_by_metric;
//!
//! let extractor = Extractor::new()?;
//! let raw = "=== RESULTADOS LORAWAN ===\nDistância (m): 3000\nPDR (%): 92.5\n";
//! let record = extractor.extract(raw, None)?;
//! assert_eq!(record.technology, Technology::Lorawan);
//!
//! let dataset = Dataset::new(vec![record]);
//! assert_eq!(
//!     best_by_metric(&dataset, Metric::Pdr, Direction::Maximize),
//!     Some(Technology::Lorawan)
//! );
//! # Ok::<(), lpwan_metrics::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod experiment;
pub mod extract;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod storage;

pub use error::{Error, Result};
