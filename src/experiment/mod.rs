//! Experiment Schema
//!
//! Fixed-schema data model for LPWAN trial results.
//!
//! ## Schema Overview
//!
//! ```text
//! Dataset (1) ──< ExperimentRecord (N)
//!                     │
//!                     ├── Technology   {NBIOT, LORAWAN, SIGFOX}
//!                     └── Metric × 14  [zero when unparseable]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use lpwan_metrics::experiment::{Dataset, ExperimentRecord, Metric, Technology};
//!
//! let record = ExperimentRecord::builder(Technology::Lorawan)
//!     .execution(1)
//!     .distance(3000.0)
//!     .devices(100)
//!     .metric(Metric::Pdr, 87.0)
//!     .build();
//!
//! let dataset = Dataset::new(vec![record]);
//! assert_eq!(dataset.len(), 1);
//! assert_eq!(dataset.column(Metric::Pdr), vec![87.0]);
//! ```

mod dataset;
mod experiment_record;
mod metric;
mod technology;

pub use dataset::Dataset;
pub use experiment_record::{ExperimentRecord, ExperimentRecordBuilder};
pub use metric::{Direction, Metric, NumericKind};
pub use technology::Technology;
