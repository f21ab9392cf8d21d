//! Storage backend (Arrow/Parquet, CSV exports)
//!
//! The combined dataset is materialized as an Arrow `RecordBatch` with a
//! fixed column order: `Tecnologia` followed by the 14 metric labels in
//! [`Metric::ALL`] order. Integer metrics are `UInt64`, real metrics
//! `Float64`; nothing is nullable because unparsed fields are already zero.
//!
//! Write pattern: the dataset is built once and exported in bulk; there are
//! no row updates.

mod csv_export;

pub use csv_export::{
    technology_file_name, write_comparative_csv, write_csv, write_technology_csvs,
};

use arrow::array::{Array, ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::experiment::{Dataset, ExperimentRecord, Metric, NumericKind, Technology};
use crate::{Error, Result};

/// Header of the technology column.
pub const TECHNOLOGY_COLUMN: &str = "Tecnologia";

/// Column headers of the combined table, in order.
#[must_use]
pub fn column_names() -> Vec<&'static str> {
    std::iter::once(TECHNOLOGY_COLUMN)
        .chain(Metric::ALL.iter().map(|m| m.label()))
        .collect()
}

/// Arrow schema of the combined table.
#[must_use]
pub fn dataset_schema() -> SchemaRef {
    let mut fields = vec![Field::new(TECHNOLOGY_COLUMN, DataType::Utf8, false)];
    fields.extend(Metric::ALL.iter().map(|m| {
        let data_type = match m.kind() {
            NumericKind::Integer => DataType::UInt64,
            NumericKind::Float => DataType::Float64,
        };
        Field::new(m.label(), data_type, false)
    }));
    Arc::new(Schema::new(fields))
}

/// Convert a dataset into a single record batch (one row per record).
///
/// # Errors
///
/// Returns error if Arrow rejects the assembled columns
pub fn to_record_batch(dataset: &Dataset) -> Result<RecordBatch> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(Metric::ALL.len() + 1);
    columns.push(Arc::new(StringArray::from_iter_values(
        dataset.iter().map(|r| r.technology.label()),
    )));

    for metric in Metric::ALL {
        let column: ArrayRef = match metric.kind() {
            NumericKind::Integer => Arc::new(UInt64Array::from_iter_values(
                dataset.iter().map(|r| integer_value(r, metric)),
            )),
            NumericKind::Float => Arc::new(Float64Array::from_iter_values(
                dataset.iter().map(|r| r.value(metric)),
            )),
        };
        columns.push(column);
    }

    Ok(RecordBatch::try_new(dataset_schema(), columns)?)
}

/// Convert a record batch with the combined schema back into records.
///
/// # Errors
///
/// Returns error if a column is missing, has the wrong type, or a
/// technology label is unknown
pub fn from_record_batch(batch: &RecordBatch) -> Result<Vec<ExperimentRecord>> {
    let technologies = typed_column::<StringArray>(batch, TECHNOLOGY_COLUMN)?;

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let technology: Technology = technologies.value(row).parse()?;
        records.push(ExperimentRecord::zeroed(technology));
    }

    for metric in Metric::ALL {
        match metric.kind() {
            NumericKind::Integer => {
                let values = typed_column::<UInt64Array>(batch, metric.label())?;
                for (record, value) in records.iter_mut().zip(values.values().iter()) {
                    record.set_count(metric, *value);
                }
            }
            NumericKind::Float => {
                let values = typed_column::<Float64Array>(batch, metric.label())?;
                for (record, value) in records.iter_mut().zip(values.values().iter()) {
                    record.set_real(metric, *value);
                }
            }
        }
    }

    Ok(records)
}

fn typed_column<'b, A: Array + 'static>(batch: &'b RecordBatch, name: &str) -> Result<&'b A> {
    let index = batch
        .schema()
        .index_of(name)
        .map_err(|_| Error::StorageError(format!("Missing column: {name}")))?;
    batch
        .column(index)
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| Error::StorageError(format!("Unexpected type for column: {name}")))
}

fn integer_value(record: &ExperimentRecord, metric: Metric) -> u64 {
    match metric {
        Metric::Execucao => record.execucao,
        Metric::Dispositivos => record.dispositivos,
        Metric::PacotesEnviados => record.pacotes_enviados,
        Metric::PacotesRecebidos => record.pacotes_recebidos,
        Metric::PacotesDuplicados => record.pacotes_duplicados,
        _ => 0,
    }
}

/// Storage engine for the combined dataset
pub struct StorageEngine {
    batches: Vec<RecordBatch>,
}

impl StorageEngine {
    /// Create a new storage engine from existing batches
    #[must_use]
    pub fn new(batches: Vec<RecordBatch>) -> Self {
        Self { batches }
    }

    /// Materialize a dataset as a single batch
    ///
    /// # Errors
    /// Returns error if Arrow rejects the assembled columns
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        Ok(Self::new(vec![to_record_batch(dataset)?]))
    }

    /// Load table from Parquet file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load_parquet<P: AsRef<Path>>(path: P) -> Result<Self> {
        use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
        use std::fs::File;

        let file = File::open(path.as_ref()).map_err(|e| {
            Error::StorageError(format!("Failed to open Parquet file: {e}"))
        })?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| {
            Error::StorageError(format!("Failed to parse Parquet file: {e}"))
        })?;

        let reader = builder.build().map_err(|e| {
            Error::StorageError(format!("Failed to create Parquet reader: {e}"))
        })?;

        let mut batches = Vec::new();
        for batch in reader {
            let batch = batch.map_err(|e| {
                Error::StorageError(format!("Failed to read record batch: {e}"))
            })?;
            batches.push(batch);
        }

        Ok(Self { batches })
    }

    /// Write all batches to a Parquet file
    ///
    /// # Errors
    /// Returns error if the file cannot be created or written
    pub fn write_parquet<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        use parquet::arrow::ArrowWriter;
        use std::fs::File;

        let schema = self
            .batches
            .first()
            .map_or_else(dataset_schema, RecordBatch::schema);

        let file = File::create(path.as_ref())?;
        let mut writer = ArrowWriter::try_new(file, schema, None)?;
        for batch in &self.batches {
            writer.write(batch)?;
        }
        writer.close()?;

        info!(path = %path.as_ref().display(), rows = self.num_rows(), "wrote parquet");
        Ok(())
    }

    /// Get all record batches
    #[must_use]
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Total rows over all batches
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    /// Append a batch
    ///
    /// # Errors
    ///
    /// Returns error if batch schema doesn't match existing batches
    pub fn append_batch(&mut self, batch: RecordBatch) -> Result<()> {
        if let Some(existing) = self.batches.first() {
            let existing_schema = existing.schema();
            if batch.schema() != existing_schema {
                return Err(Error::StorageError(format!(
                    "Schema mismatch: expected {:?}, got {:?}",
                    existing_schema,
                    batch.schema()
                )));
            }
        }

        self.batches.push(batch);
        Ok(())
    }

    /// Rebuild the dataset from all batches, in batch order
    ///
    /// # Errors
    /// Returns error if a batch does not have the combined schema
    pub fn to_dataset(&self) -> Result<Dataset> {
        let mut records = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            records.extend(from_record_batch(batch)?);
        }
        Ok(Dataset::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int32Array;

    fn sample_dataset() -> Dataset {
        Dataset::new(vec![
            ExperimentRecord::builder(Technology::Nbiot)
                .execution(1)
                .distance(3000.0)
                .devices(100)
                .metric(Metric::PacotesEnviados, 500.0)
                .metric(Metric::Pdr, 97.25)
                .build(),
            ExperimentRecord::builder(Technology::Sigfox)
                .execution(2)
                .distance(50_000.0)
                .devices(10)
                .metric(Metric::Energia, 0.003_125)
                .build(),
        ])
    }

    #[test]
    fn test_schema_column_order() {
        let schema = dataset_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, column_names());
        assert_eq!(names.len(), 15);
        assert_eq!(names[0], "Tecnologia");
        assert_eq!(names[7], "PDR (%)");
    }

    #[test]
    fn test_record_batch_row_per_record() {
        let dataset = sample_dataset();
        let batch = to_record_batch(&dataset).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 15);

        let records = from_record_batch(&batch).unwrap();
        assert_eq!(records, dataset.records());
    }

    #[test]
    fn test_empty_dataset_batch() {
        let batch = to_record_batch(&Dataset::default()).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 15);
    }

    #[test]
    fn test_append_batch_schema_validation() {
        let mut storage = StorageEngine::from_dataset(&sample_dataset()).unwrap();

        let incompatible_schema = Schema::new(vec![
            Field::new("different_field", DataType::Int32, false),
        ]);
        let incompatible_batch = RecordBatch::try_new(
            Arc::new(incompatible_schema),
            vec![Arc::new(Int32Array::from(vec![1, 2, 3]))],
        )
        .unwrap();

        let result = storage.append_batch(incompatible_batch);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Schema mismatch"));
    }

    #[test]
    fn test_from_record_batch_missing_column() {
        let schema = Schema::new(vec![Field::new("Tecnologia", DataType::Utf8, false)]);
        let batch = RecordBatch::try_new(
            Arc::new(schema),
            vec![Arc::new(StringArray::from(vec!["NBIOT"]))],
        )
        .unwrap();
        let err = from_record_batch(&batch).unwrap_err();
        assert!(err.to_string().contains("Missing column"));
    }

    #[test]
    fn test_parquet_write_and_load() {
        let path = std::env::temp_dir().join(format!(
            "lpwan_metrics_storage_{}.parquet",
            std::process::id()
        ));
        let dataset = sample_dataset();

        StorageEngine::from_dataset(&dataset)
            .unwrap()
            .write_parquet(&path)
            .unwrap();

        let loaded = StorageEngine::load_parquet(&path).unwrap();
        assert_eq!(loaded.num_rows(), 2);
        assert_eq!(loaded.to_dataset().unwrap(), dataset);

        std::fs::remove_file(&path).unwrap();
    }
}
