//! Storage tests: Parquet round trip, CSV exports, schema checks

use arrow::datatypes::DataType;
use lpwan_metrics::aggregate::comparative_table;
use lpwan_metrics::experiment::{Dataset, ExperimentRecord, Metric, Technology};
use lpwan_metrics::storage::{
    column_names, dataset_schema, to_record_batch, write_comparative_csv, write_csv,
    write_technology_csvs, StorageEngine,
};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lpwan_storage_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn dataset() -> Dataset {
    let mut records = Vec::new();
    for (i, technology) in Technology::ALL.into_iter().enumerate() {
        for exec in 1..=3u64 {
            records.push(
                ExperimentRecord::builder(technology)
                    .execution(exec)
                    .distance(3000.0 * (i as f64 + 1.0))
                    .devices(50)
                    .metric(Metric::PacotesEnviados, 100.0)
                    .metric(Metric::PacotesRecebidos, 90.0 - i as f64)
                    .metric(Metric::Pdr, 90.0 - i as f64)
                    .metric(Metric::Atraso, 0.125 * exec as f64)
                    .build(),
            );
        }
    }
    Dataset::new(records)
}

#[test]
fn test_schema_types() {
    let schema = dataset_schema();
    assert_eq!(schema.fields().len(), 15);
    assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
    assert_eq!(
        schema.field_with_name("Execução").unwrap().data_type(),
        &DataType::UInt64
    );
    assert_eq!(
        schema.field_with_name("Vazão (bps)").unwrap().data_type(),
        &DataType::Float64
    );
    assert!(schema.fields().iter().all(|f| !f.is_nullable()));
}

#[test]
fn test_parquet_round_trip() {
    let dir = scratch_dir("parquet");
    let path = dir.join("resultados_completo.parquet");
    let original = dataset();

    let storage = StorageEngine::from_dataset(&original).unwrap();
    assert_eq!(storage.num_rows(), original.len());
    storage.write_parquet(&path).unwrap();

    let loaded = StorageEngine::load_parquet(&path).unwrap();
    assert_eq!(loaded.num_rows(), original.len());
    assert_eq!(loaded.to_dataset().unwrap(), original);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_append_batches_concatenate() {
    let original = dataset();
    let mut storage = StorageEngine::from_dataset(&original).unwrap();
    storage.append_batch(to_record_batch(&original).unwrap()).unwrap();

    assert_eq!(storage.batches().len(), 2);
    let combined = storage.to_dataset().unwrap();
    assert_eq!(combined.len(), original.len() * 2);
    assert_eq!(&combined.records()[original.len()..], original.records());
}

#[test]
fn test_load_parquet_missing_file() {
    let result = StorageEngine::load_parquet("/nonexistent/file.parquet");
    assert!(result.is_err());
    assert!(result
        .err()
        .unwrap()
        .to_string()
        .contains("Failed to open Parquet file"));
}

#[test]
fn test_combined_csv_row_count_and_header() {
    let original = dataset();
    let mut buf = Vec::new();
    write_csv(&mut buf, &original).unwrap();

    let mut reader = csv::Reader::from_reader(buf.as_slice());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, column_names());

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), original.len());
    assert_eq!(&rows[0][0], "NBIOT");
    assert_eq!(&rows[8][0], "SIGFOX");
    assert_eq!(&rows[2][12], "0.375");
}

#[test]
fn test_technology_csvs_only_present() {
    let dir = scratch_dir("tech");
    let subset: Dataset = dataset()
        .iter()
        .copied()
        .filter(|r| r.technology != Technology::Lorawan)
        .collect();

    let written = write_technology_csvs(&subset, &dir).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["resultados_nbiot.csv", "resultados_sigfox.csv"]);

    let text = fs::read_to_string(&written[1]).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(text.lines().skip(1).all(|l| l.starts_with("SIGFOX,")));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_comparative_csv_rows() {
    let original = dataset();
    let table = comparative_table(&original);
    let mut buf = Vec::new();
    write_comparative_csv(&mut buf, &table).unwrap();

    let mut reader = csv::Reader::from_reader(buf.as_slice());
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "NBIOT");
    assert_eq!(&rows[0][1], "3000");
    assert_eq!(&rows[0][2], "3");
    assert_eq!(&rows[0][3], "90.0000");
}
