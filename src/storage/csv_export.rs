//! CSV exports of the combined dataset and the comparative table

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::column_names;
use crate::aggregate::{comparative_headers, fmt_stat, ComparativeRow};
use crate::experiment::{Dataset, ExperimentRecord, Metric, NumericKind, Technology};
use crate::Result;

/// File name of one technology's subset, e.g. `resultados_nbiot.csv`.
#[must_use]
pub fn technology_file_name(technology: Technology) -> String {
    format!("resultados_{}.csv", technology.label().to_lowercase())
}

/// Write records as CSV with the combined column order.
///
/// # Errors
///
/// Returns error if the writer fails
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ExperimentRecord>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(column_names())?;
    for record in records {
        wtr.write_record(row_fields(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write one CSV per technology present in the dataset.
///
/// Returns the written paths, technologies in priority order.
///
/// # Errors
///
/// Returns error if a file cannot be created or written
pub fn write_technology_csvs<P: AsRef<Path>>(dataset: &Dataset, dir: P) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for technology in dataset.technologies() {
        let path = dir.as_ref().join(technology_file_name(technology));
        let file = std::fs::File::create(&path)?;
        let subset = dataset.for_technology(technology);
        write_csv(file, subset.iter().copied())?;
        info!(path = %path.display(), rows = subset.len(), "wrote technology csv");
        written.push(path);
    }
    Ok(written)
}

/// Write the comparative table. Undefined means are written as `n/a`.
///
/// # Errors
///
/// Returns error if the writer fails
pub fn write_comparative_csv<W: Write>(writer: W, rows: &[ComparativeRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(comparative_headers())?;
    for row in rows {
        let mut fields = vec![
            row.technology.label().to_string(),
            row.distance.to_string(),
            row.count.to_string(),
        ];
        fields.extend(row.means.iter().map(|m| fmt_stat(*m, 4)));
        wtr.write_record(&fields)?;
    }
    wtr.flush()?;
    Ok(())
}

fn row_fields(record: &ExperimentRecord) -> Vec<String> {
    let mut fields = Vec::with_capacity(Metric::ALL.len() + 1);
    fields.push(record.technology.label().to_string());
    for metric in Metric::ALL {
        let value = record.value(metric);
        fields.push(match metric.kind() {
            // integer metrics are stored as u64; the f64 view is exact below 2^53
            NumericKind::Integer => format!("{value:.0}"),
            NumericKind::Float => value.to_string(),
        });
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::comparative_table;

    fn record(technology: Technology, pdr: f64) -> ExperimentRecord {
        ExperimentRecord::builder(technology)
            .execution(3)
            .distance(3000.0)
            .devices(50)
            .metric(Metric::Pdr, pdr)
            .build()
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let dataset = Dataset::new(vec![record(Technology::Lorawan, 88.5)]);
        let mut buf = Vec::new();
        write_csv(&mut buf, &dataset).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Tecnologia,Execução,"));
        assert_eq!(header.split(',').count(), 15);

        let row: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(row[0], "LORAWAN");
        assert_eq!(row[1], "3");
        assert_eq!(row[2], "3000");
        assert_eq!(row[7], "88.5");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_technology_file_name() {
        assert_eq!(technology_file_name(Technology::Nbiot), "resultados_nbiot.csv");
        assert_eq!(technology_file_name(Technology::Sigfox), "resultados_sigfox.csv");
    }

    #[test]
    fn test_comparative_csv() {
        let dataset = Dataset::new(vec![
            record(Technology::Nbiot, 90.0),
            record(Technology::Nbiot, 80.0),
        ]);
        let mut buf = Vec::new();
        write_comparative_csv(&mut buf, &comparative_table(&dataset)).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("NBIOT,3000,2,85.0000,"));
    }
}
