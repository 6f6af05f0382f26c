//! Snapshot Validator: a read-only acceptance check on the merger's output.
//!
//! Reads the snapshot artifact back and summarizes its shape, schema, and
//! missing values. The only failure mode is an unreadable/corrupt artifact
//! (`SnapshotRead`); a snapshot that loads cleanly always yields a report.

use std::path::Path;

use crate::domain::CanonicalRecord;
use crate::error::AppError;
use crate::io::snapshot::{read_snapshot, COLUMN_NAMES};

/// Shape/schema/missing-value summary of a loaded snapshot.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub row_count: usize,
    pub column_count: usize,
    /// Column names in frame order.
    pub column_names: Vec<String>,
    /// First K rows, for eyeballing.
    pub sample: Vec<CanonicalRecord>,
    /// Per-column missing-value counts, in frame order.
    pub missing_counts: Vec<(String, usize)>,
}

/// Load the snapshot and build its validation report.
pub fn validate(path: &Path, sample_rows: usize) -> Result<ValidationReport, AppError> {
    let records = read_snapshot(path)?;
    Ok(build_report(&records, sample_rows))
}

fn build_report(records: &[CanonicalRecord], sample_rows: usize) -> ValidationReport {
    let sample = records.iter().take(sample_rows).cloned().collect();
    ValidationReport {
        row_count: records.len(),
        column_count: COLUMN_NAMES.len(),
        column_names: COLUMN_NAMES.iter().map(|s| s.to_string()).collect(),
        sample,
        missing_counts: missing_counts(records),
    }
}

/// Which nullable field a canonical column maps to, by name.
///
/// Required columns can never be missing once a record parses; only the
/// joined covariates and store metadata can.
fn is_missing(r: &CanonicalRecord, column: &str) -> bool {
    match column {
        "Temperature" => r.temperature.is_none(),
        "Fuel_Price" => r.fuel_price.is_none(),
        "MarkDown1" => r.markdown1.is_none(),
        "MarkDown2" => r.markdown2.is_none(),
        "MarkDown3" => r.markdown3.is_none(),
        "MarkDown4" => r.markdown4.is_none(),
        "MarkDown5" => r.markdown5.is_none(),
        "CPI" => r.cpi.is_none(),
        "Unemployment" => r.unemployment.is_none(),
        "Type" => r.store_type.is_none(),
        "Size" => r.size.is_none(),
        _ => false,
    }
}

fn missing_counts(records: &[CanonicalRecord]) -> Vec<(String, usize)> {
    COLUMN_NAMES
        .iter()
        .map(|name| {
            let count = records.iter().filter(|r| is_missing(r, name)).count();
            (name.to_string(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar_fields;
    use crate::io::snapshot::write_snapshot;
    use chrono::NaiveDate;

    fn record(store: u32, temperature: Option<f64>) -> CanonicalRecord {
        let date = NaiveDate::from_ymd_opt(2011, 11, 25).unwrap();
        let (year, month, week) = calendar_fields(date);
        CanonicalRecord {
            store,
            dept: 1,
            date,
            weekly_sales: 100.0,
            is_holiday: false,
            temperature,
            fuel_price: None,
            markdown1: None,
            markdown2: None,
            markdown3: None,
            markdown4: None,
            markdown5: None,
            cpi: None,
            unemployment: None,
            store_type: Some("A".to_string()),
            size: Some(1000),
            year,
            month,
            week,
        }
    }

    #[test]
    fn report_counts_shape_and_missing_values() {
        let dir = std::env::temp_dir().join("sales-lens-validate-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snapshot.json");

        let records = vec![record(1, Some(60.0)), record(2, None), record(3, None)];
        write_snapshot(&path, &records).unwrap();

        let report = validate(&path, 2).unwrap();
        assert_eq!(report.row_count, 3);
        assert_eq!(report.column_count, 19);
        assert_eq!(report.column_names[0], "Store");
        assert_eq!(report.sample.len(), 2);

        let temp_missing = report
            .missing_counts
            .iter()
            .find(|(name, _)| name == "Temperature")
            .unwrap();
        assert_eq!(temp_missing.1, 2);
        let store_missing = report
            .missing_counts
            .iter()
            .find(|(name, _)| name == "Store")
            .unwrap();
        assert_eq!(store_missing.1, 0);
    }

    #[test]
    fn missing_counts_attach_to_the_named_column() {
        let dir = std::env::temp_dir().join("sales-lens-validate-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("named_counts.json");

        // Fully populated records except one nullable column.
        let mut records = vec![record(1, Some(60.0)), record(2, Some(61.0))];
        for r in &mut records {
            r.fuel_price = Some(3.2);
            r.markdown1 = Some(100.0);
            r.markdown2 = Some(100.0);
            r.markdown3 = None;
            r.markdown4 = Some(100.0);
            r.markdown5 = Some(100.0);
            r.cpi = Some(211.0);
            r.unemployment = Some(7.8);
        }
        write_snapshot(&path, &records).unwrap();

        let report = validate(&path, 1).unwrap();
        let names: Vec<&str> = report.missing_counts.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, COLUMN_NAMES.to_vec());
        for (name, count) in &report.missing_counts {
            let expected = if name == "MarkDown3" { records.len() } else { 0 };
            assert_eq!(*count, expected, "column {name}");
        }
    }

    #[test]
    fn missing_artifact_is_a_snapshot_read_error() {
        let path = std::env::temp_dir().join("sales-lens-validate-tests/absent.json");
        let err = validate(&path, 5).unwrap_err();
        assert!(matches!(err, AppError::SnapshotRead(_)));
    }
}
