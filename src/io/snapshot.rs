//! Canonical snapshot read/write.
//!
//! The snapshot is the "portable" representation of the merged dataset:
//! column-oriented JSON (struct-of-arrays) with the column names and order of
//! the source frame preserved. It is written wholesale on each merge run —
//! no append, no versioning — and is the single artifact the validator,
//! forecaster, and insight generator all read.
//!
//! Writes go through a temp file + rename so a failed run never leaves a
//! partially written artifact behind.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::CanonicalRecord;
use crate::error::AppError;

/// Canonical column names, in frame order.
pub const COLUMN_NAMES: [&str; 19] = [
    "Store",
    "Dept",
    "Date",
    "Weekly_Sales",
    "IsHoliday",
    "Temperature",
    "Fuel_Price",
    "MarkDown1",
    "MarkDown2",
    "MarkDown3",
    "MarkDown4",
    "MarkDown5",
    "CPI",
    "Unemployment",
    "Type",
    "Size",
    "Year",
    "Month",
    "Week",
];

/// On-disk snapshot schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub tool: String,
    pub row_count: usize,
    pub columns: Vec<String>,
    pub data: SnapshotColumns,
}

/// Column-oriented payload. Every vector has `row_count` entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotColumns {
    pub store: Vec<u32>,
    pub dept: Vec<u32>,
    pub date: Vec<NaiveDate>,
    pub weekly_sales: Vec<f64>,
    pub is_holiday: Vec<bool>,
    pub temperature: Vec<Option<f64>>,
    pub fuel_price: Vec<Option<f64>>,
    pub markdown1: Vec<Option<f64>>,
    pub markdown2: Vec<Option<f64>>,
    pub markdown3: Vec<Option<f64>>,
    pub markdown4: Vec<Option<f64>>,
    pub markdown5: Vec<Option<f64>>,
    pub cpi: Vec<Option<f64>>,
    pub unemployment: Vec<Option<f64>>,
    pub store_type: Vec<Option<String>>,
    pub size: Vec<Option<u32>>,
    pub year: Vec<i32>,
    pub month: Vec<u32>,
    pub week: Vec<u32>,
}

/// Write the canonical snapshot, overwriting any prior artifact.
pub fn write_snapshot(path: &Path, records: &[CanonicalRecord]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Io(format!("Failed to create '{}': {e}", parent.display()))
            })?;
        }
    }

    let snapshot = SnapshotFile {
        tool: "slens".to_string(),
        row_count: records.len(),
        columns: COLUMN_NAMES.iter().map(|s| s.to_string()).collect(),
        data: to_columns(records),
    };

    let tmp = path.with_extension("tmp");
    let file = File::create(&tmp)
        .map_err(|e| AppError::Io(format!("Failed to create snapshot '{}': {e}", tmp.display())))?;
    serde_json::to_writer(file, &snapshot)
        .map_err(|e| AppError::Io(format!("Failed to write snapshot: {e}")))?;
    std::fs::rename(&tmp, path)
        .map_err(|e| AppError::Io(format!("Failed to move snapshot into place: {e}")))?;

    Ok(())
}

/// Read the canonical snapshot back into row form.
///
/// Fails with `SnapshotRead` on any unreadable, unparsable, or internally
/// inconsistent artifact so downstream consumers never operate on partial data.
pub fn read_snapshot(path: &Path) -> Result<Vec<CanonicalRecord>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::SnapshotRead(format!("'{}': {e}", path.display())))?;
    let snapshot: SnapshotFile = serde_json::from_reader(file)
        .map_err(|e| AppError::SnapshotRead(format!("invalid snapshot JSON: {e}")))?;
    from_columns(&snapshot)
}

fn to_columns(records: &[CanonicalRecord]) -> SnapshotColumns {
    let mut c = SnapshotColumns::default();
    for r in records {
        c.store.push(r.store);
        c.dept.push(r.dept);
        c.date.push(r.date);
        c.weekly_sales.push(r.weekly_sales);
        c.is_holiday.push(r.is_holiday);
        c.temperature.push(r.temperature);
        c.fuel_price.push(r.fuel_price);
        c.markdown1.push(r.markdown1);
        c.markdown2.push(r.markdown2);
        c.markdown3.push(r.markdown3);
        c.markdown4.push(r.markdown4);
        c.markdown5.push(r.markdown5);
        c.cpi.push(r.cpi);
        c.unemployment.push(r.unemployment);
        c.store_type.push(r.store_type.clone());
        c.size.push(r.size);
        c.year.push(r.year);
        c.month.push(r.month);
        c.week.push(r.week);
    }
    c
}

fn from_columns(snapshot: &SnapshotFile) -> Result<Vec<CanonicalRecord>, AppError> {
    let n = snapshot.row_count;
    let c = &snapshot.data;

    let lengths = [
        c.store.len(),
        c.dept.len(),
        c.date.len(),
        c.weekly_sales.len(),
        c.is_holiday.len(),
        c.temperature.len(),
        c.fuel_price.len(),
        c.markdown1.len(),
        c.markdown2.len(),
        c.markdown3.len(),
        c.markdown4.len(),
        c.markdown5.len(),
        c.cpi.len(),
        c.unemployment.len(),
        c.store_type.len(),
        c.size.len(),
        c.year.len(),
        c.month.len(),
        c.week.len(),
    ];
    if lengths.iter().any(|&len| len != n) {
        return Err(AppError::SnapshotRead(format!(
            "column lengths disagree with row_count={n}"
        )));
    }

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        out.push(CanonicalRecord {
            store: c.store[i],
            dept: c.dept[i],
            date: c.date[i],
            weekly_sales: c.weekly_sales[i],
            is_holiday: c.is_holiday[i],
            temperature: c.temperature[i],
            fuel_price: c.fuel_price[i],
            markdown1: c.markdown1[i],
            markdown2: c.markdown2[i],
            markdown3: c.markdown3[i],
            markdown4: c.markdown4[i],
            markdown5: c.markdown5[i],
            cpi: c.cpi[i],
            unemployment: c.unemployment[i],
            store_type: c.store_type[i].clone(),
            size: c.size[i],
            year: c.year[i],
            month: c.month[i],
            week: c.week[i],
        });
    }
    Ok(out)
}
