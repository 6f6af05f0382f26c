//! CSV ingest and schema validation for the three raw sources.
//!
//! This module turns the `train` / `features` / `stores` CSVs into typed row
//! vectors that are safe to merge.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Fail fast** on unparsable cells, naming the offending value and source
//! - **Deterministic behavior** (no hidden coercions)
//! - **Separation of concerns**: no join logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{FeatureRow, StoreRow, TrainRow};
use crate::error::AppError;

/// Read the `train` source: one row per (store, dept, week).
pub fn read_train(path: &Path) -> Result<Vec<TrainRow>, AppError> {
    let source = source_label(path, "train");
    let mut reader = open_reader(path)?;
    let header_map = header_map_for(&mut reader, &source)?;
    ensure_columns(
        &header_map,
        &["store", "dept", "date", "weekly_sales", "isholiday"],
        &source,
    )?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = record_or_err(result, &source)?;
        rows.push(TrainRow {
            store: parse_u32(get_required(&record, &header_map, "store", &source)?, &source)?,
            dept: parse_u32(get_required(&record, &header_map, "dept", &source)?, &source)?,
            date: parse_date(get_required(&record, &header_map, "date", &source)?, &source)?,
            weekly_sales: parse_f64(
                get_required(&record, &header_map, "weekly_sales", &source)?,
                &source,
            )?,
            is_holiday: parse_bool(
                get_required(&record, &header_map, "isholiday", &source)?,
                &source,
            )?,
        });
    }
    Ok(rows)
}

/// Read the `features` source: per-(store, week) covariates.
pub fn read_features(path: &Path) -> Result<Vec<FeatureRow>, AppError> {
    let source = source_label(path, "features");
    let mut reader = open_reader(path)?;
    let header_map = header_map_for(&mut reader, &source)?;
    ensure_columns(&header_map, &["store", "date", "isholiday"], &source)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = record_or_err(result, &source)?;
        rows.push(FeatureRow {
            store: parse_u32(get_required(&record, &header_map, "store", &source)?, &source)?,
            date: parse_date(get_required(&record, &header_map, "date", &source)?, &source)?,
            is_holiday: parse_bool(
                get_required(&record, &header_map, "isholiday", &source)?,
                &source,
            )?,
            temperature: parse_opt_f64(get_optional(&record, &header_map, "temperature"), &source)?,
            fuel_price: parse_opt_f64(get_optional(&record, &header_map, "fuel_price"), &source)?,
            markdown1: parse_opt_f64(get_optional(&record, &header_map, "markdown1"), &source)?,
            markdown2: parse_opt_f64(get_optional(&record, &header_map, "markdown2"), &source)?,
            markdown3: parse_opt_f64(get_optional(&record, &header_map, "markdown3"), &source)?,
            markdown4: parse_opt_f64(get_optional(&record, &header_map, "markdown4"), &source)?,
            markdown5: parse_opt_f64(get_optional(&record, &header_map, "markdown5"), &source)?,
            cpi: parse_opt_f64(get_optional(&record, &header_map, "cpi"), &source)?,
            unemployment: parse_opt_f64(get_optional(&record, &header_map, "unemployment"), &source)?,
        });
    }
    Ok(rows)
}

/// Read the `stores` source: one row per store.
pub fn read_stores(path: &Path) -> Result<Vec<StoreRow>, AppError> {
    let source = source_label(path, "stores");
    let mut reader = open_reader(path)?;
    let header_map = header_map_for(&mut reader, &source)?;
    ensure_columns(&header_map, &["store", "type", "size"], &source)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = record_or_err(result, &source)?;
        rows.push(StoreRow {
            store: parse_u32(get_required(&record, &header_map, "store", &source)?, &source)?,
            store_type: get_required(&record, &header_map, "type", &source)?.to_string(),
            size: parse_u32(get_required(&record, &header_map, "size", &source)?, &source)?,
        });
    }
    Ok(rows)
}

fn source_label(path: &Path, fallback: &str) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| fallback.to_string())
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::Io(format!("Failed to open CSV '{}': {e}", path.display())))?;
    Ok(csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn header_map_for(
    reader: &mut csv::Reader<File>,
    source: &str,
) -> Result<HashMap<String, usize>, AppError> {
    let headers = reader
        .headers()
        .map_err(|e| AppError::Io(format!("Failed to read CSV headers in {source}: {e}")))?
        .clone();
    Ok(build_header_map(&headers))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿Store"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_columns(
    header_map: &HashMap<String, usize>,
    required: &[&str],
    source: &str,
) -> Result<(), AppError> {
    for name in required {
        if !header_map.contains_key(*name) {
            return Err(AppError::Schema {
                column: (*name).to_string(),
                source: source.to_string(),
            });
        }
    }
    Ok(())
}

fn record_or_err(
    result: Result<StringRecord, csv::Error>,
    source: &str,
) -> Result<StringRecord, AppError> {
    result.map_err(|e| AppError::Io(format!("CSV parse error in {source}: {e}")))
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
    source: &str,
) -> Result<&'a str, AppError> {
    let idx = header_map.get(name).ok_or_else(|| AppError::Schema {
        column: name.to_string(),
        source: source.to_string(),
    })?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::DataFormat {
            value: format!("<empty {name}>"),
            source: source.to_string(),
        })
}

fn get_optional<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(s: &str, source: &str) -> Result<NaiveDate, AppError> {
    // ISO dates are the recommended form, but spreadsheet exports often use
    // slash-separated variants. Keep the accepted set small and deterministic.
    const FMTS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(AppError::DataFormat {
        value: s.to_string(),
        source: source.to_string(),
    })
}

fn parse_u32(s: &str, source: &str) -> Result<u32, AppError> {
    s.parse::<u32>().map_err(|_| AppError::DataFormat {
        value: s.to_string(),
        source: source.to_string(),
    })
}

fn parse_f64(s: &str, source: &str) -> Result<f64, AppError> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AppError::DataFormat {
            value: s.to_string(),
            source: source.to_string(),
        }),
    }
}

fn parse_bool(s: &str, source: &str) -> Result<bool, AppError> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(AppError::DataFormat {
            value: s.to_string(),
            source: source.to_string(),
        }),
    }
}

fn parse_opt_f64(s: Option<&str>, source: &str) -> Result<Option<f64>, AppError> {
    let Some(s) = s else { return Ok(None) };
    if s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    parse_f64(s, source).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("sales-lens-ingest-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_train_rows() {
        let path = write_temp(
            "train_ok.csv",
            "Store,Dept,Date,Weekly_Sales,IsHoliday\n1,1,2011-11-25,24924.50,TRUE\n1,1,2011-12-02,46039.49,FALSE\n",
        );
        let rows = read_train(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].store, 1);
        assert!(rows[0].is_holiday);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2011, 11, 25).unwrap());
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let path = write_temp("train_missing.csv", "Store,Dept,Weekly_Sales,IsHoliday\n1,1,1.0,FALSE\n");
        let err = read_train(&path).unwrap_err();
        match err {
            AppError::Schema { column, .. } => assert_eq!(column, "date"),
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_is_a_data_format_error_naming_the_value() {
        let path = write_temp(
            "train_bad_date.csv",
            "Store,Dept,Date,Weekly_Sales,IsHoliday\n1,1,not-a-date,1.0,FALSE\n",
        );
        let err = read_train(&path).unwrap_err();
        match err {
            AppError::DataFormat { value, source } => {
                assert_eq!(value, "not-a-date");
                assert!(source.contains("train_bad_date.csv"));
            }
            other => panic!("expected DataFormat error, got {other:?}"),
        }
    }

    #[test]
    fn na_covariates_become_none() {
        let path = write_temp(
            "features_na.csv",
            "Store,Date,Temperature,Fuel_Price,MarkDown1,MarkDown2,MarkDown3,MarkDown4,MarkDown5,CPI,Unemployment,IsHoliday\n\
             1,2011-11-25,64.52,3.20,NA,,NA,NA,NA,211.09,7.87,TRUE\n",
        );
        let rows = read_features(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].temperature, Some(64.52));
        assert_eq!(rows[0].markdown1, None);
        assert_eq!(rows[0].markdown2, None);
        assert_eq!(rows[0].cpi, Some(211.09));
    }

    #[test]
    fn bom_prefixed_header_still_resolves() {
        let path = write_temp(
            "stores_bom.csv",
            "\u{feff}Store,Type,Size\n1,A,151315\n",
        );
        let rows = read_stores(&path).unwrap();
        assert_eq!(rows[0].store, 1);
        assert_eq!(rows[0].store_type, "A");
        assert_eq!(rows[0].size, 151315);
    }
}
