//! Dataset Merger: joins the three raw sources into the canonical dataset.
//!
//! The merge is the only writer of the snapshot artifact every downstream
//! consumer reads, so its invariants are load-bearing:
//!
//! - left joins never multiply or drop rows: `output.len() == train.len()`
//! - duplicate join keys fail fast (`DuplicateKey`) instead of fanning out
//! - `year`/`month`/`week` are derived purely from the date
//! - output is sorted by `(store, dept, date)` ascending

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::{calendar_fields, CanonicalRecord, FeatureRow, StoreRow, TrainRow};
use crate::error::AppError;

/// Merge `train` with `features` (on store/date/holiday) and `stores`
/// (on store), derive calendar fields, and sort.
pub fn merge(
    train: &[TrainRow],
    features: &[FeatureRow],
    stores: &[StoreRow],
) -> Result<Vec<CanonicalRecord>, AppError> {
    let feature_index = index_features(features)?;
    let store_index = index_stores(stores)?;

    // Train triples must be unique too: keeping duplicates would break the
    // one-row-per-(store, dept, date) invariant, dropping them would break
    // `output.len() == train.len()`.
    let mut seen: HashMap<(u32, u32, NaiveDate), ()> = HashMap::with_capacity(train.len());

    let mut out = Vec::with_capacity(train.len());
    for row in train {
        if seen.insert((row.store, row.dept, row.date), ()).is_some() {
            return Err(AppError::DuplicateKey {
                key: format!("(store={}, dept={}, date={})", row.store, row.dept, row.date),
                source: "train".to_string(),
            });
        }

        let feature = feature_index.get(&(row.store, row.date, row.is_holiday));
        let store = store_index.get(&row.store);
        let (year, month, week) = calendar_fields(row.date);

        out.push(CanonicalRecord {
            store: row.store,
            dept: row.dept,
            date: row.date,
            weekly_sales: row.weekly_sales,
            is_holiday: row.is_holiday,
            temperature: feature.and_then(|f| f.temperature),
            fuel_price: feature.and_then(|f| f.fuel_price),
            markdown1: feature.and_then(|f| f.markdown1),
            markdown2: feature.and_then(|f| f.markdown2),
            markdown3: feature.and_then(|f| f.markdown3),
            markdown4: feature.and_then(|f| f.markdown4),
            markdown5: feature.and_then(|f| f.markdown5),
            cpi: feature.and_then(|f| f.cpi),
            unemployment: feature.and_then(|f| f.unemployment),
            store_type: store.map(|s| s.store_type.clone()),
            size: store.map(|s| s.size),
            year,
            month,
            week,
        });
    }

    out.sort_by_key(|r| r.key());
    Ok(out)
}

fn index_features(
    features: &[FeatureRow],
) -> Result<HashMap<(u32, NaiveDate, bool), &FeatureRow>, AppError> {
    let mut index = HashMap::with_capacity(features.len());
    for f in features {
        if index.insert((f.store, f.date, f.is_holiday), f).is_some() {
            return Err(AppError::DuplicateKey {
                key: format!("(store={}, date={}, isholiday={})", f.store, f.date, f.is_holiday),
                source: "features".to_string(),
            });
        }
    }
    Ok(index)
}

fn index_stores(stores: &[StoreRow]) -> Result<HashMap<u32, &StoreRow>, AppError> {
    let mut index = HashMap::with_capacity(stores.len());
    for s in stores {
        if index.insert(s.store, s).is_some() {
            return Err(AppError::DuplicateKey {
                key: format!("(store={})", s.store),
                source: "stores".to_string(),
            });
        }
    }
    Ok(index)
}
