//! Deterministic synthetic sales dataset generation.
//!
//! Produces the three raw CSVs (`train.csv`, `features.csv`, `stores.csv`)
//! with the schema the merger expects: per-(store, dept) weekly sales with a
//! yearly seasonal shape, a holiday bump, and mild noise, plus per-(store,
//! week) covariates and static store metadata. Everything is seeded, so the
//! same config always yields the same files.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{FeatureRow, StoreRow, TrainRow};
use crate::error::AppError;

/// First Friday of the reference dataset; all synthetic weeks step from here.
const START_DATE: (i32, u32, u32) = (2010, 2, 5);

/// ISO weeks flagged as holiday weeks (late-November and Christmas).
const HOLIDAY_WEEKS: [u32; 2] = [47, 52];

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub out_dir: PathBuf,
    pub stores: u32,
    pub depts: u32,
    pub weeks: u32,
    pub seed: u64,
}

/// Paths of the three written CSVs.
#[derive(Debug, Clone)]
pub struct SamplePaths {
    pub train: PathBuf,
    pub features: PathBuf,
    pub stores: PathBuf,
}

/// Generate the synthetic rows in memory.
pub fn generate_rows(
    config: &SampleConfig,
) -> Result<(Vec<TrainRow>, Vec<FeatureRow>, Vec<StoreRow>), AppError> {
    if config.stores == 0 || config.depts == 0 {
        return Err(AppError::Usage("Store and dept counts must be > 0.".to_string()));
    }
    if config.weeks == 0 {
        return Err(AppError::Usage("Week count must be > 0.".to_string()));
    }

    let start = NaiveDate::from_ymd_opt(START_DATE.0, START_DATE.1, START_DATE.2)
        .ok_or_else(|| AppError::Usage("Invalid sample start date.".to_string()))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::Fit(format!("noise distribution error: {e}")))?;

    let mut store_rows = Vec::with_capacity(config.stores as usize);
    for store in 1..=config.stores {
        let store_type = match store % 3 {
            0 => "C",
            1 => "A",
            _ => "B",
        };
        store_rows.push(StoreRow {
            store,
            store_type: store_type.to_string(),
            size: 40_000 + rng.gen_range(0..160_000),
        });
    }

    let mut feature_rows = Vec::with_capacity((config.stores * config.weeks) as usize);
    let mut train_rows = Vec::with_capacity((config.stores * config.depts * config.weeks) as usize);

    for store in 1..=config.stores {
        // Per-store level so the stores are distinguishable in reports.
        let store_level = 8_000.0 + 4_000.0 * (store as f64);

        for week_idx in 0..config.weeks {
            let date = start + Duration::weeks(week_idx as i64);
            let is_holiday = HOLIDAY_WEEKS.contains(&date.iso_week().week());

            feature_rows.push(FeatureRow {
                store,
                date,
                is_holiday,
                temperature: Some(55.0 + 25.0 * yearly_phase(week_idx) + noise.sample(&mut rng)),
                fuel_price: Some(2.8 + 0.4 * noise.sample(&mut rng).abs()),
                // Markdowns only exist in the back half of the history,
                // mirroring how promo columns appear mid-dataset.
                markdown1: markdown(week_idx, config.weeks, &mut rng),
                markdown2: markdown(week_idx, config.weeks, &mut rng),
                markdown3: None,
                markdown4: markdown(week_idx, config.weeks, &mut rng),
                markdown5: None,
                cpi: Some(210.0 + 0.05 * week_idx as f64),
                unemployment: Some(7.5 + 0.3 * noise.sample(&mut rng)),
            });

            for dept in 1..=config.depts {
                let dept_scale = 0.5 + 0.1 * (dept as f64);
                let seasonal = 0.25 * yearly_phase(week_idx);
                let bump = if is_holiday { 0.35 } else { 0.0 };
                let eps = 0.03 * noise.sample(&mut rng);
                let weekly_sales = store_level * dept_scale * (1.0 + seasonal + bump + eps);

                train_rows.push(TrainRow {
                    store,
                    dept,
                    date,
                    weekly_sales: (weekly_sales * 100.0).round() / 100.0,
                    is_holiday,
                });
            }
        }
    }

    Ok((train_rows, feature_rows, store_rows))
}

/// Generate the dataset and write the three CSVs under `config.out_dir`.
pub fn write_sample(config: &SampleConfig) -> Result<SamplePaths, AppError> {
    let (train, features, stores) = generate_rows(config)?;

    std::fs::create_dir_all(&config.out_dir).map_err(|e| {
        AppError::Io(format!("Failed to create '{}': {e}", config.out_dir.display()))
    })?;

    let paths = SamplePaths {
        train: config.out_dir.join("train.csv"),
        features: config.out_dir.join("features.csv"),
        stores: config.out_dir.join("stores.csv"),
    };

    write_train_csv(&paths.train, &train)?;
    write_features_csv(&paths.features, &features)?;
    write_stores_csv(&paths.stores, &stores)?;

    Ok(paths)
}

/// Smooth yearly shape in [-1, 1] for a weekly index.
fn yearly_phase(week_idx: u32) -> f64 {
    (std::f64::consts::TAU * week_idx as f64 / 52.18).sin()
}

fn markdown(week_idx: u32, weeks: u32, rng: &mut StdRng) -> Option<f64> {
    if week_idx * 2 >= weeks {
        Some((rng.gen_range(100.0..5_000.0_f64) * 100.0).round() / 100.0)
    } else {
        None
    }
}

fn create(path: &Path) -> Result<File, AppError> {
    File::create(path)
        .map_err(|e| AppError::Io(format!("Failed to create '{}': {e}", path.display())))
}

fn io_err(path: &Path, e: std::io::Error) -> AppError {
    AppError::Io(format!("Failed to write '{}': {e}", path.display()))
}

fn write_train_csv(path: &Path, rows: &[TrainRow]) -> Result<(), AppError> {
    let mut file = create(path)?;
    writeln!(file, "Store,Dept,Date,Weekly_Sales,IsHoliday").map_err(|e| io_err(path, e))?;
    for r in rows {
        writeln!(
            file,
            "{},{},{},{:.2},{}",
            r.store,
            r.dept,
            r.date,
            r.weekly_sales,
            if r.is_holiday { "TRUE" } else { "FALSE" }
        )
        .map_err(|e| io_err(path, e))?;
    }
    Ok(())
}

fn write_features_csv(path: &Path, rows: &[FeatureRow]) -> Result<(), AppError> {
    let mut file = create(path)?;
    writeln!(
        file,
        "Store,Date,Temperature,Fuel_Price,MarkDown1,MarkDown2,MarkDown3,MarkDown4,MarkDown5,CPI,Unemployment,IsHoliday"
    )
    .map_err(|e| io_err(path, e))?;
    for r in rows {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            r.store,
            r.date,
            opt(r.temperature),
            opt(r.fuel_price),
            opt(r.markdown1),
            opt(r.markdown2),
            opt(r.markdown3),
            opt(r.markdown4),
            opt(r.markdown5),
            opt(r.cpi),
            opt(r.unemployment),
            if r.is_holiday { "TRUE" } else { "FALSE" }
        )
        .map_err(|e| io_err(path, e))?;
    }
    Ok(())
}

fn write_stores_csv(path: &Path, rows: &[StoreRow]) -> Result<(), AppError> {
    let mut file = create(path)?;
    writeln!(file, "Store,Type,Size").map_err(|e| io_err(path, e))?;
    for r in rows {
        writeln!(file, "{},{},{}", r.store, r.store_type, r.size).map_err(|e| io_err(path, e))?;
    }
    Ok(())
}

fn opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        None => "NA".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SampleConfig {
        SampleConfig {
            out_dir: std::env::temp_dir().join("sales-lens-sample-tests"),
            stores: 2,
            depts: 3,
            weeks: 10,
            seed: 42,
        }
    }

    #[test]
    fn row_counts_follow_the_config() {
        let (train, features, stores) = generate_rows(&config()).unwrap();
        assert_eq!(train.len(), 2 * 3 * 10);
        assert_eq!(features.len(), 2 * 10);
        assert_eq!(stores.len(), 2);
    }

    #[test]
    fn same_seed_is_reproducible() {
        let a = generate_rows(&config()).unwrap();
        let b = generate_rows(&config()).unwrap();
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
        assert_eq!(a.2, b.2);
    }

    #[test]
    fn train_triples_are_unique_and_weekly() {
        let (train, _, _) = generate_rows(&config()).unwrap();
        let mut keys: Vec<_> = train.iter().map(|r| (r.store, r.dept, r.date)).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), before);
    }

    #[test]
    fn generated_csvs_ingest_cleanly() {
        let cfg = config();
        let paths = write_sample(&cfg).unwrap();

        let train = crate::io::ingest::read_train(&paths.train).unwrap();
        let features = crate::io::ingest::read_features(&paths.features).unwrap();
        let stores = crate::io::ingest::read_stores(&paths.stores).unwrap();

        assert_eq!(train.len(), 2 * 3 * 10);
        assert_eq!(features.len(), 2 * 10);
        assert_eq!(stores.len(), 2);

        // And the whole set merges with the row-count invariant intact.
        let merged = crate::merge::merge(&train, &features, &stores).unwrap();
        assert_eq!(merged.len(), train.len());
        assert!(merged.iter().all(|r| r.store_type.is_some()));
    }

    #[test]
    fn holiday_flags_follow_iso_week_numbers() {
        let mut cfg = config();
        // Enough weeks to cross the late-November and Christmas ISO weeks.
        cfg.weeks = 60;
        let (train, features, _) = generate_rows(&cfg).unwrap();

        assert!(features.iter().any(|r| r.is_holiday));
        for r in &features {
            assert_eq!(r.is_holiday, HOLIDAY_WEEKS.contains(&r.date.iso_week().week()));
        }
        for r in &train {
            assert_eq!(r.is_holiday, HOLIDAY_WEEKS.contains(&r.date.iso_week().week()));
        }
    }

    #[test]
    fn zero_counts_are_rejected() {
        let mut cfg = config();
        cfg.weeks = 0;
        assert!(matches!(generate_rows(&cfg), Err(AppError::Usage(_))));
    }
}
