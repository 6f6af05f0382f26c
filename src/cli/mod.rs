//! Command-line parsing for the sales merge/forecast/insight toolkit.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the merge/model/process code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "slens", version, about = "Retail sales merge / forecast / insight toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a synthetic train/features/stores CSV set.
    Sample(SampleArgs),
    /// Merge the raw CSVs into the canonical snapshot.
    Merge(MergeArgs),
    /// Read the snapshot back and print its validation report.
    Validate(ValidateArgs),
    /// Fit the seasonal model for one (store, dept) series and print the forecast.
    Forecast(ForecastArgs),
    /// Generate a sanitized analytical summary for one (store, dept, year) slice.
    Insight(InsightArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Directory for the generated CSVs.
    #[arg(long, default_value = "data")]
    pub out_dir: PathBuf,

    /// Number of stores to generate.
    #[arg(long, default_value_t = 5)]
    pub stores: u32,

    /// Number of departments per store.
    #[arg(long, default_value_t = 4)]
    pub depts: u32,

    /// Number of weekly observations per series.
    #[arg(long, default_value_t = 143)]
    pub weeks: u32,

    /// Random seed (same seed, same files).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[derive(Debug, Parser, Clone)]
pub struct MergeArgs {
    /// Weekly sales CSV (Store, Dept, Date, Weekly_Sales, IsHoliday).
    #[arg(long, default_value = "data/train.csv")]
    pub train: PathBuf,

    /// Covariates CSV (Store, Date, ..., IsHoliday).
    #[arg(long, default_value = "data/features.csv")]
    pub features: PathBuf,

    /// Store metadata CSV (Store, Type, Size).
    #[arg(long, default_value = "data/stores.csv")]
    pub stores: PathBuf,

    /// Snapshot artifact path (overwritten wholesale).
    #[arg(long, default_value = "artifacts/sales_merged.json")]
    pub out: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct ValidateArgs {
    /// Snapshot artifact to validate.
    #[arg(long, default_value = "artifacts/sales_merged.json")]
    pub snapshot: PathBuf,

    /// Number of sample rows to print.
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

#[derive(Debug, Parser, Clone)]
pub struct ForecastArgs {
    /// Snapshot artifact to read.
    #[arg(long, default_value = "artifacts/sales_merged.json")]
    pub snapshot: PathBuf,

    /// Store number.
    #[arg(long)]
    pub store: u32,

    /// Department number.
    #[arg(long)]
    pub dept: u32,

    /// Number of future weeks to predict.
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(4..=52))]
    pub horizon: u32,

    /// Optional CSV export path for the forecast tail.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct InsightArgs {
    /// Snapshot artifact to read.
    #[arg(long, default_value = "artifacts/sales_merged.json")]
    pub snapshot: PathBuf,

    /// Store number.
    #[arg(long)]
    pub store: u32,

    /// Department number.
    #[arg(long)]
    pub dept: u32,

    /// Calendar year of the slice.
    #[arg(long)]
    pub year: i32,

    /// Wall-clock budget for the generation process (seconds).
    #[arg(long, default_value_t = 300)]
    pub timeout: u64,

    /// Generation executable.
    #[arg(long, default_value = "ollama")]
    pub program: String,

    /// Local model name passed to the executable.
    #[arg(long, default_value = "mistral")]
    pub model: String,
}
