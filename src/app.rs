//! Command dispatch: one handler per subcommand, each a thin pipeline over
//! the library modules. All user-facing output is produced here and in
//! `report`; lower layers only return values or typed errors.

use std::time::Duration;

use clap::Parser;

use crate::cli::{Cli, Command, ForecastArgs, InsightArgs, MergeArgs, SampleArgs, ValidateArgs};
use crate::data::{write_sample, SampleConfig};
use crate::error::AppError;
use crate::forecast::{self, SalesSeries};
use crate::insight::{run_insight, ProcessGenerator};
use crate::io::{read_features, read_snapshot, read_stores, read_train, write_forecast_csv, write_snapshot};
use crate::io::snapshot::COLUMN_NAMES;
use crate::merge::merge;
use crate::report;
use crate::validate::validate;

/// Parse arguments and run the selected subcommand.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Sample(args) => handle_sample(&args),
        Command::Merge(args) => handle_merge(&args),
        Command::Validate(args) => handle_validate(&args),
        Command::Forecast(args) => handle_forecast(&args),
        Command::Insight(args) => handle_insight(&args),
    }
}

fn handle_sample(args: &SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        out_dir: args.out_dir.clone(),
        stores: args.stores,
        depts: args.depts,
        weeks: args.weeks,
        seed: args.seed,
    };
    let paths = write_sample(&config)?;
    println!("Wrote {}", paths.train.display());
    println!("Wrote {}", paths.features.display());
    println!("Wrote {}", paths.stores.display());
    Ok(())
}

fn handle_merge(args: &MergeArgs) -> Result<(), AppError> {
    let train = read_train(&args.train)?;
    let features = read_features(&args.features)?;
    let stores = read_stores(&args.stores)?;

    let records = merge(&train, &features, &stores)?;
    write_snapshot(&args.out, &records)?;

    println!(
        "{}",
        report::format_merge_summary(&args.out, records.len(), COLUMN_NAMES.len())
    );
    Ok(())
}

fn handle_validate(args: &ValidateArgs) -> Result<(), AppError> {
    let report = validate(&args.snapshot, args.rows)?;
    println!("{}", report::format_validation_report(&report));
    Ok(())
}

fn handle_forecast(args: &ForecastArgs) -> Result<(), AppError> {
    let records = read_snapshot(&args.snapshot)?;
    let series = SalesSeries::from_canonical(&records, args.store, args.dept)?;
    let result = forecast::forecast(&series, args.horizon as usize)?;

    println!("{}", report::format_forecast_table(&result));

    if let Some(export) = &args.export {
        write_forecast_csv(export, &result)?;
        println!("Exported forecast to {}", export.display());
    }
    Ok(())
}

fn handle_insight(args: &InsightArgs) -> Result<(), AppError> {
    let records = read_snapshot(&args.snapshot)?;
    let generator = if args.program == "ollama" {
        ProcessGenerator::ollama(&args.model)
    } else {
        ProcessGenerator::new(args.program.clone(), vec![args.model.clone()])
    };

    let insight = run_insight(
        &records,
        args.store,
        args.dept,
        args.year,
        &generator,
        Duration::from_secs(args.timeout),
    )?;

    println!("{}", report::format_insight(&insight));
    Ok(())
}
