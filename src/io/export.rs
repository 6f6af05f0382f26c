//! Export forecast results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one `date,predicted` row per forecast-tail entry.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;
use crate::forecast::ForecastResult;

/// Write the forward tail of a forecast to a CSV file.
pub fn write_forecast_csv(path: &Path, result: &ForecastResult) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::Io(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "date,predicted")
        .map_err(|e| AppError::Io(format!("Failed to write export CSV header: {e}")))?;

    for p in result.tail() {
        writeln!(file, "{},{:.4}", p.date, p.predicted)
            .map_err(|e| AppError::Io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastPoint;
    use chrono::NaiveDate;

    #[test]
    fn writes_header_and_tail_rows() {
        let d0 = NaiveDate::from_ymd_opt(2012, 11, 2).unwrap();
        let result = ForecastResult {
            store: 1,
            dept: 1,
            horizon: 1,
            history_len: 1,
            points: vec![
                ForecastPoint { date: d0, predicted: 10.0 },
                ForecastPoint {
                    date: d0 + chrono::Duration::weeks(1),
                    predicted: 11.5,
                },
            ],
        };

        let dir = std::env::temp_dir().join("sales-lens-export-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("forecast.csv");
        write_forecast_csv(&path, &result).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "date,predicted");
        assert_eq!(lines[1], "2012-11-09,11.5000");
        assert_eq!(lines.len(), 2);
    }
}
