//! Crate-wide error taxonomy.
//!
//! Each variant is a distinct, user-visible failure condition with its own
//! message and process exit code:
//!
//! - exit code 2: input/schema/usage problems (fix the invocation or the CSVs)
//! - exit code 3: data problems (bad snapshot, empty slices, thin history)
//! - exit code 4: model/generation problems (solver, external process)
//!
//! The merge errors (`Schema`, `DataFormat`, `DuplicateKey`) are fatal to
//! that run and nothing is partially written. The insight errors (`Timeout`,
//! `ProcessUnavailable`, `Generation`, `EmptyResponse`) are the ones expected
//! in normal operation and each maps to a distinct human-readable message.

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// A required column is missing from one of the raw sources.
    Schema { column: String, source: String },
    /// A cell value could not be parsed (dates, numbers, booleans).
    DataFormat { value: String, source: String },
    /// A join key that must be unique appeared more than once.
    DuplicateKey { key: String, source: String },
    /// The snapshot artifact is unreadable, corrupt, or internally inconsistent.
    SnapshotRead(String),
    /// The series is too short for the seasonal model to fit.
    InsufficientHistory { needed: usize, got: usize },
    /// The seasonal solve failed (degenerate or non-finite inputs).
    Fit(String),
    /// The generation process exceeded the wall-clock budget and was killed.
    Timeout(u64),
    /// The generation executable is not installed / not on PATH.
    ProcessUnavailable(String),
    /// Any other spawn/runtime fault while driving the generation process.
    Generation(String),
    /// The process ran but exited non-zero or produced no output.
    EmptyResponse,
    /// File-system fault outside the snapshot read path (creates, writes).
    Io(String),
    /// Invalid arguments or an empty requested slice.
    Usage(String),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Schema { .. }
            | AppError::DataFormat { .. }
            | AppError::DuplicateKey { .. }
            | AppError::Io(_)
            | AppError::Usage(_) => 2,
            AppError::SnapshotRead(_) | AppError::InsufficientHistory { .. } => 3,
            AppError::Fit(_)
            | AppError::Timeout(_)
            | AppError::ProcessUnavailable(_)
            | AppError::Generation(_)
            | AppError::EmptyResponse => 4,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Schema { column, source } => {
                write!(f, "Missing required column `{column}` in {source}.")
            }
            AppError::DataFormat { value, source } => {
                write!(f, "Could not parse value '{value}' in {source}.")
            }
            AppError::DuplicateKey { key, source } => {
                write!(f, "Duplicate key {key} in {source}; keys must be unique.")
            }
            AppError::SnapshotRead(msg) => write!(f, "Failed to read snapshot: {msg}"),
            AppError::InsufficientHistory { needed, got } => write!(
                f,
                "Not enough history to fit a seasonal model: need at least {needed} points, got {got}."
            ),
            AppError::Fit(msg) => write!(f, "Seasonal fit failed: {msg}"),
            AppError::Timeout(secs) => {
                write!(f, "Generation took too long (timed out after {secs}s). Try again.")
            }
            AppError::ProcessUnavailable(program) => write!(
                f,
                "Generation program `{program}` not found. Ensure it is installed and on PATH."
            ),
            AppError::Generation(msg) => write!(f, "Generation failed: {msg}"),
            AppError::EmptyResponse => {
                write!(f, "The generation process did not produce a valid response.")
            }
            AppError::Io(msg) => write!(f, "{msg}"),
            AppError::Usage(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_group_by_failure_class() {
        let schema = AppError::Schema {
            column: "Date".to_string(),
            source: "train.csv".to_string(),
        };
        assert_eq!(schema.exit_code(), 2);
        assert_eq!(AppError::SnapshotRead("x".to_string()).exit_code(), 3);
        assert_eq!(AppError::Timeout(300).exit_code(), 4);
        assert_eq!(AppError::EmptyResponse.exit_code(), 4);
    }

    #[test]
    fn messages_are_distinct_per_kind() {
        let a = AppError::Timeout(1).to_string();
        let b = AppError::ProcessUnavailable("ollama".to_string()).to_string();
        let c = AppError::EmptyResponse.to_string();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(a.contains("1s"));
        assert!(b.contains("ollama"));
    }
}
