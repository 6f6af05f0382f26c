//! Input/output helpers.
//!
//! - raw CSV ingest + schema validation (`ingest`)
//! - canonical snapshot read/write (`snapshot`)
//! - forecast CSV export (`export`)

pub mod export;
pub mod ingest;
pub mod snapshot;

pub use export::*;
pub use ingest::*;
pub use snapshot::*;
