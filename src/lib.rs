pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod parser;
pub mod storage;
pub mod types;
pub mod workbook;

// Use cases and the ports they depend on
pub mod app;
// File-backed and in-memory adapters
pub mod infra;

pub use app::{ThresholdsUseCase, WorkbookUseCase};
pub use config::Config;
pub use error::{Result, ThresholdError};
pub use types::{
    Bound, CellValue, CombinedThresholds, ThresholdRow, ThresholdTable, Tier, TierBounds,
    Variable, WorkbookTable, WorkbookThresholdRow,
};
