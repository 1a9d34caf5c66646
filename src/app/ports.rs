use crate::error::Result;
use crate::types::{ThresholdTable, WorkbookTable};

/// Source of the national thresholds table.
pub trait HtmlSourcePort: Send + Sync {
    fn read_from_html(&self) -> Result<ThresholdTable>;
}

/// Source of the route-specific thresholds sheet.
pub trait WorkbookSourcePort: Send + Sync {
    fn read_workbook(&self) -> Result<WorkbookTable>;
}

/// Byte store for cache entries, keyed by a fixed logical name.
///
/// `write` must replace the entry as a whole: a reader sees either the old
/// bytes or the new ones.
pub trait CacheStorePort: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn write(&self, key: &str, bytes: &[u8]) -> Result<()>;
}
