use crate::app::ports::WorkbookSourcePort;
use crate::error::Result;
use crate::types::WorkbookTable;
use crate::workbook::{read_workbook, ColumnSpan};
use std::path::PathBuf;

/// Reads the route-specific thresholds sheet from a workbook file.
pub struct WorkbookFileSource {
    path: PathBuf,
    sheet: String,
    columns: ColumnSpan,
}

impl WorkbookFileSource {
    pub fn new<P: Into<PathBuf>>(path: P, sheet: &str, columns: ColumnSpan) -> Self {
        Self {
            path: path.into(),
            sheet: sheet.to_string(),
            columns,
        }
    }
}

impl WorkbookSourcePort for WorkbookFileSource {
    fn read_workbook(&self) -> Result<WorkbookTable> {
        read_workbook(&self.path, &self.sheet, self.columns)
    }
}
