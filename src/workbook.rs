use crate::constants::HAZARD_COLUMN;
use crate::error::{Result, ThresholdError};
use crate::types::{CellValue, WorkbookTable, WorkbookThresholdRow};
use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Inclusive, zero-based span of sheet columns, e.g. `A:F` is `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub first: u32,
    pub last: u32,
}

impl ColumnSpan {
    pub fn width(&self) -> usize {
        (self.last - self.first + 1) as usize
    }
}

/// Parses a spreadsheet column range such as `"A:F"` or a single `"C"`.
pub fn parse_column_span(range: &str) -> Result<ColumnSpan> {
    let (first, last) = match range.split_once(':') {
        Some((a, b)) => (column_index(a)?, column_index(b)?),
        None => {
            let c = column_index(range)?;
            (c, c)
        }
    };
    if first > last {
        return Err(ThresholdError::Config(format!(
            "column range '{}' runs backwards",
            range
        )));
    }
    Ok(ColumnSpan { first, last })
}

/// Zero-based index of a column label: `A` is 0, `Z` is 25, `AA` is 26.
pub fn column_index(label: &str) -> Result<u32> {
    let label = label.trim();
    if label.is_empty() || !label.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ThresholdError::Config(format!(
            "'{}' is not a column label",
            label
        )));
    }
    let mut index: u32 = 0;
    for c in label.chars() {
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| ThresholdError::Config(format!("column '{}' is out of range", label)))?;
    }
    Ok(index - 1)
}

/// Reads the thresholds sheet of a workbook file.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn read_workbook(path: &Path, sheet: &str, columns: ColumnSpan) -> Result<WorkbookTable> {
    if !path.is_file() {
        return Err(ThresholdError::SourceUnavailable {
            path: path.to_path_buf(),
            reason: "workbook file not found".to_string(),
        });
    }
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range(sheet)?;
    debug!("Sheet '{}' range size {:?}", sheet, range.get_size());
    table_from_range(&range, columns)
}

/// Builds a `WorkbookTable` from a sheet range.
///
/// Sheet row 1 is the header, wherever the used range starts; blank
/// leading rows leave the header empty, which is an error. Column names
/// lose their spaces, rows with any empty cell in the span are dropped,
/// and the hazard column must hold text, which is uppercased and trimmed.
pub fn table_from_range(range: &Range<Data>, columns: ColumnSpan) -> Result<WorkbookTable> {
    let (last_row, _) = range
        .end()
        .ok_or_else(|| ThresholdError::malformed("worksheet is empty"))?;

    // Absolute sheet coordinates; cells outside the used range read as empty.
    let read_row = |row: u32| -> Vec<Option<CellValue>> {
        (columns.first..=columns.last)
            .map(|col| range.get_value((row, col)).and_then(cell_value))
            .collect()
    };

    let column_names = read_row(0)
        .into_iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            Some(value) => Ok(value.to_string().replace(' ', "")),
            None => Err(ThresholdError::malformed(format!(
                "header cell in column {} is empty",
                columns.first as usize + i + 1
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    let hazard_index = column_names
        .iter()
        .position(|c| c == HAZARD_COLUMN)
        .ok_or_else(|| {
            ThresholdError::malformed(format!(
                "no '{}' column among {:?}",
                HAZARD_COLUMN, column_names
            ))
        })?;

    let mut kept = Vec::new();
    let mut dropped = 0usize;
    for row in 1..=last_row {
        let Some(cells) = read_row(row).into_iter().collect::<Option<Vec<CellValue>>>() else {
            dropped += 1;
            continue;
        };

        let mut weather_hazard = String::new();
        let mut fields = Vec::with_capacity(cells.len() - 1);
        for (i, value) in cells.into_iter().enumerate() {
            if i == hazard_index {
                weather_hazard = match value {
                    CellValue::Text(text) => text.to_uppercase().trim().to_string(),
                    other => {
                        return Err(ThresholdError::malformed(format!(
                            "row {}: '{}' value {} is not text",
                            row + 1,
                            HAZARD_COLUMN,
                            other
                        )))
                    }
                };
            } else {
                fields.push((column_names[i].clone(), value));
            }
        }
        kept.push(WorkbookThresholdRow {
            weather_hazard,
            fields,
        });
    }

    info!(
        "Read {} workbook threshold rows ({} incomplete rows dropped)",
        kept.len(),
        dropped
    );
    Ok(WorkbookTable {
        columns: column_names,
        rows: kept,
    })
}

fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(|dt| CellValue::DateTime(dt.to_string())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::DateTime(s.clone())),
    }
}
