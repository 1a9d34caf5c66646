use crate::error::{Result, ThresholdError};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("table selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("row selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th, td").expect("cell selector"));

/// A two-dimensional grid of cell texts, exactly as laid out in the page.
/// Row 0 is the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Convenience for building tables from string literals.
    pub fn from_str_rows(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Extracts the first `<table>` of an HTML document.
///
/// Cell text has ASCII whitespace runs collapsed; non-breaking spaces are
/// kept so later cleaning can see them. A cell with `colspan="n"` is
/// followed by `n - 1` blank cells.
pub fn extract_first_table(html: &str) -> Result<RawTable> {
    debug!("extract_first_table: start html_len={}", html.len());
    let document = Html::parse_document(html);
    let table = document
        .select(&TABLE)
        .next()
        .ok_or_else(|| ThresholdError::malformed("no <table> element found"))?;

    let rows: Vec<Vec<String>> = table.select(&ROW).map(|tr| row_cells(&tr)).collect();
    if rows.is_empty() {
        return Err(ThresholdError::malformed("first table has no rows"));
    }

    info!("Extracted table with {} rows", rows.len());
    Ok(RawTable { rows })
}

fn row_cells(tr: &ElementRef) -> Vec<String> {
    let mut cells = Vec::new();
    for cell in tr.select(&CELL) {
        let raw: String = cell.text().collect();
        cells.push(raw.split_ascii_whitespace().collect::<Vec<_>>().join(" "));

        let span = cell
            .value()
            .attr("colspan")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(1);
        for _ in 1..span {
            cells.push(String::new());
        }
    }
    cells
}
