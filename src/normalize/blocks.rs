use crate::error::{Result, ThresholdError};
use crate::types::Variable;
use tracing::debug;

/// A run of body rows sharing one classification label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationBlock {
    pub label: String,
    /// Body index of the marker row that opens the block.
    pub marker_index: usize,
    /// Number of data rows following the marker.
    pub span: usize,
    pub variable: Variable,
}

impl ClassificationBlock {
    /// Body indices of the block's data rows.
    pub fn row_indices(&self) -> std::ops::Range<usize> {
        self.marker_index + 1..self.marker_index + 1 + self.span
    }
}

/// Number of rows each marker covers: the gap to the next marker, or for
/// the last marker the rows remaining to the end of the body.
///
/// `markers` must be strictly increasing and below `total_rows`.
pub fn classification_spans(markers: &[usize], total_rows: usize) -> Vec<usize> {
    markers
        .iter()
        .enumerate()
        .map(|(i, &marker)| match markers.get(i + 1) {
            Some(&next) => next - marker - 1,
            None => total_rows.saturating_sub(marker + 1),
        })
        .collect()
}

/// Maps classification labels to variables by keyword.
///
/// A label is bound to the variable whose keyword it contains
/// (case-insensitive). Assignment is validated as a whole: one block per
/// variable, every label recognised, nothing bound twice.
#[derive(Debug, Clone)]
pub struct BlockMapping {
    entries: Vec<(String, Variable)>,
}

impl Default for BlockMapping {
    fn default() -> Self {
        Self::new()
            .bind("temp", Variable::Temperature)
            .bind("snow", Variable::SnowDepth)
            .bind("rain", Variable::Rainfall)
            .bind("wind", Variable::WindSpeed)
    }
}

impl BlockMapping {
    /// An empty mapping; use `bind` to add keywords.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn bind(mut self, keyword: &str, variable: Variable) -> Self {
        self.entries.push((keyword.to_lowercase(), variable));
        self
    }

    pub fn variable_for(&self, label: &str) -> Result<Variable> {
        let lowered = label.to_lowercase();
        let mut matched: Vec<Variable> = Vec::new();
        for (keyword, variable) in &self.entries {
            if lowered.contains(keyword.as_str()) && !matched.contains(variable) {
                matched.push(*variable);
            }
        }
        match matched.as_slice() {
            [variable] => Ok(*variable),
            [] => Err(ThresholdError::malformed(format!(
                "classification '{}' does not name a known variable",
                label
            ))),
            _ => Err(ThresholdError::malformed(format!(
                "classification '{}' is ambiguous between variables {:?}",
                label, matched
            ))),
        }
    }

    /// Binds every label to a variable, failing on any mismatch.
    pub fn assign(&self, labels: &[String]) -> Result<Vec<Variable>> {
        if labels.len() != Variable::ALL.len() {
            return Err(ThresholdError::malformed(format!(
                "expected {} classification blocks, found {}",
                Variable::ALL.len(),
                labels.len()
            )));
        }

        let mut assigned: Vec<Variable> = Vec::with_capacity(labels.len());
        for label in labels {
            let variable = self.variable_for(label)?;
            if assigned.contains(&variable) {
                return Err(ThresholdError::malformed(format!(
                    "variable {} is claimed by more than one classification (second: '{}')",
                    variable, label
                )));
            }
            debug!("classification '{}' -> {}", label, variable);
            assigned.push(variable);
        }
        Ok(assigned)
    }
}

/// Finds marker rows in `body` and reconstructs the classification blocks.
///
/// A marker row is any row with a blank cell among the first `width`
/// columns; its `label_column` cell names the block.
pub fn locate_blocks(
    body: &[Vec<String>],
    label_column: usize,
    width: usize,
    mapping: &BlockMapping,
) -> Result<Vec<ClassificationBlock>> {
    let markers: Vec<usize> = body
        .iter()
        .enumerate()
        .filter(|(_, row)| (0..width).any(|i| is_blank(cell(row, i))))
        .map(|(i, _)| i)
        .collect();

    match markers.first() {
        None => return Err(ThresholdError::malformed("no classification marker rows")),
        Some(&first) if first != 0 => {
            return Err(ThresholdError::malformed(format!(
                "{} data row(s) precede the first classification marker",
                first
            )))
        }
        Some(_) => {}
    }

    let labels = markers
        .iter()
        .map(|&m| {
            let label = clean_label(cell(&body[m], label_column));
            if label.is_empty() {
                Err(ThresholdError::malformed(format!(
                    "marker row {} has a blank classification",
                    m
                )))
            } else {
                Ok(label)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let spans = classification_spans(&markers, body.len());
    if let Some((label, _)) = labels.iter().zip(&spans).find(|&(_, &span)| span == 0) {
        return Err(ThresholdError::malformed(format!(
            "classification '{}' has no rows",
            label
        )));
    }

    let variables = mapping.assign(&labels)?;

    Ok(labels
        .into_iter()
        .zip(markers)
        .zip(spans)
        .zip(variables)
        .map(|(((label, marker_index), span), variable)| ClassificationBlock {
            label,
            marker_index,
            span,
            variable,
        })
        .collect())
}

pub(crate) fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Blank cells include those holding only non-breaking spaces.
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn clean_label(text: &str) -> String {
    text.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
