//! Normalization of the raw HTML thresholds table.
//!
//! The page lays the four variables out as blocks of rows, each opened by
//! a marker row whose only filled cell names the block. Tier columns hold
//! free-text ranges which are split into explicit bounds.

pub mod blocks;
pub mod boundary;
pub mod description;

pub use blocks::{classification_spans, locate_blocks, BlockMapping, ClassificationBlock};
pub use boundary::split_bounds;
pub use description::clean_description;

use crate::constants::CLASSIFICATION_COLUMN;
use crate::error::{Result, ThresholdError};
use crate::parser::{extract_first_table, RawTable};
use crate::types::{Bound, ThresholdRow, ThresholdTable, Tier, TierBounds};
use blocks::cell;
use tracing::{debug, info, instrument};

/// Normalizes a raw table using the default block mapping.
pub fn normalize_table(raw: &RawTable) -> Result<ThresholdTable> {
    normalize_table_with(raw, &BlockMapping::default())
}

/// Parses an HTML page and normalizes its first table.
pub fn normalize_html(html: &str, mapping: &BlockMapping) -> Result<ThresholdTable> {
    let raw = extract_first_table(html)?;
    normalize_table_with(&raw, mapping)
}

#[instrument(skip_all, fields(rows = raw.rows.len()))]
pub fn normalize_table_with(raw: &RawTable, mapping: &BlockMapping) -> Result<ThresholdTable> {
    let (header, body) = raw
        .rows
        .split_first()
        .ok_or_else(|| ThresholdError::malformed("table is empty"))?;

    let header: Vec<String> = header
        .iter()
        .map(|h| h.replace('\u{a0}', " ").trim().to_string())
        .collect();
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ThresholdError::malformed(format!("missing '{}' column", name)))
    };
    let label_column = column(CLASSIFICATION_COLUMN)?;
    let mut tier_columns = [0usize; 4];
    for (slot, tier) in tier_columns.iter_mut().zip(Tier::ALL) {
        *slot = column(tier.header())?;
    }

    let blocks = locate_blocks(body, label_column, header.len(), mapping)?;
    debug!("Located {} classification blocks", blocks.len());

    let mut rows = Vec::with_capacity(body.len() - blocks.len());
    for block in &blocks {
        for index in block.row_indices() {
            let source = &body[index];
            let tier_text = |i: usize| cell(source, tier_columns[i]).trim().to_string();
            let (normal, alert, adverse, extreme) = (tier_text(0), tier_text(1), tier_text(2), tier_text(3));

            let normal_threshold = up_to(&normal)?;
            let (alert_lower_bound, alert_upper_bound) = between(Tier::Alert, &alert)?;
            let (adverse_lower_bound, adverse_upper_bound) = between(Tier::Adverse, &adverse)?;
            let extreme_threshold = at_least(&extreme)?;

            rows.push(ThresholdRow {
                classification: block.label.clone(),
                description: clean_description(cell(source, label_column)),
                variable_name: block.variable,
                unit: block.variable.unit().to_string(),
                normal,
                normal_threshold,
                alert,
                alert_lower_bound,
                alert_upper_bound,
                adverse,
                adverse_lower_bound,
                adverse_upper_bound,
                extreme,
                extreme_threshold,
            });
        }
    }

    info!(
        "Normalized {} threshold rows across {} classifications",
        rows.len(),
        blocks.len()
    );
    Ok(ThresholdTable::new(rows))
}

fn up_to(text: &str) -> Result<Bound> {
    match split_bounds(Tier::Normal, text)? {
        TierBounds::UpTo { threshold, .. } => Ok(threshold),
        other => Err(unexpected(Tier::Normal, other)),
    }
}

fn between(tier: Tier, text: &str) -> Result<(Bound, Bound)> {
    match split_bounds(tier, text)? {
        TierBounds::Between { lower, upper } => Ok((lower, upper)),
        other => Err(unexpected(tier, other)),
    }
}

fn at_least(text: &str) -> Result<Bound> {
    match split_bounds(Tier::Extreme, text)? {
        TierBounds::AtLeast { threshold } => Ok(threshold),
        other => Err(unexpected(Tier::Extreme, other)),
    }
}

fn unexpected(tier: Tier, bounds: TierBounds) -> ThresholdError {
    ThresholdError::malformed(format!("unexpected bounds {:?} for tier {}", bounds, tier))
}
