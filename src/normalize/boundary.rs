use crate::error::{Result, ThresholdError};
use crate::types::{Bound, Tier, TierBounds};

const UP_TO: &str = "up to ";
const LESS_THAN: &str = " < ";
const LESS_OR_EQUAL: &str = " ≤ ";
const GREATER_OR_EQUAL: &str = " ≥ ";

/// Splits a tier cell into its boundaries.
///
/// - Normal: `"up to X"`; the text before the separator is the lower bound
///   (normally empty) and `X` the threshold.
/// - Alert, Adverse: `"a < v ≤ b"` or `"a ≤ v < b"`; `a` is the lower and
///   `b` the upper bound. With a single separator only the side opposite
///   the bare variable token is a bound.
/// - Extreme: the text after the first `≤` or `≥`.
///
/// Non-breaking spaces count as spaces when looking for separators.
pub fn split_bounds(tier: Tier, cell: &str) -> Result<TierBounds> {
    // Pad so separators at either edge of a trimmed cell still match.
    let text = format!(" {} ", cell.replace('\u{a0}', " ").trim());
    let split = match tier {
        Tier::Normal => split_up_to(&text),
        Tier::Alert | Tier::Adverse => split_between(&text),
        Tier::Extreme => split_at_least(&text),
    };
    split.map_err(|reason| {
        ThresholdError::malformed(format!("{} cell '{}': {}", tier, cell.trim(), reason))
    })
}

fn split_up_to(text: &str) -> std::result::Result<TierBounds, String> {
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let idx = text
        .to_ascii_lowercase()
        .find(UP_TO)
        .ok_or_else(|| format!("missing '{}'", UP_TO.trim()))?;
    let threshold = bound(&text[idx + UP_TO.len()..]);
    if threshold.is_empty() {
        return Err("nothing follows 'up to'".to_string());
    }
    Ok(TierBounds::UpTo {
        lower: bound(&text[..idx]),
        threshold,
    })
}

fn split_between(text: &str) -> std::result::Result<TierBounds, String> {
    let mut separators: Vec<(usize, usize)> = [LESS_THAN, LESS_OR_EQUAL]
        .iter()
        .flat_map(|sep| text.match_indices(sep).map(|(i, s)| (i, i + s.len())))
        .collect();
    separators.sort_unstable();

    let (lower, upper) = match separators.as_slice() {
        [] => return Err("missing '<' or '≤' separator".to_string()),
        [(start, end)] => {
            let before = bound(&text[..*start]);
            let after = bound(&text[*end..]);
            if is_variable_token(before.as_str()) {
                (Bound::empty(), after)
            } else if is_variable_token(after.as_str()) {
                (before, Bound::empty())
            } else {
                (before, after)
            }
        }
        [(first, _), .., (_, last)] => (bound(&text[..*first]), bound(&text[*last..])),
    };

    if lower.is_empty() && upper.is_empty() {
        return Err("no bound found around separator".to_string());
    }
    Ok(TierBounds::Between { lower, upper })
}

fn split_at_least(text: &str) -> std::result::Result<TierBounds, String> {
    let (_, end) = [LESS_OR_EQUAL, GREATER_OR_EQUAL]
        .iter()
        .filter_map(|sep| text.find(sep).map(|i| (i, i + sep.len())))
        .min()
        .ok_or_else(|| "missing '≤' or '≥' separator".to_string())?;
    let threshold = bound(&text[end..]);
    if threshold.is_empty() {
        return Err("nothing follows the separator".to_string());
    }
    Ok(TierBounds::AtLeast { threshold })
}

fn bound(text: &str) -> Bound {
    Bound::new(text.trim())
}

fn is_variable_token(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphabetic)
}
