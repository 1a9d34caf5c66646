use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity tiers, in the left-to-right order of the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Normal,
    Alert,
    Adverse,
    Extreme,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Normal, Tier::Alert, Tier::Adverse, Tier::Extreme];

    /// Column header of this tier in the raw table.
    pub fn header(&self) -> &'static str {
        match self {
            Tier::Normal => "Normal",
            Tier::Alert => "Alert",
            Tier::Adverse => "Adverse",
            Tier::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Weather variable measured by a classification block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    #[serde(rename = "T")]
    Temperature,
    #[serde(rename = "x")]
    SnowDepth,
    #[serde(rename = "r")]
    Rainfall,
    #[serde(rename = "w")]
    WindSpeed,
}

impl Variable {
    pub const ALL: [Variable; 4] = [
        Variable::Temperature,
        Variable::SnowDepth,
        Variable::Rainfall,
        Variable::WindSpeed,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Variable::Temperature => "T",
            Variable::SnowDepth => "x",
            Variable::Rainfall => "r",
            Variable::WindSpeed => "w",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Variable::Temperature => "celsius degree",
            Variable::SnowDepth => "cm",
            Variable::Rainfall => "mm",
            Variable::WindSpeed => "mph",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+−]?\d+(?:\.\d+)?").expect("valid leading number regex"));

/// A threshold boundary kept verbatim from the source text.
///
/// Boundaries are never coerced on construction: a cell may carry a unit
/// or qualifier next to the number, and only the caller knows how to read
/// it. `numeric` is a best-effort view for the common plain-number case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bound(String);

impl Bound {
    pub fn new(text: impl Into<String>) -> Self {
        Bound(text.into())
    }

    pub fn empty() -> Self {
        Bound(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Leading number of the boundary text, if it starts with one.
    pub fn numeric(&self) -> Option<f64> {
        let m = LEADING_NUMBER.find(self.0.trim())?;
        m.as_str().replace('−', "-").parse().ok()
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Bound {
    fn from(s: &str) -> Self {
        Bound::new(s)
    }
}

/// Boundaries derived from one tier cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierBounds {
    /// Normal: "up to X".
    UpTo { lower: Bound, threshold: Bound },
    /// Alert and Adverse: lower < value <= upper.
    Between { lower: Bound, upper: Bound },
    /// Extreme: values at or beyond the threshold.
    AtLeast { threshold: Bound },
}

/// One normalized row of the HTML thresholds table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThresholdRow {
    pub classification: String,
    pub description: String,
    pub variable_name: Variable,
    pub unit: String,
    pub normal: String,
    pub normal_threshold: Bound,
    pub alert: String,
    pub alert_lower_bound: Bound,
    pub alert_upper_bound: Bound,
    pub adverse: String,
    pub adverse_lower_bound: Bound,
    pub adverse_upper_bound: Bound,
    pub extreme: String,
    pub extreme_threshold: Bound,
}

impl ThresholdRow {
    /// Column names in output order; the first is the index column.
    pub const COLUMNS: [&'static str; 14] = [
        "Classification",
        "Description",
        "VariableName",
        "Unit",
        "Normal",
        "NormalThreshold",
        "Alert",
        "AlertLowerBound",
        "AlertUpperBound",
        "Adverse",
        "AdverseLowerBound",
        "AdverseUpperBound",
        "Extreme",
        "ExtremeThreshold",
    ];

    /// Raw cell text of a tier.
    pub fn tier_text(&self, tier: Tier) -> &str {
        match tier {
            Tier::Normal => &self.normal,
            Tier::Alert => &self.alert,
            Tier::Adverse => &self.adverse,
            Tier::Extreme => &self.extreme,
        }
    }
}

/// The normalized HTML table, rows in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub rows: Vec<ThresholdRow>,
}

impl ThresholdTable {
    pub fn new(rows: Vec<ThresholdRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> &'static [&'static str] {
        &ThresholdRow::COLUMNS
    }

    /// Distinct classification labels in order of first appearance.
    pub fn classifications(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.classification.as_str()) {
                seen.push(&row.classification);
            }
        }
        seen
    }

    pub fn rows_for_classification<'a>(
        &'a self,
        classification: &'a str,
    ) -> impl Iterator<Item = &'a ThresholdRow> + 'a {
        self.rows
            .iter()
            .filter(move |r| r.classification == classification)
    }

    pub fn rows_for_variable(&self, variable: Variable) -> impl Iterator<Item = &ThresholdRow> {
        self.rows.iter().filter(move |r| r.variable_name == variable)
    }
}

/// A non-null workbook cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) | CellValue::DateTime(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One complete row of the route-specific thresholds sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkbookThresholdRow {
    /// Hazard name, uppercased and trimmed.
    pub weather_hazard: String,
    /// Remaining columns in sheet order, keyed by cleaned column name.
    pub fields: Vec<(String, CellValue)>,
}

impl WorkbookThresholdRow {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkbookTable {
    /// All column names with spaces removed, in sheet order.
    pub columns: Vec<String>,
    pub rows: Vec<WorkbookThresholdRow>,
}

impl WorkbookTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows_for_hazard<'a>(
        &'a self,
        hazard: &'a str,
    ) -> impl Iterator<Item = &'a WorkbookThresholdRow> + 'a {
        let hazard = hazard.trim().to_uppercase();
        self.rows
            .iter()
            .filter(move |r| r.weather_hazard == hazard)
    }
}

/// The cached unit: national (HTML) and route-specific (workbook) thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedThresholds {
    pub html: Option<ThresholdTable>,
    pub workbook: Option<WorkbookTable>,
}
