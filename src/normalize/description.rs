use once_cell::sync::Lazy;
use regex::Regex;

// ", x (cm)", ", T ( oC )" and friends: the symbol and unit live in their own columns.
static SYMBOL_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*,\s*[TxrwXRW]\s*\(\s*(?:cm|mm|mph|o\s*C|°\s*C)\s*\)").expect("symbol unit regex")
});
static CELSIUS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\(\s*(?:o|°|º)\s*C\s*\)").expect("celsius regex"));
static MPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\s*mph\s*\)").expect("mph regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Cleans a row description: non-breaking spaces become spaces, unit
/// annotations duplicated by the `Unit` column are removed, and whitespace
/// is collapsed.
///
/// Runs to a fixpoint, so `clean_description(clean_description(s))` equals
/// `clean_description(s)`.
pub fn clean_description(text: &str) -> String {
    let mut current = clean_once(text);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(text: &str) -> String {
    let text = text.replace('\u{a0}', " ");
    let text = SYMBOL_UNIT.replace_all(&text, "");
    let text = CELSIUS.replace_all(&text, "");
    let text = MPH.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}
