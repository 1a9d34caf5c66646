//! Fixed names for the threshold sources and cache artifacts.

// Source files
pub const HTML_FILENAME: &str = "Weather-Thresholds_9306121.html";
pub const WORKBOOK_FILENAME: &str = "Schedule8WeatherIncidents-02062006-31032014.xlsm";
pub const WORKBOOK_SHEET: &str = "Thresholds";
pub const WORKBOOK_COLUMNS: &str = "A:F";

// Directories under the data root
pub const HTML_SUBDIR: &[&str] = &["METEX", "Weather", "Thresholds"];
pub const WORKBOOK_SUBDIR: &[&str] = &["Incidents", "Spreadsheets"];
pub const CACHE_SUBDIR: &[&str] = &["METEX", "Weather", "Thresholds", "cache"];

// Cache keys
pub const COMBINED_CACHE_KEY: &str = "Thresholds";
pub const WORKBOOK_CACHE_KEY: &str = "Worksheet_Thresholds";

// Column names of the raw HTML table
pub const CLASSIFICATION_COLUMN: &str = "Classification";
pub const DESCRIPTION_COLUMN: &str = "Description";

// Hazard column of the workbook sheet, after spaces are stripped
pub const HAZARD_COLUMN: &str = "WeatherHazard";
