use crate::constants::{
    CACHE_SUBDIR, HTML_FILENAME, HTML_SUBDIR, WORKBOOK_COLUMNS, WORKBOOK_FILENAME, WORKBOOK_SHEET,
    WORKBOOK_SUBDIR,
};
use crate::error::{Result, ThresholdError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Locations of the threshold sources and the cache directory.
///
/// Relative paths in the `[html]`, `[workbook]` and `[cache]` sections are
/// resolved against `data_root`; unset paths fall back to the fixed layout
/// in `constants`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_root: PathBuf,
    pub html: HtmlConfig,
    pub workbook: WorkbookConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkbookConfig {
    pub path: Option<PathBuf>,
    pub sheet: String,
    pub columns: String,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        Self {
            path: None,
            sheet: WORKBOOK_SHEET.to_string(),
            columns: WORKBOOK_COLUMNS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ThresholdError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Loads `config.toml` when present, otherwise the default layout.
    /// A config file that exists but fails to parse is still an error.
    pub fn load_or_default() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load()
        } else {
            Ok(Self::default())
        }
    }

    /// Config rooted at `data_root` with the default file layout.
    pub fn with_data_root<P: Into<PathBuf>>(data_root: P) -> Self {
        Self {
            data_root: data_root.into(),
            ..Self::default()
        }
    }

    pub fn html_path(&self) -> PathBuf {
        self.resolve(self.html.path.as_deref(), HTML_SUBDIR, Some(HTML_FILENAME))
    }

    pub fn workbook_path(&self) -> PathBuf {
        self.resolve(
            self.workbook.path.as_deref(),
            WORKBOOK_SUBDIR,
            Some(WORKBOOK_FILENAME),
        )
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.resolve(self.cache.dir.as_deref(), CACHE_SUBDIR, None)
    }

    fn resolve(&self, explicit: Option<&Path>, subdirs: &[&str], filename: Option<&str>) -> PathBuf {
        if let Some(path) = explicit {
            return self.data_root.join(path);
        }
        let mut path = self.data_root.clone();
        for dir in subdirs {
            path.push(dir);
        }
        if let Some(name) = filename {
            path.push(name);
        }
        path
    }
}
