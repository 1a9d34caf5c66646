use crate::app::ports::HtmlSourcePort;
use crate::error::{Result, ThresholdError};
use crate::normalize::{normalize_html, BlockMapping};
use crate::types::ThresholdTable;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Reads the thresholds page from disk and normalizes its first table.
pub struct HtmlFileSource {
    path: PathBuf,
    mapping: BlockMapping,
}

impl HtmlFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            mapping: BlockMapping::default(),
        }
    }

    pub fn with_mapping(mut self, mapping: BlockMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HtmlSourcePort for HtmlFileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read_from_html(&self) -> Result<ThresholdTable> {
        let bytes = fs::read(&self.path).map_err(|e| ThresholdError::SourceUnavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        // Saved pages are not always UTF-8 clean.
        let html = String::from_utf8_lossy(&bytes);
        let table = normalize_html(&html, &self.mapping)?;
        info!("Read {} threshold rows from HTML", table.len());
        Ok(table)
    }
}
