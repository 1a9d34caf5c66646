use crate::app::ports::{CacheStorePort, HtmlSourcePort, WorkbookSourcePort};
use crate::app::workbook_use_case::WorkbookUseCase;
use crate::config::Config;
use crate::constants::COMBINED_CACHE_KEY;
use crate::error::Result;
use crate::infra::{FsCacheStore, HtmlFileSource, WorkbookFileSource};
use crate::storage;
use crate::types::{CombinedThresholds, ThresholdTable, WorkbookTable};
use crate::workbook::parse_column_span;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Facade over both threshold pipelines and the combined cache.
///
/// Per cache key the lifecycle is absent -> computing -> cached; a cached
/// value is only recomputed on `update = true`. The cached value may be
/// `None` when the last computation failed.
pub struct ThresholdsUseCase {
    html: Arc<dyn HtmlSourcePort>,
    workbook: WorkbookUseCase,
    cache: Arc<dyn CacheStorePort>,
}

impl ThresholdsUseCase {
    pub fn new(
        html: Arc<dyn HtmlSourcePort>,
        workbook: Arc<dyn WorkbookSourcePort>,
        cache: Arc<dyn CacheStorePort>,
    ) -> Self {
        Self {
            html,
            workbook: WorkbookUseCase::new(workbook, cache.clone()),
            cache,
        }
    }

    /// Wires the file-backed sources and cache from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let columns = parse_column_span(&config.workbook.columns)?;
        let html = HtmlFileSource::new(config.html_path());
        let workbook =
            WorkbookFileSource::new(config.workbook_path(), &config.workbook.sheet, columns);
        let cache = FsCacheStore::new(config.cache_dir());
        debug!(
            "Thresholds sources: html={} workbook={} cache={}",
            config.html_path().display(),
            config.workbook_path().display(),
            config.cache_dir().display()
        );
        Ok(Self::new(Arc::new(html), Arc::new(workbook), Arc::new(cache)))
    }

    /// Normalized HTML thresholds, straight from the source.
    pub fn read_from_html(&self) -> Result<ThresholdTable> {
        self.html.read_from_html()
    }

    /// Route-specific thresholds, cached under their own key.
    pub fn read_from_workbook(&self, update: bool) -> Option<WorkbookTable> {
        self.workbook.read_from_workbook(update)
    }

    /// Combined thresholds. `None` means thresholds are unavailable.
    #[instrument(skip(self))]
    pub fn get_thresholds(&self, update: bool) -> Option<CombinedThresholds> {
        if !update {
            match storage::load::<Option<CombinedThresholds>>(
                self.cache.as_ref(),
                COMBINED_CACHE_KEY,
            ) {
                Ok(Some(cached)) => {
                    info!("Weather thresholds served from cache");
                    return cached;
                }
                Ok(None) => debug!("No cached weather thresholds"),
                Err(e) => warn!("Ignoring thresholds cache: {}", e),
            }
        }

        let thresholds = self.compute(update);
        if let Err(e) = storage::save(self.cache.as_ref(), COMBINED_CACHE_KEY, &thresholds) {
            warn!("Could not cache weather thresholds: {}", e);
        }
        thresholds
    }

    fn compute(&self, update: bool) -> Option<CombinedThresholds> {
        let html = self.html.read_from_html();
        let workbook = self.workbook.read_from_workbook(update);

        match html {
            Ok(html) => {
                info!(
                    "Computed weather thresholds: {} national rows, workbook {}",
                    html.len(),
                    if workbook.is_some() { "available" } else { "unavailable" }
                );
                Some(CombinedThresholds {
                    html: Some(html),
                    workbook,
                })
            }
            Err(e) => {
                error!("Failed to get \"Weather thresholds\". {}", e);
                None
            }
        }
    }
}
