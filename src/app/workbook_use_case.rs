use crate::app::ports::{CacheStorePort, WorkbookSourcePort};
use crate::constants::WORKBOOK_CACHE_KEY;
use crate::error::Result;
use crate::storage;
use crate::types::WorkbookTable;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Cached access to the route-specific thresholds sheet.
pub struct WorkbookUseCase {
    source: Arc<dyn WorkbookSourcePort>,
    cache: Arc<dyn CacheStorePort>,
}

impl WorkbookUseCase {
    pub fn new(source: Arc<dyn WorkbookSourcePort>, cache: Arc<dyn CacheStorePort>) -> Self {
        Self { source, cache }
    }

    /// The workbook table, from cache unless `update` is set or the cache
    /// is absent or damaged. Read failures are logged and yield `None`;
    /// nothing is cached for a failed read.
    pub fn read_from_workbook(&self, update: bool) -> Option<WorkbookTable> {
        match self.load(update) {
            Ok(table) => Some(table),
            Err(e) => {
                error!("Failed to read \"Weather thresholds\" from the workbook. {}", e);
                None
            }
        }
    }

    /// Same as `read_from_workbook` but hands the failure to the caller.
    pub fn load(&self, update: bool) -> Result<WorkbookTable> {
        if !update {
            match storage::load::<WorkbookTable>(self.cache.as_ref(), WORKBOOK_CACHE_KEY) {
                Ok(Some(table)) => {
                    debug!("Workbook thresholds served from cache");
                    return Ok(table);
                }
                Ok(None) => debug!("No cached workbook thresholds"),
                Err(e) => warn!("Ignoring workbook cache: {}", e),
            }
        }

        let table = self.source.read_workbook()?;
        if let Err(e) = storage::save(self.cache.as_ref(), WORKBOOK_CACHE_KEY, &table) {
            warn!("Could not cache workbook thresholds: {}", e);
        }
        info!("Workbook thresholds refreshed ({} rows)", table.len());
        Ok(table)
    }
}
