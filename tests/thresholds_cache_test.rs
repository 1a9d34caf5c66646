mod common;

use common::{write_file, THRESHOLDS_HTML, THRESHOLD_ROWS};
use std::fs;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::tempdir;
use weather_thresholds::app::ports::{CacheStorePort, HtmlSourcePort, WorkbookSourcePort};
use weather_thresholds::constants::{COMBINED_CACHE_KEY, WORKBOOK_CACHE_KEY};
use weather_thresholds::infra::InMemoryCacheStore;
use weather_thresholds::normalize::{normalize_html, BlockMapping};
use weather_thresholds::{
    CellValue, Config, Result, ThresholdError, ThresholdTable, ThresholdsUseCase, WorkbookTable,
    WorkbookThresholdRow,
};

/// HTML source that parses the fixture page and counts calls.
struct FakeHtml {
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl FakeHtml {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HtmlSourcePort for FakeHtml {
    fn read_from_html(&self) -> Result<ThresholdTable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ThresholdError::malformed("Alert cell '20 to 30': missing separator"));
        }
        normalize_html(THRESHOLDS_HTML, &BlockMapping::default())
    }
}

struct FakeWorkbook {
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl FakeWorkbook {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WorkbookSourcePort for FakeWorkbook {
    fn read_workbook(&self) -> Result<WorkbookTable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ThresholdError::SourceUnavailable {
                path: "Schedule8WeatherIncidents-02062006-31032014.xlsm".into(),
                reason: "No such file or directory".into(),
            });
        }
        Ok(WorkbookTable {
            columns: vec!["WeatherHazard".into(), "Route".into(), "Threshold".into()],
            rows: vec![WorkbookThresholdRow {
                weather_hazard: "HEAT".into(),
                fields: vec![
                    ("Route".into(), CellValue::Text("Anglia".into())),
                    // Mean wind of 3 m/s in mph; not exactly representable in short form
                    ("Threshold".into(), CellValue::Number(3.0 * 0.621371)),
                ],
            }],
        })
    }
}

fn facade(
    html: &Arc<FakeHtml>,
    workbook: &Arc<FakeWorkbook>,
    cache: &Arc<InMemoryCacheStore>,
) -> ThresholdsUseCase {
    ThresholdsUseCase::new(html.clone(), workbook.clone(), cache.clone())
}

#[test]
fn test_second_call_is_served_from_cache() {
    let (html, workbook, cache) = (FakeHtml::new(), FakeWorkbook::new(), Arc::new(InMemoryCacheStore::new()));
    let thresholds = facade(&html, &workbook, &cache);

    let first = thresholds.get_thresholds(false).unwrap();
    let second = thresholds.get_thresholds(false).unwrap();
    let third = thresholds.get_thresholds(false).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_eq!(first.html.as_ref().unwrap().len(), THRESHOLD_ROWS);
    assert_eq!(
        third.workbook.unwrap().rows[0].get("Threshold"),
        Some(&CellValue::Number(3.0 * 0.621371))
    );
    assert_eq!(html.calls(), 1);
    assert_eq!(workbook.calls(), 1);
}

#[test]
fn test_cached_bytes_are_unchanged_by_a_hit() {
    let (html, workbook, cache) = (FakeHtml::new(), FakeWorkbook::new(), Arc::new(InMemoryCacheStore::new()));
    let thresholds = facade(&html, &workbook, &cache);

    thresholds.get_thresholds(false);
    let before = cache.read(COMBINED_CACHE_KEY).unwrap().unwrap();
    let writes = cache.writes();
    thresholds.get_thresholds(false);
    let after = cache.read(COMBINED_CACHE_KEY).unwrap().unwrap();

    assert_eq!(before, after);
    assert_eq!(cache.writes(), writes);
}

#[test]
fn test_forced_refresh_reruns_both_pipelines() {
    let (html, workbook, cache) = (FakeHtml::new(), FakeWorkbook::new(), Arc::new(InMemoryCacheStore::new()));
    let thresholds = facade(&html, &workbook, &cache);

    thresholds.get_thresholds(false).unwrap();
    let writes = cache.writes();
    thresholds.get_thresholds(true).unwrap();

    assert_eq!(html.calls(), 2);
    assert_eq!(workbook.calls(), 2);
    // Combined entry and workbook entry were both rewritten
    assert_eq!(cache.writes(), writes + 2);
}

#[test]
fn test_forced_refresh_overwrites_cache_with_none() {
    let (html, workbook, cache) = (FakeHtml::new(), FakeWorkbook::new(), Arc::new(InMemoryCacheStore::new()));
    let thresholds = facade(&html, &workbook, &cache);

    assert!(thresholds.get_thresholds(false).is_some());

    html.fail.store(true, Ordering::SeqCst);
    assert!(thresholds.get_thresholds(true).is_none());

    // The failed result is now what the cache holds
    html.fail.store(false, Ordering::SeqCst);
    assert!(thresholds.get_thresholds(false).is_none());
    assert_eq!(html.calls(), 2);

    assert!(thresholds.get_thresholds(true).is_some());
    assert_eq!(html.calls(), 3);
}

#[test]
fn test_workbook_failure_leaves_html_side() {
    let (html, workbook, cache) = (FakeHtml::new(), FakeWorkbook::new(), Arc::new(InMemoryCacheStore::new()));
    workbook.fail.store(true, Ordering::SeqCst);
    let thresholds = facade(&html, &workbook, &cache);

    let combined = thresholds.get_thresholds(false).unwrap();
    assert!(combined.html.is_some());
    assert!(combined.workbook.is_none());
    assert!(cache.contains(COMBINED_CACHE_KEY));
    assert!(!cache.contains(WORKBOOK_CACHE_KEY));
}

#[test]
fn test_workbook_cache_is_reused_on_plain_recompute() {
    let (html, workbook, cache) = (FakeHtml::new(), FakeWorkbook::new(), Arc::new(InMemoryCacheStore::new()));
    let thresholds = facade(&html, &workbook, &cache);

    assert!(thresholds.read_from_workbook(false).is_some());
    // Combined key is absent, so it is computed; the workbook comes from its own cache
    thresholds.get_thresholds(false).unwrap();
    assert_eq!(workbook.calls(), 1);
    assert_eq!(html.calls(), 1);
}

#[test]
fn test_corrupt_cache_is_recomputed() {
    let (html, workbook, cache) = (FakeHtml::new(), FakeWorkbook::new(), Arc::new(InMemoryCacheStore::new()));
    let thresholds = facade(&html, &workbook, &cache);

    cache.write(COMBINED_CACHE_KEY, b"{ not a cache entry").unwrap();
    let combined = thresholds.get_thresholds(false).unwrap();

    assert!(combined.html.is_some());
    assert_eq!(html.calls(), 1);
    assert_eq!(thresholds.get_thresholds(false).unwrap(), combined);
    assert_eq!(html.calls(), 1);
}

#[test]
fn test_file_backed_round_trip() {
    let dir = tempdir().unwrap();
    let config = Config::with_data_root(dir.path());
    write_file(&config.html_path(), THRESHOLDS_HTML);

    let thresholds = ThresholdsUseCase::from_config(&config).unwrap();
    assert_eq!(thresholds.read_from_html().unwrap().len(), THRESHOLD_ROWS);

    // No workbook on disk: the pair still carries the HTML table
    let first = thresholds.get_thresholds(false).unwrap();
    assert!(first.workbook.is_none());
    assert!(config.cache_dir().join("Thresholds.json").is_file());

    // With the source gone, only the cache can answer
    fs::remove_file(config.html_path()).unwrap();
    let second = thresholds.get_thresholds(false).unwrap();
    assert_eq!(first, second);

    // A fresh facade over the same directory sees the same cache
    let reopened = ThresholdsUseCase::from_config(&config).unwrap();
    assert_eq!(reopened.get_thresholds(false).unwrap(), first);

    // Forcing a refresh without the source degrades to None
    assert!(reopened.get_thresholds(true).is_none());
    assert!(reopened.get_thresholds(false).is_none());
}

#[test]
fn test_missing_html_is_source_unavailable() {
    let dir = tempdir().unwrap();
    let config = Config::with_data_root(dir.path());
    let thresholds = ThresholdsUseCase::from_config(&config).unwrap();

    let err = thresholds.read_from_html().unwrap_err();
    assert!(matches!(err, ThresholdError::SourceUnavailable { .. }));
    assert!(thresholds.read_from_workbook(false).is_none());
}
