use crate::app::ports::CacheStorePort;
use crate::error::{Result, ThresholdError};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Envelope persisted for every cache key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub key: String,
    pub saved_at: DateTime<Utc>,
    /// SHA-256 of the payload's stored JSON text, hex.
    pub checksum: String,
    pub payload: T,
}

// Hashed over the exact payload text, never a re-encoding of it.
fn checksum(payload: &RawValue) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.get().as_bytes());
    hex::encode(hasher.finalize())
}

/// Serializes `value` into a checksummed entry and writes it under `key`.
pub fn save<T: Serialize>(store: &dyn CacheStorePort, key: &str, value: &T) -> Result<()> {
    let payload = serde_json::value::to_raw_value(value)?;
    let entry = CacheEntry {
        key: key.to_string(),
        saved_at: Utc::now(),
        checksum: checksum(&payload),
        payload,
    };
    let bytes = serde_json::to_vec_pretty(&entry)?;
    store.write(key, &bytes)?;
    debug!("Saved cache entry '{}' ({} bytes)", key, bytes.len());
    Ok(())
}

/// Loads the entry under `key`.
///
/// `Ok(None)` means absent. A damaged entry is `Err(CacheCorrupt)`, which
/// callers treat like absent.
pub fn load<T: DeserializeOwned>(store: &dyn CacheStorePort, key: &str) -> Result<Option<T>> {
    let Some(bytes) = store.read(key)? else {
        return Ok(None);
    };
    let corrupt = |reason: String| ThresholdError::CacheCorrupt {
        key: key.to_string(),
        reason,
    };

    let entry: CacheEntry<Box<RawValue>> =
        serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;
    if entry.key != key {
        return Err(corrupt(format!("entry belongs to key '{}'", entry.key)));
    }
    if checksum(&entry.payload) != entry.checksum {
        return Err(corrupt("checksum mismatch".to_string()));
    }
    let value = serde_json::from_str(entry.payload.get()).map_err(|e| corrupt(e.to_string()))?;
    debug!("Loaded cache entry '{}' saved at {}", key, entry.saved_at);
    Ok(Some(value))
}
