// src/services/cache.rs
use std::fs;
use std::io;
use std::path::PathBuf;

use log::{error, info};

use crate::models::CacheRecord;

pub const CACHE_FILE: &str = "rate_cache.json";

/// Durable store holding exactly one record: the last known good fetch.
pub struct RateCache {
    path: PathBuf,
}

impl RateCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Soft-fails to `None` on a missing file, unreadable file, bad JSON or a
    /// bad timestamp. Callers always have a lower tier to fall to.
    pub fn load(&self) -> Option<CacheRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };
        match serde_json::from_str::<CacheRecord>(&raw) {
            Ok(record) if !record.data.is_empty() => Some(record),
            Ok(_) => {
                error!("Cache file {} holds an empty series", self.path.display());
                None
            }
            Err(e) => {
                error!("Failed to parse cache file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Full overwrite via write-to-temp then rename, so a concurrent load
    /// never observes a partially written record.
    pub fn save(&self, record: &CacheRecord) -> io::Result<()> {
        let json = serde_json::to_string(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        info!(
            "Cached {} points to {}",
            record.data.len(),
            self.path.display()
        );
        Ok(())
    }
}
