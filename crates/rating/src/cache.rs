//! Persistent evidence cache.
//!
//! One JSON document per partition, `key -> evidence`, loaded wholesale at
//! start and rewritten wholesale on flush. Entries never expire.
//!
//! A missing or corrupt document is an empty partition; a failed write is
//! logged and skipped. The cache is an optimization, never a reason for a
//! lookup to fail.
//!
//! Each partition sits behind its own reader/writer lock, so a cache can
//! be shared across threads. Flush writes a temp file beside the target
//! and renames it into place, so an interrupted run never leaves a
//! half-written document.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CacheError;
use crate::evidence::CrimeEvidence;
use crate::places::PlaceInfo;

pub const CRIME_CACHE_FILE: &str = "crimegrade_cache.json";
pub const PLACES_CACHE_FILE: &str = "places_cache.json";

// ---------------------------------------------------------------------------
// Partition
// ---------------------------------------------------------------------------

/// One evidence kind's `key -> value` map and its backing document.
pub struct Partition<V> {
    name: &'static str,
    path: Option<PathBuf>,
    entries: RwLock<BTreeMap<String, V>>,
}

impl<V> Partition<V>
where
    V: Clone + Serialize + DeserializeOwned,
{
    /// Memory-only partition; flush is a no-op.
    pub fn in_memory(name: &'static str) -> Self {
        Self {
            name,
            path: None,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Partition backed by `path`. Call [`load`](Self::load) to read it.
    pub fn at(name: &'static str, path: PathBuf) -> Self {
        Self {
            name,
            path: Some(path),
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.read().get(key).cloned()
    }

    pub fn put(&self, key: &str, value: V) {
        self.entries.write().insert(key.to_string(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Replace in-memory state with the document on disk. Returns the
    /// number of entries loaded. Unreadable documents load as empty;
    /// individual entries that no longer deserialize are dropped.
    pub fn load(&self) -> usize {
        let Some(path) = self.path.as_deref() else {
            return 0;
        };

        let loaded = read_document::<V>(self.name, path);
        let count = loaded.len();
        *self.entries.write() = loaded;
        log::debug!("{} cache: {} entries from {}", self.name, count, path.display());
        count
    }

    /// Write the current state atomically (temp file + rename).
    pub fn try_flush(&self) -> Result<(), CacheError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let json = {
            let entries = self.entries.read();
            serde_json::to_string_pretty(&*entries)
                .map_err(|e| CacheError::Serialize(e.to_string()))?
        };

        write_atomic(path, json.as_bytes())
    }

    /// [`try_flush`](Self::try_flush), logging instead of failing.
    pub fn flush(&self) -> bool {
        match self.try_flush() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{} cache not saved: {}", self.name, e);
                false
            }
        }
    }
}

fn read_document<V: DeserializeOwned>(name: &str, path: &Path) -> BTreeMap<String, V> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            log::warn!("{} cache unreadable at {}: {}", name, path.display(), e);
            return BTreeMap::new();
        }
    };

    let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&contents) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("{} cache corrupt at {}: {}; starting empty", name, path.display(), e);
            return BTreeMap::new();
        }
    };

    raw.into_iter()
        .filter_map(|(key, value)| match serde_json::from_value(value) {
            Ok(v) => Some((key, v)),
            Err(e) => {
                log::warn!("{} cache: dropping entry '{}': {}", name, key, e);
                None
            }
        })
        .collect()
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    let io_err = |e: std::io::Error| CacheError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(io_err)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".salemap-cache-")
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// EvidenceCache
// ---------------------------------------------------------------------------

/// The process's evidence cache: one partition per network evidence kind.
///
/// Built once and passed by reference to the chain, the place lookup and
/// batch resolution. The static income estimate is never cached.
pub struct EvidenceCache {
    pub crime: Partition<CrimeEvidence>,
    pub places: Partition<PlaceInfo>,
}

impl EvidenceCache {
    pub fn in_memory() -> Self {
        Self {
            crime: Partition::in_memory("crime"),
            places: Partition::in_memory("places"),
        }
    }

    /// Cache backed by documents in `dir`, loaded immediately.
    pub fn open(dir: &Path) -> Self {
        let cache = Self {
            crime: Partition::at("crime", dir.join(CRIME_CACHE_FILE)),
            places: Partition::at("places", dir.join(PLACES_CACHE_FILE)),
        };
        cache.load();
        cache
    }

    pub fn load(&self) {
        self.crime.load();
        self.places.load();
    }

    /// Flush both partitions. Returns false if either write failed.
    pub fn flush(&self) -> bool {
        let crime = self.crime.flush();
        let places = self.places.flush();
        crime && places
    }
}

impl Default for EvidenceCache {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salemap_core::CrimeGrade;

    fn evidence(grade: CrimeGrade) -> CrimeEvidence {
        CrimeEvidence {
            overall_grade: Some(grade),
            ..Default::default()
        }
    }

    #[test]
    fn get_put_in_memory() {
        let cache = EvidenceCache::in_memory();
        assert!(cache.crime.get("43551").is_none());
        cache.crime.put("43551", evidence(CrimeGrade::A));
        assert_eq!(cache.crime.get("43551"), Some(evidence(CrimeGrade::A)));
        assert_eq!(cache.crime.len(), 1);
        assert!(cache.flush());
    }

    #[test]
    fn flush_then_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let cache = EvidenceCache::open(dir.path());
        assert!(cache.crime.is_empty());
        cache.crime.put("48201", evidence(CrimeGrade::DMinus));
        assert!(cache.flush());

        let reopened = EvidenceCache::open(dir.path());
        assert_eq!(reopened.crime.get("48201"), Some(evidence(CrimeGrade::DMinus)));
        assert!(reopened.places.is_empty());
    }

    #[test]
    fn document_is_readable_json_keyed_by_zip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = EvidenceCache::open(dir.path());
        cache.crime.put("43615", evidence(CrimeGrade::C));
        cache.flush();

        let text = fs::read_to_string(dir.path().join(CRIME_CACHE_FILE)).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["43615"]["overall_grade"], "C");
        assert!(text.contains('\n'), "expected pretty-printed document");
    }

    #[test]
    fn corrupt_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CRIME_CACHE_FILE), "{ this is not json").unwrap();
        let cache = EvidenceCache::open(dir.path());
        assert!(cache.crime.is_empty());
    }

    #[test]
    fn bad_entries_are_dropped_individually() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CRIME_CACHE_FILE),
            r#"{"43551": {"overall_grade": "A-"}, "99999": {"overall_grade": "E"}}"#,
        )
        .unwrap();
        let cache = EvidenceCache::open(dir.path());
        assert_eq!(cache.crime.len(), 1);
        assert_eq!(
            cache.crime.get("43551").and_then(|e| e.overall_grade),
            Some(CrimeGrade::AMinus)
        );
    }

    #[test]
    fn flush_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the cache directory should be.
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let cache = EvidenceCache::open(&blocker);
        cache.crime.put("43551", evidence(CrimeGrade::B));
        assert!(!cache.flush());
        assert!(cache.crime.try_flush().is_err());
        // In-memory state survives.
        assert!(cache.crime.contains("43551"));
    }

    #[test]
    fn flush_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = EvidenceCache::open(dir.path());
        cache.crime.put("43551", evidence(CrimeGrade::B));
        cache.flush();
        cache.flush();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert!(names.iter().all(|n| !n.ends_with(".tmp")), "{names:?}");
        assert!(names.contains(&CRIME_CACHE_FILE.to_string()));
    }
}
