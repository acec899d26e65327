//! Configuration loading with a per-path cache.
//!
//! [`ConfigLoader`] is the only component that touches the filesystem. It
//! owns a memoized [`Configuration`] per canonical path and hands out the
//! same `Arc` to every caller, so consumers may compare instances with
//! [`Arc::ptr_eq`] to skip recomputation.
//!
//! # Concurrency
//!
//! Each path has its own slot guarded by a mutex. The first caller parses
//! while holding the slot; concurrent callers for the same path block on the
//! slot and then receive the instance the first caller stored. Different
//! paths never contend beyond a brief lookup in the slot table.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use tooldoc_core::ConfigLoader;
//!
//! # fn example() -> tooldoc_core::Result<()> {
//! let loader = ConfigLoader::new();
//! let first = loader.load("naming.json")?;
//! let second = loader.load("./naming.json")?;
//! assert!(Arc::ptr_eq(&first, &second));
//! # Ok(())
//! # }
//! ```

use crate::{Configuration, Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Slot = Arc<Mutex<Option<Arc<Configuration>>>>;

/// Document syntax, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json` and any unrecognized extension
    Json,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Picks the format for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tooldoc_core::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::from_path("naming.TOML"), ConfigFormat::Toml);
    /// assert_eq!(ConfigFormat::from_path("naming.json"), ConfigFormat::Json);
    /// assert_eq!(ConfigFormat::from_path("naming"), ConfigFormat::Json);
    /// ```
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    /// Parses `content` in this format.
    ///
    /// # Errors
    ///
    /// See [`Configuration::from_json_str`].
    pub fn parse(self, content: &str) -> Result<Configuration> {
        match self {
            Self::Json => Configuration::from_json_str(content),
            Self::Toml => Configuration::from_toml_str(content),
        }
    }
}

/// Counters describing loader activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderStats {
    /// Documents read and parsed from disk
    pub parses: u64,
    /// Calls answered from the cache
    pub cache_hits: u64,
}

/// Loads configuration files, parsing each canonical path at most once.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    slots: Mutex<HashMap<PathBuf, Slot>>,
    parses: AtomicU64,
    cache_hits: AtomicU64,
}

impl ConfigLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the configuration at `path`, or returns the cached instance.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigNotFound`] if the path does not exist
    /// - [`Error::Io`] if it cannot be read
    /// - [`Error::MalformedConfig`] if it does not parse or validate
    /// - [`Error::UnresolvedReference`] if a lexicon reference dangles
    ///
    /// Failures are not cached; nothing is stored for the path, and the
    /// path's slot is released unless another caller is waiting on it.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Configuration>> {
        let requested = path.as_ref();
        let resolved = canonical_path(requested)?;

        let slot = {
            let mut slots = lock(&self.slots);
            Arc::clone(slots.entry(resolved.clone()).or_default())
        };

        let mut cached = lock(&*slot);
        if let Some(config) = cached.as_ref() {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Using cached configuration: {}", resolved.display());
            return Ok(Arc::clone(config));
        }

        let config = match self.read_and_parse(&resolved) {
            Ok(config) => Arc::new(config),
            Err(e) => {
                self.release_slot(&resolved, &slot);
                return Err(e);
            }
        };
        *cached = Some(Arc::clone(&config));
        Ok(config)
    }

    /// Loads on the tokio blocking pool, sharing the cache with [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), plus [`Error::LoadTaskFailed`] if the
    /// blocking task panics or is cancelled.
    pub async fn load_async(self: &Arc<Self>, path: impl AsRef<Path>) -> Result<Arc<Configuration>> {
        let loader = Arc::clone(self);
        let path = path.as_ref().to_path_buf();
        tokio::task::spawn_blocking(move || loader.load(path))
            .await
            .map_err(|e| Error::LoadTaskFailed {
                message: e.to_string(),
            })?
    }

    /// Returns `true` if a configuration for `path` is cached.
    #[must_use]
    pub fn is_cached(&self, path: impl AsRef<Path>) -> bool {
        let Ok(resolved) = canonical_path(path.as_ref()) else {
            return false;
        };
        let slot = lock(&self.slots).get(&resolved).cloned();
        let Some(slot) = slot else {
            return false;
        };
        let cached = lock(&*slot).is_some();
        cached
    }

    /// Number of cached configurations.
    #[must_use]
    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = lock(&self.slots).values().cloned().collect();
        slots
            .iter()
            .filter(|slot| lock(slot.as_ref()).is_some())
            .count()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Activity counters.
    #[must_use]
    pub fn stats(&self) -> LoaderStats {
        LoaderStats {
            parses: self.parses.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }

    /// Drops the empty slot of a failed load unless other callers are waiting on it.
    fn release_slot(&self, path: &Path, slot: &Slot) {
        let mut slots = lock(&self.slots);
        // Map entry plus this caller; any extra clone belongs to a waiter.
        if slots.get(path).is_some_and(|held| Arc::ptr_eq(held, slot)) && Arc::strong_count(slot) == 2 {
            slots.remove(path);
            tracing::debug!("Released slot after failed load: {}", path.display());
        }
    }

    fn read_and_parse(&self, path: &Path) -> Result<Configuration> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let format = ConfigFormat::from_path(path);
        let config = format.parse(&content)?;
        self.parses.fetch_add(1, Ordering::Relaxed);

        tracing::info!(
            path = %path.display(),
            ?format,
            services = config.services().count(),
            parameters = config.parameters().count(),
            acronyms = config.lexicon().acronyms.len(),
            "Loaded naming configuration"
        );
        Ok(config)
    }
}

fn canonical_path(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_same_path_same_instance() {
        let file = write_config(".json", "{}");
        let loader = ConfigLoader::new();
        let a = loader.load(file.path()).unwrap();
        let b = loader.load(file.path()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(loader.stats(), LoaderStats { parses: 1, cache_hits: 1 });
    }

    #[test]
    fn test_missing_file() {
        let loader = ConfigLoader::new();
        let err = loader.load("/definitely/not/here/naming.json").unwrap_err();
        assert!(err.is_not_found());
        assert!(loader.is_empty());
    }

    #[test]
    fn test_malformed_not_cached() {
        let file = write_config(".json", "{ not json");
        let loader = ConfigLoader::new();
        assert!(loader.load(file.path()).unwrap_err().is_malformed());
        assert!(!loader.is_cached(file.path()));
        assert_eq!(loader.stats().parses, 0);
    }

    #[test]
    fn test_failed_loads_release_their_slots() {
        let files: Vec<_> = (0..5).map(|_| write_config(".json", "{ not json")).collect();
        let loader = ConfigLoader::new();
        for file in &files {
            assert!(loader.load(file.path()).is_err());
        }
        assert!(lock(&loader.slots).is_empty());

        let good = write_config(".json", "{}");
        loader.load(good.path()).unwrap();
        assert_eq!(lock(&loader.slots).len(), 1);
    }

    #[test]
    fn test_toml_by_extension() {
        let file = write_config(
            ".toml",
            "[lexicon.acronyms.vm]\ncanonical = \"VM\"\n",
        );
        let loader = ConfigLoader::new();
        let config = loader.load(file.path()).unwrap();
        assert_eq!(config.lexicon().acronym_form("vm"), Some("VM"));
    }

    #[test]
    fn test_len_counts_cached_paths() {
        let a = write_config(".json", "{}");
        let b = write_config(".json", "{}");
        let loader = ConfigLoader::new();
        loader.load(a.path()).unwrap();
        loader.load(b.path()).unwrap();
        assert_eq!(loader.len(), 2);
        assert!(loader.is_cached(a.path()));
    }
}
