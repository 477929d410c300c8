//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with in-memory implementations.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::domain::Trip;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Replace file content in one step: write a sibling temp file, then rename.
    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Persistence port for the trip collection.
///
/// The collection is always loaded and saved as a whole.
pub trait TripStore: Send + Sync {
    /// Load all trips. Absent or unreadable state yields an empty list.
    fn load(&self) -> Vec<Trip>;

    /// Overwrite the stored collection.
    fn save(&self, trips: &[Trip]) -> io::Result<()>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn write_atomic(&self, path: &Path, content: &str) -> io::Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Trip store backed by a single pretty-printed JSON file.
pub struct JsonTripStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl JsonTripStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TripStore for JsonTripStore {
    fn load(&self) -> Vec<Trip> {
        if !self.fs.exists(&self.path) {
            debug!("load: no store at {}", self.path.display());
            return Vec::new();
        }

        let content = match self.fs.read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                warn!("cannot read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Trip>>(&content) {
            Ok(trips) => {
                debug!("load: {} trips from {}", trips.len(), self.path.display());
                trips
            }
            Err(e) => {
                warn!("ignoring unreadable store {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    fn save(&self, trips: &[Trip]) -> io::Result<()> {
        let content = serde_json::to_string_pretty(trips)?;
        self.fs.ensure_parent(&self.path)?;
        self.fs.write_atomic(&self.path, &content)?;
        debug!("save: {} trips to {}", trips.len(), self.path.display());
        Ok(())
    }
}

/// In-memory trip store, used in tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryTripStore {
    trips: Mutex<Vec<Trip>>,
    saves: AtomicUsize,
}

impl MemoryTripStore {
    pub fn with_trips(trips: Vec<Trip>) -> Self {
        Self {
            trips: Mutex::new(trips),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl TripStore for MemoryTripStore {
    fn load(&self) -> Vec<Trip> {
        self.trips
            .lock()
            .map(|t| t.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn save(&self, trips: &[Trip]) -> io::Result<()> {
        let mut guard = self
            .trips
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = trips.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
