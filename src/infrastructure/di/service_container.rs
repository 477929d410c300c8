//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::TripService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, JsonTripStore, RealFileSystem, TripStore};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub trips: TripService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// Trips are stored as JSON at `Settings::store_path()`.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let store = Arc::new(JsonTripStore::new(fs.clone(), settings.store_path()));
        Self::with_deps(settings, fs, store)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn TripStore>,
    ) -> Self {
        let settings = Arc::new(settings);
        let trips = match settings.seed {
            Some(seed) => TripService::with_seed(store, seed),
            None => TripService::new(store),
        };

        Self {
            settings,
            fs,
            trips,
        }
    }
}
