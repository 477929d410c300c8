//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tripmate/tripmate.toml`
//! 3. Environment variables: `TRIPMATE_*` prefix
//! 4. `--data-dir` on the command line (applied by the CLI)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::util::path::expand_env_vars;

/// Unified configuration for tripmate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the trip store (default: XDG data dir)
    pub data_dir: PathBuf,
    /// File name of the JSON store inside `data_dir`
    pub store_file: String,
    /// Currency label shown next to amounts
    pub currency: String,
    /// Decimals shown for amounts; balances keep full precision
    pub display_decimals: usize,
    /// Fixed RNG seed for reproducible seat and room draws
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store_file: "trips.json".into(),
            currency: "BDT".into(),
            display_decimals: 0,
            seed: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, keep base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_dir: Option<PathBuf>,
    pub store_file: Option<String>,
    pub currency: Option<String>,
    pub display_decimals: Option<usize>,
    pub seed: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "tripmate")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.tripmate"))
}

/// Get the XDG config directory for tripmate.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tripmate").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tripmate.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Full path of the JSON trip store.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }

    /// Expand `~`, `$VAR` and `${VAR}` in `data_dir`.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_dir.to_string_lossy().as_ref());
        self.data_dir = PathBuf::from(expanded);
    }

    /// Override `data_dir` (the `--data-dir` flag), expanded like every other source.
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = dir.to_path_buf();
        self.expand_paths();
        self
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_dir: overlay
                .data_dir
                .clone()
                .unwrap_or_else(|| self.data_dir.clone()),
            store_file: overlay
                .store_file
                .clone()
                .unwrap_or_else(|| self.store_file.clone()),
            currency: overlay
                .currency
                .clone()
                .unwrap_or_else(|| self.currency.clone()),
            display_decimals: overlay.display_decimals.unwrap_or(self.display_decimals),
            seed: overlay.seed.or(self.seed),
        }
    }

    /// Load settings from defaults, the global config file and `TRIPMATE_*` env vars.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Same as [`Settings::load`] with an explicit config file location.
    ///
    /// A missing file is not an error; an unparsable one is.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply TRIPMATE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TRIPMATE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("store_file") {
            settings.store_file = val;
        }
        if let Ok(val) = config.get_string("currency") {
            settings.currency = val;
        }
        if let Ok(val) = config.get_int("display_decimals") {
            settings.display_decimals = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("TRIPMATE_DISPLAY_DECIMALS must not be negative: {val}"),
            })?;
        }
        if let Ok(val) = config.get_int("seed") {
            settings.seed = Some(u64::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("TRIPMATE_SEED must not be negative: {val}"),
            })?);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# tripmate configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/tripmate/tripmate.toml
#   Env:    TRIPMATE_* environment variables (e.g. TRIPMATE_CURRENCY=EUR)
#   Flag:   --data-dir

# Directory holding the trip store
# data_dir = "~/.local/share/tripmate"

# Store file name inside data_dir
# store_file = "trips.json"

# Currency label shown next to amounts
# currency = "BDT"

# Decimals shown for amounts (balances are computed at full precision)
# display_decimals = 0

# Fixed seed for reproducible seat and room draws
# seed = 42
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
