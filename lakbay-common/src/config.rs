//! Bootstrap configuration loading and root folder resolution
//!
//! The TOML file carries only what is needed before the database is open
//! plus the remote feature flags served to clients. Runtime toggles (fast
//! mode override, onboarding flag) live in the `settings` table.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "LAKBAY_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "lakbay.db";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root folder for the database (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Unsplash API access key
    #[serde(default)]
    pub unsplash_access_key: Option<String>,

    /// Gemini API key
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Remote feature flags served to clients
    #[serde(default)]
    pub features: FeatureConfig,

    /// Description request budget
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Server-side image cache bounds
    #[serde(default)]
    pub image_cache: ImageCacheConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Remote feature flags
///
/// These are the "remote config" tier: a local override in the settings
/// table always wins when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Try Gemini before Wikipedia for descriptions
    #[serde(default)]
    pub prioritize_gemini: bool,

    /// Start in fast mode unless the user toggled it locally
    #[serde(default)]
    pub fast_mode_default: bool,
}

/// Description request budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

/// Image cache bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCacheConfig {
    /// Maximum number of cached images
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,

    /// Entry lifetime in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_port() -> u16 {
    5780
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_requests() -> u32 {
    20
}

fn default_window_secs() -> u64 {
    3600
}

fn default_cache_capacity() -> usize {
    256
}

fn default_cache_ttl_secs() -> u64 {
    6 * 3600
}

/// Load and parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load config from an explicit path, or from the platform default path,
/// falling back to built-in defaults when no file exists
pub fn load_or_default(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        return load_toml_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            info!("Loading config from {}", path.display());
            load_toml_config(&path)
        }
        Some(path) => {
            debug!("No config file at {}, using defaults", path.display());
            Ok(TomlConfig::default())
        }
        None => {
            warn!("Could not determine config directory, using defaults");
            Ok(TomlConfig::default())
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            port: default_port(),
            logging: LoggingConfig::default(),
            unsplash_access_key: None,
            gemini_api_key: None,
            features: FeatureConfig::default(),
            rate_limit: RateLimitConfig::default(),
            image_cache: ImageCacheConfig::default(),
        }
    }
}

/// Platform config file path (`~/.config/lakbay/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lakbay").join("config.toml"))
}

/// Root folder resolution
///
/// Priority order:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent default
pub struct RootFolderResolver<'a> {
    cli_arg: Option<PathBuf>,
    toml_config: Option<&'a TomlConfig>,
}

impl<'a> RootFolderResolver<'a> {
    pub fn new(cli_arg: Option<PathBuf>, toml_config: Option<&'a TomlConfig>) -> Self {
        Self {
            cli_arg,
            toml_config,
        }
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = self.toml_config.and_then(|c| c.root_folder.clone()) {
            return path;
        }

        default_root_folder()
    }
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("lakbay"))
        .unwrap_or_else(|| PathBuf::from("./lakbay_data"))
}

/// Creates the root folder and derives paths inside it
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }
}
