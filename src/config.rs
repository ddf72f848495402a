//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\trackstamp\config.toml
//! - macOS: ~/Library/Application Support/trackstamp/config.toml
//! - Linux: ~/.config/trackstamp/config.toml
//!
//! The config file is human-readable and editable. Command-line flags
//! are layered on top of whatever is loaded here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::OutputFormat;
use crate::catalog::GenrePreference;
use crate::cover::CoverFileMode;
use crate::tags::AsciiPolicy;

/// Tagging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output container settings
    pub output: OutputConfig,

    /// Tag resolution settings
    pub tags: TagsConfig,

    /// Cover art settings
    pub cover: CoverConfig,

    /// Catalog access settings
    pub catalog: CatalogConfig,
}

/// Output container settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Container format the audio pipeline produced
    pub format: OutputFormat,

    /// Return transliterated text from tag getters
    pub ascii_only: bool,

    /// Downgrade written ID3 tags to v2.3
    pub id3_v23: bool,

    /// Audio was encoded at a constant bitrate
    pub cbr: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Mp3,
            ascii_only: false,
            id3_v23: false,
            cbr: false,
        }
    }
}

/// Tag resolution settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    /// Join every artist instead of using only the primary one
    pub all_artists: bool,

    /// Where to look genres up
    pub genres: GenrePreference,

    /// Comment to add to every track
    pub comment: Option<String>,

    /// Grouping to add to every track
    pub grouping: Option<String>,

    /// `field=template` override directives
    pub overrides: Vec<String>,
}

/// Cover art settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverConfig {
    /// Ask the catalog client for high-resolution art first
    pub large_cover_art: bool,

    /// Save the cover next to the audio file instead of embedding it
    pub cover_file: Option<String>,

    /// Save the cover next to the audio file and embed it too
    pub cover_file_and_embed: Option<String>,
}

/// Catalog access settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Bound on every blocking catalog call, in seconds
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl Config {
    /// Transliteration policy implied by the ASCII-only flag.
    pub fn ascii_policy(&self) -> AsciiPolicy {
        AsciiPolicy::from_ascii_only(self.output.ascii_only)
    }

    /// Timeout for catalog loads and cover fetches.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_secs)
    }

    /// How the cover image is persisted for this run.
    pub fn cover_file_mode(&self) -> CoverFileMode {
        CoverFileMode::from_names(
            self.cover.cover_file.as_deref(),
            self.cover.cover_file_and_embed.as_deref(),
        )
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("trackstamp"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from an explicit path, with the same fallback rules as [`load`].
pub fn load_from(path: &std::path::Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    let path = dir.join("config.toml");

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::CreateDir(dir.clone(), e))?;

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
