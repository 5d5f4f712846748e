//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.kbot/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::catalog::{CatalogError, PoiCatalog};
use crate::core::conversation::{
    DEFAULT_CAROUSEL_DELAY_MS, DEFAULT_FIRST_REPLY_DELAY_MS, ReplyTiming,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KbotConfig {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimingConfig {
    pub first_reply_delay_ms: Option<u64>,
    pub carousel_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    pub seed_opening: Option<bool>,
    /// POI catalog file, relative to `~/.kbot/` unless absolute.
    pub catalog_file: Option<String>,
}

/// Values taken from command-line flags (None / false = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub first_reply_delay_ms: Option<u64>,
    pub carousel_delay_ms: Option<u64>,
    pub no_opening: bool,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub timing: ReplyTiming,
    pub seed_opening: bool,
    pub catalog_path: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Catalog(CatalogError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Catalog(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<CatalogError> for ConfigError {
    fn from(e: CatalogError) -> Self {
        ConfigError::Catalog(e)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.kbot/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".kbot"))
}

/// Returns the path to `~/.kbot/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.kbot/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `KbotConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<KbotConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(KbotConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(KbotConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<KbotConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# K-Bot Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [timing]
# first_reply_delay_ms = 1000        # Or KBOT_FIRST_REPLY_DELAY_MS
# carousel_delay_ms = 500            # Or KBOT_CAROUSEL_DELAY_MS

# [session]
# seed_opening = true                # Start with K-Bot's greeting
# catalog_file = "pois.toml"         # Path relative to ~/.kbot/
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &KbotConfig, cli: &CliOverrides) -> ResolvedConfig {
    let env_first = parse_delay(
        "KBOT_FIRST_REPLY_DELAY_MS",
        std::env::var("KBOT_FIRST_REPLY_DELAY_MS").ok(),
    );
    let env_carousel = parse_delay(
        "KBOT_CAROUSEL_DELAY_MS",
        std::env::var("KBOT_CAROUSEL_DELAY_MS").ok(),
    );
    resolve_with_env(config, cli, env_first, env_carousel)
}

fn resolve_with_env(
    config: &KbotConfig,
    cli: &CliOverrides,
    env_first: Option<u64>,
    env_carousel: Option<u64>,
) -> ResolvedConfig {
    // Delays: CLI → env → config → default
    let first_reply_delay_ms = cli
        .first_reply_delay_ms
        .or(env_first)
        .or(config.timing.first_reply_delay_ms)
        .unwrap_or(DEFAULT_FIRST_REPLY_DELAY_MS);
    let carousel_delay_ms = cli
        .carousel_delay_ms
        .or(env_carousel)
        .or(config.timing.carousel_delay_ms)
        .unwrap_or(DEFAULT_CAROUSEL_DELAY_MS);

    let seed_opening = !cli.no_opening && config.session.seed_opening.unwrap_or(true);

    let catalog_path = config.session.catalog_file.as_ref().and_then(|file| {
        let file = PathBuf::from(file);
        if file.is_absolute() {
            Some(file)
        } else {
            config_dir().map(|dir| dir.join(file))
        }
    });

    ResolvedConfig {
        timing: ReplyTiming::from_millis(first_reply_delay_ms, carousel_delay_ms),
        seed_opening,
        catalog_path,
    }
}

/// Parses a millisecond delay from an env var. Garbage is ignored with a warning.
fn parse_delay(name: &str, raw: Option<String>) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", name, raw, e);
            None
        }
    }
}

/// The configured catalog, or the built-in one if none is set or it fails to load.
pub fn load_catalog(config: &ResolvedConfig) -> PoiCatalog {
    let Some(ref path) = config.catalog_path else {
        return PoiCatalog::builtin();
    };
    match PoiCatalog::load(path) {
        Ok(catalog) => {
            info!("Loaded {} POIs from {}", catalog.len(), path.display());
            catalog
        }
        Err(e) => {
            warn!(
                "Failed to load catalog {}: {}",
                path.display(),
                ConfigError::from(e)
            );
            PoiCatalog::builtin()
        }
    }
}
