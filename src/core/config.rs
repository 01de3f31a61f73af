//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.longform/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::page::{DEFAULT_CHROME_HEIGHT, DEFAULT_ROW_HEIGHT, PageLayout};
use crate::relay::{DEFAULT_FETCH_TIMEOUT, PublicKey};
use crate::relay::nip19::Nip19Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LongformConfig {
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RelayConfig {
    pub url: Option<String>,
    pub author: Option<String>,
    pub limit: Option<u32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LayoutConfig {
    pub row_height: Option<u16>,
    pub chrome_height: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_RELAY_URL: &str = "wss://relay.damus.io";
pub const DEFAULT_LOG_FILE: &str = "longform.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub relay_url: String,
    pub author: Option<PublicKey>,
    /// 0 means no limit is sent to the relay.
    pub limit: u32,
    pub timeout: Duration,
    pub layout: PageLayout,
    pub log_file: PathBuf,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub relay_url: Option<String>,
    pub author: Option<String>,
    pub limit: Option<u32>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidAuthor { value: String, reason: Nip19Error },
    InvalidRelayUrl(String),
    InvalidLayout(String),
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::InvalidAuthor { value, reason } => {
                write!(f, "invalid author '{value}': {reason}")
            }
            ConfigError::InvalidRelayUrl(url) => {
                write!(f, "relay url must start with ws:// or wss://, got '{url}'")
            }
            ConfigError::InvalidLayout(msg) => write!(f, "invalid layout: {msg}"),
            ConfigError::InvalidTimeout => write!(f, "timeout_secs must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.longform/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".longform").join("config.toml"))
}

/// Load config from `~/.longform/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LongformConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LongformConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LongformConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LongformConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(LongformConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LongformConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Longform Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [relay]
# url = "wss://relay.damus.io"     # Or LONGFORM_RELAY_URL, or --relay
# author = "npub1..."              # npub or 64-char hex; LONGFORM_AUTHOR, --author
# limit = 0                        # 0 = ask the relay for everything; --limit
# timeout_secs = 30

# [layout]
# row_height = 9                   # Terminal rows per article card
# chrome_height = 2                # Title bar + help bar

# [general]
# log_file = "longform.log"        # --log-file
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LongformConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an explicit environment lookup.
pub fn resolve_with_env(
    config: &LongformConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Relay URL: CLI → env → config → default
    let relay_url = cli
        .relay_url
        .clone()
        .or_else(|| env("LONGFORM_RELAY_URL"))
        .or_else(|| config.relay.url.clone())
        .unwrap_or_else(|| DEFAULT_RELAY_URL.to_string());
    let relay_url = relay_url.trim().to_string();
    if !(relay_url.starts_with("ws://") || relay_url.starts_with("wss://")) {
        return Err(ConfigError::InvalidRelayUrl(relay_url));
    }

    // Author: CLI → env → config; empty means everyone
    let author = cli
        .author
        .clone()
        .or_else(|| env("LONGFORM_AUTHOR"))
        .or_else(|| config.relay.author.clone())
        .filter(|a| !a.trim().is_empty())
        .map(|a| {
            PublicKey::parse(&a).map_err(|reason| ConfigError::InvalidAuthor { value: a, reason })
        })
        .transpose()?;

    let layout = PageLayout {
        row_height: config.layout.row_height.unwrap_or(DEFAULT_ROW_HEIGHT),
        chrome_height: config.layout.chrome_height.unwrap_or(DEFAULT_CHROME_HEIGHT),
    };
    if layout.row_height == 0 {
        return Err(ConfigError::InvalidLayout(
            "row_height must be at least 1".to_string(),
        ));
    }

    let timeout = match config.relay.timeout_secs {
        Some(0) => return Err(ConfigError::InvalidTimeout),
        Some(secs) => Duration::from_secs(secs),
        None => DEFAULT_FETCH_TIMEOUT,
    };

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.general.log_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    Ok(ResolvedConfig {
        relay_url,
        author,
        limit: cli.limit.or(config.relay.limit).unwrap_or(0),
        timeout,
        layout,
        log_file,
    })
}
