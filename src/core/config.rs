//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.devradar/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RadarConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Techs filter pre-filled in the search bar at startup.
    pub default_techs: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DirectoryConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocationConfig {
    /// "fixed" or "geoip".
    pub provider: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Consent to send the caller's IP to the geoip service.
    pub allow_ip_lookup: Option<bool>,
    pub geoip_base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DIRECTORY_BASE_URL: &str = "http://localhost:3333";
pub const DEFAULT_GEOIP_BASE_URL: &str = "http://ip-api.com";
pub const DEFAULT_LOCATION_PROVIDER: &str = "fixed";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub directory_base_url: String,
    pub location_provider: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub allow_ip_lookup: bool,
    pub geoip_base_url: String,
    pub default_techs: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.devradar/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".devradar").join("config.toml"))
}

/// Load config from `~/.devradar/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RadarConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<RadarConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(RadarConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(RadarConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: RadarConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Devradar Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_techs = "rust"             # Pre-filled search filter

# [directory]
# base_url = "http://localhost:3333" # Or set DEVRADAR_DIRECTORY_URL env var

# [location]
# provider = "fixed"                 # "fixed" or "geoip"
# latitude = -23.55                  # Used by the fixed provider
# longitude = -46.63                 # (DEVRADAR_LATITUDE / DEVRADAR_LONGITUDE also work)
# allow_ip_lookup = false            # Opt in before the geoip provider may run
# geoip_base_url = "http://ip-api.com"
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
///
/// `cli_location` and `cli_directory_url` are from CLI flags (None = not specified).
pub fn resolve(
    config: &RadarConfig,
    cli_location: Option<&str>,
    cli_directory_url: Option<&str>,
) -> ResolvedConfig {
    // Directory base URL: CLI → env → config → default
    let directory_base_url = cli_directory_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("DEVRADAR_DIRECTORY_URL").ok())
        .or_else(|| config.directory.base_url.clone())
        .unwrap_or_else(|| DEFAULT_DIRECTORY_BASE_URL.to_string());

    // Location provider: CLI → env → config → default
    let location_provider = cli_location
        .map(|s| s.to_string())
        .or_else(|| std::env::var("DEVRADAR_LOCATION_PROVIDER").ok())
        .or_else(|| config.location.provider.clone())
        .unwrap_or_else(|| DEFAULT_LOCATION_PROVIDER.to_string());

    // Coordinates for the fixed provider: env → config
    let latitude = std::env::var("DEVRADAR_LATITUDE")
        .ok()
        .and_then(|v| v.parse().ok())
        .or(config.location.latitude);
    let longitude = std::env::var("DEVRADAR_LONGITUDE")
        .ok()
        .and_then(|v| v.parse().ok())
        .or(config.location.longitude);

    // GeoIP consent: env → config → denied
    let allow_ip_lookup = std::env::var("DEVRADAR_ALLOW_IP_LOOKUP")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .or(config.location.allow_ip_lookup)
        .unwrap_or(false);

    // GeoIP base URL: env → config → default
    let geoip_base_url = std::env::var("DEVRADAR_GEOIP_URL")
        .ok()
        .or_else(|| config.location.geoip_base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEOIP_BASE_URL.to_string());

    ResolvedConfig {
        directory_base_url,
        location_provider,
        latitude,
        longitude,
        allow_ip_lookup,
        geoip_base_url,
        default_techs: config.general.default_techs.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = RadarConfig::default();
        assert!(config.general.default_techs.is_none());
        assert!(config.directory.base_url.is_none());
        assert!(config.location.provider.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = RadarConfig::default();
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.directory_base_url, DEFAULT_DIRECTORY_BASE_URL);
        assert_eq!(resolved.location_provider, DEFAULT_LOCATION_PROVIDER);
        assert_eq!(resolved.geoip_base_url, DEFAULT_GEOIP_BASE_URL);
        assert!(!resolved.allow_ip_lookup);
        assert!(resolved.default_techs.is_empty());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = RadarConfig {
            general: GeneralConfig {
                default_techs: Some("rust,go".to_string()),
            },
            directory: DirectoryConfig {
                base_url: Some("http://radar.example.com".to_string()),
            },
            location: LocationConfig {
                provider: Some("geoip".to_string()),
                latitude: Some(-23.55),
                longitude: Some(-46.63),
                allow_ip_lookup: Some(true),
                geoip_base_url: None,
            },
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.directory_base_url, "http://radar.example.com");
        assert_eq!(resolved.location_provider, "geoip");
        assert_eq!(resolved.latitude, Some(-23.55));
        assert_eq!(resolved.longitude, Some(-46.63));
        assert!(resolved.allow_ip_lookup);
        assert_eq!(resolved.default_techs, "rust,go");
    }

    #[test]
    fn test_resolve_cli_flags_win() {
        let config = RadarConfig {
            directory: DirectoryConfig {
                base_url: Some("http://from-config".to_string()),
            },
            location: LocationConfig {
                provider: Some("geoip".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("fixed"), Some("http://from-cli"));
        assert_eq!(resolved.location_provider, "fixed");
        assert_eq!(resolved.directory_base_url, "http://from-cli");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
default_techs = "node"

[directory]
base_url = "http://localhost:3333"

[location]
provider = "fixed"
latitude = -23.55
longitude = -46.63
allow_ip_lookup = false
"#;
        let config: RadarConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_techs.as_deref(), Some("node"));
        assert_eq!(
            config.directory.base_url.as_deref(),
            Some("http://localhost:3333")
        );
        assert_eq!(config.location.provider.as_deref(), Some("fixed"));
        assert_eq!(config.location.latitude, Some(-23.55));
        assert_eq!(config.location.allow_ip_lookup, Some(false));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[location]
latitude = 48.85
"#;
        let config: RadarConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.location.latitude, Some(48.85));
        assert!(config.location.longitude.is_none());
        assert!(config.location.provider.is_none());
        assert!(config.directory.base_url.is_none());
    }
}
