//! Configuration loading and local data folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

/// Placeholder endpoint used when no backend URL is configured.
/// Keeps the application bootable for development; requests against it
/// cannot succeed.
pub const PLACEHOLDER_BACKEND_URL: &str = "https://placeholder.backend.invalid";

/// Placeholder public API key paired with the placeholder endpoint
pub const PLACEHOLDER_BACKEND_KEY: &str = "placeholder-key";

/// Environment variable naming the hosted backend endpoint
pub const BACKEND_URL_ENV: &str = "WCRM_BACKEND_URL";

/// Environment variable naming the hosted backend public API key
pub const BACKEND_KEY_ENV: &str = "WCRM_BACKEND_KEY";

/// Hosted-backend connection settings
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    /// True when either value is the non-functional placeholder
    pub fn is_placeholder(&self) -> bool {
        self.url == PLACEHOLDER_BACKEND_URL || self.anon_key == PLACEHOLDER_BACKEND_KEY
    }
}

/// Optional TOML config file shape (`~/.config/wcrm/config.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub backend_url: Option<String>,
    pub backend_key: Option<String>,
    pub data_folder: Option<PathBuf>,
}

impl TomlConfig {
    /// Load the config file if one exists; a missing or malformed file is
    /// a warning, never a startup failure
    pub fn load() -> TomlConfig {
        let Some(path) = config_file_path() else {
            return TomlConfig::default();
        };
        if !path.exists() {
            return TomlConfig::default();
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Ignoring malformed config file {}: {}", path.display(), e);
                    TomlConfig::default()
                }
            },
            Err(e) => {
                warn!("Could not read config file {}: {}", path.display(), e);
                TomlConfig::default()
            }
        }
    }
}

/// Platform config file location
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wcrm").join("config.toml"))
}

/// Resolve backend settings by priority order:
/// 1. Command-line arguments (highest priority)
/// 2. Environment variables
/// 3. TOML config file
/// 4. Non-functional placeholders (with a warning, no hard failure)
pub fn resolve_backend_config(
    cli_url: Option<&str>,
    cli_key: Option<&str>,
    file: &TomlConfig,
) -> BackendConfig {
    let url = cli_url
        .map(str::to_string)
        .or_else(|| std::env::var(BACKEND_URL_ENV).ok())
        .or_else(|| file.backend_url.clone());

    let anon_key = cli_key
        .map(str::to_string)
        .or_else(|| std::env::var(BACKEND_KEY_ENV).ok())
        .or_else(|| file.backend_key.clone());

    if url.is_none() || anon_key.is_none() {
        warn!(
            "Backend environment not fully configured ({} / {}); using placeholder values",
            BACKEND_URL_ENV, BACKEND_KEY_ENV
        );
    }

    BackendConfig {
        url: url.unwrap_or_else(|| PLACEHOLDER_BACKEND_URL.to_string()),
        anon_key: anon_key.unwrap_or_else(|| PLACEHOLDER_BACKEND_KEY.to_string()),
    }
}

/// Resolve the local data folder used for client-side persisted state
/// (currently just the tenant selection key)
pub fn resolve_data_folder(cli_arg: Option<&PathBuf>, file: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.clone();
    }
    if let Ok(path) = std::env::var("WCRM_DATA_FOLDER") {
        return PathBuf::from(path);
    }
    if let Some(path) = &file.data_folder {
        return path.clone();
    }
    dirs::data_local_dir()
        .map(|d| d.join("wcrm"))
        .unwrap_or_else(|| PathBuf::from("./wcrm_data"))
}

/// Create the data folder if it does not exist yet
pub fn ensure_data_folder(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| {
        Error::Config(format!("Cannot create data folder {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn missing_everything_falls_back_to_placeholders() {
        std::env::remove_var(BACKEND_URL_ENV);
        std::env::remove_var(BACKEND_KEY_ENV);
        let config = resolve_backend_config(None, None, &TomlConfig::default());
        assert!(config.is_placeholder());
        assert_eq!(config.url, PLACEHOLDER_BACKEND_URL);
    }

    #[test]
    #[serial]
    fn cli_beats_env_and_file() {
        std::env::set_var(BACKEND_URL_ENV, "https://env.example.com");
        let file = TomlConfig {
            backend_url: Some("https://file.example.com".into()),
            backend_key: Some("file-key".into()),
            data_folder: None,
        };
        let config = resolve_backend_config(Some("https://cli.example.com"), None, &file);
        assert_eq!(config.url, "https://cli.example.com");
        // key falls through cli → env (unset) → file
        assert_eq!(config.anon_key, "file-key");
        std::env::remove_var(BACKEND_URL_ENV);
    }

    #[test]
    #[serial]
    fn env_beats_file() {
        std::env::set_var(BACKEND_URL_ENV, "https://env.example.com");
        std::env::set_var(BACKEND_KEY_ENV, "env-key");
        let file = TomlConfig {
            backend_url: Some("https://file.example.com".into()),
            backend_key: Some("file-key".into()),
            data_folder: None,
        };
        let config = resolve_backend_config(None, None, &file);
        assert_eq!(config.url, "https://env.example.com");
        assert_eq!(config.anon_key, "env-key");
        std::env::remove_var(BACKEND_URL_ENV);
        std::env::remove_var(BACKEND_KEY_ENV);
    }
}
