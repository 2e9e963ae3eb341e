//! Application configuration with persistence.
//!
//! This module provides the [`AppConfig`] structure for managing explorer
//! settings with load/save to disk.
//!
//! # Configuration File Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/addrscope/config.json`
//! - macOS: `~/Library/Application Support/addrscope/config.json`
//! - Windows: `%APPDATA%/addrscope/config.json`
//!
//! # Example
//!
//! ```ignore
//! use crate::state::AppConfig;
//!
//! let mut config = AppConfig::load();
//! config.page_size = 25;
//! config.save()?;
//! ```

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::HttpConfig;
use crate::graph::{ExpansionMode, LayoutConfig, expansion::DEFAULT_PLACEHOLDER_CHILDREN};

// ============================================================================
// Constants
// ============================================================================

/// Application name used for configuration directory.
const APP_NAME: &str = "addrscope";

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Default explorer API root.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default currency symbol shown next to amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "ETH";

/// Default number of history rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ============================================================================
// AppConfig
// ============================================================================

/// Explorer configuration, serialized to JSON in the user's config directory.
///
/// Missing fields fall back to their defaults, so older files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Root URL of the explorer API.
    pub api_url: String,
    pub currency_symbol: String,
    /// Rows per history page.
    pub page_size: usize,
    pub request_timeout_secs: u64,
    /// How node expansion obtains children.
    pub expansion: ExpansionMode,
    /// Children synthesized per placeholder expansion.
    pub placeholder_children: usize,
    pub layout: LayoutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: crate::client::http::DEFAULT_TIMEOUT_SECS,
            expansion: ExpansionMode::default(),
            placeholder_children: DEFAULT_PLACEHOLDER_CHILDREN,
            layout: LayoutConfig::default(),
        }
    }
}

impl AppConfig {
    /// Returns the path to the configuration file, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or created.
    pub fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            color_eyre::eyre::eyre!(
                "Could not determine config directory. Expected XDG_CONFIG_HOME or ~/.config on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
            )
        })?;
        path.push(APP_NAME);
        fs::create_dir_all(&path)?;
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Loads the configuration from disk.
    ///
    /// If the configuration file doesn't exist or cannot be parsed,
    /// returns the default configuration.
    #[must_use]
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Config load failed, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Reads and parses the configuration stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or the file cannot
    /// be written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Saves the configuration to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// HTTP settings derived from this configuration.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::with_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    /// Apply command-line overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(mut self, api_url: Option<String>, expansion: Option<ExpansionMode>) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(expansion) = expansion {
            self.expansion = expansion;
        }
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.currency_symbol, "ETH");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.expansion, ExpansionMode::Placeholder);
        assert_eq!(config.placeholder_children, 2);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let json = r#"{"api_url": "https://explorer.example", "expansion": "fetch"}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.api_url, "https://explorer.example");
        assert_eq!(config.expansion, ExpansionMode::Fetch);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.layout.max_jitter, 500.0);
    }

    #[test]
    fn test_save_and_load_roundtrip_through_file() {
        let path = std::env::temp_dir().join(format!("addrscope-config-{}.json", std::process::id()));
        let config = AppConfig {
            page_size: 3,
            currency_symbol: "MATIC".to_string(),
            ..AppConfig::default()
        };

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[rstest]
    #[case::none(None, None, "http://localhost:3000", ExpansionMode::Placeholder)]
    #[case::url(Some("http://api"), None, "http://api", ExpansionMode::Placeholder)]
    #[case::both(Some("http://api"), Some(ExpansionMode::Fetch), "http://api", ExpansionMode::Fetch)]
    fn test_overrides(
        #[case] api_url: Option<&str>,
        #[case] expansion: Option<ExpansionMode>,
        #[case] expected_url: &str,
        #[case] expected_mode: ExpansionMode,
    ) {
        let config = AppConfig::default().with_overrides(api_url.map(String::from), expansion);
        assert_eq!(config.api_url, expected_url);
        assert_eq!(config.expansion, expected_mode);
    }

    #[test]
    fn test_http_config_uses_timeout() {
        let config = AppConfig {
            request_timeout_secs: 5,
            ..AppConfig::default()
        };
        assert_eq!(config.http_config().timeout, Duration::from_secs(5));
    }
}
