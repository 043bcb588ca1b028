//! # Cart Configuration
//!
//! Where the API lives, where the mirror is stored, and how the store
//! behaves.
//!
//! ## Load Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults            base_url = http://localhost:3333, locale = en   │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  2. cart.toml           platform config dir, or an explicit path        │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  3. Environment         ROCKETSHOES_* variables                         │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  4. validate()          bad URL / zero timeout / empty key → error      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use rocketshoes_core::{Locale, CART_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Config file name inside the platform config dir.
pub const CONFIG_FILE_NAME: &str = "cart.toml";

/// Database file name inside the platform data dir.
pub const STORAGE_FILE_NAME: &str = "storage.db";

// =============================================================================
// API Settings
// =============================================================================

/// Stock/product API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the storefront API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSettings {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Local storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Unset means `storage.db` in the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Key the cart is mirrored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            path: None,
            key: default_storage_key(),
        }
    }
}

// =============================================================================
// Cart Settings
// =============================================================================

/// Cart store behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Language of the error toasts.
    #[serde(default)]
    pub locale: Locale,

    /// Forward failures to the notification sink as toasts.
    #[serde(default = "default_true")]
    pub notify_errors: bool,

    /// Run overlapping mutations one after another. When off, two overlapping
    /// operations both start from the same snapshot and the later swap wins.
    #[serde(default = "default_true")]
    pub serialize_mutations: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            locale: Locale::default(),
            notify_errors: true,
            serialize_mutations: true,
        }
    }
}

// =============================================================================
// Main Cart Configuration
// =============================================================================

/// Complete cart configuration.
///
/// ## Example Config File
/// ```toml
/// [api]
/// base_url = "https://api.rocketshoes.example"
/// timeout_secs = 10
///
/// [storage]
/// path = "/var/lib/rocketshoes/storage.db"
/// key = "@RocketShoes:cart"
///
/// [cart]
/// locale = "pt-BR"
/// notify_errors = true
/// serialize_mutations = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl CartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::SaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Cart config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.api.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.api.base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "storage key must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source. Unparseable values are
    /// logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ROCKETSHOES_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("ROCKETSHOES_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Invalid API timeout in environment"),
            }
        }

        if let Some(path) = lookup("ROCKETSHOES_STORAGE_PATH") {
            debug!(path = %path, "Overriding storage path from environment");
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("ROCKETSHOES_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(locale) = lookup("ROCKETSHOES_LOCALE") {
            match locale.parse::<Locale>() {
                Ok(parsed) => self.cart.locale = parsed,
                Err(e) => warn!(error = %e, "Invalid locale in environment"),
            }
        }

        if let Some(flag) = lookup("ROCKETSHOES_NOTIFY_ERRORS") {
            match parse_flag(&flag) {
                Some(value) => self.cart.notify_errors = value,
                None => warn!(value = %flag, "Invalid ROCKETSHOES_NOTIFY_ERRORS in environment"),
            }
        }

        if let Some(flag) = lookup("ROCKETSHOES_SERIALIZE_MUTATIONS") {
            match parse_flag(&flag) {
                Some(value) => self.cart.serialize_mutations = value,
                None => warn!(
                    value = %flag,
                    "Invalid ROCKETSHOES_SERIALIZE_MUTATIONS in environment"
                ),
            }
        }
    }

    /// Returns the SQLite file the mirror lives in.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.rocketseat.rocketshoes/storage.db`
    /// - **Windows**: `%APPDATA%\rocketseat\rocketshoes\data\storage.db`
    /// - **Linux**: `~/.local/share/rocketshoes/storage.db`
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage.path.clone().or_else(|| {
            project_dirs().map(|dirs| dirs.data_dir().join(STORAGE_FILE_NAME))
        })
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "rocketseat", "rocketshoes")
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert_eq!(config.cart.locale, Locale::En);
        assert!(config.cart.notify_errors);
        assert!(config.cart.serialize_mutations);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CartConfig::default();

        config.api.base_url = "ws://localhost:3333".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "https://api.example.com".to_string();
        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));

        config.api.timeout_secs = 5;
        config.storage.key = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));

        config.storage.key = "guest:cart".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = CartConfig::default();
        config.apply_overrides(lookup_from(&[
            ("ROCKETSHOES_API_URL", "https://api.example.com"),
            ("ROCKETSHOES_API_TIMEOUT_SECS", "3"),
            ("ROCKETSHOES_STORAGE_PATH", "/tmp/cart.db"),
            ("ROCKETSHOES_STORAGE_KEY", "guest:cart"),
            ("ROCKETSHOES_LOCALE", "pt_BR"),
            ("ROCKETSHOES_NOTIFY_ERRORS", "false"),
            ("ROCKETSHOES_SERIALIZE_MUTATIONS", "0"),
        ]));

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout(), Duration::from_secs(3));
        assert_eq!(config.storage_path(), Some(PathBuf::from("/tmp/cart.db")));
        assert_eq!(config.storage.key, "guest:cart");
        assert_eq!(config.cart.locale, Locale::PtBr);
        assert!(!config.cart.notify_errors);
        assert!(!config.cart.serialize_mutations);
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = CartConfig::default();
        config.apply_overrides(lookup_from(&[
            ("ROCKETSHOES_API_TIMEOUT_SECS", "soon"),
            ("ROCKETSHOES_LOCALE", "fr"),
            ("ROCKETSHOES_NOTIFY_ERRORS", "maybe"),
        ]));
        assert_eq!(config, CartConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CartConfig = toml::from_str(
            r#"
            [cart]
            locale = "pt-BR"
            "#,
        )
        .unwrap();

        assert_eq!(config.cart.locale, Locale::PtBr);
        assert!(config.cart.serialize_mutations);
        assert_eq!(config.api, ApiSettings::default());
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cart.toml");

        let mut config = CartConfig::default();
        config.api.base_url = "https://api.example.com".to_string();
        config.cart.locale = Locale::PtBr;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(contents.contains("locale = \"pt-BR\""));

        let loaded: CartConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = \"ten\"\n").unwrap();

        assert!(matches!(
            CartConfig::load(Some(path)),
            Err(ConfigError::LoadFailed(_))
        ));
    }
}
