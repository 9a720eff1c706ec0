//! Application configuration types.
//!
//! [`Config`] is deserialized from JSON; every section defaults so an empty
//! `{}` file is valid. The store location can also come from the
//! `DATABASE_URL` and `DATABASE_NAME` environment variables, which take
//! precedence over the file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::Error;

/// Environment variable holding the store connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable holding the store database name.
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Overlay store settings from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay store settings using `lookup` in place of the environment.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(DATABASE_URL_VAR) {
            self.store.url = Some(url);
        }
        if let Some(name) = non_empty(DATABASE_NAME_VAR) {
            self.store.name = Some(name);
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        match (&self.store.url, &self.store.name) {
            (None, None) => warnings.push(format!(
                "no store configured; set {DATABASE_URL_VAR} and {DATABASE_NAME_VAR}"
            )),
            (Some(_), None) => warnings.push(format!(
                "store.url is set but store.name is missing ({DATABASE_NAME_VAR})"
            )),
            (None, Some(_)) => warnings.push(format!(
                "store.name is set but store.url is missing ({DATABASE_URL_VAR})"
            )),
            (Some(_), Some(_)) => {}
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

/// Document store location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Connection string, e.g. `sqlite:///data/catalog.db`.
    pub url: Option<String>,
    /// Database name; namespaces every collection.
    pub name: Option<String>,
}

impl StoreConfig {
    /// Both the connection string and the database name are present.
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_json_gives_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert!(config.store.url.is_none());
        assert!(!config.store.is_configured());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            Config::from_json(r#"{"server": {"port": 9000}, "store": {"name": "catalog"}}"#)
                .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.store.name.as_deref(), Some("catalog"));
    }

    #[test]
    fn invalid_json_is_validation_error() {
        let err = Config::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config::from_json(
            r#"{"store": {"url": "sqlite://file.db", "name": "from_file"}}"#,
        )
        .unwrap();
        let env: HashMap<&str, &str> = [(DATABASE_NAME_VAR, "from_env")].into();
        config.apply_env_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.store.url.as_deref(), Some("sqlite://file.db"));
        assert_eq!(config.store.name.as_deref(), Some("from_env"));
        assert!(config.store.is_configured());
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = Config::default();
        config.apply_env_from(|_| Some("  ".into()));
        assert!(config.store.url.is_none());
        assert!(config.store.name.is_none());
    }

    #[test]
    fn validate_reports_half_configured_store() {
        let mut config = Config::default();
        config.store.url = Some("sqlite::memory:".into());
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("store.name"));

        config.store.name = Some("catalog".into());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(Some(&dir.path().join("absent.json")));
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn load_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitrine.json");
        std::fs::write(&path, r#"{"server": {"host": "127.0.0.1"}}"#).unwrap();
        let config = Config::load_or_default(Some(&path));
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
