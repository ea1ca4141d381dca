//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/caterfind/config.toml` by default. Command-line flags override
//! the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use caterfind_api::{ApiConfig, OwnerId};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Configuration for the caterfind client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Caterer whose calendar is used when `--owner` is not given.
    pub owner_id: Option<OwnerId>,

    /// Debug mode.
    pub debug: bool,

    /// Server settings.
    pub api: ApiSettings,
}

/// Server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the caterfind server.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: ApiConfig::DEFAULT_BASE_URL.to_string(),
            timeout: ApiConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("caterfind")
    }

    /// Applies command-line overrides.
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(owner) = cli.owner {
            self.owner_id = Some(owner);
        }
        if let Some(ref base_url) = cli.base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.api.timeout = timeout;
        }
        self.debug |= cli.debug;
        self
    }

    /// Builds the REST client configuration.
    pub fn api_config(&self) -> Result<ApiConfig, String> {
        if self.api.timeout == 0 {
            return Err("api.timeout must be greater than zero".to_string());
        }
        let config = ApiConfig::new(&self.api.base_url)
            .map_err(|e| format!("invalid api.base_url '{}': {}", self.api.base_url, e))?;
        Ok(config.with_timeout(Duration::from_secs(self.api.timeout)))
    }

    /// The configured caterer.
    pub fn owner(&self) -> Result<OwnerId, String> {
        self.owner_id.ok_or_else(|| {
            format!(
                "no caterer selected. Pass --owner <ID> or add to {}:\n  owner_id = <ID>",
                Self::default_path().display()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn defaults_point_at_local_server() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout, 30);
        assert!(config.owner().is_err());
        assert!(config.api_config().is_ok());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
owner_id = 12

[api]
base_url = "https://caterfind.example.com/backend"
timeout = 5
"#
        )
        .unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config.owner().unwrap(), OwnerId(12));

        let api = config.api_config().unwrap();
        assert_eq!(api.timeout, Duration::from_secs(5));
        assert_eq!(
            api.endpoint("api/availability").unwrap().as_str(),
            "https://caterfind.example.com/backend/api/availability"
        );
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "debug = true\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert!(config.debug);
        assert_eq!(config.api.timeout, 30);
    }

    #[test]
    fn invalid_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "owner_id = \"abc\"\n").unwrap();
        assert!(ClientConfig::load_from(&path).unwrap_err().contains("parse"));

        let missing = dir.path().join("missing.toml");
        assert!(ClientConfig::load_from(&missing).unwrap_err().contains("read"));
    }

    #[test]
    fn cli_flags_override_file() {
        let cli = Cli::try_parse_from([
            "caterfind",
            "--owner",
            "4",
            "--base-url",
            "http://10.0.0.2:9000",
            "--timeout",
            "2",
            "config",
            "dump",
        ])
        .unwrap();

        let config = ClientConfig {
            owner_id: Some(OwnerId(1)),
            ..Default::default()
        }
        .with_cli_overrides(&cli);

        assert_eq!(config.owner_id, Some(OwnerId(4)));
        assert_eq!(config.api.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.api.timeout, 2);
    }

    #[test]
    fn rejects_bad_api_settings() {
        let mut config = ClientConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.api_config().is_err());

        config.api.base_url = "http://localhost:8080".to_string();
        config.api.timeout = 0;
        assert!(config.api_config().is_err());
    }
}
