//! Configuration management for phonegate.
//!
//! Loads configuration from ${PHONEGATE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for phonegate configuration and data files.
    //!
    //! PHONEGATE_HOME resolution order:
    //! 1. PHONEGATE_HOME environment variable (if set)
    //! 2. ~/.config/phonegate (default)
    //! 3. ./.phonegate when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the phonegate home directory.
    pub fn phonegate_home() -> PathBuf {
        if let Ok(home) = std::env::var("PHONEGATE_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".phonegate"),
            |h| h.join(".config").join("phonegate"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        phonegate_home().join("config.toml")
    }

    /// Returns the path to the key-value storage file holding the session.
    pub fn storage_path() -> PathBuf {
        phonegate_home().join("storage.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        phonegate_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint of the random profile service.
    pub profile_url: String,

    /// Nationality filter passed to the profile service.
    pub nationality: String,

    /// Request timeout for the profile fetch in seconds (0 disables).
    pub request_timeout_secs: u64,

    /// Default tracing filter when PHONEGATE_LOG is not set.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile_url: Self::DEFAULT_PROFILE_URL.to_string(),
            nationality: Self::DEFAULT_NATIONALITY.to_string(),
            request_timeout_secs: 0,
            log_filter: Self::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    const DEFAULT_PROFILE_URL: &str = "https://randomuser.me/api/";
    const DEFAULT_NATIONALITY: &str = "us";
    const DEFAULT_LOG_FILTER: &str = "info";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// contains an invalid `profile_url`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            Config::default()
        };
        config.profile_endpoint()?;
        Ok(config)
    }

    /// Creates a config file with the default template.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Parses `profile_url` into a URL.
    ///
    /// # Errors
    /// Returns an error if `profile_url` is not an absolute http(s) URL.
    pub fn profile_endpoint(&self) -> Result<Url> {
        let url = Url::parse(&self.profile_url)
            .with_context(|| format!("Invalid profile_url '{}'", self.profile_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("profile_url must use http or https: {}", self.profile_url);
        }
        Ok(url)
    }

    /// Returns the request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.profile_url, "https://randomuser.me/api/");
        assert_eq!(config.nationality, "us");
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "request_timeout_secs = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.nationality, "us");
    }

    #[test]
    fn test_invalid_profile_url_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "profile_url = \"not a url\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid profile_url"));
    }

    #[test]
    fn test_non_http_profile_url_is_rejected() {
        let config = Config {
            profile_url: "file:///etc/passwd".to_string(),
            ..Config::default()
        };
        assert!(config.profile_endpoint().is_err());
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let parsed: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::init(&path).unwrap();
        assert!(path.exists());

        let err = Config::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
