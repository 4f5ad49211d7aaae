//! Configuration for querying INSPIRE.
//!
//! Settings are read from a TOML file, by default `inspire/config.toml` in the
//! platform configuration directory. Every key is optional:
//!
//! ```toml
//! endpoint = "https://inspirehep.net/search"
//! timeout_secs = 30
//! user_agent = "my-tool/1.0"
//! ```

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::*;

/// Settings for the search endpoint and the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Search endpoint the query parameters are appended to
  pub endpoint:     String,
  /// Seconds before a request is abandoned
  pub timeout_secs: u64,
  /// `User-Agent` header to send instead of the crate's own
  pub user_agent:   Option<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      endpoint:     query::DEFAULT_ENDPOINT.to_string(),
      timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
      user_agent:   None,
    }
  }
}

impl Config {
  /// Request timeout used when none is configured.
  pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

  /// Default location of the configuration file.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("inspire").join("config.toml")
  }

  /// Loads the configuration at `path`, falling back to defaults if the file does not exist.
  ///
  /// # Errors
  ///
  /// Returns an error if the file exists but cannot be read, is not valid
  /// TOML, or holds an unusable value.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      debug!("No configuration at {}, using defaults", path.display());
      return Ok(Self::default());
    }
    let config = Self::from_toml(&std::fs::read_to_string(path)?)?;
    debug!("Loaded configuration from {}: {:?}", path.display(), config);
    Ok(config)
  }

  /// Parses a configuration from TOML text.
  pub fn from_toml(toml_str: &str) -> Result<Self> { toml::from_str::<Self>(toml_str)?.validated() }

  /// Replaces the endpoint.
  pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
    self.endpoint = endpoint.into();
    self
  }

  /// Replaces the timeout.
  pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
    self.timeout_secs = timeout_secs;
    self
  }

  /// The request timeout as a [`Duration`].
  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

  /// Checks the values that cannot be expressed in the types.
  pub fn validated(self) -> Result<Self> {
    if self.timeout_secs == 0 {
      return Err(InspireError::Config("timeout_secs must be greater than zero".to_string()));
    }
    Ok(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[traced_test]
  #[test]
  fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load(dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.endpoint, "https://inspirehep.net/search");
    assert_eq!(config.timeout(), Duration::from_secs(30));
  }

  #[traced_test]
  #[test]
  fn test_partial_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "timeout_secs = 5\n").unwrap();
    let config = Config::load(&path).unwrap();
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.endpoint, query::DEFAULT_ENDPOINT);
    assert!(config.user_agent.is_none());
  }

  #[traced_test]
  #[test]
  fn test_invalid_files() {
    assert!(matches!(Config::from_toml("timeout_secs = \"soon\""), Err(InspireError::TomlDe(_))));
    assert!(matches!(Config::from_toml("colour = true"), Err(InspireError::TomlDe(_))));
    assert!(matches!(Config::from_toml("timeout_secs = 0"), Err(InspireError::Config(_))));
  }

  #[test]
  fn test_overrides() {
    let config = Config::default().with_endpoint("http://localhost/search").with_timeout_secs(2);
    assert_eq!(config.endpoint, "http://localhost/search");
    assert_eq!(config.timeout(), Duration::from_secs(2));
  }

  #[test]
  fn test_default_path() {
    assert!(Config::default_path().ends_with("inspire/config.toml")
      || Config::default_path().ends_with("inspire\\config.toml"));
  }
}
