//! Persisted CLI configuration.
//!
//! The configuration lives at `~/.openlabs/config.json` and holds the API
//! address plus the session credentials captured at login. The location is
//! fixed relative to the home directory so every invocation sees the same
//! file regardless of working directory. Because the file stores
//! credentials it is written with owner-only permissions.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Directory under the user's home that holds CLI state.
const CONFIG_DIR: &str = ".openlabs";

/// Config file name inside [`CONFIG_DIR`].
const CONFIG_FILE: &str = "config.json";

/// API address a fresh install points at.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: String,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default)]
    pub enc_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_token: String::new(),
            enc_key: String::new(),
        }
    }
}

impl Config {
    /// Load the persisted configuration, creating and persisting defaults
    /// on first run. Only irrecoverable filesystem problems surface as
    /// errors; an absent file is not one of them.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(&Self::config_path()?)
    }

    /// Persist this configuration to the per-user path.
    pub fn save(&self) -> Result<(), Error> {
        self.save_to(&Self::config_path()?)
    }

    /// [`Config::load`] against an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path).map_err(Error::Config)?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// [`Config::save`] against an explicit path. Creates the containing
    /// directory if needed and restricts the file to the owning user.
    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(Error::Config)?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(path, contents).map_err(Error::Config)?;
        restrict_to_owner(path).map_err(Error::Config)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf, Error> {
        let home = dirs::home_dir().ok_or_else(|| {
            Error::Config(io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine home directory",
            ))
        })?;
        Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_DIR).join(CONFIG_FILE);

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.auth_token.is_empty());
        assert!(config.enc_key.is_empty());

        // The defaults were persisted, not just returned.
        assert!(path.exists());
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            api_url: "https://labs.example.com".into(),
            auth_token: "tok-123".into(),
            enc_key: "key-456".into(),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        // Saving a just-loaded config reproduces the file byte for byte.
        let before = fs::read(&path).unwrap();
        loaded.save_to(&path).unwrap();
        let after = fs::read(&path).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn missing_credential_fields_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_url": "http://localhost:8000"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.auth_token.is_empty());
        assert!(config.enc_key.is_empty());
    }

    #[test]
    fn corrupt_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json at all").unwrap();

        match Config::load_from(&path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::default().save_to(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
