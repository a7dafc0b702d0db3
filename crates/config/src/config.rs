// Tool configuration
// Loaded from ~/.config/editor-prefs/config.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::build_config::BuildConfiguration;
use crate::error::{PrefsError, Result};
use crate::persistence::{default_store_path, prefs_dir};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrefsConfig {
    /// Preference file location (None = platform default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Build profile to run under (None = compiled profile)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildConfiguration>,
}

impl PrefsConfig {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        prefs_dir().join("config.toml")
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load config from `path`, falling back to defaults
    ///
    /// A broken config file shouldn't stop the tool from working, so parse
    /// errors are logged rather than returned.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("{}", PrefsError::io(path, e));
                return Self::default();
            }
        };

        match Self::from_toml(&contents) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Load config from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Effective preference file path
    pub fn store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(default_store_path)
    }

    /// Effective build profile
    pub fn build(&self) -> BuildConfiguration {
        self.build.unwrap_or_else(BuildConfiguration::current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = PrefsConfig::from_toml(
            r#"
store_path = "/tmp/prefs.json"
build = "a8c-branch-test"
"#,
        )
        .unwrap();

        assert_eq!(config.store_path(), PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.build(), BuildConfiguration::A8cBranchTest);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PrefsConfig::from_toml("").unwrap();
        assert_eq!(config, PrefsConfig::default());
        assert_eq!(config.store_path(), default_store_path());
    }

    #[test]
    fn test_bad_config_is_error() {
        assert!(matches!(
            PrefsConfig::from_toml(r#"build = "nightly""#),
            Err(PrefsError::Config(_))
        ));
        assert!(PrefsConfig::from_toml("stor_path = 1").is_err());
    }

    #[test]
    fn test_load_from_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let missing = temp_dir.path().join("config.toml");
        assert_eq!(PrefsConfig::load_from(&missing), PrefsConfig::default());

        let broken = temp_dir.path().join("broken.toml");
        fs::write(&broken, "store_path = [").unwrap();
        assert_eq!(PrefsConfig::load_from(&broken), PrefsConfig::default());

        let good = temp_dir.path().join("good.toml");
        fs::write(&good, "build = \"app-store\"\n").unwrap();
        assert_eq!(
            PrefsConfig::load_from(&good).build,
            Some(BuildConfiguration::AppStore)
        );
    }
}
