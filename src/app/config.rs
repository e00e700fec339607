//! Server configuration loaded from TOML.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3100";
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub datasource: DataSourceSettings,
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            datasource: DataSourceSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Which account/region configuration a lookup runs against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceSettings {
    /// Region used when a request asks for `default`
    pub default_region: String,
    pub profile: Option<String>,
    /// Endpoint override, e.g. a LocalStack URL
    pub endpoint: Option<String>,
    pub assume_role_arn: Option<String>,
    pub external_id: Option<String>,
    /// Extra namespaces to offer alongside the built-in ones
    pub custom_namespaces: Vec<String>,
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            default_region: DEFAULT_REGION.to_string(),
            profile: None,
            endpoint: None,
            assume_role_arn: None,
            external_id: None,
            custom_namespaces: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to the data directory
    pub file: bool,
}

impl ServerConfig {
    /// Load from an explicit path, else the default location, else built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match Self::locate(path) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// File [`ServerConfig::load`] reads, or `None` when it falls back to defaults
    pub fn locate(path: Option<&Path>) -> Option<PathBuf> {
        match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.exists()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "", "cwsuggest")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr, "127.0.0.1:3100");
        assert_eq!(config.datasource.default_region, "us-east-1");
        assert!(config.datasource.custom_namespaces.is_empty());
        assert!(!config.logging.file);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[datasource]
default_region = "eu-west-1"
profile = "monitoring"
custom_namespaces = ["MyApp", "Billing/Custom"]
"#
        )
        .unwrap();

        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.datasource.default_region, "eu-west-1");
        assert_eq!(config.datasource.profile.as_deref(), Some("monitoring"));
        assert_eq!(
            config.datasource.custom_namespaces,
            vec!["MyApp".to_string(), "Billing/Custom".to_string()]
        );
        assert_eq!(config.datasource.assume_role_arn, None);
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("missing.toml");
        assert_eq!(ServerConfig::locate(Some(&explicit)), Some(explicit.clone()));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServerConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen_addr = [").unwrap();
        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
