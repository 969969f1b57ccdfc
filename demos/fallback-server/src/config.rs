use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Server configuration, read from a TOML file.
///
/// Every field is optional in the file.
///
/// ```toml
/// bind_address = "0.0.0.0:8080"
/// log_filter = "info,fallback=debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ServerConfig {
    pub(crate) bind_address: SocketAddr,
    /// Used when `RUST_LOG` is not set.
    pub(crate) log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::LOCALHOST, 8000)),
            log_filter: "info".to_owned(),
        }
    }
}

impl ServerConfig {
    pub(crate) fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&content)
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("could not read config file `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ServerConfig::from_toml("").unwrap();

        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8000");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn partial_file() {
        let config = ServerConfig::from_toml(r#"bind_address = "0.0.0.0:9000""#).unwrap();

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:9000");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let error = ServerConfig::from_toml("port = 80").unwrap_err();

        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_address_is_rejected() {
        assert!(ServerConfig::from_toml(r#"bind_address = "localhost""#).is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"log_filter = "debug""#).unwrap();

        let config = ServerConfig::load(file.path()).unwrap();

        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let error = ServerConfig::load(&path).unwrap_err();

        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().contains("missing.toml"));
    }
}
