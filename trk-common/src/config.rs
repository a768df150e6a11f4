//! Configuration loading
//!
//! Every setting resolves in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Levels 1 and 2 are handled by each service's clap `Args`; this module
//! provides the TOML layer and the final merge.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default config file location: `<config_dir>/trk/config.toml`
///
/// On Linux this is `~/.config/trk/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("trk").join("config.toml"))
}

/// Default data directory for service state: `<data_local_dir>/trk`
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("trk"))
        .unwrap_or_else(|| PathBuf::from("./trk_data"))
}

/// Load the TOML config file
///
/// An explicitly requested file must exist and parse. When no file is
/// requested the default location is tried; a missing default file yields
/// `T::default()`, and a malformed one is logged and ignored so the service
/// still starts.
pub fn load_toml_config<T>(explicit: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config = toml::from_str(&content)?;
        info!("Loaded config file: {}", path.display());
        return Ok(config);
    }

    let Some(path) = default_config_path().filter(|p| p.exists()) else {
        return Ok(T::default());
    };

    match std::fs::read_to_string(&path)
        .map_err(Error::from)
        .and_then(|content| toml::from_str(&content).map_err(Error::from))
    {
        Ok(config) => {
            info!("Loaded config file: {}", path.display());
            Ok(config)
        }
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            Ok(T::default())
        }
    }
}

/// Merge one setting: command line / environment, then file, then default
pub fn resolve_setting<T>(cli_or_env: Option<T>, file: Option<T>, default: T) -> T {
    cli_or_env.or(file).unwrap_or(default)
}

/// A secret is usable when it is not empty or whitespace-only
pub fn is_valid_secret(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Sample {
        section: SampleSection,
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct SampleSection {
        port: Option<u16>,
        url: Option<String>,
    }

    #[test]
    fn test_resolve_setting_priority() {
        assert_eq!(resolve_setting(Some(1), Some(2), 3), 1);
        assert_eq!(resolve_setting(None, Some(2), 3), 2);
        assert_eq!(resolve_setting(None, None, 3), 3);
    }

    #[test]
    fn test_is_valid_secret() {
        assert!(is_valid_secret("abc123"));
        assert!(!is_valid_secret(""));
        assert!(!is_valid_secret("   \t"));
    }

    #[test]
    fn test_explicit_file_is_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[section]\nport = 4100\nurl = \"http://example:1\"").unwrap();

        let config: Sample = load_toml_config(Some(file.path())).unwrap();
        assert_eq!(config.section.port, Some(4100));
        assert_eq!(config.section.url.as_deref(), Some("http://example:1"));
    }

    #[test]
    fn test_explicit_file_ignores_other_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[other]\nkey = 1\n\n[section]\nport = 1").unwrap();

        let config: Sample = load_toml_config(Some(file.path())).unwrap();
        assert_eq!(config.section.port, Some(1));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let result: Result<Sample> = load_toml_config(Some(&missing));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_explicit_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[section\nport = ").unwrap();

        let result: Result<Sample> = load_toml_config(Some(file.path()));
        assert!(matches!(result, Err(Error::Toml(_))));
    }
}
