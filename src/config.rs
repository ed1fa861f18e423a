//! Configuration for root directories, file system mode and schema.
//!
//! Settings come from an optional `.desdb.json` file and from the
//! environment variables the archive tools have always used (`DESDATA`,
//! `DESREMOTE`, `DES_SCRATCH`, `DES_PROJECT`, `DES_DEFAULT_FS`, `DES_SCHEMA`).
//! Environment variables win over the file. Everything is read once into a
//! [`Config`] which is then handed to [`crate::files::DesFiles`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::DesError;
use crate::roots::{FileSystemMode, LOCAL_ROOT_KEY, REMOTE_ROOT_KEY, Roots, SCRATCH_ROOT_KEY};
use crate::schema::SchemaVersion;

/// Configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".desdb.json";

/// Project used for `$PROJECT` when neither the caller nor the configuration
/// names one.
pub const DEFAULT_PROJECT: &str = "OPS";

pub const PROJECT_KEY: &str = "DES_PROJECT";
pub const DEFAULT_FS_KEY: &str = "DES_DEFAULT_FS";
pub const SCHEMA_KEY: &str = "DES_SCHEMA";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] DesError),
}

impl From<ConfigError> for DesError {
    /// Flatten for callers that only deal in [`DesError`]; invalid values keep
    /// their own error, file problems become a configuration error.
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(inner) => inner,
            other => DesError::Configuration {
                key: CONFIG_FILE_NAME.to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// On-disk configuration. Every field is optional.
///
/// ```json
/// {
///   "roots": {
///     "desdata": "/astro/u/astrodat/data/DES",
///     "desremote": "https://desar.cosmology.illinois.edu/DESFiles/desardata",
///     "scratch": "/tmp/des"
///   },
///   "default_fs": "nfs",
///   "default_project": "OPS",
///   "schema": "v2beta"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub roots: Roots,
    #[serde(default)]
    pub default_fs: Option<FileSystemMode>,
    #[serde(default)]
    pub default_project: Option<String>,
    #[serde(default)]
    pub schema: Option<SchemaVersion>,
}

impl ConfigFile {
    /// Load a configuration file from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or is not
    /// valid JSON for this structure.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::InvalidJson {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `.desdb.json` from `dir` if present.
    pub fn discover(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        debug!(path = %path.display(), "loading configuration file");
        Self::load(&path).map(Some)
    }
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub roots: Roots,
    pub mode: FileSystemMode,
    pub default_project: Option<String>,
    pub schema: SchemaVersion,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: Roots::default(),
            mode: FileSystemMode::default(),
            default_project: Some(DEFAULT_PROJECT.to_string()),
            schema: SchemaVersion::default(),
        }
    }
}

impl Config {
    /// Settings from the process environment alone.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_sources(None, |key| std::env::var(key).ok())
    }

    /// Settings from the given file, the `.desdb.json` in the current
    /// directory otherwise, overlaid with the process environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match explicit {
            Some(path) => Some(ConfigFile::load(path)?),
            None => {
                let cwd = std::env::current_dir().map_err(|source| ConfigError::Read {
                    path: ".".to_string(),
                    source,
                })?;
                ConfigFile::discover(&cwd)?
            }
        };
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a configuration file with an environment lookup; the lookup wins.
    pub fn from_sources<F>(file: Option<ConfigFile>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let roots = Roots {
            desdata: env(LOCAL_ROOT_KEY).or(file.roots.desdata),
            desremote: env(REMOTE_ROOT_KEY).or(file.roots.desremote),
            scratch: env(SCRATCH_ROOT_KEY).or(file.roots.scratch),
        };

        let mode = match env(DEFAULT_FS_KEY) {
            Some(value) => value.parse::<FileSystemMode>()?,
            None => file.default_fs.unwrap_or_default(),
        };

        let schema = match env(SCHEMA_KEY) {
            Some(value) => value.parse::<SchemaVersion>()?,
            None => file.schema.unwrap_or_default(),
        };

        let default_project = env(PROJECT_KEY)
            .or(file.default_project)
            .or_else(|| Some(DEFAULT_PROJECT.to_string()));

        Ok(Self {
            roots,
            mode,
            default_project,
            schema,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[rstest]
    fn test_file_deserialization() {
        let json = r#"
        {
            "roots": {
                "desdata": "/data/des",
                "desremote": "https://example.org/des"
            },
            "default_fs": "net",
            "schema": "v1"
        }
        "#;
        let file: ConfigFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.roots.desdata.as_deref(), Some("/data/des"));
        assert_eq!(file.roots.scratch, None);
        assert_eq!(file.default_fs, Some(FileSystemMode::Remote));
        assert_eq!(file.schema, Some(SchemaVersion::V1));
    }

    #[rstest]
    fn test_empty_file_is_valid() {
        let file: ConfigFile = serde_json::from_str("{}").unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[rstest]
    fn test_env_only() {
        let config = Config::from_sources(
            None,
            lookup_from(&[("DESDATA", "/data/des"), ("DES_DEFAULT_FS", "hdfs")]),
        )
        .unwrap();
        assert_eq!(config.roots.desdata.as_deref(), Some("/data/des"));
        assert_eq!(config.mode, FileSystemMode::AlternateStorage);
        assert_eq!(config.default_project.as_deref(), Some("OPS"));
        assert_eq!(config.schema, SchemaVersion::V2Beta);
    }

    #[rstest]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            roots: Roots {
                desdata: Some("/from/file".to_string()),
                scratch: Some("/scratch/file".to_string()),
                ..Default::default()
            },
            default_project: Some("SVA1".to_string()),
            ..Default::default()
        };
        let config =
            Config::from_sources(Some(file), lookup_from(&[("DESDATA", "/from/env")])).unwrap();
        assert_eq!(config.roots.desdata.as_deref(), Some("/from/env"));
        assert_eq!(config.roots.scratch.as_deref(), Some("/scratch/file"));
        assert_eq!(config.default_project.as_deref(), Some("SVA1"));
    }

    #[rstest]
    fn test_blank_env_is_ignored() {
        let file = ConfigFile {
            roots: Roots {
                desdata: Some("/from/file".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = Config::from_sources(Some(file), lookup_from(&[("DESDATA", " ")])).unwrap();
        assert_eq!(config.roots.desdata.as_deref(), Some("/from/file"));
    }

    #[rstest]
    fn test_invalid_mode_in_env() {
        let result = Config::from_sources(None, lookup_from(&[("DES_DEFAULT_FS", "tape")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[rstest]
    fn test_config_error_flattens_into_des_error() {
        let invalid = Config::from_sources(None, lookup_from(&[("DES_SCHEMA", "v9")])).unwrap_err();
        assert!(matches!(
            DesError::from(invalid),
            DesError::Configuration { key, .. } if key == "DES_SCHEMA"
        ));

        let missing = ConfigError::NotFound {
            path: "/nowhere/.desdb.json".to_string(),
        };
        assert!(matches!(
            DesError::from(missing),
            DesError::Configuration { key, message }
                if key == CONFIG_FILE_NAME && message.contains("/nowhere")
        ));
    }

    #[rstest]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigFile::load(&dir.path().join("missing.json"));
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[rstest]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ invalid json }").unwrap();
        file.flush().unwrap();

        let result = ConfigFile::load(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidJson { .. })));
    }

    #[rstest]
    fn test_load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"roots": {"desdata": "/data/des"}, "default_fs": "nfs"}"#)
            .unwrap();
        file.flush().unwrap();

        let loaded = ConfigFile::load(file.path()).unwrap();
        assert_eq!(loaded.roots.desdata.as_deref(), Some("/data/des"));
        assert_eq!(loaded.default_fs, Some(FileSystemMode::Local));
    }

    #[rstest]
    fn test_discover_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigFile::discover(dir.path()).unwrap().is_none());
    }

    #[rstest]
    fn test_discover_present() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"default_project": "Y1A1"}"#,
        )
        .unwrap();
        let found = ConfigFile::discover(dir.path()).unwrap().unwrap();
        assert_eq!(found.default_project.as_deref(), Some("Y1A1"));
    }
}
