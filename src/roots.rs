//! File system modes and the root directory each one resolves to.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{DesError, Result};

/// Root of the distributed file system copy of the archive.
///
/// Hard-coded rather than configured; existing job scripts depend on it.
pub const ALTERNATE_STORAGE_ROOT: &str = "hdfs:///user/esheldon/DES";

/// Configuration keys, named after the environment variables that set them.
pub const LOCAL_ROOT_KEY: &str = "DESDATA";
pub const REMOTE_ROOT_KEY: &str = "DESREMOTE";
pub const SCRATCH_ROOT_KEY: &str = "DES_SCRATCH";

/// Which copy of the archive paths point into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FileSystemMode {
    /// Local (NFS mounted) copy under `$DESDATA`
    #[default]
    #[value(name = "nfs", alias = "local")]
    #[serde(rename = "nfs", alias = "local")]
    Local,
    /// Remote web copy under `$DESREMOTE`
    #[value(name = "net", alias = "remote")]
    #[serde(rename = "net", alias = "remote")]
    Remote,
    /// Distributed file system copy
    #[value(name = "hdfs", alias = "alternate")]
    #[serde(rename = "hdfs", alias = "alternate")]
    AlternateStorage,
}

impl FileSystemMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FileSystemMode::Local => "nfs",
            FileSystemMode::Remote => "net",
            FileSystemMode::AlternateStorage => "hdfs",
        }
    }

    /// Local paths join with the platform separator; everything else is a URL.
    pub fn is_url(self) -> bool {
        !matches!(self, FileSystemMode::Local)
    }
}

impl fmt::Display for FileSystemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileSystemMode {
    type Err = DesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nfs" | "local" => Ok(FileSystemMode::Local),
            "net" | "remote" => Ok(FileSystemMode::Remote),
            "hdfs" | "alternate" => Ok(FileSystemMode::AlternateStorage),
            other => Err(DesError::Configuration {
                key: "DES_DEFAULT_FS".to_string(),
                message: format!("fs should be 'nfs', 'net' or 'hdfs', got '{}'", other),
            }),
        }
    }
}

/// Configured root directories, captured once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roots {
    #[serde(default)]
    pub desdata: Option<String>,
    #[serde(default)]
    pub desremote: Option<String>,
    #[serde(default)]
    pub scratch: Option<String>,
}

/// Maps a mode to its root. Reads nothing after construction.
#[derive(Debug, Clone, Default)]
pub struct RootResolver {
    roots: Roots,
}

impl RootResolver {
    pub fn new(roots: Roots) -> Self {
        Self { roots }
    }

    pub fn root(&self, mode: FileSystemMode) -> Result<&str> {
        match mode {
            FileSystemMode::Local => configured(&self.roots.desdata, LOCAL_ROOT_KEY),
            FileSystemMode::Remote => configured(&self.roots.desremote, REMOTE_ROOT_KEY),
            FileSystemMode::AlternateStorage => Ok(ALTERNATE_STORAGE_ROOT),
        }
    }

    pub fn scratch(&self) -> Result<&str> {
        configured(&self.roots.scratch, SCRATCH_ROOT_KEY)
    }
}

fn configured<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DesError::unset(key))
}
