//! desdb library - DES file locations
//!
//! Maps symbolic file types (`red_image`, `coadd_cat`, `meds`, ...) plus a
//! bag of parameters to concrete paths or URLs on the local, remote or
//! distributed copy of the archive.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod expand;
pub mod files;
pub mod output;
pub mod params;
pub mod registry;
pub mod roots;
pub mod schema;
pub mod vars;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;

pub use config::{Config, ConfigError};
pub use error::{DesError, RegistryError, Result};
pub use files::{DesFiles, resolve};
pub use params::{ParamValue, ParameterBag};
pub use roots::FileSystemMode;
pub use schema::SchemaVersion;
