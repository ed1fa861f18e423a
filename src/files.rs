//! File type to path or URL resolution.
//!
//! [`DesFiles`] ties the pieces together: it looks the file type up in the
//! schema's registry, picks the directory template for the file system mode,
//! expands it, then expands and appends the file name if the type has one.
//!
//! ```ignore
//! let files = DesFiles::from_env()?;
//! let bag = ParameterBag::new()
//!     .with("run", "20130101000000_20121124")
//!     .with("expname", "decam--24--15-i-6")
//!     .with("ccd", 3);
//! let url = files.url("red_image", &bag)?;
//! ```

use std::path::MAIN_SEPARATOR;

use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::error::Result;
use crate::expand::Expander;
use crate::params::ParameterBag;
use crate::registry::TemplateRegistry;
use crate::roots::{FileSystemMode, RootResolver};
use crate::schema::SchemaVersion;

/// Resolves file types for one configuration snapshot.
#[derive(Debug, Clone)]
pub struct DesFiles {
    expander: Expander,
    mode: FileSystemMode,
    schema: SchemaVersion,
}

impl DesFiles {
    /// Capture roots, mode, schema and default project from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            expander: Expander::new(
                RootResolver::new(config.roots.clone()),
                config.default_project.clone(),
            ),
            mode: config.mode,
            schema: config.schema,
        }
    }

    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(&Config::from_env()?))
    }

    pub fn with_mode(mut self, mode: FileSystemMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_schema(mut self, schema: SchemaVersion) -> Self {
        self.schema = schema;
        self
    }

    pub fn mode(&self) -> FileSystemMode {
        self.mode
    }

    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    pub fn registry(&self) -> &'static TemplateRegistry {
        self.schema.registry()
    }

    /// Root directory or URL for the active mode.
    pub fn root(&self) -> Result<&str> {
        self.root_with_mode(self.mode)
    }

    pub fn root_with_mode(&self, mode: FileSystemMode) -> Result<&str> {
        self.expander.roots().root(mode)
    }

    /// Scratch directory substituted for `$TMPDIR`.
    pub fn scratch(&self) -> Result<&str> {
        self.expander.roots().scratch()
    }

    /// Directory for `tag` in the active mode.
    pub fn dir(&self, tag: &str, bag: &ParameterBag) -> Result<String> {
        self.dir_with_mode(tag, bag, self.mode)
    }

    pub fn dir_with_mode(
        &self,
        tag: &str,
        bag: &ParameterBag,
        mode: FileSystemMode,
    ) -> Result<String> {
        let descriptor = self.registry().lookup(tag)?;
        self.expander
            .expand(descriptor.dir_template(mode), bag, mode)
    }

    /// Full path or URL for `tag` in the active mode.
    pub fn url(&self, tag: &str, bag: &ParameterBag) -> Result<String> {
        self.url_with_mode(tag, bag, self.mode)
    }

    /// Full path or URL for `tag`, overriding the mode for this call only.
    pub fn url_with_mode(
        &self,
        tag: &str,
        bag: &ParameterBag,
        mode: FileSystemMode,
    ) -> Result<String> {
        let descriptor = self.registry().lookup(tag)?;
        let dir = self
            .expander
            .expand(descriptor.dir_template(mode), bag, mode)?;

        let url = match &descriptor.name {
            Some(name_template) => {
                let name = self.expander.expand(name_template, bag, mode)?;
                join(&dir, &name, mode)
            }
            None => dir,
        };

        debug!(tag, mode = %mode, schema = %self.schema, url = %url, "resolved file type");
        Ok(url)
    }
}

/// Join a directory and a file name with one separator: the platform's for
/// local paths, `/` for URLs.
///
/// Plain concatenation, so a name that looks absolute stays under `dir`.
fn join(dir: &str, name: &str, mode: FileSystemMode) -> String {
    let sep = if mode.is_url() { '/' } else { MAIN_SEPARATOR };
    format!("{}{}{}", dir.trim_end_matches(sep), sep, name)
}

/// One-off resolution against the process environment.
///
/// Reads the configuration on every call; batch callers should build a
/// [`DesFiles`] once and reuse it. Configuration problems surface as
/// [`crate::error::DesError::Configuration`].
pub fn resolve(tag: &str, bag: &ParameterBag, mode: FileSystemMode) -> Result<String> {
    let files = DesFiles::from_env()?;
    files.url_with_mode(tag, bag, mode)
}
