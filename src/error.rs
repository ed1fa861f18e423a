//! Error types for file location and catalog lookups.

use thiserror::Error;

/// Errors raised while registering templates.
///
/// The builtin tables are validated on first use, so any of these coming from
/// a builtin schema is a defect in the table itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("file type '{tag}' is already registered")]
    DuplicateTag { tag: String },

    #[error("file type '{tag}' uses unknown variable '{token}' in '{template}'")]
    UnknownToken {
        tag: String,
        token: String,
        template: String,
    },

    #[error("file type '{tag}' has a directory separator in its name template '{template}'")]
    SeparatorInName { tag: String, template: String },

    #[error("file type '{tag}' derives from '{parent}', which is not registered yet")]
    UnknownParent { tag: String, parent: String },
}

/// Errors raised while resolving a file type to a path or URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DesError {
    #[error("Unsupported file type '{tag}'")]
    UnknownFileType { tag: String },

    #[error("{hint} must be sent: '{template}'")]
    MissingVariable {
        token: String,
        hint: String,
        template: String,
    },

    #[error("There were unexpanded variables '{remaining}' in '{template}'")]
    UnresolvedVariable { remaining: String, template: String },

    #[error("{message}")]
    Configuration { key: String, message: String },

    #[error("invalid value '{value}' for {param}: {reason}")]
    InvalidValue {
        param: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl DesError {
    /// A configuration key that must be set but is not.
    pub fn unset(key: &str) -> Self {
        DesError::Configuration {
            key: key.to_string(),
            message: format!("The {} environment variable is not set", key),
        }
    }
}

pub type Result<T> = std::result::Result<T, DesError>;
