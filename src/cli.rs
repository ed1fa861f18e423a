//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Command;
use crate::config::Config;
use crate::output::OutputFormat;
use crate::roots::FileSystemMode;
use crate::schema::SchemaVersion;

#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve DES file types to paths and URLs", long_about = None)]
pub struct Args {
    /// Configuration file (defaults to ./.desdb.json when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// File system to resolve against (overrides DES_DEFAULT_FS)
    #[arg(long, value_enum, global = true)]
    pub fs: Option<FileSystemMode>,

    /// Naming schema version (overrides DES_SCHEMA)
    #[arg(long, value_enum, global = true)]
    pub schema: Option<SchemaVersion>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(mode) = self.fs {
            config.mode = mode;
        }
        if let Some(schema) = self.schema {
            config.schema = schema;
        }
        config
    }
}
