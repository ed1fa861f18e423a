//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` impl producing a serializable result
//! - An `Outputable` impl for table output

mod dir;
mod root;
mod types;
mod url;

pub use dir::{DirCmd, DirResult};
pub use root::{RootCmd, RootResult};
pub use types::{FileTypeEntry, TypesCmd, TypesResult};
pub use url::{UrlCmd, UrlResult};

use clap::Subcommand;
use std::error::Error;

use crate::files::DesFiles;
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, files: &DesFiles) -> std::result::Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the full path or URL of a file type
    Url(UrlCmd),

    /// Print the directory of a file type
    Dir(DirCmd),

    /// Print the root directory or URL of the active file system
    Root(RootCmd),

    /// List the registered file types and their templates
    Types(TypesCmd),

    /// Catch-all for unknown commands
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, files: &DesFiles, format: OutputFormat) -> std::result::Result<String, Box<dyn Error>> {
        match self {
            Command::Url(cmd) => {
                let result = cmd.execute(files)?;
                Ok(result.format(format))
            }
            Command::Dir(cmd) => {
                let result = cmd.execute(files)?;
                Ok(result.format(format))
            }
            Command::Root(cmd) => {
                let result = cmd.execute(files)?;
                Ok(result.format(format))
            }
            Command::Types(cmd) => {
                let result = cmd.execute(files)?;
                Ok(result.format(format))
            }
            Command::Unknown(args) => {
                Err(format!("Unknown command: {}", args.first().map(String::as_str).unwrap_or("")).into())
            }
        }
    }
}
