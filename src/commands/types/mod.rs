mod cli_tests;
mod execute;
mod output;

pub use execute::{FileTypeEntry, TypesResult};

use clap::Args;

/// List the registered file types and their templates
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  desdb types                    # Every file type in the active schema
  desdb types -f coadd           # File types containing 'coadd'
  desdb --fs net types -f red    # Remote templates for red file types")]
pub struct TypesCmd {
    /// Only list file types containing this substring
    #[arg(short, long)]
    pub filter: Option<String>,
}
