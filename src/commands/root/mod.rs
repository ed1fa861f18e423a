mod execute;
mod output;

pub use execute::RootResult;

use clap::Args;

/// Print the root directory or URL of the active file system
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  desdb root                 # $DESDATA
  desdb --fs net root        # $DESREMOTE
  desdb root --scratch       # $DES_SCRATCH")]
pub struct RootCmd {
    /// Print the scratch directory instead
    #[arg(long, default_value_t = false)]
    pub scratch: bool,
}
