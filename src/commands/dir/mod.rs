mod execute;
mod execute_tests;
mod output;

pub use execute::DirResult;

use clap::Args;

/// Print the directory of a file type
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  desdb dir red_exp -p run=20130101000000_20121124 -p expname=decam--24--15-i-6
  desdb dir red_image -p run=R -p pointing=decam--24--15 -p band=i -p visit=6
  desdb --schema v1 dir coadd_run -p run=20120101_DES0010+0001")]
pub struct DirCmd {
    /// File type, e.g. red_run or coadd_run (see `desdb types`)
    pub filetype: String,

    /// Template parameter as key=value (repeatable)
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}
