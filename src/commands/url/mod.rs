mod cli_tests;
mod execute;
mod output;
mod output_tests;

pub use execute::UrlResult;

use clap::Args;

/// Print the full path or URL of a file type
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  desdb url red_image -p run=20130101000000_20121124 -p expname=decam--24--15-i-6 -p ccd=3
  desdb url coadd_image -p coadd_run=20140101 -p tilename=DES0010+0001 -p band=i
  desdb --fs net url meds -p medsconf=013 -p coadd_run=R -p tilename=T -p band=g,r")]
pub struct UrlCmd {
    /// File type, e.g. red_image or coadd_cat (see `desdb types`)
    pub filetype: String,

    /// Template parameter as key=value (repeatable)
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}
