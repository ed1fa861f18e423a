use clap::Parser;
use tracing_subscriber::EnvFilter;

use desdb::cli::Args;
use desdb::config::Config;
use desdb::files::DesFiles;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.apply(Config::load(args.config.as_deref())?);
    let files = DesFiles::new(&config);
    let output = args.command.run(&files, args.format)?;
    println!("{}", output);
    Ok(())
}
