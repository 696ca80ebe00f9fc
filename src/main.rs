//! dochint - surface relevant local documentation once per edit.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dochint::cli::{self, Cli, Commands};
use dochint::Error;

fn main() -> Result<(), Error> {
    // Logs share stderr with the advisory, so stay quiet by default.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dochint=warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hook => {
            let exit_code = cli::hook::run(&cli.settings);
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Commands::Explain { path } => {
            cli::explain::run(&cli.settings, &path)?;
        }
        Commands::Config => {
            cli::config::show(&cli.settings)?;
        }
    }

    Ok(())
}
