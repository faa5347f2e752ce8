//! fabao CLI entry point

use clap::Parser;
use fabao::cli::{Cli, Commands};
use fabao::core::config::Config;
use fabao::core::error::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("FABAO_LOG"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => fabao::cli::parse::run(args),
        Commands::Serve(args) => {
            let config = Config::load(cli.config.as_deref())?;
            fabao::cli::serve::run(args, config).await
        }
        Commands::Search(args) => {
            let config = Config::load(cli.config.as_deref())?;
            fabao::cli::search::run(args, config).await
        }
    }
}
