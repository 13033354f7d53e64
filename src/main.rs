use anyhow::Result;
use clap::Parser;
use platformd::cli::{Cli, Commands, server, setup};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server(cmd) => server::run(cmd, &cli.globals).await,
        Commands::Setup => setup::install(&cli.globals.config_dir()),
    }
}

/// Log level comes from `RUST_LOG`, defaulting to `info`
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}
