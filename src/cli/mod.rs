pub mod globals;
pub mod server;
pub mod setup;

pub use globals::GlobalOptions;
pub use server::ServerCommand;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "platformd",
    version,
    about = "Boots and supervises the platform services as a single unit"
)]
pub struct Cli {
    #[command(flatten)]
    pub globals: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the platform server
    #[command(
        long_about = "Run the platform server.\n\nLaunching the server starts every platform \
                      service and client under one runtime and keeps them up until the \
                      process receives a termination signal."
    )]
    Server(ServerCommand),
    /// Install the default config template into the config directory
    Setup,
}
