pub mod env_filter;
mod launch_builder;
mod orchestrator;

pub use env_filter::{filter_env, process_env};
pub use launch_builder::{
    AUTH_PRIVATE_KEY_SECRET, AUTH_PUBLIC_KEY_SECRET, DEFAULT_PROXY_ADDRESS, LATEST_VERSION,
    LaunchBuilder, RETRIES, SERVICE_PORT, SERVICE_SUBCOMMAND,
};
pub use orchestrator::{DEFAULT_GRACE_PERIOD, Orchestrator, Phase};
