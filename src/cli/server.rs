use crate::cli::{Cli, GlobalOptions};
use crate::domain::{AuthProvider, Runtime, Topology};
use crate::infra::config::{AppConfig, load_app_config};
use crate::infra::{PodmanAdapter, ShutdownSignal, StaticAuth};
use crate::services::{LaunchBuilder, Orchestrator, filter_env, process_env};
use anyhow::{Context, Result, bail};
use clap::{Args, CommandFactory};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Args, Debug, Clone, Default)]
pub struct ServerCommand {
    /// Set the platform server address [default: :10001]
    #[arg(long, env = "MICRO_SERVER_ADDRESS")]
    pub address: Option<String>,

    /// Set the platform server image [default: micro/micro:latest]
    #[arg(long, env = "MICRO_SERVER_IMAGE")]
    pub image: Option<String>,

    #[arg(hide = true)]
    pub args: Vec<String>,
}

impl ServerCommand {
    /// The server takes no positional arguments
    pub fn ensure_no_positionals(&self) -> Result<()> {
        if !self.args.is_empty() {
            bail!("unexpected arguments: {}", self.args.join(" "));
        }
        Ok(())
    }

    /// Flag or environment value, falling back to the config file
    pub fn address<'a>(&'a self, config: &'a AppConfig) -> &'a str {
        self.address.as_deref().unwrap_or_else(|| config.address())
    }

    pub fn image<'a>(&'a self, config: &'a AppConfig) -> &'a str {
        self.image.as_deref().unwrap_or_else(|| config.image())
    }
}

pub async fn run(cmd: ServerCommand, globals: &GlobalOptions) -> Result<()> {
    if let Err(e) = cmd.ensure_no_positionals() {
        eprintln!("error: {e}\n");
        print_server_help();
        std::process::exit(1);
    }

    let app_config = load_app_config(&globals.config_dir())?;
    let address = cmd.address(&app_config);
    let image = cmd.image(&app_config);

    info!(address, image, "Starting server");

    let runtime = Arc::new(PodmanAdapter::new(image, app_config.container_prefix()));
    let auth = StaticAuth::from_config(&app_config.auth);
    let shutdown = ShutdownSignal::install()?;
    let command = current_command()?;

    serve(
        runtime,
        &auth,
        globals,
        command,
        app_config.grace_period(),
        shutdown.wait(),
    )
    .await
}

/// Wires the collaborators into an orchestrator and runs the platform topology
pub async fn serve<F>(
    runtime: Arc<dyn Runtime>,
    auth: &dyn AuthProvider,
    globals: &GlobalOptions,
    command: PathBuf,
    grace_period: Duration,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    // the profile comes from the same merged global options that are passed down
    let builder = LaunchBuilder::new(command, filter_env(process_env()))
        .profile(globals.profile.clone())
        .proxy_address(globals.proxy_address.clone())
        .global_flags(Some(globals.flag_pairs()))
        .key_pair(auth.key_pair());

    Orchestrator::new(runtime)
        .with_grace_period(grace_period)
        .run(&builder, &Topology::platform(), shutdown)
        .await
}

fn current_command() -> Result<PathBuf> {
    match std::env::current_exe() {
        Ok(path) => Ok(path),
        Err(_) => std::env::args_os()
            .next()
            .map(PathBuf::from)
            .context("resolving the current executable"),
    }
}

fn print_server_help() {
    let mut command = Cli::command();
    command.build();

    if let Some(server) = command.find_subcommand_mut("server") {
        let _ = server.print_help();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_positionals_is_ok() {
        assert!(ServerCommand::default().ensure_no_positionals().is_ok());
    }

    #[test]
    fn test_positionals_are_a_usage_error() {
        let cmd = ServerCommand {
            args: vec!["foo".to_string(), "bar".to_string()],
            ..Default::default()
        };

        let err = cmd.ensure_no_positionals().unwrap_err();
        assert!(err.to_string().contains("foo bar"));
    }

    #[test]
    fn test_flags_win_over_config() {
        let mut config = AppConfig::default();
        config.server.address = Some(":9000".to_string());
        config.server.image = Some("registry.local/micro:1".to_string());

        let cmd = ServerCommand {
            image: Some("micro/micro:dev".to_string()),
            ..Default::default()
        };

        assert_eq!(cmd.address(&config), ":9000");
        assert_eq!(cmd.image(&config), "micro/micro:dev");
    }

    #[test]
    fn test_defaults_without_flags_or_config() {
        let config = AppConfig::default();
        let cmd = ServerCommand::default();

        assert_eq!(cmd.address(&config), ":10001");
        assert_eq!(cmd.image(&config), "micro/micro:latest");
    }
}
