use crate::domain::{LaunchSpec, Runtime};
use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::process::{Command, ExitStatus};
use std::sync::RwLock;
use tracing::{debug, info, warn};

/// Runtime running every unit in its own podman container
///
/// Containers are isolated, so each one binds the spec's port and gets
/// the spec's retry budget as a restart policy. The spec's command is not
/// used: the image entrypoint is the platform binary.
///
/// Containers left over from a previous run are replaced on create. Secret
/// values never appear on podman's argv; only their names do, and podman
/// reads the values from its own environment.
#[derive(Debug)]
pub struct PodmanAdapter {
    image: String,
    prefix: String,
    containers: RwLock<Vec<String>>,
}

impl PodmanAdapter {
    pub fn new(image: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            prefix: prefix.into(),
            containers: RwLock::new(Vec::new()),
        }
    }

    pub fn container_name(&self, unit: &str) -> String {
        format!("{}-{}", self.prefix, unit)
    }

    pub fn create_args(&self, spec: &LaunchSpec) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "create".into(),
            "--replace".into(),
            "--name".into(),
            self.container_name(&spec.name),
            "--label".into(),
            format!("platformd.version={}", spec.version),
            "--label".into(),
            format!("platformd.kind={}", spec.kind),
            "--restart".into(),
            format!("on-failure:{}", spec.retries),
        ];

        for env in &spec.env {
            args.push("-e".into());
            args.push(env.clone());
        }

        for name in spec.secrets.keys() {
            args.push("-e".into());
            args.push(name.clone());
        }

        if let Some(port) = &spec.port {
            args.push("--expose".into());
            args.push(port.clone());
        }

        args.push(self.image.clone());
        args.extend(spec.args.iter().cloned());

        args
    }

    /// Environment handed to the podman process so `-e NAME` picks up the secret values
    pub fn secret_env<'a>(&self, spec: &'a LaunchSpec) -> Vec<(&'a str, &'a str)> {
        spec.secrets
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }

    fn registered(&self) -> Vec<String> {
        self.containers
            .read()
            .map(|c| c.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }
}

impl Runtime for PodmanAdapter {
    fn create(&self, spec: &LaunchSpec) -> Result<()> {
        let name = self.container_name(&spec.name);
        debug!(unit = %spec.name, command = ?spec.command, "command ignored by container runtime");

        podman_with_env(
            self.create_args(spec),
            self.secret_env(spec),
            &format!("creating container {name}"),
        )?;

        self.containers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(name);
        Ok(())
    }

    fn start(&self) -> Result<()> {
        for name in self.registered() {
            info!("Starting {name}");
            podman(["start", name.as_str()], &format!("starting container {name}"))?;
        }
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        let mut first_error = None;

        for name in self.registered().iter().rev() {
            if let Err(e) = podman(["stop", name.as_str()], &format!("stopping container {name}")) {
                warn!("Failed to stop {name}: {:#}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn podman<I, S>(args: I, context: &str) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    podman_with_env(args, Vec::<(&str, &str)>::new(), context)
}

fn podman_with_env<I, S, E, K, V>(args: I, envs: E, context: &str) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let status = podman_status(args, envs, context)?;
    ensure_success(status, context)
}

fn podman_status<I, S, E, K, V>(args: I, envs: E, context: &str) -> Result<ExitStatus>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    Command::new("podman")
        .args(args.into_iter().map(|item| item.as_ref().to_os_string()))
        .envs(envs)
        .status()
        .with_context(|| context.to_string())
}

fn ensure_success(status: ExitStatus, context: &str) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    bail!("podman exited with {:?} ({context})", status)
}
