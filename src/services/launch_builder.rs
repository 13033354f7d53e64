use crate::domain::topology::NETWORK_SERVICE;
use crate::domain::{KeyPair, LaunchSpec, UnitKind};
use crate::services::env_filter::{PROFILE_ENV, PROXY_ENV};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Subcommand every managed service is launched with
pub const SERVICE_SUBCOMMAND: &str = "service";
/// Proxy used when none is configured: the network service running locally
pub const DEFAULT_PROXY_ADDRESS: &str = "127.0.0.1:8443";
/// Port each service binds to in isolated deployments
pub const SERVICE_PORT: &str = "8080";
pub const RETRIES: u32 = 10;
/// Signals that version pinning is not in effect
pub const LATEST_VERSION: &str = "latest";

pub const AUTH_PUBLIC_KEY_SECRET: &str = "MICRO_AUTH_PUBLIC_KEY";
pub const AUTH_PRIVATE_KEY_SECRET: &str = "MICRO_AUTH_PRIVATE_KEY";

/// Assembles launch specs for the units of one platform run
#[derive(Debug, Clone)]
pub struct LaunchBuilder {
    command: PathBuf,
    base_env: Vec<String>,
    profile: Option<String>,
    proxy_address: Option<String>,
    global_flags: Option<Vec<(String, String)>>,
    key_pair: KeyPair,
    network_service: String,
}

impl LaunchBuilder {
    pub fn new(command: impl Into<PathBuf>, base_env: Vec<String>) -> Self {
        Self {
            command: command.into(),
            base_env,
            profile: None,
            proxy_address: None,
            global_flags: None,
            key_pair: KeyPair::default(),
            network_service: NETWORK_SERVICE.to_string(),
        }
    }

    pub fn profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn proxy_address(mut self, proxy_address: Option<String>) -> Self {
        self.proxy_address = proxy_address;
        self
    }

    /// Flags of the parent invocation, `None` when there is no parent context
    pub fn global_flags(mut self, flags: Option<Vec<(String, String)>>) -> Self {
        self.global_flags = flags;
        self
    }

    pub fn key_pair(mut self, key_pair: KeyPair) -> Self {
        self.key_pair = key_pair;
        self
    }

    pub fn network_service(mut self, name: impl Into<String>) -> Self {
        self.network_service = name.into();
        self
    }

    /// Spec for a platform service: `<command> service [--flag value]... <name>`
    pub fn service(&self, name: &str) -> LaunchSpec {
        let mut args = vec![SERVICE_SUBCOMMAND.to_string()];
        if let Some(flags) = &self.global_flags {
            for (flag, value) in flags {
                args.push(format!("--{flag}"));
                args.push(value.clone());
            }
        }
        args.push(name.to_string());

        let mut env = self.base_env.clone();
        env.push(format!(
            "{PROFILE_ENV}={}",
            self.profile.as_deref().unwrap_or_default()
        ));

        if name != self.network_service {
            let proxy = self
                .proxy_address
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PROXY_ADDRESS);
            env.push(format!("{PROXY_ENV}={proxy}"));
        }

        let mut secrets = BTreeMap::new();
        secrets.insert(
            AUTH_PUBLIC_KEY_SECRET.to_string(),
            self.key_pair.public_key.clone(),
        );
        secrets.insert(
            AUTH_PRIVATE_KEY_SECRET.to_string(),
            self.key_pair.private_key.clone(),
        );

        LaunchSpec {
            name: name.to_string(),
            version: LATEST_VERSION.to_string(),
            kind: UnitKind::Service,
            command: self.command.clone(),
            args,
            env,
            port: Some(SERVICE_PORT.to_string()),
            retries: RETRIES,
            secrets,
        }
    }

    /// Spec for a client: the argument vector is just the client name
    pub fn client(&self, name: &str) -> LaunchSpec {
        LaunchSpec {
            name: name.to_string(),
            version: LATEST_VERSION.to_string(),
            kind: UnitKind::Client,
            command: self.command.clone(),
            args: vec![name.to_string()],
            env: Vec::new(),
            port: None,
            retries: RETRIES,
            secrets: BTreeMap::new(),
        }
    }
}
