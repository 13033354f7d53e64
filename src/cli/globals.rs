use crate::infra::config::{default_config_dir, expand_config_dir};
use clap::Args;
use std::path::PathBuf;

/// Options shared by every subcommand and passed down to the managed services
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Environment to operate in
    #[arg(long, global = true, env = "MICRO_ENV")]
    pub env: Option<String>,

    /// Namespace the platform runs in
    #[arg(long, global = true, env = "MICRO_NAMESPACE")]
    pub namespace: Option<String>,

    /// Profile the services load their plugins from
    #[arg(long, global = true, env = "MICRO_PROFILE")]
    pub profile: Option<String>,

    /// Proxy the services route their requests through
    #[arg(long, global = true, env = "MICRO_PROXY")]
    pub proxy_address: Option<String>,

    /// Config directory (default: ~/.config/platformd)
    #[arg(long, global = true, env = "MICRO_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

impl GlobalOptions {
    /// The flags that were set, as `(name, value)` pairs in declaration order
    pub fn flag_pairs(&self) -> Vec<(String, String)> {
        let flags = [
            ("env", self.env.clone()),
            ("namespace", self.namespace.clone()),
            ("profile", self.profile.clone()),
            ("proxy-address", self.proxy_address.clone()),
            (
                "config-dir",
                self.config_dir
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            ),
        ];

        flags
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
            .collect()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.config_dir
            .as_deref()
            .map(expand_config_dir)
            .unwrap_or_else(default_config_dir)
    }
}
