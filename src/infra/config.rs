use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "platformd.toml";
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default_platformd.toml");

pub const DEFAULT_SERVER_ADDRESS: &str = ":10001";
pub const DEFAULT_SERVER_IMAGE: &str = "micro/micro:latest";
pub const DEFAULT_GRACE_PERIOD_MS: u64 = 1000;
pub const DEFAULT_CONTAINER_PREFIX: &str = "micro";

pub fn default_config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/root"))
        .join(".config/platformd")
}

/// Expands a leading `~` in a user supplied config directory
pub fn expand_config_dir(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.to_string_lossy().as_ref()).into_owned())
}

pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    fs::create_dir_all(config_dir).with_context(|| format!("creating {:?}", config_dir))
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ServerConfig {
    pub address: Option<String>,
    pub image: Option<String>,
    pub grace_period_ms: Option<u64>,
}

#[derive(Deserialize, Default, Clone)]
pub struct AuthConfig {
    pub public_key: Option<String>,
    pub private_key: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RuntimeConfig {
    pub container_prefix: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl AppConfig {
    /// Merges another AppConfig into self.
    /// Values from `other` overwrite values in `self` if present.
    pub fn merge(&mut self, other: AppConfig) {
        if let Some(address) = other.server.address {
            self.server.address = Some(address);
        }
        if let Some(image) = other.server.image {
            self.server.image = Some(image);
        }
        if let Some(ms) = other.server.grace_period_ms {
            self.server.grace_period_ms = Some(ms);
        }
        if let Some(key) = other.auth.public_key {
            self.auth.public_key = Some(key);
        }
        if let Some(key) = other.auth.private_key {
            self.auth.private_key = Some(key);
        }
        if let Some(prefix) = other.runtime.container_prefix {
            self.runtime.container_prefix = Some(prefix);
        }
    }

    fn fill_defaults(&mut self) {
        if self.server.address.is_none() {
            self.server.address = Some(DEFAULT_SERVER_ADDRESS.to_string());
        }
        if self.server.image.is_none() {
            self.server.image = Some(DEFAULT_SERVER_IMAGE.to_string());
        }
        if self.server.grace_period_ms.is_none() {
            self.server.grace_period_ms = Some(DEFAULT_GRACE_PERIOD_MS);
        }
        if self.runtime.container_prefix.is_none() {
            self.runtime.container_prefix = Some(DEFAULT_CONTAINER_PREFIX.to_string());
        }
    }

    pub fn address(&self) -> &str {
        self.server
            .address
            .as_deref()
            .unwrap_or(DEFAULT_SERVER_ADDRESS)
    }

    pub fn image(&self) -> &str {
        self.server.image.as_deref().unwrap_or(DEFAULT_SERVER_IMAGE)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.server.grace_period_ms.unwrap_or(DEFAULT_GRACE_PERIOD_MS))
    }

    pub fn container_prefix(&self) -> &str {
        self.runtime
            .container_prefix
            .as_deref()
            .unwrap_or(DEFAULT_CONTAINER_PREFIX)
    }
}

/// Loads the config from `config_dir`, overridden by `./platformd.toml` when present
pub fn load_app_config(config_dir: &Path) -> Result<AppConfig> {
    load_app_config_from(config_dir, Path::new("."))
}

pub fn load_app_config_from(config_dir: &Path, local_dir: &Path) -> Result<AppConfig> {
    let mut app_config = read_config_file(&config_dir.join(CONFIG_FILE_NAME))?.unwrap_or_default();

    if let Some(local) = read_config_file(&local_dir.join(CONFIG_FILE_NAME))? {
        app_config.merge(local);
    }

    app_config.fill_defaults();
    Ok(app_config)
}

fn read_config_file(path: &Path) -> Result<Option<AppConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
    let config: AppConfig =
        toml::from_str(&content).with_context(|| format!("parsing config {:?}", path))?;

    Ok(Some(config))
}

/// Writes the default config template unless one already exists. Returns whether it wrote.
pub fn install_default_config(target_dir: &Path) -> Result<bool> {
    ensure_config_dir(target_dir)?;

    let target = target_dir.join(CONFIG_FILE_NAME);
    if target.exists() {
        return Ok(false);
    }

    fs::write(&target, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("writing template to {:?}", target))?;

    Ok(true)
}
