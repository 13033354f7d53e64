use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Whether a unit is a platform service or a plain client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Service,
    Client,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service => write!(f, "service"),
            Self::Client => write!(f, "client"),
        }
    }
}

/// Everything the runtime needs to create one managed unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub name: String,
    /// Always the "latest" sentinel; version pinning is not in effect
    pub version: String,
    pub kind: UnitKind,
    pub command: PathBuf,
    pub args: Vec<String>,
    pub env: Vec<String>,
    /// Only meaningful for isolated runtimes where each unit binds its own port
    pub port: Option<String>,
    pub retries: u32,
    pub secrets: BTreeMap<String, String>,
}

impl LaunchSpec {
    pub fn is_service(&self) -> bool {
        self.kind == UnitKind::Service
    }

    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env.iter().find_map(|entry| {
            entry
                .split_once('=')
                .filter(|(k, _)| *k == key)
                .map(|(_, v)| v)
        })
    }
}

/// Key material handed to services as secrets
#[derive(Clone, Default, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

impl KeyPair {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
