use crate::domain::{AuthProvider, KeyPair};
use crate::infra::config::AuthConfig;
use tracing::warn;

/// Auth provider serving the key pair from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    keys: KeyPair,
}

impl StaticAuth {
    pub fn new(keys: KeyPair) -> Self {
        Self { keys }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        let keys = KeyPair::new(
            config.public_key.clone().unwrap_or_default(),
            config.private_key.clone().unwrap_or_default(),
        );

        if keys.public_key.is_empty() || keys.private_key.is_empty() {
            warn!("No auth key pair configured, services will receive empty keys");
        }

        Self { keys }
    }
}

impl AuthProvider for StaticAuth {
    fn key_pair(&self) -> KeyPair {
        self.keys.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = AuthConfig {
            public_key: Some("pub".to_string()),
            private_key: Some("priv".to_string()),
        };

        let auth = StaticAuth::from_config(&config);
        assert_eq!(auth.key_pair(), KeyPair::new("pub", "priv"));
    }

    #[test]
    fn test_missing_keys_are_empty() {
        let auth = StaticAuth::from_config(&AuthConfig::default());
        assert_eq!(auth.key_pair(), KeyPair::default());
    }
}
