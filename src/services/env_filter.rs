/// Only variables carrying this prefix are propagated to managed units
pub const ENV_PREFIX: &str = "MICRO_";

/// Recomputed per service by the launch builder
pub const PROFILE_ENV: &str = "MICRO_PROFILE";
pub const PROXY_ENV: &str = "MICRO_PROXY";

/// Keeps the `KEY=VALUE` entries relevant to the platform
///
/// Entries without exactly one `=` are dropped silently, as are the reserved
/// profile and proxy keys. Input order is preserved.
pub fn filter_env<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let entry = entry.as_ref();
            let mut parts = entry.split('=');
            let key = parts.next()?;
            // exactly one separator
            if parts.next().is_none() || parts.next().is_some() {
                return None;
            }

            if !key.starts_with(ENV_PREFIX) || key == PROFILE_ENV || key == PROXY_ENV {
                return None;
            }

            Some(entry.to_string())
        })
        .collect()
}

/// Snapshot of the process environment as `KEY=VALUE` strings, skipping non UTF-8 entries
pub fn process_env() -> Vec<String> {
    std::env::vars_os()
        .filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            let value = value.into_string().ok()?;
            Some(format!("{key}={value}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_prefixed_entries() {
        let env = [
            "PATH=/usr/bin",
            "MICRO_NAMESPACE=micro",
            "HOME=/root",
            "MICRO_ENV=local",
        ];

        assert_eq!(
            filter_env(env),
            vec!["MICRO_NAMESPACE=micro".to_string(), "MICRO_ENV=local".to_string()]
        );
    }

    #[test]
    fn test_drops_reserved_keys() {
        let env = [
            "MICRO_PROFILE=platform",
            "MICRO_STORE_ADDRESS=:8002",
            "MICRO_PROXY=10.0.0.1:8443",
        ];

        assert_eq!(filter_env(env), vec!["MICRO_STORE_ADDRESS=:8002".to_string()]);
    }

    #[test]
    fn test_drops_malformed_entries() {
        let env = [
            "MICRO_NO_SEPARATOR",
            "MICRO_TOKEN=abc=def",
            "MICRO_EMPTY=",
            "MICRO_OK=1",
        ];

        assert_eq!(
            filter_env(env),
            vec!["MICRO_EMPTY=".to_string(), "MICRO_OK=1".to_string()]
        );
    }

    #[test]
    fn test_preserves_input_order() {
        let env = ["MICRO_C=3", "OTHER=x", "MICRO_A=1", "MICRO_B=2"];

        assert_eq!(
            filter_env(env),
            vec![
                "MICRO_C=3".to_string(),
                "MICRO_A=1".to_string(),
                "MICRO_B=2".to_string()
            ]
        );
    }

    #[test]
    fn test_prefix_is_case_sensitive() {
        let env = ["micro_lower=1", "MICROSERVICE=2"];
        assert!(filter_env(env).is_empty());
    }

    #[test]
    fn test_empty_environment() {
        let env: Vec<String> = Vec::new();
        assert!(filter_env(env).is_empty());
    }
}
