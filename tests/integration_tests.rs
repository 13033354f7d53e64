use platformd::domain::topology::{CLIENTS, NETWORK_SERVICE, SERVICES};
use platformd::services::{LaunchBuilder, filter_env};
use platformd::{KeyPair, UnitKind};

fn platform_builder() -> LaunchBuilder {
    let env = filter_env([
        "HOME=/home/dev",
        "MICRO_NAMESPACE=micro",
        "MICRO_PROFILE=ignored",
        "MICRO_PROXY=ignored:1",
        "MICRO_REGISTRY=mdns",
    ]);

    LaunchBuilder::new("/opt/platformd", env)
        .profile(Some("platform".to_string()))
        .global_flags(Some(vec![("namespace".to_string(), "micro".to_string())]))
        .key_pair(KeyPair::new("pub", "priv"))
}

#[test]
fn test_every_service_but_network_gets_a_proxy() {
    let builder = platform_builder();

    for service in SERVICES {
        let spec = builder.service(service);
        let proxy = spec.env_value("MICRO_PROXY");

        if *service == NETWORK_SERVICE {
            assert_eq!(proxy, None, "{service} must not be proxied");
        } else {
            assert_eq!(proxy, Some("127.0.0.1:8443"), "{service} must be proxied");
        }
    }
}

#[test]
fn test_reserved_env_is_replaced_not_inherited() {
    let spec = platform_builder().service("store");

    assert_eq!(
        spec.env,
        vec![
            "MICRO_NAMESPACE=micro".to_string(),
            "MICRO_REGISTRY=mdns".to_string(),
            "MICRO_PROFILE=platform".to_string(),
            "MICRO_PROXY=127.0.0.1:8443".to_string(),
        ]
    );
}

#[test]
fn test_all_units_share_version_and_retries() {
    let builder = platform_builder();

    let specs = SERVICES
        .iter()
        .map(|s| builder.service(s))
        .chain(CLIENTS.iter().map(|c| builder.client(c)));

    for spec in specs {
        assert_eq!(spec.version, "latest", "{}", spec.name);
        assert_eq!(spec.retries, 10, "{}", spec.name);
    }
}

#[test]
fn test_service_args_end_with_service_name() {
    let builder = platform_builder();

    for service in SERVICES {
        let spec = builder.service(service);
        assert_eq!(spec.args.first().map(String::as_str), Some("service"));
        assert_eq!(spec.args.last().map(String::as_str), Some(*service));
        assert_eq!(spec.args[1..3], ["--namespace", "micro"]);
    }
}

#[test]
fn test_clients_receive_no_secrets() {
    let builder = platform_builder();

    for client in CLIENTS {
        let spec = builder.client(client);
        assert_eq!(spec.kind, UnitKind::Client);
        assert!(spec.secrets.is_empty());
        assert!(spec.env.is_empty());
    }
}
