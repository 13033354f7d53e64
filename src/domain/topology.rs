/// Platform services, in registration order
pub const SERVICES: &[&str] = &[
    "registry", // :8000
    "broker",   // :8003
    "network",  // :8443
    "runtime",  // :8088
    "config",   // :8001
    "store",    // :8002
    "events",   // :unset
    "auth",     // :8010
    "proxy",    // :8081
    "api",      // :8080
];

/// Clients started alongside the services
pub const CLIENTS: &[&str] = &["web"];

/// The service that is the network layer itself and never gets a proxy
pub const NETWORK_SERVICE: &str = "network";

/// The set of units a single `run` registers
///
/// Order determines registration order only; the runtime may start units concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub services: Vec<String>,
    pub clients: Vec<String>,
}

impl Topology {
    /// The fixed platform topology
    pub fn platform() -> Self {
        Self::new(SERVICES, CLIENTS)
    }

    pub fn new(services: &[&str], clients: &[&str]) -> Self {
        Self {
            services: services.iter().map(|s| s.to_string()).collect(),
            clients: clients.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.services.len() + self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::platform()
    }
}
