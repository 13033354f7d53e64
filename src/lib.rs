pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Fakes for the runtime and auth collaborators, shared with the integration tests
pub mod test_support;

pub use domain::{AuthProvider, KeyPair, LaunchSpec, Runtime, Topology, UnitKind};
pub use infra::{PodmanAdapter, ShutdownSignal, StaticAuth};
pub use services::{LaunchBuilder, Orchestrator, Phase};
