pub mod auth;
pub mod config;
pub mod podman_adapter;
pub mod signal;

pub use auth::StaticAuth;
pub use podman_adapter::PodmanAdapter;
pub use signal::ShutdownSignal;
