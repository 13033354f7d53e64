use super::{KeyPair, LaunchSpec};
use anyhow::Result;
use std::fmt::Debug;

/// Execution runtime that creates, schedules and stops the managed units
pub trait Runtime: Send + Sync + Debug {
    /// Register a unit with the runtime
    fn create(&self, spec: &LaunchSpec) -> Result<()>;

    /// Start every registered unit
    fn start(&self) -> Result<()>;

    /// Stop every registered unit
    fn stop(&self) -> Result<()>;
}

/// Source of the key pair injected into services
pub trait AuthProvider: Send + Sync + Debug {
    fn key_pair(&self) -> KeyPair;
}
