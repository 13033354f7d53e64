use crate::domain::{Runtime, Topology};
use crate::services::LaunchBuilder;
use anyhow::Result;
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Time left to in-flight teardown after the runtime is stopped
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Lifecycle of a single platform run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Registering,
    Running,
    Stopping,
    Terminated,
}

/// Registers the platform units with the runtime and supervises the combined lifecycle
pub struct Orchestrator {
    runtime: Arc<dyn Runtime>,
    grace_period: Duration,
    phase: RwLock<Phase>,
}

impl Orchestrator {
    pub fn new(runtime: Arc<dyn Runtime>) -> Self {
        Self {
            runtime,
            grace_period: DEFAULT_GRACE_PERIOD,
            phase: RwLock::new(Phase::Idle),
        }
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn phase(&self) -> Phase {
        *self.phase.read().unwrap_or_else(|e| e.into_inner())
    }

    fn enter(&self, phase: Phase) {
        debug!(?phase, "orchestrator phase");
        *self.phase.write().unwrap_or_else(|e| e.into_inner()) = phase;
    }

    /// Submits every service and then every client to the runtime, in order
    ///
    /// Fail-fast: the first failed submission is returned as is and the remaining
    /// units are never submitted. Units already created stay registered with the
    /// runtime; partial registration is an accepted outcome and nothing is rolled back.
    pub fn register(&self, builder: &LaunchBuilder, topology: &Topology) -> Result<()> {
        self.enter(Phase::Registering);

        for service in &topology.services {
            info!(unit = %service, "Registering {}", service);

            let spec = builder.service(service);
            if let Err(e) = self.runtime.create(&spec) {
                error!(unit = %service, "Failed to create runtime environment: {:#}", e);
                return Err(e);
            }
        }

        for client in &topology.clients {
            info!(unit = %client, "Registering {}", client);

            let spec = builder.client(client);
            if let Err(e) = self.runtime.create(&spec) {
                error!(unit = %client, "Failed to create runtime environment: {:#}", e);
                return Err(e);
            }
        }

        Ok(())
    }

    /// Runs the whole platform until `shutdown` completes
    ///
    /// `shutdown` is awaited once with no timeout; it is the only suspension point.
    /// Stop failures are logged and otherwise ignored.
    pub async fn run<F>(
        &self,
        builder: &LaunchBuilder,
        topology: &Topology,
        shutdown: F,
    ) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.register(builder, topology)?;

        info!("Starting server runtime");
        if let Err(e) = self.runtime.start() {
            error!(fatal = true, "Failed to start runtime: {:#}", e);
            return Err(e);
        }
        self.enter(Phase::Running);

        shutdown.await;

        self.enter(Phase::Stopping);
        if let Err(e) = self.runtime.stop() {
            warn!("Failed to stop runtime: {:#}", e);
        }
        info!("Stopped server");

        tokio::time::sleep(self.grace_period).await;
        self.enter(Phase::Terminated);

        Ok(())
    }
}
