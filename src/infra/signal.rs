//! OS termination signals as a one-shot shutdown future.
//!
//! SIGINT, SIGTERM and SIGQUIT are registered. SIGKILL cannot be caught on
//! Unix, so a killed process never reaches the orchestrator's stop path.

use anyhow::Result;
use tracing::info;

#[cfg(unix)]
use anyhow::Context;
#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Completes on the first termination signal received
///
/// Wakes up at most once: signals arriving before the first is observed
/// collapse into the same wakeup, and the handle is consumed by `wait`.
#[cfg(unix)]
pub struct ShutdownSignal {
    interrupt: Signal,
    terminate: Signal,
    quit: Signal,
}

#[cfg(unix)]
impl ShutdownSignal {
    /// Registers the handlers. Must be called from within a tokio runtime.
    pub fn install() -> Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt()).context("registering SIGINT handler")?,
            terminate: signal(SignalKind::terminate()).context("registering SIGTERM handler")?,
            quit: signal(SignalKind::quit()).context("registering SIGQUIT handler")?,
        })
    }

    pub async fn wait(mut self) {
        let name = tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
            _ = self.quit.recv() => "SIGQUIT",
        };
        info!(signal = name, "Received shutdown signal");
    }
}

#[cfg(not(unix))]
pub struct ShutdownSignal;

#[cfg(not(unix))]
impl ShutdownSignal {
    pub fn install() -> Result<Self> {
        Ok(Self)
    }

    pub async fn wait(self) {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!(signal = "ctrl-c", "Received shutdown signal");
        }
    }
}
