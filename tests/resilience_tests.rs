use anyhow::Result;
use platformd::services::{LaunchBuilder, Orchestrator, Phase};
use platformd::test_support::MockRuntime;
use platformd::{KeyPair, Topology};
use std::sync::Arc;
use std::time::Duration;

fn create_orchestrator() -> (Orchestrator, Arc<MockRuntime>) {
    let mock = Arc::new(MockRuntime::new());
    let orchestrator = Orchestrator::new(mock.clone()).with_grace_period(Duration::ZERO);
    (orchestrator, mock)
}

fn builder() -> LaunchBuilder {
    LaunchBuilder::new("/opt/platformd", Vec::new()).key_pair(KeyPair::new("pub", "priv"))
}

#[test]
fn test_mid_loop_failure_leaves_partial_registration() -> Result<()> {
    let (orchestrator, mock) = create_orchestrator();
    mock.set_fail_on_unit("network");

    let err = orchestrator
        .register(&builder(), &Topology::platform())
        .unwrap_err();
    assert_eq!(err.to_string(), "Mock failure on: create:network");

    // registry and broker were created before the failure and are not rolled back
    let created: Vec<String> = mock.specs().into_iter().map(|s| s.name).collect();
    assert_eq!(created, vec!["registry".to_string(), "broker".to_string()]);

    let commands = mock.get_commands();
    assert!(!commands.iter().any(|c| c == "create:runtime"));
    assert!(!commands.iter().any(|c| c == "create:web"));
    assert!(!commands.iter().any(|c| c.starts_with("remove")));

    Ok(())
}

#[tokio::test]
async fn test_every_create_failing_stops_at_first_unit() -> Result<()> {
    let (orchestrator, mock) = create_orchestrator();
    mock.set_fail_on("create");

    let result = orchestrator
        .run(&builder(), &Topology::platform(), std::future::ready(()))
        .await;

    assert!(result.is_err());
    assert_eq!(mock.get_commands(), vec!["create:registry".to_string()]);

    Ok(())
}

#[tokio::test]
async fn test_start_failure_is_returned_without_waiting_for_shutdown() -> Result<()> {
    let (orchestrator, mock) = create_orchestrator();
    mock.set_fail_on("start");

    // a shutdown future that never completes must not be awaited
    let result = tokio::time::timeout(
        Duration::from_secs(1),
        orchestrator.run(&builder(), &Topology::platform(), std::future::pending()),
    )
    .await
    .expect("run must not block after a start failure");

    assert!(result.is_err());
    assert_eq!(mock.stop_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_stop_failure_still_terminates() -> Result<()> {
    let (orchestrator, mock) = create_orchestrator();
    mock.set_fail_on("stop");

    orchestrator
        .run(&builder(), &Topology::new(&["a"], &["b"]), std::future::ready(()))
        .await?;

    assert_eq!(mock.stop_count(), 1);
    assert_eq!(orchestrator.phase(), Phase::Terminated);

    Ok(())
}
