use crate::domain::{AuthProvider, KeyPair, LaunchSpec, Runtime};
use anyhow::{Result, bail};
use std::sync::RwLock;

#[derive(Debug)]
pub struct MockRuntime {
    units: RwLock<Vec<LaunchSpec>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
    fail_on_unit: RwLock<Option<String>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            units: RwLock::new(Vec::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
            fail_on_unit: RwLock::new(None),
        }
    }

    /// Fail every call of one operation: "create", "start" or "stop"
    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    /// Fail only the creation of the named unit
    pub fn set_fail_on_unit(&self, name: &str) {
        *self.fail_on_unit.write().unwrap() = Some(name.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn unit_exists(&self, name: &str) -> bool {
        self.units.read().unwrap().iter().any(|u| u.name == name)
    }

    pub fn get_spec(&self, name: &str) -> Option<LaunchSpec> {
        self.units
            .read()
            .unwrap()
            .iter()
            .find(|u| u.name == name)
            .cloned()
    }

    /// Created units in submission order
    pub fn specs(&self) -> Vec<LaunchSpec> {
        self.units.read().unwrap().clone()
    }

    pub fn start_count(&self) -> usize {
        self.count("start")
    }

    pub fn stop_count(&self) -> usize {
        self.count("stop")
    }

    fn count(&self, cmd: &str) -> usize {
        self.commands
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == cmd)
            .count()
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime for MockRuntime {
    fn create(&self, spec: &LaunchSpec) -> Result<()> {
        self.record_command(&format!("create:{}", spec.name));
        self.check_fail("create")?;

        if let Some(ref unit) = *self.fail_on_unit.read().unwrap() {
            if *unit == spec.name {
                bail!("Mock failure on: create:{}", spec.name);
            }
        }

        self.units.write().unwrap().push(spec.clone());
        Ok(())
    }

    fn start(&self) -> Result<()> {
        self.record_command("start");
        self.check_fail("start")
    }

    fn stop(&self) -> Result<()> {
        self.record_command("stop");
        self.check_fail("stop")
    }
}

/// Auth provider with a fixed key pair
#[derive(Debug, Default)]
pub struct MockAuth {
    keys: KeyPair,
}

impl MockAuth {
    pub fn new(public_key: &str, private_key: &str) -> Self {
        Self {
            keys: KeyPair::new(public_key, private_key),
        }
    }
}

impl AuthProvider for MockAuth {
    fn key_pair(&self) -> KeyPair {
        self.keys.clone()
    }
}
