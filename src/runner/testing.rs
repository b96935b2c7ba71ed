//! Test doubles for the installer: a simulated machine that doubles as a
//! script runner and a verification provider.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use tempfile::TempDir;

use crate::components::{ComponentRegistry, ComponentSpec};
use crate::error::Result;
use crate::shell::{CommandResult, ScriptKind};
use crate::verify::{ProviderReport, ProviderStatus, VerificationProvider, Verifier};

use super::installer::{InstallOptions, Installer, ScriptRunner};

#[derive(Default)]
struct MachineState {
    installed: HashSet<String>,
    exits: HashMap<String, i32>,
    no_effect: HashSet<String>,
    runs: Vec<String>,
    forced: Vec<bool>,
}

/// Simulated machine. Running a component's install script marks it
/// installed unless the script is configured to fail or do nothing.
#[derive(Clone, Default)]
pub struct Machine {
    inner: Rc<RefCell<MachineState>>,
}

impl Machine {
    pub fn with_installed(self, name: &str) -> Self {
        self.inner.borrow_mut().installed.insert(name.to_string());
        self
    }

    pub fn with_exit(self, name: &str, code: i32) -> Self {
        self.inner.borrow_mut().exits.insert(name.to_string(), code);
        self
    }

    pub fn with_no_effect(self, name: &str) -> Self {
        self.inner.borrow_mut().no_effect.insert(name.to_string());
        self
    }

    /// Scripts run so far: component names for installs, script stems for
    /// anything else.
    pub fn runs(&self) -> Vec<String> {
        self.inner.borrow().runs.clone()
    }

    pub fn forced(&self) -> Vec<bool> {
        self.inner.borrow().forced.clone()
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.inner.borrow().installed.contains(name)
    }
}

impl ScriptRunner for Machine {
    fn run(
        &self,
        spec: &ComponentSpec,
        script: &Path,
        _kind: ScriptKind,
        force: bool,
    ) -> Result<CommandResult> {
        let stem = script
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let mut state = self.inner.borrow_mut();

        if stem.starts_with("uninstall-") {
            state.runs.push(stem);
            state.installed.remove(&spec.name);
            return Ok(CommandResult::success(
                format!("removed {}", spec.name),
                String::new(),
                Duration::ZERO,
            ));
        }

        state.runs.push(spec.name.clone());
        state.forced.push(force);

        if let Some(code) = state.exits.get(&spec.name).copied() {
            return Ok(CommandResult::failure(
                Some(code),
                format!("installing {}", spec.name),
                "boom".to_string(),
                Duration::ZERO,
            ));
        }
        if !state.no_effect.contains(&spec.name) {
            state.installed.insert(spec.name.clone());
        }
        Ok(CommandResult::success(
            format!("installing {}", spec.name),
            String::new(),
            Duration::ZERO,
        ))
    }
}

impl VerificationProvider for Machine {
    fn name(&self) -> &str {
        "machine"
    }

    fn check(&self, component: &str) -> Result<Option<ProviderReport>> {
        let status = if self.is_installed(component) {
            ProviderStatus::Installed
        } else {
            ProviderStatus::NotInstalled
        };
        Ok(Some(ProviderReport::new(status, component)))
    }
}

/// A registry plus a scripts directory with a script for every component.
pub struct Fixture {
    pub registry: ComponentRegistry,
    temp: TempDir,
}

impl Fixture {
    pub fn new(entries: &[(&str, &[&str])]) -> Self {
        Self::with_specs(
            entries
                .iter()
                .map(|(name, deps)| ComponentSpec::new(*name).depends_on(deps.iter().copied()))
                .collect(),
        )
    }

    pub fn with_specs(specs: Vec<ComponentSpec>) -> Self {
        let temp = TempDir::new().unwrap();
        let mut registry = ComponentRegistry::new();
        for spec in specs {
            fs::write(temp.path().join(&spec.script), "Write-Host install").unwrap();
            registry.insert(spec);
        }
        Self { registry, temp }
    }

    pub fn scripts_dir(&self) -> &Path {
        self.temp.path()
    }

    pub fn write_script(&self, name: &str, contents: &str) {
        let spec = self.registry.get(name).unwrap();
        fs::write(spec.script_path(self.scripts_dir()), contents).unwrap();
    }

    pub fn write_named_script(&self, file: &str, contents: &str) {
        fs::write(self.scripts_dir().join(file), contents).unwrap();
    }

    pub fn remove_script(&self, name: &str) {
        let spec = self.registry.get(name).unwrap();
        fs::remove_file(spec.script_path(self.scripts_dir())).unwrap();
    }

    pub fn options(&self) -> InstallOptions {
        InstallOptions {
            scripts_dir: self.scripts_dir().to_path_buf(),
            settle_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    pub fn installer(&self, machine: &Machine) -> Installer<'_> {
        self.installer_with(machine, self.options())
    }

    pub fn installer_with(&self, machine: &Machine, options: InstallOptions) -> Installer<'_> {
        Installer::new(
            &self.registry,
            Verifier::new(Box::new(machine.clone())),
            options,
        )
        .with_runner(machine.clone())
    }
}
