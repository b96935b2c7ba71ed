//! Single-component installer driver.
//!
//! [`Installer::install_component`] takes one component from "requested" to
//! a recorded outcome: it checkpoints, skips components that verify as
//! present, validates the script, installs dependencies first, runs the
//! script, and verifies again after a settle delay. Every error is recorded
//! into the [`InstallState`] and surfaced as `false`.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::components::{ComponentRegistry, ComponentSpec};
use crate::config::Settings;
use crate::error::{Result, SetupError};
use crate::shell::{run_script, validate_script, CommandOptions, CommandResult, ScriptKind};
use crate::verify::Verifier;

use super::checkpoint::{RollbackAction, RollbackMode};
use super::state::{InstallState, InstallStatus};

/// Environment variable carrying the component name into scripts.
pub const COMPONENT_ENV: &str = "DEVSETUP_COMPONENT";
/// Environment variable carrying the force flag (`true`/`false`) into scripts.
pub const FORCE_ENV: &str = "DEVSETUP_FORCE";

/// Runs install and uninstall scripts.
pub trait ScriptRunner {
    fn run(
        &self,
        spec: &ComponentSpec,
        script: &Path,
        kind: ScriptKind,
        force: bool,
    ) -> Result<CommandResult>;
}

/// Runs scripts as real child processes with captured output.
#[derive(Debug, Clone, Default)]
pub struct ProcessScriptRunner {
    working_dir: Option<PathBuf>,
}

impl ProcessScriptRunner {
    pub fn new(working_dir: Option<PathBuf>) -> Self {
        Self { working_dir }
    }
}

impl ScriptRunner for ProcessScriptRunner {
    fn run(
        &self,
        spec: &ComponentSpec,
        script: &Path,
        kind: ScriptKind,
        force: bool,
    ) -> Result<CommandResult> {
        let mut options = CommandOptions::captured();
        options.cwd = self.working_dir.clone();
        options
            .env
            .insert(COMPONENT_ENV.to_string(), spec.name.clone());
        options.env.insert(FORCE_ENV.to_string(), force.to_string());
        run_script(script, kind, &options)
    }
}

/// Knobs for the installer driver.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Directory that script references are resolved against.
    pub scripts_dir: PathBuf,
    /// Skip post-install verification.
    pub skip_verification: bool,
    /// Wait between a successful script and post-install verification.
    pub settle_delay: Duration,
    /// How rollback treats components installed since a checkpoint.
    pub rollback: RollbackMode,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            scripts_dir: PathBuf::from("scripts"),
            skip_verification: false,
            settle_delay: Duration::from_secs(3),
            rollback: RollbackMode::default(),
        }
    }
}

impl InstallOptions {
    /// Build options from config settings; relative script dirs resolve
    /// against `project_root`.
    pub fn from_settings(settings: &Settings, project_root: &Path) -> Self {
        Self {
            scripts_dir: project_root.join(&settings.scripts_dir),
            skip_verification: settings.skip_verification,
            settle_delay: settings.settle_delay(),
            rollback: settings.rollback,
        }
    }
}

enum Outcome {
    Installed { output: Option<String> },
    AlreadyInstalled,
}

struct Failure {
    error: SetupError,
    output: Option<String>,
}

impl From<SetupError> for Failure {
    fn from(error: SetupError) -> Self {
        Self {
            error,
            output: None,
        }
    }
}

/// Installs components one at a time.
pub struct Installer<'a> {
    registry: &'a ComponentRegistry,
    verifier: Verifier,
    runner: Box<dyn ScriptRunner + 'a>,
    options: InstallOptions,
}

impl<'a> Installer<'a> {
    /// Create an installer that runs scripts as child processes.
    pub fn new(registry: &'a ComponentRegistry, verifier: Verifier, options: InstallOptions) -> Self {
        Self {
            registry,
            verifier,
            runner: Box::new(ProcessScriptRunner::default()),
            options,
        }
    }

    /// Replace the script runner.
    pub fn with_runner(mut self, runner: impl ScriptRunner + 'a) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn registry(&self) -> &ComponentRegistry {
        self.registry
    }

    /// Install a component and its dependencies.
    ///
    /// Returns `true` when the component ends up installed (or already was).
    /// Failures are recorded in `state`; a critical failure also rolls back
    /// to the checkpoint taken at the start of this call.
    pub fn install_component(&self, name: &str, force: bool, state: &mut InstallState) -> bool {
        let checkpoint = format!("before-{}", name);
        state.create_checkpoint(&checkpoint, format!("Before installing {}", name));

        state.enter(name);
        let outcome = self.try_install(name, force, state);
        state.leave(name);

        match outcome {
            Ok(Outcome::AlreadyInstalled) => {
                info!("{} is already installed", name);
                state.record(name, InstallStatus::AlreadyInstalled, None);
                true
            }
            Ok(Outcome::Installed { output }) => {
                info!("{} installed successfully", name);
                state.record(name, InstallStatus::Installed, output);
                true
            }
            Err(failure) => {
                let reason = failure.error.to_string();
                error!("Failed to install {}: {}", name, reason);
                state.record_failure(name, reason, failure.output);

                if self.registry.get(name).is_some_and(|spec| spec.critical) {
                    self.rollback(&checkpoint, state);
                }
                false
            }
        }
    }

    fn try_install(
        &self,
        name: &str,
        force: bool,
        state: &mut InstallState,
    ) -> std::result::Result<Outcome, Failure> {
        let spec = self.registry.require(name)?;

        if !force {
            let result = self.verifier.verify(spec);
            for e in &result.errors {
                debug!("Verification of {}: {}", name, e);
            }
            if result.installed {
                info!("{} verified: {}", spec.display_name, result.details);
                return Ok(Outcome::AlreadyInstalled);
            }
        }

        let script = spec.script_path(&self.options.scripts_dir);
        let kind = validate_script(name, &script)?;

        for dep in &spec.depends_on {
            if !self.install_dependency(name, dep, force, state) {
                return Err(SetupError::DependencyFailed {
                    component: name.to_string(),
                    dependency: dep.clone(),
                }
                .into());
            }
        }

        info!("Running installer for {}: {}", spec.display_name, script.display());
        let result = self.runner.run(spec, &script, kind, force)?;
        log_output(name, &result);
        let output = combined_output(&result);

        if !result.success {
            return Err(Failure {
                error: SetupError::InstallerFailed {
                    component: name.to_string(),
                    code: result.exit_code,
                },
                output,
            });
        }

        if !self.options.skip_verification {
            if !self.options.settle_delay.is_zero() {
                debug!(
                    "Waiting {:?} before verifying {}",
                    self.options.settle_delay, name
                );
                thread::sleep(self.options.settle_delay);
            }

            let result = self.verifier.verify(spec);
            if !result.installed {
                let mut details = result.details;
                if !result.errors.is_empty() {
                    details = format!("{} ({})", details, result.errors.join("; "));
                }
                return Err(Failure {
                    error: SetupError::VerificationFailed {
                        component: name.to_string(),
                        details,
                    },
                    output,
                });
            }
        }

        Ok(Outcome::Installed { output })
    }

    fn install_dependency(
        &self,
        parent: &str,
        dep: &str,
        force: bool,
        state: &mut InstallState,
    ) -> bool {
        if !self.registry.contains(dep) {
            let message = format!("Unknown dependency '{}' of '{}' skipped", dep, parent);
            warn!("{}", message);
            state.warn(message);
            return true;
        }
        if state.is_active(dep) {
            let message = format!(
                "Circular dependency between '{}' and '{}' skipped",
                parent, dep
            );
            warn!("{}", message);
            state.warn(message);
            return true;
        }
        if state.is_present(dep) {
            debug!("Dependency {} of {} already satisfied", dep, parent);
            return true;
        }
        if state.has_failed(dep) {
            return false;
        }

        info!("Installing dependency {} for {}", dep, parent);
        self.install_component(dep, force, state)
    }

    /// Restore a checkpoint, handling components installed since it was
    /// taken according to the rollback mode.
    pub fn rollback(&self, checkpoint: &str, state: &mut InstallState) -> Vec<RollbackAction> {
        let Some(names) = state
            .checkpoint(checkpoint)
            .map(|cp| cp.installed_since(state))
        else {
            warn!("No checkpoint named '{}'", checkpoint);
            return Vec::new();
        };

        info!("Restoring checkpoint '{}'", checkpoint);
        let actions: Vec<RollbackAction> = names.iter().map(|name| self.revert(name)).collect();

        for action in &actions {
            match action.warning(checkpoint) {
                Some(message) => {
                    warn!("{}", message);
                    state.warn(message);
                }
                None => {
                    if let RollbackAction::Uninstalled(name) = action {
                        info!("Uninstalled {} during rollback", name);
                    }
                }
            }
        }

        actions
    }

    fn revert(&self, name: &str) -> RollbackAction {
        if self.options.rollback == RollbackMode::Advisory {
            return RollbackAction::NotReverted(name.to_string());
        }

        let Some(spec) = self.registry.get(name) else {
            return RollbackAction::NotReverted(name.to_string());
        };
        let Some(script) = spec.uninstall_path(&self.options.scripts_dir) else {
            return RollbackAction::NotReverted(name.to_string());
        };

        let result = validate_script(name, &script)
            .and_then(|kind| self.runner.run(spec, &script, kind, true));
        match result {
            Ok(result) if result.success => RollbackAction::Uninstalled(name.to_string()),
            Ok(result) => RollbackAction::UninstallFailed {
                name: name.to_string(),
                reason: format!(
                    "uninstall script exited with code {}",
                    result
                        .exit_code
                        .map_or_else(|| "none".to_string(), |c| c.to_string())
                ),
            },
            Err(e) => RollbackAction::UninstallFailed {
                name: name.to_string(),
                reason: e.to_string(),
            },
        }
    }
}

fn log_output(name: &str, result: &CommandResult) {
    for line in result.stdout.lines().filter(|l| !l.trim().is_empty()) {
        info!("[{}] {}", name, line);
    }
    for line in result.stderr.lines().filter(|l| !l.trim().is_empty()) {
        info!("[{}] {}", name, line);
    }
}

fn combined_output(result: &CommandResult) -> Option<String> {
    let stdout = result.stdout.trim();
    let stderr = result.stderr.trim();
    match (stdout.is_empty(), stderr.is_empty()) {
        (true, true) => None,
        (false, true) => Some(stdout.to_string()),
        (true, false) => Some(stderr.to_string()),
        (false, false) => Some(format!("{}\n{}", stdout, stderr)),
    }
}
