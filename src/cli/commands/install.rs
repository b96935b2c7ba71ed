//! Install command implementation.

use std::time::Duration;

use tracing::info;

use crate::cli::args::Cli;
use crate::components::ComponentRegistry;
use crate::error::Result;
use crate::runner::{
    CyclePolicy, InstallOptions, InstallProgress, InstallState, InstallStatus, Installer,
    Orchestrator, ProcessScriptRunner, ScriptRunner,
};
use crate::shell::is_elevated;
use crate::ui::{SpinnerHandle, UserInterface};
use crate::verify::{provider_from_settings, Verifier};

use super::dispatcher::{Command, CommandResult, SetupContext};

/// Flags that shape an install run.
#[derive(Debug, Clone, Default)]
pub struct InstallFlags {
    pub force: bool,
    pub detailed: bool,
    pub skip_verification: bool,
    pub strict_cycles: bool,
    pub settle_delay: Option<u64>,
}

impl From<&Cli> for InstallFlags {
    fn from(cli: &Cli) -> Self {
        Self {
            force: cli.force,
            detailed: cli.detailed,
            skip_verification: cli.skip_verification,
            strict_cycles: cli.strict_cycles,
            settle_delay: cli.settle_delay,
        }
    }
}

/// Installs the selected components and prints a summary.
pub struct InstallCommand<'a> {
    context: &'a SetupContext,
    components: Vec<String>,
    flags: InstallFlags,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(context: &'a SetupContext, components: Vec<String>, cli: &Cli) -> Self {
        Self::with_flags(context, components, InstallFlags::from(cli))
    }

    pub fn with_flags(
        context: &'a SetupContext,
        components: Vec<String>,
        flags: InstallFlags,
    ) -> Self {
        Self {
            context,
            components,
            flags,
        }
    }

    fn install_options(&self) -> InstallOptions {
        let settings = &self.context.config.settings;
        let mut options = InstallOptions::from_settings(settings, &self.context.project_root);
        options.skip_verification |= self.flags.skip_verification;
        if let Some(secs) = self.flags.settle_delay {
            options.settle_delay = Duration::from_secs(secs);
        }
        options
    }

    fn cycle_policy(&self) -> CyclePolicy {
        if self.flags.strict_cycles {
            CyclePolicy::Error
        } else {
            self.context.config.settings.cycle_policy
        }
    }

    /// Run with an explicit script runner.
    pub fn run_with(
        &self,
        runner: impl ScriptRunner + 'a,
        verifier: Verifier,
        ui: &mut dyn UserInterface,
    ) -> CommandResult {
        info!("Verification provider: {}", verifier.provider_name());
        let registry: &'a ComponentRegistry = &self.context.registry;
        let installer =
            Installer::new(registry, verifier, self.install_options()).with_runner(runner);
        let mut state = InstallState::new(Some(self.context.log_path.clone()));

        info!(
            "Starting installation of {} (force: {})",
            self.components.join(", "),
            self.flags.force
        );
        if !is_elevated() {
            info!("Not running elevated; installers that need admin rights may fail");
        }

        ui.show_header("devsetup");
        let detailed = self.flags.detailed;
        let mut spinner: Option<Box<dyn SpinnerHandle>> = None;

        let outcome = Orchestrator::new(&installer)
            .cycle_policy(self.cycle_policy())
            .force(self.flags.force)
            .install_many_with_progress(&self.components, &mut state, |event| match event {
                InstallProgress::Resolved { order } => {
                    ui.message(&format!("Install order: {}", order.join(" -> ")));
                }
                InstallProgress::ComponentStarting { name, index, total } => {
                    let title = registry
                        .get(name)
                        .map_or(name, |spec| spec.display_name.as_str());
                    ui.show_progress(index + 1, total);
                    spinner = Some(ui.start_spinner(&format!("Installing {}...", title)));
                }
                InstallProgress::ComponentFinished { name, record, .. } => {
                    if let Some(mut s) = spinner.take() {
                        match &record.status {
                            InstallStatus::Installed => {
                                s.finish_success(&format!("{} installed", name))
                            }
                            InstallStatus::AlreadyInstalled => {
                                s.finish_skipped(&format!("{} already installed", name))
                            }
                            InstallStatus::Failed { reason } => {
                                s.finish_error(&format!("{}: {}", name, reason))
                            }
                        }
                    }
                    if let Some(output) = &record.output {
                        if detailed || record.status.is_failed() {
                            ui.show_output("Installer output", output);
                        }
                    }
                }
            });

        let summary = state.summary();
        info!(
            "Installation finished in {:.1}s: {} installed, {} already installed, {} failed, {:.1}% success",
            summary.duration.as_secs_f64(),
            summary.installed.len(),
            summary.already_installed.len(),
            summary.failed.len(),
            summary.success_rate()
        );
        for error in &state.errors {
            info!("Error: {}", error);
        }
        ui.show_summary(&summary);
        ui.message(&format!("Log: {}", self.context.log_path.display()));

        if outcome.success {
            CommandResult::success()
        } else {
            if let Some(name) = &outcome.aborted_by {
                ui.error(&format!("Critical component '{}' failed; installation aborted", name));
            } else if let Some(error) = state.errors.last() {
                ui.error(error);
            }
            CommandResult::failure(1)
        }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = &self.context.config.settings;
        let verifier = Verifier::new(provider_from_settings(
            settings.verification_provider.as_deref(),
        ));
        let runner = ProcessScriptRunner::new(Some(self.context.project_root.clone()));
        Ok(self.run_with(runner, verifier, ui))
    }
}
