//! Verify-only command implementation.
//!
//! Checks each selected component without installing anything. Missing
//! components make the command exit with 1.

use tracing::info;

use crate::error::Result;
use crate::ui::{Table, UserInterface};
use crate::verify::{provider_from_settings, VerificationResult, Verifier};

use super::dispatcher::{Command, CommandResult, SetupContext};

/// The verify command implementation.
pub struct VerifyCommand<'a> {
    context: &'a SetupContext,
    components: Vec<String>,
    detailed: bool,
}

impl<'a> VerifyCommand<'a> {
    /// Create a new verify command.
    pub fn new(context: &'a SetupContext, components: Vec<String>, detailed: bool) -> Self {
        Self {
            context,
            components,
            detailed,
        }
    }

    /// Verify every selected component with `verifier`.
    pub fn run_with(&self, verifier: &Verifier, ui: &mut dyn UserInterface) -> CommandResult {
        info!("Verification provider: {}", verifier.provider_name());
        let mut headers = vec!["Name", "Status", "Method", "Details"];
        if self.detailed {
            headers.push("Errors");
        }
        let mut table = Table::new(headers);
        let mut missing = Vec::new();

        for name in &self.components {
            let Some(spec) = self.context.registry.get(name) else {
                continue;
            };
            let result = verifier.verify(spec);
            info!(
                "Verified {}: {} ({})",
                name,
                result.status_label(),
                result.details
            );
            if !result.installed {
                missing.push(name.clone());
            }
            table.add_row(self.row(name, &result));
        }

        ui.show_header("Verification");
        ui.show_lines(&table.render());

        if missing.is_empty() {
            ui.success(&format!("All {} components are installed", self.components.len()));
            CommandResult::success()
        } else {
            ui.warning(&format!("Missing: {}", missing.join(", ")));
            CommandResult::failure(1)
        }
    }

    fn row(&self, name: &str, result: &VerificationResult) -> Vec<String> {
        let mut row = vec![
            name.to_string(),
            result.status_label().to_string(),
            result
                .method
                .as_ref()
                .map_or_else(|| "-".to_string(), |m| m.to_string()),
            result.details.clone(),
        ];
        if self.detailed {
            row.push(if result.errors.is_empty() {
                "-".to_string()
            } else {
                result.errors.join("; ")
            });
        }
        row
    }
}

impl Command for VerifyCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let verifier = Verifier::new(provider_from_settings(
            self.context.config.settings.verification_provider.as_deref(),
        ));
        Ok(self.run_with(&verifier, ui))
    }
}
