//! Multi-strategy installation verifier.
//!
//! Strategies run in priority order and the first positive answer wins:
//!
//! 1. the verification provider, keyed by component name
//! 2. the component's verification command (exit 0 or any stdout)
//! 3. the component's well-known install paths
//!
//! Errors from one strategy are collected and never stop the next one.

use tracing::debug;

use crate::components::ComponentSpec;
use crate::shell::execute_quiet;

use super::paths::find_installed_path;
use super::provider::{NoProvider, ProviderStatus, VerificationProvider};
use super::result::{VerificationMethod, VerificationResult};

/// Checks whether components are present on this machine.
pub struct Verifier {
    provider: Box<dyn VerificationProvider>,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(Box::new(NoProvider))
    }
}

impl Verifier {
    /// Create a verifier around a provider.
    pub fn new(provider: Box<dyn VerificationProvider>) -> Self {
        Self { provider }
    }

    /// Name of the configured provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Verify a single component.
    pub fn verify(&self, spec: &ComponentSpec) -> VerificationResult {
        let mut errors = Vec::new();
        let mut output = None;

        match self.provider.check(&spec.name) {
            Ok(Some(report)) if report.status == ProviderStatus::Installed => {
                return VerificationResult::found(
                    VerificationMethod::Provider(self.provider.name().to_string()),
                    report.detail,
                )
                .with_errors(errors);
            }
            Ok(Some(report)) => {
                debug!(
                    "Provider reports {:?} for {}: {}",
                    report.status, spec.name, report.detail
                );
            }
            Ok(None) => {}
            Err(e) => errors.push(format!("provider: {}", e)),
        }

        if let Some(command) = &spec.verify_command {
            match execute_quiet(command, None) {
                Ok(result) => {
                    let stdout = result.stdout.trim().to_string();
                    if result.success || !stdout.is_empty() {
                        let details = stdout.lines().next().unwrap_or_default().to_string();
                        return VerificationResult::found(
                            VerificationMethod::Command(command.clone()),
                            details,
                        )
                        .with_output(Some(stdout))
                        .with_errors(errors);
                    }
                    errors.push(format!(
                        "command `{}` exited with {}",
                        command,
                        result
                            .exit_code
                            .map_or_else(|| "signal".to_string(), |c| c.to_string())
                    ));
                    let stderr = result.stderr.trim();
                    if !stderr.is_empty() {
                        output = Some(stderr.to_string());
                    }
                }
                Err(e) => errors.push(format!("command: {}", e)),
            }
        }

        if !spec.paths.is_empty() {
            let check = find_installed_path(&spec.paths);
            errors.extend(check.errors);
            if let Some(path) = check.found {
                let details = format!("found at {}", path.display());
                return VerificationResult::found(VerificationMethod::Path(path), details)
                    .with_output(output)
                    .with_errors(errors);
            }
        }

        VerificationResult::not_found(format!("{} not found by any strategy", spec.display_name))
            .with_output(output)
            .with_errors(errors)
    }
}
