//! Pluggable verification providers.
//!
//! A provider is the first strategy the verifier consults. It is chosen once
//! at startup: either [`NoProvider`] or an external command configured in
//! `settings.verification_provider`.

use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SetupError};
use crate::shell::{run, CommandOptions};

/// Status reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ProviderStatus {
    #[serde(alias = "installed")]
    Installed,
    #[serde(alias = "not_installed", alias = "NotFound", alias = "missing")]
    NotInstalled,
    #[serde(other)]
    Unknown,
}

/// A provider's answer for one component.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderReport {
    pub status: ProviderStatus,
    #[serde(default)]
    pub detail: String,
}

impl ProviderReport {
    pub fn new(status: ProviderStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

/// Something that can say whether a component is installed.
pub trait VerificationProvider {
    /// Name used in verification details.
    fn name(&self) -> &str;

    /// Check a component by name.
    ///
    /// `Ok(None)` means the provider has no opinion about this component.
    fn check(&self, component: &str) -> Result<Option<ProviderReport>>;
}

/// Provider used when no external provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProvider;

impl VerificationProvider for NoProvider {
    fn name(&self) -> &str {
        "none"
    }

    fn check(&self, _component: &str) -> Result<Option<ProviderReport>> {
        Ok(None)
    }
}

/// Runs an external program with the component name appended and reads a
/// JSON report (`{"status": "Installed", "detail": "..."}`) from stdout.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    program: String,
    args: Vec<String>,
}

impl CommandProvider {
    /// Build from an argv-style list. Returns `None` when the list is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl VerificationProvider for CommandProvider {
    fn name(&self) -> &str {
        &self.program
    }

    fn check(&self, component: &str) -> Result<Option<ProviderReport>> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(component);

        let label = format!("{} {}", self.program, component);
        let result = run(cmd, &label, &CommandOptions::captured())?;
        if !result.success {
            return Err(SetupError::CommandFailed {
                command: label,
                code: result.exit_code,
            });
        }

        let stdout = result.stdout.trim();
        if stdout.is_empty() {
            debug!("Provider {} had no answer for {}", self.program, component);
            return Ok(None);
        }

        let report: ProviderReport = serde_json::from_str(stdout).map_err(|e| {
            anyhow::anyhow!(
                "provider {} returned invalid JSON for {}: {}",
                self.program,
                component,
                e
            )
        })?;
        Ok(Some(report))
    }
}

/// Pick the provider for this run.
pub fn provider_from_settings(argv: Option<&[String]>) -> Box<dyn VerificationProvider> {
    match argv.and_then(CommandProvider::from_argv) {
        Some(provider) => {
            debug!("Using external verification provider '{}'", provider.program);
            Box::new(provider)
        }
        None => Box::new(NoProvider),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_provider_has_no_opinion() {
        assert!(NoProvider.check("git").unwrap().is_none());
    }

    #[test]
    fn report_parses_status_variants() {
        let report: ProviderReport =
            serde_json::from_str(r#"{"status": "Installed", "detail": "v2"}"#).unwrap();
        assert_eq!(report, ProviderReport::new(ProviderStatus::Installed, "v2"));

        let report: ProviderReport = serde_json::from_str(r#"{"status": "missing"}"#).unwrap();
        assert_eq!(report.status, ProviderStatus::NotInstalled);
        assert!(report.detail.is_empty());

        let report: ProviderReport = serde_json::from_str(r#"{"status": "Broken"}"#).unwrap();
        assert_eq!(report.status, ProviderStatus::Unknown);
    }

    #[test]
    fn from_argv_requires_program() {
        assert!(CommandProvider::from_argv(&[]).is_none());
        let provider =
            CommandProvider::from_argv(&["verify".to_string(), "--json".to_string()]).unwrap();
        assert_eq!(provider.name(), "verify");
    }

    #[test]
    fn provider_from_settings_defaults_to_none() {
        assert_eq!(provider_from_settings(None).name(), "none");
        let argv = vec!["checker".to_string()];
        assert_eq!(provider_from_settings(Some(&argv)).name(), "checker");
    }

    #[cfg(unix)]
    #[test]
    fn command_provider_reads_json() {
        let argv: Vec<String> = vec![
            "sh".into(),
            "-c".into(),
            r#"echo "{\"status\": \"Installed\", \"detail\": \"found $0\"}""#.into(),
        ];
        let provider = CommandProvider::from_argv(&argv).unwrap();
        let report = provider.check("git").unwrap().unwrap();
        assert_eq!(report.status, ProviderStatus::Installed);
        assert_eq!(report.detail, "found git");
    }

    #[cfg(unix)]
    #[test]
    fn command_provider_rejects_garbage() {
        let argv: Vec<String> = vec!["sh".into(), "-c".into(), "echo not-json".into()];
        let provider = CommandProvider::from_argv(&argv).unwrap();
        assert!(provider.check("git").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn command_provider_failure_is_error() {
        let argv: Vec<String> = vec!["sh".into(), "-c".into(), "exit 2".into()];
        let provider = CommandProvider::from_argv(&argv).unwrap();
        let err = provider.check("git").unwrap_err();
        assert!(matches!(err, SetupError::CommandFailed { code: Some(2), .. }));
    }
}
