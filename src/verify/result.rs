//! Verification result types.
//!
//! Each verification call produces a fresh `VerificationResult`; results
//! are never cached, since an install in between changes the answer.

use std::fmt;
use std::path::PathBuf;

/// The strategy that established a component is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationMethod {
    /// The external verification provider reported it installed.
    Provider(String),
    /// The verification command succeeded.
    Command(String),
    /// A well-known install path exists.
    Path(PathBuf),
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(name) => write!(f, "provider ({})", name),
            Self::Command(cmd) => write!(f, "command `{}`", cmd),
            Self::Path(path) => write!(f, "path {}", path.display()),
        }
    }
}

/// Outcome of verifying one component.
#[derive(Debug, Clone, Default)]
pub struct VerificationResult {
    /// Whether any strategy found the component.
    pub installed: bool,
    /// The strategy that succeeded, if any.
    pub method: Option<VerificationMethod>,
    /// Free-form description of what was found or tried.
    pub details: String,
    /// Raw output of the verification command, if it ran.
    pub output: Option<String>,
    /// Problems hit along the way. These never stop later strategies.
    pub errors: Vec<String>,
}

impl VerificationResult {
    /// A positive result.
    pub fn found(method: VerificationMethod, details: impl Into<String>) -> Self {
        Self {
            installed: true,
            method: Some(method),
            details: details.into(),
            ..Default::default()
        }
    }

    /// A negative result.
    pub fn not_found(details: impl Into<String>) -> Self {
        Self {
            installed: false,
            details: details.into(),
            ..Default::default()
        }
    }

    /// Attach the verification command output.
    pub fn with_output(mut self, output: Option<String>) -> Self {
        self.output = output;
        self
    }

    /// Attach the errors collected before this result was decided.
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    /// Short status label for tables.
    pub fn status_label(&self) -> &'static str {
        if self.installed {
            "installed"
        } else {
            "missing"
        }
    }
}
