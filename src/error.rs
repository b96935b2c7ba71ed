//! Error types for devsetup operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Installer-level errors are recovered at the component boundary: they are
//!   recorded into the run state and surfaced as a boolean failure
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for devsetup operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Component name is not present in the registry.
    #[error("Unknown component: {name}")]
    UnknownComponent { name: String },

    /// Component dependency cycle detected under the strict cycle policy.
    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    /// The component's install script does not exist.
    #[error("Install script for '{component}' not found: {path}")]
    ScriptMissing { component: String, path: PathBuf },

    /// The install script exists but does not look runnable.
    #[error("Install script for '{component}' is not a valid script ({path}): {reason}")]
    ScriptInvalid {
        component: String,
        path: PathBuf,
        reason: String,
    },

    /// A dependency of the component failed to install.
    #[error("Dependency '{dependency}' of '{component}' failed to install")]
    DependencyFailed {
        component: String,
        dependency: String,
    },

    /// The install script exited with a non-zero status.
    #[error("Installer for '{component}' exited with code {}", format_code(.code))]
    InstallerFailed {
        component: String,
        code: Option<i32>,
    },

    /// Installer reported success but verification found nothing.
    #[error("Installation of '{component}' could not be verified: {details}")]
    VerificationFailed { component: String, details: String },

    /// Shell command ran and failed.
    #[error("Command failed with exit code {}: {command}", format_code(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// The process could not be started at all.
    #[error("Failed to start {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

impl SetupError {
    /// Whether this error comes from the user's selection or configuration
    /// rather than from running an installer.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParseError { .. }
                | Self::ConfigValidationError { .. }
                | Self::UnknownComponent { .. }
                | Self::CircularDependency { .. }
        )
    }
}

/// Result type alias for devsetup operations.
pub type Result<T> = std::result::Result<T, SetupError>;
