//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`SetupContext`] with the loaded config and component registry
//! - [`CommandDispatcher`] for routing flags to a command

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::Cli;
use crate::components::ComponentRegistry;
use crate::config::{load_config, SetupConfig};
use crate::error::{Result, SetupError};
use crate::logging::default_log_path;
use crate::ui::{parse_list, Prompt, UserInterface};

use super::install::InstallCommand;
use super::list::ListCommand;
use super::verify::VerifyCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Everything a command needs that comes from disk.
#[derive(Debug)]
pub struct SetupContext {
    pub project_root: PathBuf,
    pub config: SetupConfig,
    pub registry: ComponentRegistry,
    pub log_path: PathBuf,
}

impl SetupContext {
    /// Load config and build the registry for `project_root`.
    ///
    /// `log_override` (from `--log-file`) wins over `settings.log_file`.
    pub fn load(
        project_root: &Path,
        config_override: Option<&Path>,
        log_override: Option<&Path>,
    ) -> Result<Self> {
        let config = load_config(project_root, config_override)?;
        let registry = ComponentRegistry::from_config(&config)?;

        let log_path = match (log_override, &config.settings.log_file) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) => project_root.join(path),
            (None, None) => default_log_path(project_root),
        };

        debug!(
            "Loaded {} components for project {}",
            registry.len(),
            project_root.display()
        );

        Ok(Self {
            project_root: project_root.to_path_buf(),
            config,
            registry,
            log_path,
        })
    }
}

/// Dispatches CLI invocations to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load the context for this invocation.
    pub fn load_context(&self, cli: &Cli) -> Result<SetupContext> {
        SetupContext::load(
            &self.project_root,
            cli.config.as_deref(),
            cli.log_file.as_deref(),
        )
    }

    /// Dispatch and execute a command.
    pub fn dispatch(
        &self,
        cli: &Cli,
        context: &SetupContext,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        if cli.list {
            return ListCommand::new(context, cli.detailed).execute(ui);
        }

        let components = select_components(cli, &context.registry, ui)?;

        if cli.verify_only {
            VerifyCommand::new(context, components, cli.detailed).execute(ui)
        } else {
            InstallCommand::new(context, components, cli).execute(ui)
        }
    }
}

/// Work out which components the user asked for.
///
/// Falls back to a prompt when neither `--components` nor `--all` is given.
/// Unknown names are a configuration error.
pub fn select_components(
    cli: &Cli,
    registry: &ComponentRegistry,
    ui: &mut dyn UserInterface,
) -> Result<Vec<String>> {
    let selected = if cli.all {
        registry.names()
    } else if !cli.components.is_empty() {
        cli.components.clone()
    } else {
        ui.message(&format!("Available components: {}", registry.names().join(", ")));
        let prompt = Prompt::new("components", "Components to install (comma-separated)");
        parse_list(&ui.prompt(&prompt)?)
    };

    if selected.is_empty() {
        return Err(SetupError::ConfigValidationError {
            message: "No components selected; pass --components or --all".to_string(),
        });
    }

    let unknown = registry.unknown(&selected);
    if !unknown.is_empty() {
        return Err(SetupError::UnknownComponent {
            name: unknown.join(", "),
        });
    }

    Ok(selected)
}
