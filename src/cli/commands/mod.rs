//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! There are no subcommands. [`CommandDispatcher`] looks at the flags and
//! routes to one of:
//! - [`list::ListCommand`] for `--list`
//! - [`verify::VerifyCommand`] for `--verify-only`
//! - [`install::InstallCommand`] otherwise

pub mod dispatcher;
pub mod install;
pub mod list;
pub mod verify;

pub use dispatcher::{select_components, Command, CommandDispatcher, CommandResult, SetupContext};
pub use install::{InstallCommand, InstallFlags};
pub use list::ListCommand;
pub use verify::VerifyCommand;
