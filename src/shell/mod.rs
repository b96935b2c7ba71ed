//! Shell command and install script execution.

pub mod command;
pub mod platform;
pub mod script;

pub use command::{execute, execute_quiet, run, CommandOptions, CommandResult};
pub use platform::{is_ci, is_elevated};
pub use script::{run_script, validate_script, ScriptKind};
