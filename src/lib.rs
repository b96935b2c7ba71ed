//! devsetup - install developer tools in dependency order.
//!
//! devsetup resolves the dependencies of the requested components, runs
//! each component's installer script, verifies the result and prints a
//! summary. Failures are recorded per component; only a critical failure
//! stops the batch.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`components`] - Component descriptors and the registry
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and result aliases
//! - [`logging`] - Tracing setup and the install log file
//! - [`runner`] - Dependency resolution, installation and orchestration
//! - [`shell`] - Command and script execution
//! - [`ui`] - Prompts, spinners, tables and terminal output
//! - [`verify`] - Installation verification strategies
//!
//! # Example
//!
//! ```
//! use devsetup::components::ComponentRegistry;
//! use devsetup::runner::{CyclePolicy, DependencyResolver};
//!
//! let registry = ComponentRegistry::builtin();
//! let resolution = DependencyResolver::new(&registry, CyclePolicy::Warn)
//!     .resolve(&["docker".to_string()])
//!     .unwrap();
//! assert_eq!(resolution.order, vec!["wsl", "docker"]);
//! ```

pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod runner;
pub mod shell;
pub mod ui;
pub mod verify;

pub use error::{Result, SetupError};
