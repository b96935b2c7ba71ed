//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

/// devsetup - install developer tools in dependency order and verify them.
#[derive(Debug, Default, Parser)]
#[command(name = "devsetup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Components to install (comma-separated)
    #[arg(short = 'c', long, value_delimiter = ',', value_name = "NAMES")]
    pub components: Vec<String>,

    /// Install every known component
    #[arg(long, conflicts_with = "components")]
    pub all: bool,

    /// Only check whether the selected components are installed
    #[arg(long, conflicts_with = "list")]
    pub verify_only: bool,

    /// Reinstall even if a component is already present
    #[arg(long)]
    pub force: bool,

    /// Show installer output and verification details
    #[arg(long)]
    pub detailed: bool,

    /// Trust installer exit codes; skip post-install verification
    #[arg(long)]
    pub skip_verification: bool,

    /// Fail instead of warning when dependencies form a cycle
    #[arg(long)]
    pub strict_cycles: bool,

    /// Seconds to wait before post-install verification
    #[arg(long, value_name = "SECONDS")]
    pub settle_delay: Option<u64>,

    /// List known components and exit
    #[arg(long)]
    pub list: bool,

    /// Path to config file (overrides default .devsetup/config.yml)
    #[arg(long, env = "DEVSETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Path to the log file (overrides .devsetup/logs/install.log)
    #[arg(long, env = "DEVSETUP_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Never prompt; fail if no components are selected
    #[arg(long)]
    pub non_interactive: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, conflicts_with = "detailed")]
    pub quiet: bool,
}
