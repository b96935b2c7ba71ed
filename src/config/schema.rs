//! Configuration schema definitions for devsetup.
//!
//! This module contains all the struct definitions that map to
//! the YAML configuration file format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::components::Category;
use crate::runner::{CyclePolicy, RollbackMode};

/// Root configuration structure for `.devsetup/config.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Global settings
    pub settings: Settings,

    /// Component definitions and overrides of built-in components
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, ComponentConfig>,
}

/// Global settings that apply to every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding install scripts (relative to project root)
    pub scripts_dir: PathBuf,

    /// Seconds to wait after an installer exits before re-verifying
    pub settle_delay_secs: u64,

    /// Skip post-install verification entirely
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_verification: bool,

    /// What to do when component dependencies form a cycle
    pub cycle_policy: CyclePolicy,

    /// How checkpoint restores treat components installed since the checkpoint
    pub rollback: RollbackMode,

    /// Log file path (relative to project root)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// External verification command; the component name is appended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_provider: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scripts_dir: PathBuf::from("scripts"),
            settle_delay_secs: default_settle_delay_secs(),
            skip_verification: false,
            cycle_policy: CyclePolicy::default(),
            rollback: RollbackMode::default(),
            log_file: None,
            verification_provider: None,
        }
    }
}

impl Settings {
    /// Settle delay as a duration.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }
}

fn default_settle_delay_secs() -> u64 {
    3
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A component entry. Every field is optional so an entry can patch a
/// built-in component; new components fall back to the same defaults
/// as [`crate::components::ComponentSpec::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Install script path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_command: Option<String>,

    /// Well-known install paths (globs allowed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uninstall_script: Option<PathBuf>,
}
