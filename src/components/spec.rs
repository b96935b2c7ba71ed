//! Component descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Broad grouping used for listing and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Language runtimes (Node.js, Python).
    Runtime,
    /// Editors and IDEs.
    Editor,
    /// Container and virtualization tooling.
    Container,
    /// Database servers and clients.
    Database,
    /// Everything else.
    #[default]
    Tool,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Runtime => "runtime",
            Self::Editor => "editor",
            Self::Container => "container",
            Self::Database => "database",
            Self::Tool => "tool",
        };
        f.write_str(label)
    }
}

/// Immutable description of an installable component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    /// Registry key (e.g., "nodejs").
    pub name: String,
    /// Human-readable name (e.g., "Node.js").
    pub display_name: String,
    /// Grouping for display.
    pub category: Category,
    /// Install script, relative to the scripts directory unless absolute.
    pub script: PathBuf,
    /// Names of components that must be installed first, in install order.
    pub depends_on: Vec<String>,
    /// Whether a failure aborts the whole batch.
    pub critical: bool,
    /// Command whose success indicates the component is present.
    pub verify_command: Option<String>,
    /// Well-known install locations. Supports `~`, `$VAR` and glob wildcards.
    pub paths: Vec<String>,
    /// Compensating script run when rolling back this component.
    pub uninstall_script: Option<PathBuf>,
}

impl ComponentSpec {
    /// Create a spec with defaults: tool category, `install-<name>.ps1`,
    /// no dependencies, not critical.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            category: Category::default(),
            script: PathBuf::from(format!("install-{}.ps1", name)),
            depends_on: Vec::new(),
            critical: false,
            verify_command: None,
            paths: Vec::new(),
            uninstall_script: None,
            name,
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = script.into();
        self
    }

    pub fn depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    pub fn verify_command(mut self, command: impl Into<String>) -> Self {
        self.verify_command = Some(command.into());
        self
    }

    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn uninstall_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.uninstall_script = Some(script.into());
        self
    }

    /// Resolve the install script against the scripts directory.
    pub fn script_path(&self, scripts_dir: &Path) -> PathBuf {
        resolve_script(&self.script, scripts_dir)
    }

    /// Resolve the uninstall script against the scripts directory.
    pub fn uninstall_path(&self, scripts_dir: &Path) -> Option<PathBuf> {
        self.uninstall_script
            .as_ref()
            .map(|s| resolve_script(s, scripts_dir))
    }
}

fn resolve_script(script: &Path, scripts_dir: &Path) -> PathBuf {
    if script.is_absolute() {
        script.to_path_buf()
    } else {
        scripts_dir.join(script)
    }
}
