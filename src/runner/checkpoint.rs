//! Checkpoints and rollback bookkeeping.
//!
//! A checkpoint is a deep copy of the run state at a point in time. Restoring
//! one does not rewind the in-memory records; it works out which components
//! were installed since, so the installer can report or undo them according
//! to the [`RollbackMode`].

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::state::{ComponentRecord, InstallState, InstallStatus, Progress};

/// How components installed after a checkpoint are handled on restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollbackMode {
    /// Warn that the component was left in place.
    #[default]
    Advisory,
    /// Run the component's uninstall script when it has one.
    Compensate,
}

/// State captured when a checkpoint is taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub records: Vec<ComponentRecord>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub progress: Progress,
}

/// A named point in the run that can be rolled back to.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub name: String,
    pub description: String,
    pub timestamp: DateTime<Local>,
    pub snapshot: Snapshot,
}

impl Checkpoint {
    /// Components installed after this checkpoint was taken, per `state`.
    ///
    /// Only freshly installed components count; anything that was already
    /// present was not changed by the run.
    pub fn installed_since(&self, state: &InstallState) -> Vec<String> {
        state
            .records
            .iter()
            .filter(|r| r.status == InstallStatus::Installed)
            .filter(|r| {
                !self
                    .snapshot
                    .records
                    .iter()
                    .any(|s| s.name == r.name && s.status == InstallStatus::Installed)
            })
            .map(|r| r.name.clone())
            .collect()
    }
}

/// What happened to one component during a restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackAction {
    /// Left installed; reported as a warning.
    NotReverted(String),
    /// The uninstall script ran successfully.
    Uninstalled(String),
    /// The uninstall script failed.
    UninstallFailed { name: String, reason: String },
}

impl RollbackAction {
    /// Warning text for the run summary, if this action warrants one.
    pub fn warning(&self, checkpoint: &str) -> Option<String> {
        match self {
            Self::NotReverted(name) => Some(format!(
                "'{}' was installed after checkpoint '{}' and was not reverted",
                name, checkpoint
            )),
            Self::Uninstalled(_) => None,
            Self::UninstallFailed { name, reason } => Some(format!(
                "Rolling back '{}' to checkpoint '{}' failed: {}",
                name, checkpoint, reason
            )),
        }
    }
}

impl InstallState {
    /// Take a checkpoint of the current state.
    pub fn create_checkpoint(&mut self, name: impl Into<String>, description: impl Into<String>) {
        let checkpoint = Checkpoint {
            name: name.into(),
            description: description.into(),
            timestamp: Local::now(),
            snapshot: Snapshot {
                records: self.records.clone(),
                warnings: self.warnings.clone(),
                errors: self.errors.clone(),
                progress: self.progress,
            },
        };
        self.checkpoints.push(checkpoint);
    }

    /// The most recent checkpoint with this name.
    pub fn checkpoint(&self, name: &str) -> Option<&Checkpoint> {
        self.checkpoints.iter().rev().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_is_a_deep_copy() {
        let mut state = InstallState::default();
        state.record("git", InstallStatus::Installed, None);
        state.warn("careful");
        state.create_checkpoint("before-nodejs", "Before installing nodejs");

        state.record("nodejs", InstallStatus::Installed, None);
        state.warn("more");

        let checkpoint = state.checkpoint("before-nodejs").unwrap();
        assert_eq!(checkpoint.snapshot.records.len(), 1);
        assert_eq!(checkpoint.snapshot.warnings, vec!["careful"]);
        assert_eq!(checkpoint.description, "Before installing nodejs");
    }

    #[test]
    fn installed_since_ignores_earlier_and_already_installed() {
        let mut state = InstallState::default();
        state.record("git", InstallStatus::Installed, None);
        state.create_checkpoint("before-docker", "");

        state.record("wsl", InstallStatus::Installed, None);
        state.record("python", InstallStatus::AlreadyInstalled, None);
        state.record_failure("docker", "exit 1", None);

        let checkpoint = state.checkpoint("before-docker").unwrap();
        assert_eq!(checkpoint.installed_since(&state), vec!["wsl"]);
    }

    #[test]
    fn latest_checkpoint_with_name_wins() {
        let mut state = InstallState::default();
        state.create_checkpoint("before-a", "first");
        state.create_checkpoint("before-a", "second");
        assert_eq!(state.checkpoint("before-a").unwrap().description, "second");
        assert!(state.checkpoint("before-b").is_none());
    }

    #[test]
    fn rollback_warnings() {
        let action = RollbackAction::NotReverted("wsl".into());
        assert_eq!(
            action.warning("before-docker").unwrap(),
            "'wsl' was installed after checkpoint 'before-docker' and was not reverted"
        );
        assert!(RollbackAction::Uninstalled("wsl".into())
            .warning("x")
            .is_none());
    }
}
