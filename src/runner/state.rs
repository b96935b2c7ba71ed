//! Per-run install state.
//!
//! One [`InstallState`] is created per run and passed explicitly to every
//! installer call. It is never persisted.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use super::checkpoint::Checkpoint;

/// Outcome recorded for a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    /// The install script ran and the component verified.
    Installed,
    /// The component was already present; nothing ran.
    AlreadyInstalled,
    /// Installation failed.
    Failed { reason: String },
}

impl InstallStatus {
    /// Whether the component is usable after this outcome.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Installed | Self::AlreadyInstalled)
    }

    /// Whether this outcome is a failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed => write!(f, "installed"),
            Self::AlreadyInstalled => write!(f, "already installed"),
            Self::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

/// What happened to one component during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRecord {
    pub name: String,
    pub status: InstallStatus,
    pub recorded_at: DateTime<Local>,
    /// Captured installer output, if the script ran.
    pub output: Option<String>,
}

/// Batch progress counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Percentage complete, 0 when nothing is scheduled.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64) * 100.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({:.1}%)",
            self.completed,
            self.total,
            self.percentage()
        )
    }
}

/// Mutable state for a single run.
#[derive(Debug)]
pub struct InstallState {
    pub started_at: DateTime<Local>,
    pub log_path: Option<PathBuf>,
    pub records: Vec<ComponentRecord>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub checkpoints: Vec<Checkpoint>,
    pub progress: Progress,
    started: Instant,
    active: Vec<String>,
}

impl Default for InstallState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl InstallState {
    /// Start a new run.
    pub fn new(log_path: Option<PathBuf>) -> Self {
        Self {
            started_at: Local::now(),
            log_path,
            records: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            checkpoints: Vec::new(),
            progress: Progress::default(),
            started: Instant::now(),
            active: Vec::new(),
        }
    }

    /// Record an outcome, replacing any earlier record for the component.
    pub fn record(&mut self, name: &str, status: InstallStatus, output: Option<String>) {
        if let InstallStatus::Failed { reason } = &status {
            self.errors.push(format!("{}: {}", name, reason));
        }

        let record = ComponentRecord {
            name: name.to_string(),
            status,
            recorded_at: Local::now(),
            output,
        };

        match self.records.iter_mut().find(|r| r.name == name) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    /// Record a failure with a reason.
    pub fn record_failure(&mut self, name: &str, reason: impl Into<String>, output: Option<String>) {
        self.record(
            name,
            InstallStatus::Failed {
                reason: reason.into(),
            },
            output,
        );
    }

    /// Add a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Latest status recorded for a component.
    pub fn status(&self, name: &str) -> Option<&InstallStatus> {
        self.records
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.status)
    }

    /// Record for a component, if any.
    pub fn get(&self, name: &str) -> Option<&ComponentRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Whether a component is installed (or was already) in this run.
    pub fn is_present(&self, name: &str) -> bool {
        self.status(name).is_some_and(InstallStatus::is_present)
    }

    /// Whether a component failed in this run.
    pub fn has_failed(&self, name: &str) -> bool {
        self.status(name).is_some_and(InstallStatus::is_failed)
    }

    /// Time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub(crate) fn enter(&mut self, name: &str) {
        self.active.push(name.to_string());
    }

    pub(crate) fn leave(&mut self, name: &str) {
        if let Some(pos) = self.active.iter().rposition(|n| n == name) {
            self.active.remove(pos);
        }
    }

    /// Whether a component is being installed further up the call stack.
    pub(crate) fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|n| n == name)
    }

    /// Summarize the run.
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            duration: self.elapsed(),
            warnings: self.warnings.clone(),
            ..Default::default()
        };

        for record in &self.records {
            match &record.status {
                InstallStatus::Installed => summary.installed.push(record.name.clone()),
                InstallStatus::AlreadyInstalled => {
                    summary.already_installed.push(record.name.clone())
                }
                InstallStatus::Failed { reason } => summary
                    .failed
                    .push((record.name.clone(), reason.clone())),
            }
        }

        summary
    }
}

/// End-of-run totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub installed: Vec<String>,
    pub already_installed: Vec<String>,
    /// Failed components with their reasons.
    pub failed: Vec<(String, String)>,
    pub warnings: Vec<String>,
    pub duration: Duration,
}

impl RunSummary {
    /// Number of components that ended up present.
    pub fn succeeded(&self) -> usize {
        self.installed.len() + self.already_installed.len()
    }

    /// Number of components attempted.
    pub fn attempted(&self) -> usize {
        self.succeeded() + self.failed.len()
    }

    /// Success rate as a percentage rounded to one decimal.
    ///
    /// A run that attempted nothing reports 100.
    pub fn success_rate(&self) -> f64 {
        let attempted = self.attempted();
        if attempted == 0 {
            return 100.0;
        }
        let rate = self.succeeded() as f64 / attempted as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }
}
