//! Component installation: ordering, the per-component driver, batch
//! orchestration, and run state.

pub mod checkpoint;
pub mod dependency;
pub mod installer;
pub mod orchestrator;
pub mod state;

#[cfg(test)]
mod testing;

pub use checkpoint::{Checkpoint, RollbackAction, RollbackMode, Snapshot};
pub use dependency::{CyclePolicy, DependencyResolver, Resolution};
pub use installer::{
    InstallOptions, Installer, ProcessScriptRunner, ScriptRunner, COMPONENT_ENV, FORCE_ENV,
};
pub use orchestrator::{BatchOutcome, InstallProgress, Orchestrator};
pub use state::{ComponentRecord, InstallState, InstallStatus, Progress, RunSummary};
