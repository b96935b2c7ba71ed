//! Multi-component install orchestration.

use tracing::{error, info, warn};

use super::dependency::{CyclePolicy, DependencyResolver};
use super::installer::Installer;
use super::state::{ComponentRecord, InstallState, Progress};

/// Progress events emitted while a batch runs.
#[derive(Debug)]
pub enum InstallProgress<'a> {
    /// The install order has been computed.
    Resolved { order: &'a [String] },
    /// A component is about to be installed.
    ComponentStarting {
        name: &'a str,
        index: usize,
        total: usize,
    },
    /// A component finished, successfully or not.
    ComponentFinished {
        name: &'a str,
        record: &'a ComponentRecord,
        progress: Progress,
    },
}

/// Result of a batch install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Whether the batch completed without a critical failure.
    pub success: bool,
    /// The install order that was attempted.
    pub order: Vec<String>,
    /// The critical component that stopped the batch, if any.
    pub aborted_by: Option<String>,
}

/// Installs a set of components in dependency order.
pub struct Orchestrator<'i, 'a> {
    installer: &'i Installer<'a>,
    cycle_policy: CyclePolicy,
    force: bool,
}

impl<'i, 'a> Orchestrator<'i, 'a> {
    pub fn new(installer: &'i Installer<'a>) -> Self {
        Self {
            installer,
            cycle_policy: CyclePolicy::default(),
            force: false,
        }
    }

    pub fn cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Install `names` and everything they depend on.
    pub fn install_many(&self, names: &[String], state: &mut InstallState) -> BatchOutcome {
        self.install_many_with_progress(names, state, |_| {})
    }

    /// Install `names` with a progress callback.
    pub fn install_many_with_progress(
        &self,
        names: &[String],
        state: &mut InstallState,
        mut on_progress: impl FnMut(InstallProgress<'_>),
    ) -> BatchOutcome {
        let resolver = DependencyResolver::new(self.installer.registry(), self.cycle_policy);
        let resolution = match resolver.resolve(names) {
            Ok(resolution) => resolution,
            Err(e) => {
                error!("Dependency resolution failed: {}", e);
                state.errors.push(e.to_string());
                return BatchOutcome::default();
            }
        };
        for warning in resolution.cycle_warnings() {
            state.warn(warning);
        }

        let order = resolution.order;
        info!("Install order: {}", order.join(", "));
        on_progress(InstallProgress::Resolved { order: &order });

        state.progress = Progress {
            completed: 0,
            total: order.len(),
        };

        let mut outcome = BatchOutcome {
            success: true,
            order: order.clone(),
            aborted_by: None,
        };

        for (index, name) in order.iter().enumerate() {
            on_progress(InstallProgress::ComponentStarting {
                name,
                index,
                total: order.len(),
            });

            // A cycle can pull a later component in early through recursion.
            let ok = match state.status(name) {
                Some(status) => status.is_present(),
                None => self.installer.install_component(name, self.force, state),
            };

            state.progress.completed += 1;
            info!("Progress: {}", state.progress);

            if let Some(record) = state.get(name) {
                on_progress(InstallProgress::ComponentFinished {
                    name,
                    record,
                    progress: state.progress,
                });
            }

            if ok {
                continue;
            }

            let critical = self
                .installer
                .registry()
                .get(name)
                .is_some_and(|spec| spec.critical);
            if critical {
                error!("Critical component {} failed; stopping", name);
                outcome.success = false;
                outcome.aborted_by = Some(name.clone());
                break;
            }

            let message = format!("{} failed to install; continuing", name);
            warn!("{}", message);
            state.warn(message);
        }

        outcome
    }
}
