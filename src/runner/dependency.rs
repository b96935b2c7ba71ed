//! Dependency resolution for component install ordering.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::components::ComponentRegistry;
use crate::error::{Result, SetupError};

/// What to do when dependencies form a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Record a warning and keep going; the back edge is ignored.
    #[default]
    Warn,
    /// Fail resolution with `CircularDependency`.
    Error,
}

/// An install order plus anything noticed while computing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Components in install order (dependencies first), each exactly once.
    pub order: Vec<String>,
    /// Cycles found, as paths whose first and last entries are equal.
    pub cycles: Vec<Vec<String>>,
}

impl Resolution {
    /// Human-readable warnings for the cycles found.
    pub fn cycle_warnings(&self) -> Vec<String> {
        self.cycles
            .iter()
            .map(|cycle| format!("Circular dependency detected: {}", cycle.join(" -> ")))
            .collect()
    }
}

#[derive(Clone, Copy, PartialEq)]
enum State {
    Visiting,
    Visited,
}

/// Computes install orders over a component registry.
pub struct DependencyResolver<'a> {
    registry: &'a ComponentRegistry,
    policy: CyclePolicy,
}

impl<'a> DependencyResolver<'a> {
    /// Create a resolver with the given cycle policy.
    pub fn new(registry: &'a ComponentRegistry, policy: CyclePolicy) -> Self {
        Self { registry, policy }
    }

    /// Order `requested` and their transitive dependencies so that every
    /// dependency comes before its dependents.
    ///
    /// Dependencies missing from the registry are skipped. A requested name
    /// missing from the registry is kept in the order so that installing it
    /// reports the error.
    pub fn resolve(&self, requested: &[String]) -> Result<Resolution> {
        let mut state: HashMap<String, State> = HashMap::new();
        let mut path: Vec<String> = Vec::new();
        let mut resolution = Resolution::default();

        for name in requested {
            if !self.registry.contains(name) {
                if !resolution.order.contains(name) {
                    resolution.order.push(name.clone());
                }
                continue;
            }
            self.visit(name, &mut state, &mut path, &mut resolution)?;
        }

        Ok(resolution)
    }

    fn visit(
        &self,
        name: &str,
        state: &mut HashMap<String, State>,
        path: &mut Vec<String>,
        resolution: &mut Resolution,
    ) -> Result<()> {
        match state.get(name) {
            Some(State::Visited) => return Ok(()),
            Some(State::Visiting) => {
                let start = path.iter().position(|s| s == name).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].to_vec();
                cycle.push(name.to_string());
                let rendered = cycle.join(" -> ");

                if self.policy == CyclePolicy::Error {
                    return Err(SetupError::CircularDependency { cycle: rendered });
                }
                warn!("Circular dependency detected: {}", rendered);
                resolution.cycles.push(cycle);
                return Ok(());
            }
            None => {}
        }

        state.insert(name.to_string(), State::Visiting);
        path.push(name.to_string());

        if let Some(spec) = self.registry.get(name) {
            for dep in &spec.depends_on {
                if !self.registry.contains(dep) {
                    debug!("Skipping unknown dependency '{}' of '{}'", dep, name);
                    continue;
                }
                self.visit(dep, state, path, resolution)?;
            }
        }

        path.pop();
        state.insert(name.to_string(), State::Visited);
        resolution.order.push(name.to_string());
        Ok(())
    }
}
