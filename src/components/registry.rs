//! Component registry.
//!
//! Holds the built-in components plus any project-specific components and
//! overrides from config. The registry is assembled once at startup and
//! then only read.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::{ComponentConfig, SetupConfig};
use crate::error::{Result, SetupError};

use super::builtin::builtin_components;
use super::spec::ComponentSpec;

/// Registry of all known components, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, ComponentSpec>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in components.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for spec in builtin_components() {
            registry.insert(spec);
        }
        registry
    }

    /// Built-in components with config entries applied on top.
    ///
    /// Entries naming a built-in component patch only the fields they set;
    /// other entries define new components.
    pub fn from_config(config: &SetupConfig) -> Result<Self> {
        let mut registry = Self::builtin();

        for (name, entry) in &config.components {
            let base = registry
                .components
                .remove(name)
                .unwrap_or_else(|| ComponentSpec::new(name.clone()));
            debug!("Applying config entry for component '{}'", name);
            registry.insert(apply_entry(base, entry));
        }

        registry.validate()?;
        Ok(registry)
    }

    /// Add or replace a component.
    pub fn insert(&mut self, spec: ComponentSpec) {
        self.components.insert(spec.name.clone(), spec);
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<&ComponentSpec> {
        self.components.get(name)
    }

    /// Look up a component, failing with `UnknownComponent`.
    pub fn require(&self, name: &str) -> Result<&ComponentSpec> {
        self.get(name).ok_or_else(|| SetupError::UnknownComponent {
            name: name.to_string(),
        })
    }

    /// Check if a component exists.
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// All component names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.components.keys().cloned().collect()
    }

    /// Iterate components in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentSpec> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Return the names in `requested` that the registry does not know.
    pub fn unknown<'a>(&self, requested: &'a [String]) -> Vec<&'a str> {
        requested
            .iter()
            .filter(|name| !self.contains(name))
            .map(|s| s.as_str())
            .collect()
    }

    /// Reject structurally broken entries.
    ///
    /// Dependencies on unknown components are allowed; the resolver
    /// skips them.
    fn validate(&self) -> Result<()> {
        for spec in self.components.values() {
            if spec.script.as_os_str().is_empty() {
                return Err(SetupError::ConfigValidationError {
                    message: format!("Component '{}' has an empty script path", spec.name),
                });
            }
            if spec.depends_on.iter().any(|d| d == &spec.name) {
                return Err(SetupError::ConfigValidationError {
                    message: format!("Component '{}' depends on itself", spec.name),
                });
            }
        }
        Ok(())
    }
}

fn apply_entry(mut spec: ComponentSpec, entry: &ComponentConfig) -> ComponentSpec {
    if let Some(display_name) = &entry.display_name {
        spec.display_name = display_name.clone();
    }
    if let Some(category) = entry.category {
        spec.category = category;
    }
    if let Some(script) = &entry.script {
        spec.script = script.clone();
    }
    if let Some(deps) = &entry.depends_on {
        spec.depends_on = deps.clone();
    }
    if let Some(critical) = entry.critical {
        spec.critical = critical;
    }
    if let Some(cmd) = &entry.verify_command {
        spec.verify_command = Some(cmd.clone());
    }
    if let Some(paths) = &entry.paths {
        spec.paths = paths.clone();
    }
    if let Some(uninstall) = &entry.uninstall_script {
        spec.uninstall_script = Some(uninstall.clone());
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Category;
    use std::path::PathBuf;

    fn config(yaml: &str) -> SetupConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn builtin_registry_contains_core_tools() {
        let registry = ComponentRegistry::builtin();
        for name in ["git", "nodejs", "vscode", "docker", "postgresql"] {
            assert!(registry.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn names_are_sorted() {
        let registry = ComponentRegistry::builtin();
        let names = registry.names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn require_unknown_fails() {
        let registry = ComponentRegistry::builtin();
        let err = registry.require("emacs").unwrap_err();
        assert!(matches!(err, SetupError::UnknownComponent { name } if name == "emacs"));
    }

    #[test]
    fn config_patches_builtin_fields() {
        let registry = ComponentRegistry::from_config(&config(
            r#"
components:
  nodejs:
    critical: false
    script: node-lts.sh
"#,
        ))
        .unwrap();

        let node = registry.get("nodejs").unwrap();
        assert!(!node.critical);
        assert_eq!(node.script, PathBuf::from("node-lts.sh"));
        // untouched fields keep their built-in values
        assert_eq!(node.display_name, "Node.js");
        assert_eq!(node.verify_command.as_deref(), Some("node --version"));
    }

    #[test]
    fn config_adds_new_component() {
        let registry = ComponentRegistry::from_config(&config(
            r#"
components:
  redis:
    category: database
    depends_on: [wsl]
"#,
        ))
        .unwrap();

        let redis = registry.get("redis").unwrap();
        assert_eq!(redis.category, Category::Database);
        assert_eq!(redis.script, PathBuf::from("install-redis.ps1"));
        assert_eq!(redis.depends_on, vec!["wsl"]);
    }

    #[test]
    fn config_rejects_self_dependency() {
        let result = ComponentRegistry::from_config(&config(
            r#"
components:
  loop:
    depends_on: [loop]
"#,
        ));
        assert!(matches!(
            result,
            Err(SetupError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn config_allows_unknown_dependency() {
        let registry = ComponentRegistry::from_config(&config(
            r#"
components:
  tool:
    depends_on: [not-a-component]
"#,
        ))
        .unwrap();
        assert!(registry.contains("tool"));
    }

    #[test]
    fn unknown_reports_missing_names() {
        let registry = ComponentRegistry::builtin();
        let requested = vec!["git".to_string(), "emacs".to_string()];
        assert_eq!(registry.unknown(&requested), vec!["emacs"]);
    }
}
