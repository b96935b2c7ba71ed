//! Built-in component table.
//!
//! These are the tools devsetup knows how to install out of the box. Each
//! entry points at `install-<name>.ps1` in the scripts directory; projects
//! can override any field from `.devsetup/config.yml`.

use super::spec::{Category, ComponentSpec};

/// Build the built-in component table.
pub fn builtin_components() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::new("git")
            .display_name("Git")
            .category(Category::Tool)
            .critical(true)
            .verify_command("git --version")
            .paths([
                "${ProgramFiles}/Git/cmd/git.exe",
                "/usr/bin/git",
                "/usr/local/bin/git",
                "/opt/homebrew/bin/git",
            ]),
        ComponentSpec::new("nodejs")
            .display_name("Node.js")
            .category(Category::Runtime)
            .critical(true)
            .verify_command("node --version")
            .paths([
                "${ProgramFiles}/nodejs/node.exe",
                "~/.nvm/versions/node/*/bin/node",
                "/usr/bin/node",
                "/usr/local/bin/node",
            ]),
        ComponentSpec::new("python")
            .display_name("Python")
            .category(Category::Runtime)
            .verify_command("python --version")
            .paths([
                "${LOCALAPPDATA}/Programs/Python/Python3*/python.exe",
                "/usr/bin/python3",
                "/usr/local/bin/python3",
            ]),
        ComponentSpec::new("vscode")
            .display_name("Visual Studio Code")
            .category(Category::Editor)
            .verify_command("code --version")
            .paths([
                "${LOCALAPPDATA}/Programs/Microsoft VS Code/Code.exe",
                "${ProgramFiles}/Microsoft VS Code/Code.exe",
                "/usr/share/code/code",
                "/Applications/Visual Studio Code.app",
            ]),
        ComponentSpec::new("wsl")
            .display_name("Windows Subsystem for Linux")
            .category(Category::Container)
            .critical(true)
            .verify_command("wsl --status")
            .paths(["${SystemRoot}/System32/wsl.exe"]),
        ComponentSpec::new("docker")
            .display_name("Docker Desktop")
            .category(Category::Container)
            .depends_on(["wsl"])
            .verify_command("docker --version")
            .paths([
                "${ProgramFiles}/Docker/Docker/Docker Desktop.exe",
                "/usr/bin/docker",
                "/Applications/Docker.app",
            ]),
        ComponentSpec::new("postgresql")
            .display_name("PostgreSQL")
            .category(Category::Database)
            .verify_command("psql --version")
            .paths([
                "${ProgramFiles}/PostgreSQL/*/bin/psql.exe",
                "/usr/lib/postgresql/*/bin/psql",
                "/usr/bin/psql",
            ]),
        ComponentSpec::new("pgadmin")
            .display_name("pgAdmin 4")
            .category(Category::Database)
            .depends_on(["postgresql"])
            .paths([
                "${ProgramFiles}/pgAdmin 4/runtime/pgAdmin4.exe",
                "/usr/pgadmin4",
                "/Applications/pgAdmin 4.app",
            ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_names_are_unique() {
        let components = builtin_components();
        let names: HashSet<_> = components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), components.len());
    }

    #[test]
    fn builtin_dependencies_exist() {
        let components = builtin_components();
        let names: HashSet<_> = components.iter().map(|c| c.name.as_str()).collect();
        for component in &components {
            for dep in &component.depends_on {
                assert!(
                    names.contains(dep.as_str()),
                    "{} depends on unknown {}",
                    component.name,
                    dep
                );
            }
        }
    }

    #[test]
    fn every_builtin_has_a_verification_strategy() {
        for component in builtin_components() {
            assert!(
                component.verify_command.is_some() || !component.paths.is_empty(),
                "{} cannot be verified",
                component.name
            );
        }
    }

    #[test]
    fn docker_depends_on_wsl() {
        let docker = builtin_components()
            .into_iter()
            .find(|c| c.name == "docker")
            .unwrap();
        assert_eq!(docker.depends_on, vec!["wsl"]);
    }
}
