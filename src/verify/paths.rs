//! Well-known install path checks.
//!
//! Patterns may use `~` and `$VAR`/`${VAR}` (expanded with `shellexpand`)
//! and glob wildcards (resolved with `glob`). A pattern that names an unset
//! variable simply does not apply on this machine and is skipped.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Result of scanning a component's well-known paths.
#[derive(Debug, Clone, Default)]
pub struct PathCheck {
    /// First path that exists.
    pub found: Option<PathBuf>,
    /// Patterns that could not be evaluated.
    pub errors: Vec<String>,
}

/// Return the first existing path among `patterns`.
pub fn find_installed_path(patterns: &[String]) -> PathCheck {
    let mut check = PathCheck::default();

    for pattern in patterns {
        let expanded = match shellexpand::full(pattern) {
            Ok(expanded) => expanded.into_owned(),
            Err(e) => {
                debug!("Skipping path pattern '{}': {}", pattern, e);
                continue;
            }
        };

        if is_wildcard(&expanded) {
            match first_glob_match(&expanded) {
                Ok(Some(path)) => {
                    check.found = Some(path);
                    return check;
                }
                Ok(None) => {}
                Err(e) => check.errors.push(format!("{}: {}", pattern, e)),
            }
        } else if Path::new(&expanded).exists() {
            check.found = Some(PathBuf::from(expanded));
            return check;
        }
    }

    check
}

fn is_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn first_glob_match(pattern: &str) -> Result<Option<PathBuf>, glob::PatternError> {
    let mut matches: Vec<PathBuf> = glob::glob(pattern)?.filter_map(|entry| entry.ok()).collect();
    // Version directories sort ascending; prefer the newest.
    matches.sort();
    Ok(matches.pop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn pattern(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    #[test]
    fn finds_plain_path() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("tool.exe");
        fs::write(&bin, "").unwrap();

        let check = find_installed_path(&[pattern(&temp.path().join("missing")), pattern(&bin)]);
        assert_eq!(check.found, Some(bin));
    }

    #[test]
    fn returns_none_when_nothing_exists() {
        let temp = TempDir::new().unwrap();
        let check = find_installed_path(&[pattern(&temp.path().join("nope"))]);
        assert!(check.found.is_none());
        assert!(check.errors.is_empty());
    }

    #[test]
    fn resolves_wildcard_directories() {
        let temp = TempDir::new().unwrap();
        for version in ["14", "16"] {
            let dir = temp.path().join("PostgreSQL").join(version).join("bin");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("psql"), "").unwrap();
        }

        let glob = pattern(&temp.path().join("PostgreSQL").join("*").join("bin").join("psql"));
        let check = find_installed_path(&[glob]);
        let found = check.found.unwrap();
        assert!(found.ends_with("16/bin/psql") || found.ends_with("16\\bin\\psql"));
    }

    #[test]
    fn skips_unset_variables() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("tool");
        fs::write(&bin, "").unwrap();

        let check = find_installed_path(&[
            "${DEVSETUP_TEST_SURELY_UNSET_VAR}/tool".to_string(),
            pattern(&bin),
        ]);
        assert_eq!(check.found, Some(bin));
    }

    #[test]
    fn expands_set_variables() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("tool"), "").unwrap();
        std::env::set_var("DEVSETUP_TEST_TOOL_ROOT", temp.path());

        let check = find_installed_path(&["${DEVSETUP_TEST_TOOL_ROOT}/tool".to_string()]);
        std::env::remove_var("DEVSETUP_TEST_TOOL_ROOT");
        assert!(check.found.is_some());
    }

    #[test]
    fn records_invalid_glob() {
        let check = find_installed_path(&["/tmp/[unclosed".to_string()]);
        assert!(check.found.is_none());
        assert_eq!(check.errors.len(), 1);
    }
}
