//! Install script validation and execution.
//!
//! Install scripts are opaque executables: exit code 0 means success.
//! The script kind decides the interpreter; PowerShell scripts run with
//! the execution policy bypassed so unsigned scripts work.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::Command;

use crate::error::{Result, SetupError};

use super::command::{run, CommandOptions, CommandResult};

/// How an install script is launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// `.ps1`, run through PowerShell.
    PowerShell,
    /// `.sh` / `.bash`, run through a POSIX shell.
    Shell,
    /// `.cmd` / `.bat`, run through cmd.exe.
    Batch,
    /// A native executable or a script with a `#!` line.
    Executable,
}

impl ScriptKind {
    /// Classify a script by extension, falling back to a shebang check.
    ///
    /// Returns `None` if the file does not look runnable.
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("ps1") => Some(Self::PowerShell),
            Some("sh") | Some("bash") => Some(Self::Shell),
            Some("cmd") | Some("bat") => Some(Self::Batch),
            Some("exe") => Some(Self::Executable),
            _ if has_shebang(path) => Some(Self::Executable),
            _ => None,
        }
    }

    /// Build the command that runs `path`.
    pub fn command(&self, path: &Path) -> Command {
        match self {
            Self::PowerShell => {
                let mut cmd = Command::new(powershell_program());
                cmd.args([
                    "-NoProfile",
                    "-NonInteractive",
                    "-ExecutionPolicy",
                    "Bypass",
                    "-File",
                ]);
                cmd.arg(path);
                cmd
            }
            Self::Shell => {
                let shell = if path.extension().is_some_and(|e| e == "bash") {
                    "bash"
                } else {
                    "sh"
                };
                let mut cmd = Command::new(shell);
                cmd.arg(path);
                cmd
            }
            Self::Batch => {
                let mut cmd = Command::new("cmd.exe");
                cmd.arg("/C");
                cmd.arg(path);
                cmd
            }
            Self::Executable => Command::new(path),
        }
    }
}

fn powershell_program() -> &'static str {
    if cfg!(target_os = "windows") {
        "powershell.exe"
    } else {
        "pwsh"
    }
}

fn has_shebang(path: &Path) -> bool {
    let mut buf = [0u8; 2];
    File::open(path)
        .and_then(|mut f| f.read_exact(&mut buf))
        .map(|_| &buf == b"#!")
        .unwrap_or(false)
}

/// Check that a component's install script exists and looks runnable.
pub fn validate_script(component: &str, path: &Path) -> Result<ScriptKind> {
    if !path.exists() {
        return Err(SetupError::ScriptMissing {
            component: component.to_string(),
            path: path.to_path_buf(),
        });
    }

    let invalid = |reason: &str| SetupError::ScriptInvalid {
        component: component.to_string(),
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let metadata = path.metadata()?;
    if !metadata.is_file() {
        return Err(invalid("not a regular file"));
    }
    if metadata.len() == 0 {
        return Err(invalid("file is empty"));
    }

    ScriptKind::detect(path).ok_or_else(|| invalid("unrecognized script type"))
}

/// Run a script as a child process, capturing its output.
pub fn run_script(path: &Path, kind: ScriptKind, options: &CommandOptions) -> Result<CommandResult> {
    let label = path.display().to_string();
    run(kind.command(path), &label, options)
}
