//! Non-interactive UI for CI/headless environments.

use crate::error::{Result, SetupError};
use crate::runner::RunSummary;

use super::{render_summary, OutputMode, Prompt, SetupTheme, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts without a terminal,
/// e.g. `DEVSETUP_PROMPT_COMPONENTS=git,nodejs`.
pub const PROMPT_ENV_PREFIX: &str = "DEVSETUP_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Output is plain text; prompts are answered from `DEVSETUP_PROMPT_*`
/// variables or the prompt default, and fail otherwise.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: SetupTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: SetupTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Ok(value) = std::env::var(&env_key) {
            return Ok(value);
        }

        if let Some(default) = &prompt.default {
            return Ok(default.clone());
        }

        Err(SetupError::ConfigValidationError {
            message: format!(
                "Cannot prompt for '{}' in non-interactive mode (set {} or pass it as a flag)",
                prompt.key, env_key
            ),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() {
            println!("  {}", message);
        }
        Box::new(LineSpinner {
            mode: self.mode,
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_progress() {
            println!("[{}/{}]", current, total);
        }
    }

    fn show_output(&mut self, title: &str, output: &str) {
        println!("    --- {} ---", title);
        for line in output.lines() {
            println!("    {}", line);
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_status() {
            return;
        }
        println!();
        for line in render_summary(summary, &self.theme) {
            println!("{}", line);
        }
    }

    fn show_lines(&mut self, lines: &[String]) {
        for line in lines {
            println!("{}", line);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints the final status line.
struct LineSpinner {
    mode: OutputMode,
    theme: SetupTheme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("  {}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        println!("  {}", self.theme.format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("  {}", self.theme.format_skipped(msg));
        }
    }
}
