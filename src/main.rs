//! devsetup CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use devsetup::cli::{Cli, CommandDispatcher};
use devsetup::logging::{init_tracing, open_log_file};
use devsetup::shell::is_ci;
use devsetup::ui::{create_ui, OutputMode};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Determine output mode
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.detailed {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Determine project root
    let project_root = cli
        .project
        .as_ref()
        .cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let is_interactive = !cli.non_interactive && !is_ci();
    let mut ui = create_ui(is_interactive, output_mode);

    let dispatcher = CommandDispatcher::new(project_root);
    let context = match dispatcher.load_context(&cli) {
        Ok(context) => context,
        Err(e) => {
            init_tracing(cli.debug, None);
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(2);
        }
    };

    let log_file = if cli.list {
        None
    } else {
        match open_log_file(&context.log_path) {
            Ok(file) => Some(file),
            Err(e) => {
                ui.warning(&format!(
                    "Cannot open log file {}: {}",
                    context.log_path.display(),
                    e
                ));
                None
            }
        }
    };
    init_tracing(cli.debug, log_file);

    tracing::debug!("devsetup starting with args: {:?}", cli);

    match dispatcher.dispatch(&cli, &context, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            tracing::error!("{}", e);
            ui.error(&format!("Error: {}", e));
            if e.is_configuration() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}
