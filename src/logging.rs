//! Tracing setup: a console layer on stderr and an append-only log file.
//!
//! Log file lines look like `[2024-05-01 13:45:10] [INFO] message`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::config::CONFIG_DIR;
use crate::error::Result;

/// Default log file location for a project.
pub fn default_log_path(project_root: &Path) -> PathBuf {
    project_root
        .join(CONFIG_DIR)
        .join("logs")
        .join("install.log")
}

/// Open a log file for appending, creating parent directories as needed.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Event formatter for the log file.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLineFormat;

impl<S, N> FormatEvent<S, N> for LogLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(
            writer,
            "[{}] [{}] ",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn console_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("devsetup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Initialize the global tracing subscriber.
///
/// Console level is controlled by:
/// 1. `--debug` flag sets `devsetup=debug`
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// The log file, when given, records INFO and above.
pub fn init_tracing(debug: bool, log_file: Option<File>) {
    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter(debug));

    let file = log_file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .event_format(LogLineFormat)
            .with_writer(Mutex::new(file))
            .with_filter(LevelFilter::INFO)
    });

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();
}
