//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! buffer edits, request sequencing and workflow transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=message=debug,buffer=debug` - scoped filtering
//! - `RUST_LOG=axide::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/axide/logs/axide.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::AppModel;

/// Prefix of the daily-rotated log files
pub const LOG_FILE_PREFIX: &str = "axide.log";

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. File logging
/// writes to `~/.config/axide/logs/axide.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - stderr so command output stays clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of buffer/selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub path: Option<String>,
    pub len_chars: usize,
    pub line_count: usize,
    pub selection: (usize, usize),
}

impl BufferSnapshot {
    pub fn from_model(model: &AppModel) -> Self {
        let buffer = &model.session.buffer;
        let selection = buffer.selection();
        Self {
            path: model.session.selected_path.clone(),
            len_chars: buffer.len_chars(),
            line_count: buffer.line_count(),
            selection: (selection.start, selection.end),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &BufferSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.path != other.path {
            changes.push(format!(
                "path: {} → {}",
                self.path.as_deref().unwrap_or("-"),
                other.path.as_deref().unwrap_or("-")
            ));
        }
        if self.len_chars != other.len_chars {
            changes.push(format!("len: {} → {}", self.len_chars, other.len_chars));
        }
        if self.line_count != other.line_count {
            changes.push(format!(
                "lines: {} → {}",
                self.line_count, other.line_count
            ));
        }
        if self.selection != other.selection {
            changes.push(format!(
                "selection: {:?} → {:?}",
                self.selection, other.selection
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
