//! Console logging for generation runs.
//!
//! Every progress line and warning goes through the global [`LOGGER`], which
//! prints either prefixed text lines or one JSON [`LogEntry`] per line so the
//! output can be consumed by another tool.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One progress line, printed as text or serialized as a JSON object.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth; file writes sit one level under their monitor
    pub indent: u8,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Render as a human-readable console line.
    pub fn to_text(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "  ",
            LogLevel::Success => "  ✓",
            LogLevel::Warning => "  ⚠️ Warning:",
            LogLevel::Error => "  ❌",
        };
        let indent = "  ".repeat(self.indent as usize);
        format!("{}{} {}", indent, prefix, self.message)
    }
}

/// Output format of the console logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Prefixed human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Global logger
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Writes log entries to stdout in the selected format
pub struct Logger {
    json: AtomicBool,
}

impl Logger {
    pub fn new() -> Self {
        Self { json: AtomicBool::new(false) }
    }

    pub fn set_format(&self, format: LogFormat) {
        self.json.store(format == LogFormat::Json, Ordering::Relaxed);
    }

    pub fn format(&self) -> LogFormat {
        if self.json.load(Ordering::Relaxed) {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    pub fn log(&self, entry: LogEntry) {
        match self.format() {
            LogFormat::Text => println!("{}", entry.to_text()),
            LogFormat::Json => match serde_json::to_string(&entry) {
                Ok(line) => println!("{}", line),
                Err(_) => println!("{}", entry.to_text()),
            },
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(LogLevel::Info, msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(LogLevel::Success, msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(LogLevel::Warning, msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::new(LogLevel::Error, msg));
}

/// Info line nested under the current monitor.
pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::new(LogLevel::Info, msg).with_indent(indent));
}
