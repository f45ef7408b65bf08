//! Logging utilities for the application
//!
//! Everything is written to stderr so that stdout only ever carries the
//! command output (URLs).

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Always shown, no verbose flag needed
    Warn = 0,
    /// Info level, one verbose flag (-v)
    Info = 1,
    /// Debug level, two verbose flags (-v -v)
    Debug = 2,
}

/// Logger handed to every component that reports diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    /// Current verbosity level
    verbosity: u8,
}

impl Logger {
    /// Create a new logger with the specified verbosity
    #[must_use]
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    /// Whether a message at `level` would be printed
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.verbosity >= level as u8
    }

    /// Log a message if the current verbosity level is at least the specified level
    pub fn log(&self, msg: &str, level: LogLevel) {
        if self.enabled(level) {
            eprintln!("{}", format_line(msg, level));
        }
    }

    /// Log at warn level (always displayed)
    pub fn warn(&self, msg: &str) {
        self.log(msg, LogLevel::Warn);
    }

    /// Log at info level (verbose >= 1)
    pub fn info(&self, msg: &str) {
        self.log(msg, LogLevel::Info);
    }

    /// Log at debug level (verbose >= 2)
    pub fn debug(&self, msg: &str) {
        self.log(msg, LogLevel::Debug);
    }
}

fn format_line(msg: &str, level: LogLevel) -> String {
    match level {
        LogLevel::Warn => msg.to_string(),
        LogLevel::Info => format!("info: {msg}"),
        LogLevel::Debug => format!("dbg: {msg}"),
    }
}

/// Mask a credential for display, keeping at most the first four characters.
#[must_use]
pub fn mask_secret(value: &str) -> String {
    let shown: String = value.chars().take(4).collect();
    format!("{shown}****")
}
