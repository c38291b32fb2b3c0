//! Structured log lines for the harness, written to stderr.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Log level for filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn rank(self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }

    /// Check if this level lets messages at `level` through
    pub fn should_log(self, level: LogLevel) -> bool {
        self.rank() >= level.rank()
    }

    fn label(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// Output format, shared by log lines and the results report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// A log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub component: Option<String>,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level,
            component: None,
            message: message.into(),
        }
    }

    pub fn with_component(
        level: LogLevel,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            component: Some(component.into()),
            ..Self::new(level, message)
        }
    }

    /// One line in `format`, without the trailing newline.
    pub fn render(&self, format: LogFormat) -> String {
        if format == LogFormat::Json
            && let Ok(line) = serde_json::to_string(self)
        {
            return line;
        }
        match &self.component {
            Some(component) => format!(
                "{} {:<5} [{component}] {}",
                self.timestamp,
                self.level.label(),
                self.message
            ),
            None => format!("{} {:<5} {}", self.timestamp, self.level.label(), self.message),
        }
    }
}

/// Filters entries by level and writes them to stderr.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
    format: LogFormat,
}

impl Logger {
    pub fn new(level: LogLevel, format: LogFormat) -> Self {
        Self { level, format }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level.should_log(level)
    }

    pub fn log(&self, level: LogLevel, component: &str, message: impl Into<String>) {
        if self.enabled(level) {
            let entry = LogEntry::with_component(level, component, message);
            eprintln!("{}", entry.render(self.format));
        }
    }

    pub fn info(&self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Info, component, message);
    }

    pub fn debug(&self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Debug, component, message);
    }
}
