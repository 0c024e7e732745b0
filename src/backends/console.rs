//! Console backend implementation

use crate::core::{Backend, LogLevel, LogRecord, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::io::Write;
use std::time::Instant;

/// How the console backend stamps each line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Seconds since the backend was created: `   12.345678`
    Elapsed,

    /// Custom strftime format
    ///
    /// ```
    /// use rust_log_facade::backends::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%H:%M:%S".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Whether chrono can render this format. Only `Custom` can fail.
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(format_str) => {
                !StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error))
            }
            _ => true,
        }
    }
}

pub struct ConsoleBackend {
    min_level: LogLevel,
    use_colors: bool,
    timestamp_format: TimestampFormat,
    started: Instant,
}

impl ConsoleBackend {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Trace,
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
            started: Instant::now(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Drop records below `level`
    ///
    /// ```
    /// use rust_log_facade::backends::ConsoleBackend;
    /// use rust_log_facade::LogLevel;
    ///
    /// let backend = ConsoleBackend::new().with_min_level(LogLevel::Warning);
    /// assert!(!backend.is_enabled(LogLevel::Info));
    /// ```
    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the timestamp format
    ///
    /// An invalid custom format is reported on stderr and replaced by
    /// [`TimestampFormat::Iso8601`].
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        if format.is_valid() {
            self.timestamp_format = format;
        } else {
            eprintln!(
                "[LOGGER ERROR] Console backend rejected timestamp format {:?}, using ISO 8601",
                format
            );
            self.timestamp_format = TimestampFormat::Iso8601;
        }
        self
    }

    /// Set a custom timestamp format using a strftime-compatible format string
    #[must_use]
    pub fn with_custom_timestamp(self, format_str: &str) -> Self {
        self.with_timestamp_format(TimestampFormat::Custom(format_str.to_string()))
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn timestamp(&self, now: &DateTime<Utc>) -> String {
        match &self.timestamp_format {
            TimestampFormat::Iso8601 => now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => now.to_rfc3339(),
            TimestampFormat::Elapsed => {
                format!("{:12.6}", self.started.elapsed().as_secs_f64())
            }
            TimestampFormat::Custom(format_str) => now.format(format_str).to_string(),
        }
    }

    /// Escape control characters so one record stays on one line
    fn sanitize(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// `[ts] Category <LEVEL> file:function:line: message`
    pub fn format_line(&self, record: &LogRecord<'_>) -> String {
        let level_str = format!("<{}>", record.level);
        let level_str = if self.use_colors {
            level_str.color(record.level.color_code()).to_string()
        } else {
            level_str
        };

        format!(
            "[{}] {} {} {}: {}",
            self.timestamp(&Utc::now()),
            record.category,
            level_str,
            record.location,
            Self::sanitize(&record.message)
        )
    }
}

impl Default for ConsoleBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for ConsoleBackend {
    fn ingest(&self, record: &LogRecord<'_>) {
        if !self.is_enabled(record.level) {
            return;
        }

        let line = self.format_line(record);

        // Route Error and Critical levels to stderr, others to stdout
        let written = match record.level {
            LogLevel::Error | LogLevel::Critical => writeln!(std::io::stderr().lock(), "{}", line),
            _ => writeln!(std::io::stdout().lock(), "{}", line),
        };
        if let Err(e) = written {
            eprintln!("[LOGGER ERROR] Console backend failed to write: {}", e);
        }
    }

    fn flush(&self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
