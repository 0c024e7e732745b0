//! Log record structure

use super::argument::ArgumentList;
use super::category::Category;
use super::error::Result;
use super::format::render;
use super::log_level::LogLevel;
use super::source::SourceLocation;

/// A fully rendered log call, as handed to the backend.
///
/// Records live on the dispatching thread's stack for the duration of one
/// call; backends that keep them must copy what they need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub category: Category,
    pub level: LogLevel,
    pub location: SourceLocation<'a>,
    pub message: String,
}

impl<'a> LogRecord<'a> {
    pub fn new(
        category: Category,
        level: LogLevel,
        location: SourceLocation<'a>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            level,
            location,
            message: message.into(),
        }
    }

    /// Render `format` against `args` into a record.
    ///
    /// Nothing is built if rendering fails, so a backend never sees a
    /// partial message.
    pub fn render(
        category: Category,
        level: LogLevel,
        location: SourceLocation<'a>,
        format: &str,
        args: &ArgumentList<'_>,
    ) -> Result<Self> {
        let message = render(format, args)?;
        Ok(Self::new(category, level, location, message))
    }

    #[inline]
    pub fn file(&self) -> &'a str {
        self.location.file
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.location.line
    }

    #[inline]
    pub fn function(&self) -> &'a str {
        self.location.function
    }
}
