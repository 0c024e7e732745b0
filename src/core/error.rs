//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Format string could not be parsed
    #[error("Malformed format string {format:?} at byte {position}: {reason}")]
    MalformedFormat {
        format: String,
        position: usize,
        reason: String,
    },

    /// Placeholder refers past the end of the argument list
    #[error("Argument index {index} out of range: {count} argument(s) supplied")]
    ArgumentOutOfRange { index: usize, count: usize },

    /// Placeholder names an argument that was not supplied
    #[error("No argument named '{name}'")]
    UnknownNamedArgument { name: String },

    /// Argument supplied but never referenced by the format string
    #[error("Argument {index} is never used by the format string")]
    UnusedArgument { index: usize },

    /// Format spec cannot be applied to the argument's kind
    #[error("Argument {index} ({kind}) is incompatible with format spec: {message}")]
    IncompatibleSpec {
        index: usize,
        kind: &'static str,
        message: String,
    },

    /// IO error raised by a backend
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend failure (generic)
    #[error("Backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },
}

impl LogError {
    /// Create a malformed format string error
    pub fn malformed(
        format: impl Into<String>,
        position: usize,
        reason: impl Into<String>,
    ) -> Self {
        LogError::MalformedFormat {
            format: format.into(),
            position,
            reason: reason.into(),
        }
    }

    pub fn out_of_range(index: usize, count: usize) -> Self {
        LogError::ArgumentOutOfRange { index, count }
    }

    pub fn unknown_name(name: impl Into<String>) -> Self {
        LogError::UnknownNamedArgument { name: name.into() }
    }

    pub fn unused(index: usize) -> Self {
        LogError::UnusedArgument { index }
    }

    /// Create an incompatible spec error for the argument at `index`
    pub fn incompatible(index: usize, kind: &'static str, message: impl Into<String>) -> Self {
        LogError::IncompatibleSpec {
            index,
            kind,
            message: message.into(),
        }
    }

    /// Create a backend error
    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::Backend {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Whether this error comes from rendering a call site (as opposed to a backend)
    pub fn is_render_error(&self) -> bool {
        !matches!(self, LogError::Io(_) | LogError::Backend { .. })
    }
}
