//! # Rust Log Facade
//!
//! A category-and-severity logging facade. Call sites name a [`Category`],
//! a [`LogLevel`], a format string and its arguments; the facade renders
//! the message, attaches the trimmed source location and the enclosing
//! function name, and forwards the finished [`LogRecord`] to the
//! process-wide [`Backend`].
//!
//! ## Features
//!
//! - **Checked formatting**: brace format strings are checked against their
//!   arguments; a mismatch panics at the call site instead of logging
//!   garbage
//! - **No boxing at call sites**: arguments are borrowed for the duration
//!   of the call through the [`Loggable`] trait
//! - **Compile-time trace elision**: `trace!` vanishes, arguments and all,
//!   from release builds
//! - **Pluggable backends**: console and in-memory backends included
//!
//! ```
//! use rust_log_facade::backends::MemoryBackend;
//! use rust_log_facade::{info, set_shared_backend, Category};
//! use std::sync::Arc;
//!
//! const CORE: Category = Category::new("Core");
//!
//! let memory = Arc::new(MemoryBackend::new());
//! set_shared_backend(memory.clone());
//!
//! info!(CORE, "started with {} workers", 4);
//! assert_eq!(memory.messages(), vec!["started with 4 workers"]);
//! ```

pub mod backends;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::backends::MemoryBackend;
    #[cfg(feature = "console")]
    pub use crate::backends::{ConsoleBackend, TimestampFormat};
    pub use crate::core::{
        Argument, ArgumentList, Backend, Category, LogError, LogLevel, LogRecord, Loggable,
        NamedArgument, Result, SourceLocation,
    };
    pub use crate::{critical, debug, error, info, log, trace, warning};
}

pub use self::core::{
    current_backend, dispatch, function_name, render, set_backend, set_shared_backend,
    take_backend, trim_source_path, try_dispatch, Argument, ArgumentList, Backend, Category,
    EnumRepr, FormatSpec, FormatString, LogError, LogLevel, LogRecord, Loggable, NamedArgument,
    Result, SourceLocation, TRACE_ENABLED,
};
pub use self::core::backend::flush;
pub use self::core::dispatcher;
