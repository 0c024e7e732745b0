//! Message dispatch
//!
//! Renders a call site's format string and forwards the finished record to
//! the installed backend. The call-site macros in [`crate::macros`] are
//! thin wrappers over [`dispatch`] that fill in the source location.

use super::{
    argument::ArgumentList,
    backend,
    category::Category,
    error::Result,
    log_level::LogLevel,
    log_record::LogRecord,
    source::{trim_source_path, SourceLocation},
};

/// Whether `trace!` calls are compiled in.
///
/// True in builds with debug assertions or with the `trace` feature, and
/// always false with the `elide-trace` feature. When false, `trace!` does
/// not evaluate its arguments.
pub const TRACE_ENABLED: bool =
    !cfg!(feature = "elide-trace") && (cfg!(debug_assertions) || cfg!(feature = "trace"));

/// Render and forward one log call, returning the render error instead of
/// panicking.
///
/// `file` may be a raw `file!()` path; it is trimmed here.
pub fn try_dispatch(
    category: Category,
    level: LogLevel,
    file: &str,
    line: u32,
    function: &str,
    format: &str,
    args: &ArgumentList<'_>,
) -> Result<()> {
    let location = SourceLocation::new(trim_source_path(file), line, function);
    let record = LogRecord::render(category, level, location, format, args)?;
    backend::ingest(&record);
    Ok(())
}

/// Render and forward one log call.
///
/// # Panics
///
/// Panics if `format` is malformed or does not match `args`. Such a call
/// is a bug at the call site; no record is forwarded.
#[track_caller]
pub fn dispatch(
    category: Category,
    level: LogLevel,
    file: &str,
    line: u32,
    function: &str,
    format: &str,
    args: &ArgumentList<'_>,
) {
    if let Err(e) = try_dispatch(category, level, file, line, function, format, args) {
        panic!(
            "invalid log call at {}: {}",
            SourceLocation::new(trim_source_path(file), line, function),
            e
        );
    }
}

macro_rules! level_entry_points {
    ($($(#[$meta:meta])* $name:ident => $level:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[inline]
            #[track_caller]
            pub fn $name(
                category: Category,
                file: &str,
                line: u32,
                function: &str,
                format: &str,
                args: &ArgumentList<'_>,
            ) {
                dispatch(category, LogLevel::$level, file, line, function, format, args)
            }
        )+
    };
}

level_entry_points! {
    debug => Debug,
    info => Info,
    warning => Warning,
    error => Error,
    critical => Critical,
}

/// Trace-level entry point.
///
/// The arguments of a plain function call are evaluated before it runs,
/// so only the `trace!` macro elides them; here the call itself becomes a
/// no-op when [`TRACE_ENABLED`] is false.
#[inline]
#[track_caller]
pub fn trace(
    category: Category,
    file: &str,
    line: u32,
    function: &str,
    format: &str,
    args: &ArgumentList<'_>,
) {
    if TRACE_ENABLED {
        dispatch(category, LogLevel::Trace, file, line, function, format, args)
    }
}
