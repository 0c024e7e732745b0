//! Logging macros for call-site capture.
//!
//! Each macro takes a [`Category`](crate::Category), a format string and
//! its arguments, and fills in the trimmed source file, line and enclosing
//! function before handing everything to [`dispatch`](crate::dispatch).
//! Arguments are positional expressions, optionally followed by
//! `name = expr` pairs.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::{info, warning, Category};
//!
//! const NETWORK: Category = Category::new("Network");
//!
//! // Basic logging
//! info!(NETWORK, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(NETWORK, "Server listening on port {}", port);
//!
//! // Named arguments and format specs
//! warning!(NETWORK, "Retry {attempt} of {max:>2}", attempt = 3, max = 5);
//! ```
//!
//! A call whose format string does not match its arguments panics instead
//! of logging a half-rendered message.

/// Builds the `[NamedArgument; N]` array for a call. Internal.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_args {
    (@acc [$($out:tt)*]) => {
        [$($out)*]
    };
    (@acc [$($out:tt)*] $name:ident = $value:expr $(, $($rest:tt)*)?) => {
        $crate::__log_args!(
            @acc [$($out)* $crate::NamedArgument::named(stringify!($name), &$value),]
            $($($rest)*)?
        )
    };
    (@acc [$($out:tt)*] $value:expr $(, $($rest:tt)*)?) => {
        $crate::__log_args!(
            @acc [$($out)* $crate::NamedArgument::positional(&$value),]
            $($($rest)*)?
        )
    };
}

/// The calling file, trimmed at compile time.
#[macro_export]
macro_rules! source_file {
    () => {{
        const FILE: &str = $crate::trim_source_path(file!());
        FILE
    }};
}

/// Name of the enclosing function, without its module path.
///
/// ```
/// use rust_log_facade::function_name;
///
/// fn load_rom() -> &'static str {
///     function_name!()
/// }
///
/// assert_eq!(load_rom(), "load_rom");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        $crate::function_name($crate::core::source::type_name_of(__here))
    }};
}

/// Render a format string without dispatching it.
///
/// Returns the render error rather than panicking.
///
/// ```
/// use rust_log_facade::format_message;
///
/// assert_eq!(format_message!("{:>4}|{x}", 7, x = "y").unwrap(), "   7|y");
/// assert!(format_message!("{} {}", 1).is_err());
/// ```
#[macro_export]
macro_rules! format_message {
    ($format:expr $(, $($args:tt)*)?) => {
        $crate::render(
            $format,
            &$crate::ArgumentList::new(&$crate::__log_args!(@acc [] $($($args)*)?)),
        )
    };
}

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// use rust_log_facade::{log, Category, LogLevel};
///
/// const CORE: Category = Category::new("Core");
/// log!(CORE, LogLevel::Info, "Simple message");
/// log!(CORE, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($category:expr, $level:expr, $format:expr $(, $($args:tt)*)?) => {
        $crate::dispatch(
            $category,
            $level,
            $crate::source_file!(),
            line!(),
            $crate::function_name!(),
            $format,
            &$crate::ArgumentList::new(&$crate::__log_args!(@acc [] $($($args)*)?)),
        )
    };
}

/// Log a trace-level message.
///
/// Compiled out unless [`TRACE_ENABLED`](crate::TRACE_ENABLED): the call
/// still type-checks, but its arguments are not evaluated.
///
/// # Examples
///
/// ```
/// use rust_log_facade::{trace, Category};
///
/// const CPU: Category = Category::new("Core.ARM11");
/// trace!(CPU, "Entering function: step()");
/// trace!(CPU, "Register r{} = {:#010x}", 4, 0xdead_beef_u32);
/// ```
#[macro_export]
macro_rules! trace {
    ($category:expr, $($arg:tt)+) => {
        if $crate::TRACE_ENABLED {
            $crate::log!($category, $crate::LogLevel::Trace, $($arg)+)
        }
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// use rust_log_facade::{debug, Category};
///
/// const CORE: Category = Category::new("Core");
/// debug!(CORE, "Debug information");
/// debug!(CORE, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// use rust_log_facade::{info, Category};
///
/// const CORE: Category = Category::new("Core");
/// info!(CORE, "Application started");
/// info!(CORE, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// use rust_log_facade::{warning, Category};
///
/// const STORAGE: Category = Category::new("Storage");
/// warning!(STORAGE, "Low disk space");
/// warning!(STORAGE, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// use rust_log_facade::{error, Category};
///
/// const STORAGE: Category = Category::new("Storage");
/// error!(STORAGE, "Failed to open save file");
/// error!(STORAGE, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// use rust_log_facade::{critical, Category};
///
/// const KERNEL: Category = Category::new("Kernel");
/// critical!(KERNEL, "Unrecoverable fault");
/// critical!(KERNEL, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Critical, $($arg)+)
    };
}
