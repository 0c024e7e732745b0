//! Core facade types: capture, rendering and dispatch

pub mod argument;
pub mod backend;
pub mod category;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod log_level;
pub mod log_record;
pub mod source;

pub use argument::{Argument, ArgumentList, EnumRepr, Loggable, NamedArgument};
pub use backend::{current_backend, set_backend, set_shared_backend, take_backend, Backend};
pub use category::Category;
pub use dispatcher::{dispatch, try_dispatch, TRACE_ENABLED};
pub use error::{LogError, Result};
pub use format::{render, FormatSpec, FormatString};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use source::{function_name, trim_source_path, SourceLocation};
