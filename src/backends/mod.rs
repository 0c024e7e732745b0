//! Reference backend implementations

#[cfg(feature = "console")]
pub mod console;
pub mod memory;

#[cfg(feature = "console")]
pub use console::{ConsoleBackend, TimestampFormat};
pub use memory::{CapturedRecord, MemoryBackend};

pub use crate::core::Backend;
