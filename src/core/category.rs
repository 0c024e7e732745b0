//! Log categories
//!
//! A category names the subsystem a record came from. The set of
//! categories belongs to the application; this crate only carries the tag
//! from the call site to the backend.
//!
//! ```
//! use rust_log_facade::Category;
//!
//! pub const CORE: Category = Category::new("Core");
//! pub const AUDIO_DSP: Category = Category::new("Audio.DSP");
//!
//! assert_eq!(AUDIO_DSP.name(), "Audio.DSP");
//! ```

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Category {
    name: &'static str,
}

impl Category {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name)
    }
}
