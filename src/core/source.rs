//! Source location capture
//!
//! Call-site macros pass `file!()` through [`trim_source_path`] in a const
//! context, so the shortened path is computed at compile time. The
//! enclosing function's name comes from [`function_name`] applied to the
//! type name of an item nested in that function.

use std::fmt;

/// Path markers after which everything is kept, in no particular order.
const MARKERS: [&str; 4] = ["src/", "src\\", "../", "..\\"];

/// Byte offset just past the last occurrence of `needle`, or 0.
const fn end_of_last(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() || needle.len() > haystack.len() {
        return 0;
    }

    let mut start = haystack.len() - needle.len() + 1;
    while start > 0 {
        start -= 1;
        let mut i = 0;
        while i < needle.len() && haystack[start + i] == needle[i] {
            i += 1;
        }
        if i == needle.len() {
            return start + needle.len();
        }
    }
    0
}

/// Trims `source` up to and including the last of `src/`, `src\`, `../`
/// or `..\`, whichever ends furthest right.
///
/// Paths without any marker are returned unchanged.
///
/// ```
/// use rust_log_facade::trim_source_path;
///
/// const FILE: &str = trim_source_path("/home/user/project/src/common/logging/log.rs");
/// assert_eq!(FILE, "common/logging/log.rs");
/// assert_eq!(trim_source_path("../../core/src\\hle\\kernel.rs"), "hle\\kernel.rs");
/// assert_eq!(trim_source_path("main.rs"), "main.rs");
/// ```
pub const fn trim_source_path(source: &str) -> &str {
    let bytes = source.as_bytes();

    let mut cut = 0;
    let mut m = 0;
    while m < MARKERS.len() {
        let end = end_of_last(bytes, MARKERS[m].as_bytes());
        if end > cut {
            cut = end;
        }
        m += 1;
    }

    // Every marker ends in an ASCII byte, so `cut` is a char boundary.
    let (_, tail) = bytes.split_at(cut);
    match std::str::from_utf8(tail) {
        Ok(trimmed) => trimmed,
        Err(_) => source,
    }
}

#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

/// Reduces the type name of an item nested in a function to that
/// function's unqualified name.
///
/// The last path segment (the nested item) is dropped, then any
/// `{{closure}}` frames, and the remaining last segment is returned.
///
/// ```
/// use rust_log_facade::function_name;
///
/// assert_eq!(function_name("app::core::System::init::__here"), "init");
/// assert_eq!(function_name("app::run::{{closure}}::{{closure}}::__here"), "run");
/// ```
pub fn function_name(raw: &str) -> &str {
    let mut path = raw.rsplit_once("::").map_or(raw, |(parent, _)| parent);
    while let Some(parent) = path.strip_suffix("::{{closure}}") {
        path = parent;
    }
    path.rsplit("::").next().unwrap_or(path)
}

/// Where a log call was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation<'a> {
    pub file: &'a str,
    pub line: u32,
    pub function: &'a str,
}

impl<'a> SourceLocation<'a> {
    pub const fn new(file: &'a str, line: u32, function: &'a str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }
}

impl fmt::Display for SourceLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.function, self.line)
    }
}
