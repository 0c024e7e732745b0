//! Integration tests for the logging facade
//!
//! These tests verify:
//! - Records reach the installed backend fully rendered
//! - Source locations are trimmed and function names captured
//! - Malformed calls panic before anything is forwarded
//! - Trace calls are elided, arguments included, when trace is disabled
//! - Thread safety of concurrent dispatch

use parking_lot::{const_mutex, Mutex};
use rust_log_facade::backends::{CapturedRecord, MemoryBackend};
use rust_log_facade::prelude::*;
use rust_log_facade::{
    current_backend, dispatch, dispatcher, loggable_display, loggable_enum, set_backend,
    set_shared_backend, take_backend, try_dispatch, TRACE_ENABLED,
};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const CORE: Category = Category::new("Core");
const SERVICE: Category = Category::new("Service.FS");

/// The backend slot is process-wide; tests touching it take turns.
static SERIAL: Mutex<()> = const_mutex(());

/// Run `f` with a fresh memory backend installed and return what it captured.
fn capture<F: FnOnce()>(f: F) -> Vec<CapturedRecord> {
    let _guard = SERIAL.lock();
    let memory = Arc::new(MemoryBackend::new());
    set_shared_backend(memory.clone());

    let result = catch_unwind(AssertUnwindSafe(f));
    take_backend();
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }

    memory.take()
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[test]
fn test_dispatch_forwards_one_rendered_record() {
    let records = capture(|| {
        dispatch(
            CORE,
            LogLevel::Info,
            "/home/user/project/src/common/logging/log.cc",
            42,
            "Init",
            "started with {} workers",
            &ArgumentList::new(&[NamedArgument::positional(&4)]),
        );
    });

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.category, CORE);
    assert_eq!(record.level, LogLevel::Info);
    assert_eq!(record.file, "common/logging/log.cc");
    assert_eq!(record.line, 42);
    assert_eq!(record.function, "Init");
    assert_eq!(record.message, "started with 4 workers");
}

#[test]
fn test_macro_captures_call_site() {
    let mut expected_line = 0;
    let records = capture(|| {
        expected_line = line!() + 1;
        info!(SERVICE, "opened archive {:#x}", 0x1234_5678u32);
    });

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.category, SERVICE);
    assert_eq!(record.file, "tests/integration_tests.rs");
    assert_eq!(record.line, expected_line);
    assert_eq!(record.function, "test_macro_captures_call_site");
    assert_eq!(record.message, "opened archive 0x12345678");
}

#[test]
fn test_level_macros_select_level() {
    let records = capture(|| {
        trace!(CORE, "trace {}", 0);
        debug!(CORE, "debug {}", 1);
        info!(CORE, "info {}", 2);
        warning!(CORE, "warning {}", 3);
        error!(CORE, "error {}", 4);
        critical!(CORE, "critical {}", 5);
        log!(CORE, LogLevel::Warning, "explicit");
    });

    let mut expected = vec![
        (LogLevel::Debug, "debug 1"),
        (LogLevel::Info, "info 2"),
        (LogLevel::Warning, "warning 3"),
        (LogLevel::Error, "error 4"),
        (LogLevel::Critical, "critical 5"),
        (LogLevel::Warning, "explicit"),
    ];
    if TRACE_ENABLED {
        expected.insert(0, (LogLevel::Trace, "trace 0"));
    }

    let actual: Vec<(LogLevel, &str)> = records
        .iter()
        .map(|record| (record.level, record.message.as_str()))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_level_functions_select_level() {
    let records = capture(|| {
        let args = [NamedArgument::positional(&"save.bin")];
        let args = ArgumentList::new(&args);
        dispatcher::trace(CORE, "src/core/loader.rs", 1, "load", "reading {}", &args);
        dispatcher::debug(CORE, "src/core/loader.rs", 2, "load", "reading {}", &args);
        dispatcher::info(CORE, "src/core/loader.rs", 3, "load", "reading {}", &args);
        dispatcher::warning(CORE, "src/core/loader.rs", 4, "load", "reading {}", &args);
        dispatcher::error(CORE, "src/core/loader.rs", 5, "load", "reading {}", &args);
        dispatcher::critical(CORE, "src/core/loader.rs", 6, "load", "reading {}", &args);
    });

    let levels: Vec<LogLevel> = records.iter().map(|record| record.level).collect();
    let expected: Vec<LogLevel> = LogLevel::ALL
        .into_iter()
        .filter(|level| TRACE_ENABLED || *level != LogLevel::Trace)
        .collect();
    assert_eq!(levels, expected);
    assert!(records.iter().all(|record| record.file == "core/loader.rs"));
    assert!(records.iter().all(|record| record.message == "reading save.bin"));
}

#[test]
fn test_mismatched_error_call_panics_before_forwarding() {
    let records = capture(|| {
        let outcome = catch_unwind(|| {
            error!(CORE, "expected {} and {}", 1);
        });

        let message = panic_message(outcome.unwrap_err());
        assert!(message.contains("invalid log call"), "got: {}", message);
        assert!(message.contains("out of range"), "got: {}", message);
    });

    assert!(records.is_empty());
}

#[test]
fn test_malformed_format_panics_before_forwarding() {
    let records = capture(|| {
        let outcome = catch_unwind(|| {
            warning!(CORE, "unterminated {", 1);
        });
        assert!(outcome.is_err());

        let outcome = catch_unwind(|| {
            info!(CORE, "too many", 1);
        });
        assert!(outcome.is_err());
    });

    assert!(records.is_empty());
}

#[test]
fn test_try_dispatch_returns_error_and_forwards_nothing() {
    let records = capture(|| {
        let result = try_dispatch(
            CORE,
            LogLevel::Error,
            file!(),
            line!(),
            "f",
            "{:x}",
            &ArgumentList::new(&[NamedArgument::positional(&"not a number")]),
        );
        assert!(matches!(result, Err(LogError::IncompatibleSpec { index: 0, .. })));
    });

    assert!(records.is_empty());
}

static EVALUATIONS: AtomicUsize = AtomicUsize::new(0);

fn expensive_snapshot() -> usize {
    EVALUATIONS.fetch_add(1, Ordering::SeqCst) + 1
}

#[test]
fn test_trace_elision_skips_argument_evaluation() {
    let records = capture(|| {
        let before = EVALUATIONS.load(Ordering::SeqCst);
        trace!(CORE, "snapshot {}", expensive_snapshot());
        let evaluated = EVALUATIONS.load(Ordering::SeqCst) - before;

        assert_eq!(evaluated, usize::from(TRACE_ENABLED));
    });

    assert_eq!(records.len(), usize::from(TRACE_ENABLED));
}

// Run with `cargo test --features elide-trace` (or `--release`) to cover
// the elided configuration.
#[cfg(feature = "elide-trace")]
#[test]
fn test_elided_trace_never_evaluates() {
    assert!(!TRACE_ENABLED);

    let records = capture(|| {
        let before = EVALUATIONS.load(Ordering::SeqCst);
        trace!(CORE, "snapshot {}", expensive_snapshot());
        dispatcher::trace(CORE, file!(), line!(), "f", "snapshot", &ArgumentList::empty());
        assert_eq!(EVALUATIONS.load(Ordering::SeqCst) - before, 0);
    });

    assert!(records.is_empty());
}

#[cfg(all(debug_assertions, not(feature = "elide-trace")))]
#[test]
fn test_debug_trace_is_forwarded() {
    assert!(TRACE_ENABLED);

    let records = capture(|| {
        trace!(CORE, "snapshot {}", expensive_snapshot());
    });

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Trace);
}

#[test]
fn test_non_trace_levels_always_evaluate() {
    let records = capture(|| {
        let before = EVALUATIONS.load(Ordering::SeqCst);
        debug!(CORE, "snapshot {}", expensive_snapshot());
        assert_eq!(EVALUATIONS.load(Ordering::SeqCst) - before, 1);
    });

    assert_eq!(records.len(), 1);
}

#[derive(Clone, Copy)]
#[repr(u8)]
#[allow(dead_code)]
enum ResultCode {
    Success = 0,
    NotFound = 3,
}

#[derive(Clone, Copy)]
#[allow(dead_code)]
enum Region {
    Japan = -1,
    Usa = 1,
}

struct Handle(u32);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle#{}", self.0)
    }
}

loggable_enum!(ResultCode as u8, Region as i8);
loggable_display!(Handle);

#[test]
fn test_enum_renders_as_underlying_integer() {
    let records = capture(|| {
        warning!(SERVICE, "open failed with {}", ResultCode::NotFound);
        info!(SERVICE, "region {} / {:+}", Region::Japan, Region::Usa);
    });

    assert_eq!(records[0].message, "open failed with 3");
    assert_eq!(records[1].message, "region -1 / +1");
}

#[test]
fn test_custom_renderer_and_call_site_override() {
    let records = capture(|| {
        let handle = Handle(7);
        info!(SERVICE, "closing {}", handle);
        info!(SERVICE, "code {}", Argument::debug(&Some(5)));
    });

    assert_eq!(records[0].message, "closing handle#7");
    assert_eq!(records[1].message, "code Some(5)");
}

#[test]
fn test_named_arguments_through_macro() {
    let records = capture(|| {
        let path = String::from("/sdmc/save.bin");
        info!(SERVICE, "wrote {bytes} bytes to {path}", bytes = 512, path = path);
    });

    assert_eq!(records[0].message, "wrote 512 bytes to /sdmc/save.bin");
}

#[test]
fn test_no_backend_discards_records() {
    let _guard = SERIAL.lock();
    take_backend();

    info!(CORE, "nobody is listening: {}", 1);
    assert!(current_backend().is_none());
    assert!(rust_log_facade::flush().is_ok());
}

#[test]
fn test_backend_replacement() {
    let _guard = SERIAL.lock();

    let first = Arc::new(MemoryBackend::new());
    set_shared_backend(first.clone());
    info!(CORE, "to first");

    let previous = set_backend(MemoryBackend::with_capacity(1));
    assert_eq!(previous.map(|backend| backend.name().to_string()).as_deref(), Some("memory"));
    info!(CORE, "to second");

    take_backend();
    assert_eq!(first.messages(), vec!["to first"]);
}

#[test]
fn test_concurrent_dispatch() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 100;

    let records = capture(|| {
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                std::thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        info!(CORE, "thread {} message {}", t, i);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    });

    assert_eq!(records.len(), THREADS * PER_THREAD);

    // Each thread's records arrive in the order it logged them.
    for t in 0..THREADS {
        let prefix = format!("thread {} message ", t);
        let sequence: Vec<usize> = records
            .iter()
            .filter_map(|record| record.message.strip_prefix(&prefix))
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(sequence, (0..PER_THREAD).collect::<Vec<_>>());
    }
}

#[test]
fn test_captured_record_serializes() {
    let records = capture(|| {
        critical!(CORE, "fatal exception at {:#010x}", 0xdead_beef_u32);
    });

    let json = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(json["category"], "Core");
    assert_eq!(json["level"], "Critical");
    assert_eq!(json["message"], "fatal exception at 0xdeadbeef");
    assert_eq!(json["function"], "test_captured_record_serializes");
}

#[test]
fn test_log_level_deserializes() {
    let level: LogLevel = serde_json::from_str("\"Warning\"").unwrap();
    assert_eq!(level, LogLevel::Warning);
}
