//! Basic usage example for rust_log_facade

use rust_log_facade::prelude::*;
use rust_log_facade::{flush, format_message, loggable_enum, set_backend};

const CORE: Category = Category::new("Core");
const LOADER: Category = Category::new("Loader");

#[derive(Clone, Copy)]
#[repr(u8)]
enum ResultCode {
    Success = 0,
    NotFound = 3,
}

loggable_enum!(ResultCode as u8);

fn load(path: &str) -> ResultCode {
    if path.ends_with(".bin") {
        ResultCode::Success
    } else {
        ResultCode::NotFound
    }
}

fn main() {
    println!("=== Basic Logging Example ===\n");

    set_backend(ConsoleBackend::new().with_timestamp_format(TimestampFormat::Elapsed));

    trace!(CORE, "Only visible when trace is compiled in");
    debug!(CORE, "Debug message");
    info!(CORE, "started with {} workers", 4);

    for path in ["boot.bin", "missing.rom"] {
        match load(path) {
            ResultCode::Success => info!(LOADER, "loaded {path}", path = path),
            code => warning!(LOADER, "failed to load {} (code {})", path, code),
        }
    }

    error!(CORE, "fault at pc={:#010x}", 0x0800_1234u32);
    critical!(CORE, "{:>8}|{:<8}|{:^8}", "right", "left", "center");

    match format_message!("{} {}", "only one") {
        Ok(message) => println!("unexpected: {}", message),
        Err(e) => println!("\nRejected call: {}", e),
    }

    if let Err(e) = flush() {
        eprintln!("flush failed: {}", e);
    }

    println!("\n=== Example completed ===");
}
