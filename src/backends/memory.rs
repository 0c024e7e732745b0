//! In-memory ring buffer backend
//!
//! Keeps owned copies of ingested records, optionally bounded. Useful for
//! tests, crash reports and in-process log viewers.

use crate::core::{Backend, Category, LogLevel, LogRecord};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// An owned copy of a [`LogRecord`], stamped when it was captured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapturedRecord {
    pub category: Category,
    pub level: LogLevel,
    pub file: String,
    pub line: u32,
    pub function: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,
}

impl CapturedRecord {
    pub fn capture(record: &LogRecord<'_>) -> Self {
        Self {
            category: record.category,
            level: record.level,
            file: record.location.file.to_string(),
            line: record.location.line,
            function: record.location.function.to_string(),
            message: record.message.clone(),
            timestamp: Utc::now(),
            thread_id: thread_id(),
            thread_name: thread_name(),
        }
    }
}

impl From<&LogRecord<'_>> for CapturedRecord {
    fn from(record: &LogRecord<'_>) -> Self {
        Self::capture(record)
    }
}

/// Stores records in memory, evicting the oldest once `capacity` is reached.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    capacity: Option<usize>,
    records: Mutex<VecDeque<CapturedRecord>>,
    evicted: AtomicU64,
}

impl MemoryBackend {
    /// An unbounded backend
    pub fn new() -> Self {
        Self::default()
    }

    /// A ring buffer holding at most `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            evicted: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Snapshot of the buffered records, oldest first
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().iter().cloned().collect()
    }

    /// Buffered messages, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    /// Drain the buffer
    pub fn take(&self) -> Vec<CapturedRecord> {
        self.records.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// Records dropped to make room since creation
    pub fn evicted_count(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }
}

impl Backend for MemoryBackend {
    fn ingest(&self, record: &LogRecord<'_>) {
        let captured = CapturedRecord::capture(record);

        let mut records = self.records.lock();
        records.push_back(captured);
        if let Some(capacity) = self.capacity {
            while records.len() > capacity {
                records.pop_front();
                self.evicted.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn name(&self) -> &str {
        "memory"
    }
}
