//! Backend trait and the process-wide backend slot
//!
//! The dispatcher hands every record to whichever backend is installed.
//! Installing, replacing and removing a backend can happen at any time;
//! calls already in flight finish against the backend they picked up.

use super::{error::Result, log_record::LogRecord};
use parking_lot::{const_rwlock, RwLock};
use std::sync::Arc;

/// Receives finished records.
///
/// `ingest` may be called from any number of threads at once and must do
/// its own synchronization. A slow backend blocks the logging thread.
pub trait Backend: Send + Sync {
    fn ingest(&self, record: &LogRecord<'_>);

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

static BACKEND: RwLock<Option<Arc<dyn Backend>>> = const_rwlock(None);

/// Install `backend`, returning the one it replaces.
pub fn set_backend<B: Backend + 'static>(backend: B) -> Option<Arc<dyn Backend>> {
    set_shared_backend(Arc::new(backend))
}

/// Install a backend the caller keeps a handle to.
pub fn set_shared_backend(backend: Arc<dyn Backend>) -> Option<Arc<dyn Backend>> {
    BACKEND.write().replace(backend)
}

/// Remove the installed backend. Later records are discarded.
pub fn take_backend() -> Option<Arc<dyn Backend>> {
    BACKEND.write().take()
}

pub fn current_backend() -> Option<Arc<dyn Backend>> {
    BACKEND.read().clone()
}

/// Flush the installed backend, if any.
pub fn flush() -> Result<()> {
    match current_backend() {
        Some(backend) => backend.flush(),
        None => Ok(()),
    }
}

/// Forward one record. The slot lock is released before the backend runs.
pub(crate) fn ingest(record: &LogRecord<'_>) {
    if let Some(backend) = current_backend() {
        backend.ingest(record);
    }
}
