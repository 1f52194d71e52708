//! Process-wide toolkit state.
//!
//! The engine is initialized once per process. `init` is idempotent and
//! `shutdown` re-arms it; the windowing loop itself can only be owned by one
//! live toolkit at a time, which `acquire_loop` enforces.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::errors::ShellError;
use crate::Result;

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static LOOP_HELD: AtomicBool = AtomicBool::new(false);

/// Initialize process-wide toolkit state. Repeated calls are no-ops.
pub fn init() -> Result<()> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        debug!("toolkit already initialized");
    } else {
        debug!("toolkit initialized");
    }
    Ok(())
}

/// Tear down process-wide toolkit state, re-arming `init`.
///
/// Per-shell resources are released when their shell drops; this only
/// resets the process-level guards.
pub fn shutdown() {
    LOOP_HELD.store(false, Ordering::SeqCst);
    if INITIALIZED.swap(false, Ordering::SeqCst) {
        debug!("toolkit shut down");
    }
}

pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

/// Claim the process's single windowing loop.
pub(crate) fn acquire_loop() -> Result<()> {
    if LOOP_HELD.swap(true, Ordering::SeqCst) {
        return Err(ShellError::Init(
            "the windowing loop is already owned by another shell".into(),
        ));
    }
    Ok(())
}

pub(crate) fn release_loop() {
    LOOP_HELD.store(false, Ordering::SeqCst);
}
