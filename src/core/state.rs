//! Interrupt state.
//!
//! Passes poll `is_shutdown()` between documents, so Ctrl+C never leaves a
//! half-written file behind: the current document finishes, the rest stay
//! untouched, and the partial report is still printed.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Setup the global Ctrl+C handler. Call once at program start.
///
/// A second Ctrl+C while a pass is winding down exits immediately.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        if SHUTDOWN.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        crate::log!("warning"; "interrupted, finishing current document...");
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::SeqCst)
}
