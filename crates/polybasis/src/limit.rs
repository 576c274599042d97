//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation handle polled by the saturation loop.
///
/// All clones share one flag; any holder may cancel. The engine checks the
/// flag at its yield points and unwinds cleanly, leaving the equation queues
/// well-formed and inspectable.
#[derive(Debug, Clone, Default)]
pub struct ResourceLimit {
    canceled: Arc<AtomicBool>,
}

impl ResourceLimit {
    pub fn new() -> Self {
        ResourceLimit::default()
    }

    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Relaxed);
    }

    /// Clear the flag so a later `saturate` can run to completion.
    pub fn reset(&self) {
        self.canceled.store(false, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }
}
