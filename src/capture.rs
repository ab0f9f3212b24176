//! Exclusive input capture while a popup is visible.
//!
//! A [`CaptureSlot`] can hand out at most one [`CaptureGuard`] at a time. The
//! popup takes the guard when it becomes visible and drops it when it hides;
//! while it holds the guard it intercepts navigation keys and pointer
//! presses. Popups sharing a slot therefore never intercept input at the same
//! time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared slot from which capture guards are acquired.
#[derive(Debug, Clone, Default)]
pub struct CaptureSlot {
    held: Arc<AtomicBool>,
}

impl CaptureSlot {
    /// Creates a free slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the slot, or returns `None` if someone else holds it.
    ///
    /// ```rust
    /// use bubbletea_suggest::capture::CaptureSlot;
    ///
    /// let slot = CaptureSlot::new();
    /// let guard = slot.acquire().expect("free");
    /// assert!(slot.acquire().is_none());
    /// drop(guard);
    /// assert!(slot.acquire().is_some());
    /// ```
    pub fn acquire(&self) -> Option<CaptureGuard> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CaptureGuard {
                held: Arc::clone(&self.held),
            })
    }

    /// Whether a guard is currently alive.
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Proof of exclusive capture. Releases the slot when dropped.
#[derive(Debug)]
pub struct CaptureGuard {
    held: Arc<AtomicBool>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.held.store(false, Ordering::Release);
    }
}
