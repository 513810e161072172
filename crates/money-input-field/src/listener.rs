//! # Change Listener State
//!
//! Widgets report every text change, including the ones the mask makes
//! itself. While a decision is being applied the field's listener is
//! detached so that echo is ignored.
//!
//! ```text
//!   on_edit ──► detach ──► replace_text ──► set_caret ──► reattach
//!                 │             │                            ▲
//!                 │             └─► widget echoes change     │
//!                 │                 (listener detached:      │
//!                 │                  ignored)                │
//!                 └──────────── ListenerGuard drop ──────────┘
//! ```
//!
//! The guard restores the listener on every exit path, unwinding included.

use std::cell::Cell;
use std::rc::Rc;

/// Shared attach flag for one field's change listener.
///
/// Clones observe the same flag, so a host can hold one to check whether a
/// change it is about to report will be processed.
#[derive(Debug, Clone)]
pub struct ListenerState {
    attached: Rc<Cell<bool>>,
}

impl ListenerState {
    /// Creates an attached listener.
    pub fn new() -> Self {
        ListenerState {
            attached: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    /// Detaches until the returned guard drops.
    #[must_use = "the listener reattaches as soon as the guard drops"]
    pub fn detach(&self) -> ListenerGuard {
        let restore = self.attached.replace(false);
        ListenerGuard {
            state: self.clone(),
            restore,
        }
    }

    /// Detaches for good. Used when a field's mask is replaced or removed.
    pub(crate) fn retire(&self) {
        self.attached.set(false);
    }
}

impl Default for ListenerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores the listener's previous state on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    state: ListenerState,
    restore: bool,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.state.attached.set(self.restore);
    }
}
