//! Thread affinity verification for Casement.
//!
//! Every window-set operation must run on the UI thread that owns the
//! enumerated windows. That contract comes from the host windowing system
//! and cannot be enforced by the type system alone, so objects with thread
//! affinity record their owning thread at construction and verify it at
//! entry to each public operation.
//!
//! # Usage
//!
//! ```
//! use casement_core::thread_check::ThreadAffinity;
//!
//! struct PerThreadState {
//!     affinity: ThreadAffinity,
//!     value: std::cell::Cell<i32>,
//! }
//!
//! impl PerThreadState {
//!     fn new() -> Self {
//!         Self {
//!             affinity: ThreadAffinity::current(),
//!             value: std::cell::Cell::new(0),
//!         }
//!     }
//!
//!     fn set_value(&self, v: i32) {
//!         // Panic if called from a thread other than the creating one
//!         self.affinity.assert_same_thread();
//!         self.value.set(v);
//!     }
//! }
//! ```
//!
//! Violations are programming errors, not recoverable conditions, so the
//! checks fail fast with a panic rather than returning an error. Use
//! [`ThreadAffinity::assert_same_thread`] for operations that mutate live
//! window state (always on), and
//! [`ThreadAffinity::debug_assert_same_thread`] for read-only paths where a
//! release-build check is not worth the cost.

use std::thread::ThreadId;

/// Thread affinity tracker for objects bound to their creating thread.
///
/// Records the thread on which an object was created and provides methods
/// to verify that subsequent operations occur on the same thread.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the same thread as the affinity.
    ///
    /// This always runs (debug and release builds).
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        self.assert_same_thread_with_msg("object accessed from wrong thread")
    }

    /// Assert that we are on the same thread, with a custom message.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    pub fn assert_same_thread_with_msg(&self, msg: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(msg);
        }
    }

    /// Debug-only assertion that we are on the same thread.
    ///
    /// This is a no-op in release builds.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        #[cfg(debug_assertions)]
        self.assert_same_thread();
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self, msg: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");
        let current_id = current.id();

        tracing::error!(
            target: "casement_core::thread_check",
            owner = ?self.thread_id,
            current = ?current_id,
            "thread affinity violation: {msg}"
        );

        panic!(
            "\n\
            ══════════════════════════════════════════════════════════════════════\n\
            THREAD AFFINITY VIOLATION\n\
            ══════════════════════════════════════════════════════════════════════\n\
            \n\
            {msg}\n\
            \n\
            Object was created on thread: {:?}\n\
            Current thread: \"{current_name}\" (ID: {current_id:?})\n\
            \n\
            Window snapshots and enable/disable passes act on native window\n\
            state owned by a single UI thread. Operating on them from another\n\
            thread would race against that thread's message processing, so\n\
            every operation must run on the thread that created the object.\n\
            \n\
            Take the snapshot, run the disable/enable passes, and dispose the\n\
            set all from the owning UI thread.\n\
            \n\
            ══════════════════════════════════════════════════════════════════════",
            self.thread_id
        )
    }
}
