//! Modal scope orchestration.
//!
//! This module provides [`ModalScopeStack`], the caller-side bookkeeping
//! around [`ThreadWindowSet`]: one stack per UI thread, one entry per
//! active modal scope. Entering a scope snapshots and disables the
//! thread's other windows; leaving it re-enables them and restores
//! activation. Scopes nest strictly LIFO — each nested dialog takes its
//! own snapshot of the world its predecessor left behind, so unwinding in
//! order reconstructs every intermediate state.
//!
//! # Usage
//!
//! ```ignore
//! use casement::ModalScopeStack;
//!
//! let mut modal = ModalScopeStack::new();
//!
//! // Showing a modal dialog:
//! modal.begin_scope(&mut system, &registry, false);
//! // ... dialog runs its nested event loop ...
//! modal.end_scope(&mut system)?;
//! ```
//!
//! The stack also carries the "currently activating control" hint set by
//! dialog orchestration. When a disable pass needs to save the focus
//! holder, the hint wins over the focus the host reports, because during
//! dialog activation the host's answer is already the dialog itself.

use casement_core::{CasementError, Result, ThreadAffinity};

use crate::handle::WindowHandle;
use crate::system::{ControlResolver, WindowSystem};
use crate::window_set::ThreadWindowSet;

/// Per-thread stack of modal scopes.
///
/// Owned by the thread's message-loop context; never shared. Each entry is
/// the [`ThreadWindowSet`] snapshotted when that scope began, and the stack
/// order is the nesting order: each set's predecessor sits directly below
/// it.
pub struct ModalScopeStack {
    scopes: Vec<ThreadWindowSet>,
    activating_control: Option<WindowHandle>,
    affinity: ThreadAffinity,
}

impl ModalScopeStack {
    /// Create an empty stack bound to the current thread.
    pub fn new() -> Self {
        Self {
            scopes: Vec::new(),
            activating_control: None,
            affinity: ThreadAffinity::current(),
        }
    }

    /// Set the "currently activating control" hint.
    ///
    /// Dialog orchestration sets this to the dialog's owner window for the
    /// duration of dialog activation and clears it afterwards.
    pub fn set_activating_control(&mut self, handle: Option<WindowHandle>) {
        self.affinity.debug_assert_same_thread();
        self.activating_control = handle;
    }

    /// The current "currently activating control" hint, if set.
    pub fn activating_control(&self) -> Option<WindowHandle> {
        self.activating_control
    }

    /// Enter a modal scope: snapshot the thread's windows and disable them.
    ///
    /// Pass `managed_only = true` when responding to a foreign subsystem's
    /// modal transition (only toolkit windows are disabled, and no
    /// activation state is captured); `false` for the toolkit's own modal
    /// dialogs.
    pub fn begin_scope<S, R>(&mut self, system: &mut S, controls: &R, managed_only: bool)
    where
        S: WindowSystem + ?Sized,
        R: ControlResolver + ?Sized,
    {
        self.affinity
            .assert_same_thread_with_msg("ModalScopeStack::begin_scope called off the owning UI thread");

        let mut set = ThreadWindowSet::snapshot(system, controls, managed_only);
        set.set_enabled(system, false, self.activating_control);
        self.scopes.push(set);

        tracing::debug!(
            target: "casement::modal",
            depth = self.scopes.len(),
            managed_only,
            "entered modal scope"
        );
    }

    /// Leave the innermost modal scope: re-enable its windows and restore
    /// activation.
    ///
    /// # Errors
    ///
    /// Returns [`CasementError::UnbalancedModalScope`] if no scope is
    /// active.
    pub fn end_scope<S>(&mut self, system: &mut S) -> Result<()>
    where
        S: WindowSystem + ?Sized,
    {
        self.affinity
            .assert_same_thread_with_msg("ModalScopeStack::end_scope called off the owning UI thread");

        let mut set = self
            .scopes
            .pop()
            .ok_or(CasementError::UnbalancedModalScope)?;
        set.set_enabled(system, true, None);

        tracing::debug!(
            target: "casement::modal",
            depth = self.scopes.len(),
            "left modal scope"
        );
        Ok(())
    }

    /// Number of nested modal scopes currently active.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Check if any modal scope is active.
    pub fn in_modal_scope(&self) -> bool {
        !self.scopes.is_empty()
    }

    /// The innermost scope's window set, if any.
    pub fn current(&self) -> Option<&ThreadWindowSet> {
        self.scopes.last()
    }
}

impl Default for ModalScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ModalScopeStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalScopeStack")
            .field("depth", &self.scopes.len())
            .field("activating_control", &self.activating_control)
            .finish()
    }
}

/// Destroy all toolkit-owned top-level windows on the calling thread.
///
/// Takes a fresh managed-only snapshot and runs the disposal pass over it:
/// every captured window that resolves to a managed control gets its
/// teardown, foreign windows are left alone. Called during thread shutdown,
/// before the message loop returns, so no orphaned toolkit windows survive
/// the thread.
pub fn dispose_thread_windows<S, R>(system: &S, controls: &mut R)
where
    S: WindowSystem + ?Sized,
    R: ControlResolver + ?Sized,
{
    let set = ThreadWindowSet::snapshot(system, controls, true);
    set.dispose_all(system, controls);
}
