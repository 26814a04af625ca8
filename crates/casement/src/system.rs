//! Capability traits for the host windowing system.
//!
//! The window-set core does not talk to the platform directly. Everything
//! it needs — enumeration, validity and state queries, activation and focus
//! control, and handle-to-control resolution — is consumed through the
//! traits in this module. Platform backends (see [`crate::platform`]) and
//! test doubles implement them.

use crate::handle::WindowHandle;
use crate::registry::ControlId;

/// Host windowing system capabilities.
///
/// All operations are synchronous and must be called on the UI thread that
/// owns the windows in question; implementations perform no locking.
///
/// Query methods accept handles that may refer to destroyed windows.
/// `is_window` distinguishes live handles from stale ones; the other
/// queries may return anything for a stale handle, and the mutating
/// operations must tolerate one (doing nothing is acceptable).
pub trait WindowSystem {
    /// Invoke `visitor` once per top-level window owned by the calling
    /// thread, in the host's enumeration order.
    ///
    /// Enumeration stops early if the visitor returns `false`. The visitor
    /// reference is used only for the duration of this call; the host must
    /// not retain it.
    fn for_each_thread_window(&self, visitor: &mut dyn FnMut(WindowHandle) -> bool);

    /// Check whether `handle` still refers to a live window.
    fn is_window(&self, handle: WindowHandle) -> bool;

    /// Check whether the window is visible.
    fn is_window_visible(&self, handle: WindowHandle) -> bool;

    /// Check whether the window accepts input.
    fn is_window_enabled(&self, handle: WindowHandle) -> bool;

    /// Enable or disable the window.
    ///
    /// Setting the state a window already has is a no-op on the host side.
    fn set_window_enabled(&mut self, handle: WindowHandle, enabled: bool);

    /// Get the currently active top-level window, if any.
    fn active_window(&self) -> Option<WindowHandle>;

    /// Activate the given window.
    fn set_active_window(&mut self, handle: WindowHandle);

    /// Get the window that currently holds input focus, if any.
    fn focus(&self) -> Option<WindowHandle>;

    /// Move input focus to the given window.
    fn set_focus(&mut self, handle: WindowHandle);
}

/// Resolution from native window handles to managed control wrappers.
///
/// A managed control is the toolkit-level object wrapping a native window.
/// Windows created outside the toolkit have no managed control and resolve
/// to `None`; the disposal pass leaves those untouched.
pub trait ControlResolver {
    /// Resolve a native handle to its managed control, if one owns it.
    fn resolve(&self, handle: WindowHandle) -> Option<ControlId>;

    /// Run the managed control's teardown.
    ///
    /// Teardown is expected to destroy the native window and unregister the
    /// control. Disposing an already-removed control is a no-op.
    fn dispose(&mut self, id: ControlId);
}

/// A [`ControlResolver`] for hosts without a managed-control layer.
///
/// Resolves every handle to `None`, so managed-only snapshots are empty
/// and disposal passes touch nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoControls;

impl ControlResolver for NoControls {
    fn resolve(&self, _handle: WindowHandle) -> Option<ControlId> {
        None
    }

    fn dispose(&mut self, _id: ControlId) {}
}
