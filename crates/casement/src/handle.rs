//! Opaque native window handle.

use static_assertions::assert_impl_all;

/// Identifier for a native top-level window.
///
/// `WindowHandle` wraps the platform's pointer-sized window identifier
/// (an `HWND` on Windows) without interpreting it. Holding a handle does
/// not keep the window alive: the window may be destroyed at any time by
/// its owner, so every use must be preceded by a validity check through
/// [`WindowSystem::is_window`](crate::system::WindowSystem::is_window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(isize);

assert_impl_all!(WindowHandle: Copy, Send, Sync);

impl WindowHandle {
    /// Create a handle from the platform's raw window identifier.
    pub fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    /// Get the underlying raw window identifier.
    pub fn as_raw(self) -> isize {
        self.0
    }
}
