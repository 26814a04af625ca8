//! Win32 windowing backend.
//!
//! Implements [`WindowSystem`] over the Win32 user API. Enumeration uses
//! `EnumThreadWindows`, which yields exactly the top-level windows owned by
//! the calling thread; the visitor is threaded through the `LPARAM` as a
//! raw pointer that lives only for the duration of the synchronous call.

use windows::Win32::Foundation::{BOOL, HWND, LPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    EnableWindow, GetActiveWindow, GetFocus, IsWindowEnabled, SetActiveWindow, SetFocus,
};
use windows::Win32::UI::WindowsAndMessaging::{EnumThreadWindows, IsWindow, IsWindowVisible};

use crate::handle::WindowHandle;
use crate::system::WindowSystem;

/// Visitor type as passed through the enumeration `LPARAM`.
type EnumVisitor<'a, 'b> = &'a mut (dyn FnMut(WindowHandle) -> bool + 'b);

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.as_raw() as *mut core::ffi::c_void)
}

fn handle_from(hwnd: HWND) -> WindowHandle {
    WindowHandle::from_raw(hwnd.0 as isize)
}

/// The Win32 implementation of [`WindowSystem`].
///
/// Stateless; every call goes straight to the user API. All the usual
/// Win32 rules apply, in particular that the enumerated windows belong to
/// the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

extern "system" fn enum_thread_windows_proc(window: HWND, lparam: LPARAM) -> BOOL {
    // Safety: lparam is the visitor pointer passed in for_each_thread_window,
    // valid for the duration of the EnumThreadWindows call only. The visitor
    // must not panic; unwinding across this boundary is undefined.
    let visitor = unsafe { &mut *(lparam.0 as *mut EnumVisitor<'_, '_>) };
    visitor(handle_from(window)).into()
}

impl WindowSystem for Win32WindowSystem {
    fn for_each_thread_window(&self, visitor: &mut dyn FnMut(WindowHandle) -> bool) {
        let mut visitor: EnumVisitor<'_, '_> = visitor;
        let lparam = LPARAM(&mut visitor as *mut EnumVisitor<'_, '_> as isize);
        unsafe {
            // Returns FALSE when the callback stops enumeration early;
            // not an error for our purposes.
            let _ = EnumThreadWindows(GetCurrentThreadId(), Some(enum_thread_windows_proc), lparam);
        }
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindow(Some(hwnd(handle))).as_bool() }
    }

    fn is_window_visible(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindowVisible(hwnd(handle)).as_bool() }
    }

    fn is_window_enabled(&self, handle: WindowHandle) -> bool {
        unsafe { IsWindowEnabled(hwnd(handle)).as_bool() }
    }

    fn set_window_enabled(&mut self, handle: WindowHandle, enabled: bool) {
        unsafe {
            // Return value is the previous state, not an error signal.
            let _ = EnableWindow(hwnd(handle), BOOL::from(enabled));
        }
    }

    fn active_window(&self) -> Option<WindowHandle> {
        let active = unsafe { GetActiveWindow() };
        if active.0.is_null() {
            None
        } else {
            Some(handle_from(active))
        }
    }

    fn set_active_window(&mut self, handle: WindowHandle) {
        unsafe {
            if let Err(err) = SetActiveWindow(hwnd(handle)) {
                tracing::debug!(target: "casement::platform", ?handle, %err, "SetActiveWindow failed");
            }
        }
    }

    fn focus(&self) -> Option<WindowHandle> {
        let focus = unsafe { GetFocus() };
        if focus.0.is_null() {
            None
        } else {
            Some(handle_from(focus))
        }
    }

    fn set_focus(&mut self, handle: WindowHandle) {
        unsafe {
            if let Err(err) = SetFocus(Some(hwnd(handle))) {
                tracing::debug!(target: "casement::platform", ?handle, %err, "SetFocus failed");
            }
        }
    }
}
