//! Per-thread top-level window snapshots.
//!
//! This module provides [`ThreadWindowSet`], a snapshot of the top-level
//! windows owned by a single UI thread. When a modal dialog is shown, the
//! other windows on the thread are disabled so they cannot be interacted
//! with; when the dialog closes they are re-enabled and the previously
//! active and focused windows are restored. The same snapshot mechanism
//! destroys all toolkit-owned top-level windows at thread teardown.
//!
//! # Filtering Policy
//!
//! A snapshot captures windows that are visible, enabled, and top-level at
//! the moment it is taken. With `managed_only` set, the snapshot further
//! restricts itself to windows that resolve to a managed control — foreign
//! top-level windows are skipped, since whatever subsystem created them is
//! responsible for disabling them around its own modal transitions.
//!
//! # Nesting
//!
//! Stacked modal dialogs each take their own snapshot. The sets form a
//! caller-maintained LIFO stack (see [`ModalScopeStack`](crate::ModalScopeStack));
//! a set never knows about the sets above or below it.
//!
//! # Usage
//!
//! ```ignore
//! use casement::ThreadWindowSet;
//!
//! // Entering a modal scope: snapshot, then disable everything captured.
//! let mut set = ThreadWindowSet::snapshot(&system, &registry, false);
//! set.set_enabled(&mut system, false, None);
//!
//! // ... run the modal dialog's event loop ...
//!
//! // Leaving the scope: re-enable and restore activation.
//! set.set_enabled(&mut system, true, None);
//! ```

use casement_core::ThreadAffinity;

use crate::handle::WindowHandle;
use crate::system::{ControlResolver, WindowSystem};

/// Starting capacity for the snapshot's handle list.
///
/// Most threads have a handful of top-level windows; 16 avoids growth in
/// practice while staying small. The list doubles when exhausted.
const INITIAL_CAPACITY: usize = 16;

/// A snapshot of the calling thread's top-level windows, with the
/// enable/disable and disposal passes that act on it.
///
/// The handle list is fixed at construction; later passes only touch the
/// referenced native windows, never the snapshot itself. Handles destroyed
/// after the snapshot was taken are silently skipped by every pass.
///
/// All operations must run on the thread that took the snapshot; this is
/// asserted at entry.
pub struct ThreadWindowSet {
    /// Captured handles in enumeration order.
    handles: Vec<WindowHandle>,
    /// Window that was active when the disable pass ran.
    saved_active: Option<WindowHandle>,
    /// Window that held focus when the disable pass ran.
    saved_focus: Option<WindowHandle>,
    /// Filtering policy fixed at construction.
    managed_only: bool,
    /// Owning thread; all operations are checked against it.
    affinity: ThreadAffinity,
}

impl ThreadWindowSet {
    /// Capture the calling thread's top-level windows.
    ///
    /// A single enumeration pass accepts every window that is visible and
    /// enabled; with `managed_only` set, only windows that resolve to a
    /// managed control are kept. No window state is modified.
    ///
    /// # Arguments
    ///
    /// * `system` - Host windowing system
    /// * `controls` - Handle resolution, consulted only when `managed_only`
    /// * `managed_only` - Restrict the snapshot to toolkit-owned windows
    pub fn snapshot<S, R>(system: &S, controls: &R, managed_only: bool) -> Self
    where
        S: WindowSystem + ?Sized,
        R: ControlResolver + ?Sized,
    {
        let mut handles = Vec::with_capacity(INITIAL_CAPACITY);

        system.for_each_thread_window(&mut |handle| {
            if system.is_window_visible(handle) && system.is_window_enabled(handle) {
                let accept = !managed_only || controls.resolve(handle).is_some();
                if accept {
                    handles.push(handle);
                }
            }
            // Always continue enumerating
            true
        });

        tracing::debug!(
            target: "casement::window_set",
            count = handles.len(),
            managed_only,
            "captured thread window snapshot"
        );

        Self {
            handles,
            saved_active: None,
            saved_focus: None,
            managed_only,
            affinity: ThreadAffinity::current(),
        }
    }

    /// Enable or disable every captured window that is still alive.
    ///
    /// Iterates the snapshot in stored order; handles that no longer refer
    /// to a live window are skipped. Repeating a pass with the same `state`
    /// re-executes it but has no further effect.
    ///
    /// For snapshots taken with `managed_only == false`, the disable pass
    /// (`state == false`) first captures the active window and the focus
    /// holder so the enable pass (`state == true`) can restore them once
    /// every window is enabled again. `activating` is the surrounding
    /// dialog orchestration's "currently activating control" hint; when
    /// present it takes precedence over the focus reported by the host.
    ///
    /// Managed-only snapshots never capture or restore activation state:
    /// the toolkit's own dialogs establish their own, and foreign state
    /// must not be disturbed when responding to external modal events.
    pub fn set_enabled<S>(&mut self, system: &mut S, state: bool, activating: Option<WindowHandle>)
    where
        S: WindowSystem + ?Sized,
    {
        self.affinity
            .assert_same_thread_with_msg("ThreadWindowSet::set_enabled called off the owning UI thread");

        if !self.managed_only && !state {
            self.saved_active = system.active_window();
            self.saved_focus = activating.or_else(|| system.focus());

            tracing::trace!(
                target: "casement::window_set",
                active = ?self.saved_active,
                focus = ?self.saved_focus,
                "captured activation state before disable pass"
            );
        }

        for &handle in &self.handles {
            // Destroyed since the snapshot was taken
            if !system.is_window(handle) {
                continue;
            }
            tracing::trace!(target: "casement::window_set", ?handle, state, "changing window enabled state");
            system.set_window_enabled(handle, state);
        }

        // Restore activation only after the full enable pass, so the target
        // window is already enabled when activation is attempted.
        if !self.managed_only && state {
            if let Some(active) = self.saved_active {
                if system.is_window(active) {
                    system.set_active_window(active);
                }
            }
            if let Some(focus) = self.saved_focus {
                if system.is_window(focus) {
                    system.set_focus(focus);
                }
            }
        }
    }

    /// Destroy every captured window that resolves to a managed control.
    ///
    /// Each still-valid handle is resolved through `controls`; resolvable
    /// controls get their teardown run (releasing the control's resources
    /// and destroying the native window), while handles with no managed
    /// wrapper are left untouched. Used at thread shutdown so no orphaned
    /// toolkit windows survive the thread.
    pub fn dispose_all<S, R>(&self, system: &S, controls: &mut R)
    where
        S: WindowSystem + ?Sized,
        R: ControlResolver + ?Sized,
    {
        self.affinity
            .assert_same_thread_with_msg("ThreadWindowSet::dispose_all called off the owning UI thread");

        for &handle in &self.handles {
            if !system.is_window(handle) {
                continue;
            }
            if let Some(id) = controls.resolve(handle) {
                controls.dispose(id);
            }
        }

        tracing::debug!(
            target: "casement::window_set",
            count = self.handles.len(),
            "disposed thread windows"
        );
    }

    /// Number of windows captured in the snapshot.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check if the snapshot captured no windows.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// The captured handles, in enumeration order.
    pub fn handles(&self) -> &[WindowHandle] {
        &self.handles
    }

    /// Whether this snapshot was restricted to managed windows.
    pub fn is_managed_only(&self) -> bool {
        self.managed_only
    }
}

impl std::fmt::Debug for ThreadWindowSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadWindowSet")
            .field("count", &self.handles.len())
            .field("managed_only", &self.managed_only)
            .field("saved_active", &self.saved_active)
            .field("saved_focus", &self.saved_focus)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ControlRegistry;
    use crate::system::NoControls;

    struct FakeWindow {
        handle: WindowHandle,
        visible: bool,
        enabled: bool,
        alive: bool,
    }

    /// In-process stand-in for the host windowing system.
    struct FakeSystem {
        windows: Vec<FakeWindow>,
        active: Option<WindowHandle>,
        focus: Option<WindowHandle>,
        next_raw: isize,
    }

    impl FakeSystem {
        fn new() -> Self {
            Self {
                windows: Vec::new(),
                active: None,
                focus: None,
                next_raw: 1,
            }
        }

        fn add_window(&mut self, visible: bool, enabled: bool) -> WindowHandle {
            let handle = WindowHandle::from_raw(self.next_raw);
            self.next_raw += 1;
            self.windows.push(FakeWindow {
                handle,
                visible,
                enabled,
                alive: true,
            });
            handle
        }

        fn destroy(&mut self, handle: WindowHandle) {
            if let Some(w) = self.windows.iter_mut().find(|w| w.handle == handle) {
                w.alive = false;
            }
            if self.active == Some(handle) {
                self.active = None;
            }
            if self.focus == Some(handle) {
                self.focus = None;
            }
        }

        fn enabled(&self, handle: WindowHandle) -> bool {
            self.windows
                .iter()
                .find(|w| w.handle == handle)
                .is_some_and(|w| w.alive && w.enabled)
        }
    }

    impl WindowSystem for FakeSystem {
        fn for_each_thread_window(&self, visitor: &mut dyn FnMut(WindowHandle) -> bool) {
            for w in &self.windows {
                if w.alive && !visitor(w.handle) {
                    break;
                }
            }
        }

        fn is_window(&self, handle: WindowHandle) -> bool {
            self.windows
                .iter()
                .any(|w| w.handle == handle && w.alive)
        }

        fn is_window_visible(&self, handle: WindowHandle) -> bool {
            self.windows
                .iter()
                .find(|w| w.handle == handle)
                .is_some_and(|w| w.alive && w.visible)
        }

        fn is_window_enabled(&self, handle: WindowHandle) -> bool {
            self.enabled(handle)
        }

        fn set_window_enabled(&mut self, handle: WindowHandle, enabled: bool) {
            if let Some(w) = self.windows.iter_mut().find(|w| w.handle == handle) {
                if w.alive {
                    w.enabled = enabled;
                }
            }
        }

        fn active_window(&self) -> Option<WindowHandle> {
            self.active
        }

        fn set_active_window(&mut self, handle: WindowHandle) {
            if self.is_window(handle) {
                self.active = Some(handle);
            }
        }

        fn focus(&self) -> Option<WindowHandle> {
            self.focus
        }

        fn set_focus(&mut self, handle: WindowHandle) {
            if self.is_window(handle) {
                self.focus = Some(handle);
            }
        }
    }

    #[test]
    fn test_snapshot_captures_visible_enabled_only() {
        let mut system = FakeSystem::new();
        let visible = system.add_window(true, true);
        let hidden = system.add_window(false, true);
        let disabled = system.add_window(true, false);

        let set = ThreadWindowSet::snapshot(&system, &NoControls, false);

        assert_eq!(set.handles(), &[visible]);
        assert!(!set.handles().contains(&hidden));
        assert!(!set.handles().contains(&disabled));
    }

    #[test]
    fn test_snapshot_managed_only_filters_foreign_windows() {
        let mut system = FakeSystem::new();
        let managed = system.add_window(true, true);
        let foreign = system.add_window(true, true);

        let mut registry = ControlRegistry::new();
        registry.register(managed, "managed", None).unwrap();

        let set = ThreadWindowSet::snapshot(&system, &registry, true);

        assert_eq!(set.handles(), &[managed]);
        assert!(!set.handles().contains(&foreign));
        assert!(set.is_managed_only());
    }

    #[test]
    fn test_snapshot_growth_past_initial_capacity() {
        let mut system = FakeSystem::new();
        let mut expected = Vec::new();
        for _ in 0..20 {
            expected.push(system.add_window(true, true));
        }

        let set = ThreadWindowSet::snapshot(&system, &NoControls, false);

        assert_eq!(set.len(), 20);
        assert_eq!(set.handles(), expected.as_slice());
    }

    #[test]
    fn test_disable_then_enable_round_trips_window_state() {
        let mut system = FakeSystem::new();
        let a = system.add_window(true, true);
        let b = system.add_window(true, true);

        let mut set = ThreadWindowSet::snapshot(&system, &NoControls, false);

        set.set_enabled(&mut system, false, None);
        assert!(!system.enabled(a));
        assert!(!system.enabled(b));

        set.set_enabled(&mut system, true, None);
        assert!(system.enabled(a));
        assert!(system.enabled(b));
    }

    #[test]
    fn test_disable_is_idempotent() {
        let mut system = FakeSystem::new();
        let a = system.add_window(true, true);

        let mut set = ThreadWindowSet::snapshot(&system, &NoControls, false);

        set.set_enabled(&mut system, false, None);
        set.set_enabled(&mut system, false, None);
        assert!(!system.enabled(a));

        set.set_enabled(&mut system, true, None);
        assert!(system.enabled(a));
    }

    #[test]
    fn test_stale_handles_are_skipped() {
        let mut system = FakeSystem::new();
        let a = system.add_window(true, true);
        let doomed = system.add_window(true, true);
        let c = system.add_window(true, true);

        let mut set = ThreadWindowSet::snapshot(&system, &NoControls, false);
        assert_eq!(set.len(), 3);

        system.destroy(doomed);

        // Must not panic, and must process the remaining two.
        set.set_enabled(&mut system, false, None);
        assert!(!system.enabled(a));
        assert!(!system.enabled(c));

        set.set_enabled(&mut system, true, None);
        assert!(system.enabled(a));
        assert!(system.enabled(c));
    }

    #[test]
    fn test_activation_restored_after_enable_pass() {
        let mut system = FakeSystem::new();
        let a = system.add_window(true, true);
        let f = system.add_window(true, true);
        system.active = Some(a);
        system.focus = Some(f);

        let mut set = ThreadWindowSet::snapshot(&system, &NoControls, false);

        set.set_enabled(&mut system, false, None);
        // Something else becomes active while the modal dialog is up.
        let dialog = system.add_window(true, true);
        system.active = Some(dialog);
        system.focus = Some(dialog);

        set.set_enabled(&mut system, true, None);
        assert_eq!(system.active_window(), Some(a));
        assert_eq!(system.focus(), Some(f));
    }

    #[test]
    fn test_activation_restore_skips_destroyed_windows() {
        let mut system = FakeSystem::new();
        let a = system.add_window(true, true);
        let f = system.add_window(true, true);
        system.active = Some(a);
        system.focus = Some(f);

        let mut set = ThreadWindowSet::snapshot(&system, &NoControls, false);
        set.set_enabled(&mut system, false, None);

        system.destroy(a);
        let dialog = system.add_window(true, true);
        system.active = Some(dialog);

        set.set_enabled(&mut system, true, None);

        // Saved active window is gone; activation is left alone but the
        // surviving focus target is still restored.
        assert_eq!(system.active_window(), Some(dialog));
        assert_eq!(system.focus(), Some(f));
    }

    #[test]
    fn test_activating_hint_takes_precedence_over_reported_focus() {
        let mut system = FakeSystem::new();
        let reported = system.add_window(true, true);
        let hinted = system.add_window(true, true);
        system.focus = Some(reported);

        let mut set = ThreadWindowSet::snapshot(&system, &NoControls, false);

        set.set_enabled(&mut system, false, Some(hinted));
        system.focus = None;

        set.set_enabled(&mut system, true, None);
        assert_eq!(system.focus(), Some(hinted));
    }

    #[test]
    fn test_managed_only_never_touches_activation() {
        let mut system = FakeSystem::new();
        let managed = system.add_window(true, true);
        let foreign_active = system.add_window(true, true);
        system.active = Some(foreign_active);
        system.focus = Some(foreign_active);

        let mut registry = ControlRegistry::new();
        registry.register(managed, "managed", None).unwrap();

        let mut set = ThreadWindowSet::snapshot(&system, &registry, true);

        set.set_enabled(&mut system, false, None);
        // Foreign activation changes while we are disabled.
        system.active = Some(managed);
        system.focus = Some(managed);

        set.set_enabled(&mut system, true, None);

        // No restore happened: whatever was active stays active.
        assert_eq!(system.active_window(), Some(managed));
        assert_eq!(system.focus(), Some(managed));
    }

    #[test]
    fn test_dispose_all_tears_down_only_managed_controls() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut system = FakeSystem::new();
        let m1 = system.add_window(true, true);
        let m2 = system.add_window(true, true);
        let foreign = system.add_window(true, true);

        let disposed = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ControlRegistry::new();
        for (handle, name) in [(m1, "m1"), (m2, "m2")] {
            let log = disposed.clone();
            registry
                .register(handle, name, Some(Box::new(move |h| log.borrow_mut().push(h))))
                .unwrap();
        }

        let set = ThreadWindowSet::snapshot(&system, &NoControls, false);
        assert_eq!(set.len(), 3);

        set.dispose_all(&system, &mut registry);

        assert_eq!(disposed.borrow().as_slice(), &[m1, m2]);
        assert!(registry.is_empty());
        // The foreign window's handle was never resolved, so nothing
        // happened to it.
        assert!(system.is_window(foreign));
    }

    #[test]
    fn test_set_enabled_panics_off_owning_thread() {
        let mut system = FakeSystem::new();
        system.add_window(true, true);

        let mut set = ThreadWindowSet::snapshot(&system, &NoControls, false);

        let result = std::thread::spawn(move || {
            let mut other_system = FakeSystem::new();
            set.set_enabled(&mut other_system, false, None);
        })
        .join();

        assert!(result.is_err(), "expected affinity violation panic");
    }
}
