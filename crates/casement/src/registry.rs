//! Managed control registry.
//!
//! The registry is the toolkit-side map from native window handles to the
//! managed control wrappers that own them. It backs the
//! [`ControlResolver`] capability consumed by the window-set core: snapshot
//! filtering under the managed-only policy and the thread-teardown disposal
//! pass both go through handle resolution.
//!
//! The registry has thread affinity; like the controls it tracks, it must
//! only be touched from the UI thread that created it.

use std::collections::HashMap;

use slotmap::SlotMap;

use casement_core::{RegistryError, Result, ThreadAffinity};

use crate::handle::WindowHandle;
use crate::system::ControlResolver;

slotmap::new_key_type! {
    /// Unique identifier for a managed control.
    pub struct ControlId;
}

/// Teardown hook run when a managed control is disposed.
///
/// The hook receives the control's native handle and is responsible for
/// destroying the native window and releasing whatever the control holds.
pub type TeardownFn = Box<dyn FnMut(WindowHandle)>;

/// A registered managed control record.
pub struct ManagedControl {
    handle: WindowHandle,
    name: String,
    teardown: Option<TeardownFn>,
}

impl ManagedControl {
    /// The native window handle this control wraps.
    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    /// The control's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for ManagedControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedControl")
            .field("handle", &self.handle)
            .field("name", &self.name)
            .finish()
    }
}

/// Registry of managed controls keyed by native window handle.
///
/// # Example
///
/// ```
/// use casement::{ControlRegistry, WindowHandle};
///
/// let mut registry = ControlRegistry::new();
/// let handle = WindowHandle::from_raw(0x100);
///
/// let id = registry.register(handle, "main-window", None).unwrap();
/// assert_eq!(registry.resolve_handle(handle), Some(id));
///
/// registry.unregister(id).unwrap();
/// assert_eq!(registry.resolve_handle(handle), None);
/// ```
pub struct ControlRegistry {
    controls: SlotMap<ControlId, ManagedControl>,
    by_handle: HashMap<WindowHandle, ControlId>,
    affinity: ThreadAffinity,
}

impl ControlRegistry {
    /// Create an empty registry bound to the current thread.
    pub fn new() -> Self {
        Self {
            controls: SlotMap::with_key(),
            by_handle: HashMap::new(),
            affinity: ThreadAffinity::current(),
        }
    }

    /// Register a managed control for a native handle.
    ///
    /// `teardown`, when provided, runs if the control is disposed through
    /// the registry (it is not run on plain `unregister`).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::HandleAlreadyRegistered`] if another control
    /// already owns this handle.
    pub fn register(
        &mut self,
        handle: WindowHandle,
        name: impl Into<String>,
        teardown: Option<TeardownFn>,
    ) -> Result<ControlId> {
        self.affinity.debug_assert_same_thread();

        if self.by_handle.contains_key(&handle) {
            return Err(RegistryError::HandleAlreadyRegistered.into());
        }

        let name = name.into();
        let id = self.controls.insert(ManagedControl {
            handle,
            name,
            teardown,
        });
        self.by_handle.insert(handle, id);

        tracing::trace!(target: "casement::registry", ?handle, ?id, "registered control");
        Ok(id)
    }

    /// Remove a control from the registry without running its teardown.
    ///
    /// Controls normally unregister themselves here once their native
    /// window is gone.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidControlId`] if the ID is not
    /// registered.
    pub fn unregister(&mut self, id: ControlId) -> Result<()> {
        self.affinity.debug_assert_same_thread();

        let control = self
            .controls
            .remove(id)
            .ok_or(RegistryError::InvalidControlId)?;
        self.by_handle.remove(&control.handle);

        tracing::trace!(target: "casement::registry", handle = ?control.handle, ?id, "unregistered control");
        Ok(())
    }

    /// Get a registered control by ID.
    pub fn get(&self, id: ControlId) -> Option<&ManagedControl> {
        self.controls.get(id)
    }

    /// Resolve a native handle to its control ID, if registered.
    pub fn resolve_handle(&self, handle: WindowHandle) -> Option<ControlId> {
        self.by_handle.get(&handle).copied()
    }

    /// Check whether a native handle has a registered control.
    pub fn contains_handle(&self, handle: WindowHandle) -> bool {
        self.by_handle.contains_key(&handle)
    }

    /// Get the number of registered controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl Default for ControlRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlResolver for ControlRegistry {
    fn resolve(&self, handle: WindowHandle) -> Option<ControlId> {
        self.resolve_handle(handle)
    }

    /// Dispose a managed control: run its teardown hook and unregister it.
    ///
    /// Disposing an ID that is no longer registered is a no-op; the
    /// disposal pass may race benignly against controls tearing themselves
    /// down as their siblings are destroyed.
    fn dispose(&mut self, id: ControlId) {
        self.affinity.debug_assert_same_thread();

        let Some(mut control) = self.controls.remove(id) else {
            return;
        };
        self.by_handle.remove(&control.handle);

        tracing::debug!(
            target: "casement::registry",
            handle = ?control.handle,
            name = %control.name,
            "disposing control"
        );

        if let Some(mut teardown) = control.teardown.take() {
            teardown(control.handle);
        }
    }
}

impl std::fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlRegistry")
            .field("len", &self.controls.len())
            .finish()
    }
}
