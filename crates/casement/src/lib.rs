//! Casement - per-thread top-level window tracking for modal dialogs.
//!
//! When a modal dialog is shown, every other top-level window on its UI
//! thread must stop accepting input, and when the dialog closes the
//! previous activation and focus must come back. Casement implements that
//! protocol: it snapshots a thread's top-level windows, toggles their
//! enabled state as one pass, restores activation afterwards, and reuses
//! the same snapshot mechanism to destroy all toolkit-owned windows at
//! thread teardown.
//!
//! The host windowing system and the toolkit's control layer are consumed
//! through the [`system::WindowSystem`] and [`system::ControlResolver`]
//! traits; a Win32 backend is provided on Windows.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(target_os = "windows")]
//! # fn main() -> casement::Result<()> {
//! use casement::{ModalScopeStack, NoControls, Win32WindowSystem};
//!
//! let mut system = Win32WindowSystem::new();
//! let mut modal = ModalScopeStack::new();
//!
//! // Before showing a modal dialog:
//! modal.begin_scope(&mut system, &NoControls, false);
//!
//! // ... run the dialog's nested message loop ...
//!
//! // After the dialog closes:
//! modal.end_scope(&mut system)?;
//! # Ok(())
//! # }
//! # #[cfg(not(target_os = "windows"))]
//! # fn main() {}
//! ```

mod handle;
mod modal;
pub mod platform;
mod registry;
pub mod system;
mod window_set;

pub use casement_core::*;

pub use handle::WindowHandle;
pub use modal::{dispose_thread_windows, ModalScopeStack};
pub use registry::{ControlId, ControlRegistry, ManagedControl, TeardownFn};
pub use system::{ControlResolver, NoControls, WindowSystem};
pub use window_set::ThreadWindowSet;

#[cfg(target_os = "windows")]
pub use platform::Win32WindowSystem;
