//! Core systems for Casement.
//!
//! This crate provides the foundational components shared by the Casement
//! window-management crates:
//!
//! - **Errors**: the [`CasementError`] type and [`Result`] alias
//! - **Thread affinity**: fail-fast verification that per-thread objects are
//!   only touched from their owning UI thread
//! - **Logging**: `tracing` target constants for filtering
//!
//! # Thread Affinity Example
//!
//! ```
//! use casement_core::ThreadAffinity;
//!
//! let affinity = ThreadAffinity::current();
//! assert!(affinity.is_same_thread());
//! ```

mod error;
pub mod logging;
pub mod thread_check;

pub use error::{CasementError, RegistryError, Result};
pub use thread_check::ThreadAffinity;
