//! Error types for Casement.

use std::fmt;

/// The main error type for Casement operations.
///
/// Window-state operations themselves have no recoverable error surface:
/// a handle that was destroyed after a snapshot was taken is skipped, not
/// reported. The variants here cover misuse of the bookkeeping layers that
/// surround the window-set core.
#[derive(Debug)]
pub enum CasementError {
    /// A modal scope was ended with no matching scope on the stack.
    UnbalancedModalScope,
    /// Control-registry error.
    Registry(RegistryError),
}

impl fmt::Display for CasementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnbalancedModalScope => {
                write!(f, "Modal scope ended without a matching begin")
            }
            Self::Registry(err) => write!(f, "Registry error: {err}"),
        }
    }
}

impl std::error::Error for CasementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            _ => None,
        }
    }
}

/// Control-registry specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A managed control is already registered for this native handle.
    HandleAlreadyRegistered,
    /// The control ID is invalid or has already been unregistered.
    InvalidControlId,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandleAlreadyRegistered => {
                write!(f, "A control is already registered for this window handle")
            }
            Self::InvalidControlId => write!(f, "Invalid or unregistered control ID"),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<RegistryError> for CasementError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

/// A specialized Result type for Casement operations.
pub type Result<T> = std::result::Result<T, CasementError>;
