//! Logging facilities for Casement.
//!
//! Casement uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! The snapshot, enable/disable, and disposal passes emit `trace`-level
//! events per window, which is useful when diagnosing a window left
//! disabled after a modal dialog closed. Filter with the targets below,
//! e.g. `RUST_LOG=casement::window_set=trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "casement_core";
    /// Thread affinity checks.
    pub const THREAD_CHECK: &str = "casement_core::thread_check";
    /// Window snapshot and enable/disable passes.
    pub const WINDOW_SET: &str = "casement::window_set";
    /// Modal scope stack bookkeeping.
    pub const MODAL: &str = "casement::modal";
    /// Managed control registry.
    pub const REGISTRY: &str = "casement::registry";
    /// Platform windowing backends.
    pub const PLATFORM: &str = "casement::platform";
}
