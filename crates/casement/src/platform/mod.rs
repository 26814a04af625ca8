//! Platform windowing backends.
//!
//! Each backend implements [`WindowSystem`](crate::system::WindowSystem)
//! over the native windowing API. Only Windows is provided today; on other
//! platforms the host application supplies its own implementation.

#[cfg(target_os = "windows")]
mod win32;

#[cfg(target_os = "windows")]
pub use win32::Win32WindowSystem;
