//! Error types for the Meteor engine
//!
//! One enum covers the whole host: window creation, module loading,
//! hot-reload failures, and backend errors.

use std::fmt;

/// Result type for Meteor engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Meteor engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Window creation failed (zero size, unsupported graphics backend, OS error)
    WindowCreationFailed(String),

    /// Module file missing, not loadable, or missing the entry symbol
    LoadFailed(String),

    /// The module's per-frame step callback reported a failure
    UpdateFailed,

    /// Swapping in a new module version failed
    ReloadFailed(String),

    /// Initialization failed (engine, subsystems, configuration)
    InitializationFailed(String),

    /// Backend-specific error (Vulkan, etc.)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowCreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
            Error::LoadFailed(msg) => write!(f, "Module load failed: {}", msg),
            Error::UpdateFailed => write!(f, "Module update failed"),
            Error::ReloadFailed(msg) => write!(f, "Module reload failed: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
