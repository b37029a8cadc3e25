//! Engine singleton manager
//!
//! Global storage for the render backend and the active logger, behind
//! thread-safe statics. The frame loop itself is single-threaded; these locks
//! only guard registration and logger swaps.

use std::sync::{OnceLock, RwLock, Arc, Mutex};
use std::time::SystemTime;
use crate::renderer::RenderBackend;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding the engine singletons
struct EngineState {
    /// Render backend singleton
    backend: RwLock<Option<Arc<Mutex<dyn RenderBackend>>>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            backend: RwLock::new(None),
        }
    }
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Manages the render backend and the logger. Call [`Engine::initialize`]
/// once at startup before registering a backend.
///
/// # Example
///
/// ```no_run
/// use meteor_engine::meteor::Engine;
///
/// Engine::initialize()?;
/// // ... register a backend, run the frame loop ...
/// Engine::shutdown();
/// # Ok::<(), meteor_engine::meteor::Error>(())
/// ```
pub struct Engine;

impl Engine {
    /// Log an error before returning it (internal use)
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::InitializationFailed(msg) => {
                crate::meteor_error!("meteor::Engine", "Initialization failed: {}", msg);
            }
            Error::BackendError(msg) => {
                crate::meteor_error!("meteor::Engine", "Backend error: {}", msg);
            }
            _ => {
                crate::meteor_error!("meteor::Engine", "Engine error: {}", error);
            }
        }
        error
    }

    /// Initialize the engine
    ///
    /// Must be called once at application startup before creating subsystems.
    /// Idempotent.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the engine and drop all singletons
    ///
    /// After this, `initialize()` must be called again before registering a
    /// new backend.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut backend) = state.backend.write() {
                *backend = None;
            }
        }
    }

    /// Create and register the render backend singleton
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized or a backend
    /// already exists.
    pub fn create_backend<B: RenderBackend + 'static>(backend: B) -> Result<()> {
        let arc_backend: Arc<Mutex<dyn RenderBackend>> = Arc::new(Mutex::new(backend));
        Self::register_backend(arc_backend)?;
        crate::meteor_info!("meteor::Engine", "Render backend registered");
        Ok(())
    }

    pub(crate) fn register_backend(backend: Arc<Mutex<dyn RenderBackend>>) -> Result<()> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let mut lock = state.backend.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Backend lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("Render backend already exists. Call Engine::destroy_backend() first.".to_string())
            ));
        }

        *lock = Some(backend);
        Ok(())
    }

    /// Get the render backend singleton
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized or no backend has
    /// been created.
    pub fn backend() -> Result<Arc<Mutex<dyn RenderBackend>>> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))?;

        let lock = state.backend.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Backend lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Render backend not created. Call Engine::create_backend() first.".to_string())
            ))
    }

    /// Destroy the render backend singleton
    ///
    /// Existing references stay valid until dropped.
    pub fn destroy_backend() -> Result<()> {
        let state = ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized".to_string())
            ))?;

        let mut lock = state.backend.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Backend lock poisoned".to_string())
            ))?;

        *lock = None;

        crate::meteor_info!("meteor::Engine", "Render backend destroyed");

        Ok(())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut backend) = state.backend.write() {
                *backend = None;
            }
        }
    }

    // ===== LOGGING API =====

    /// Replace the active logger with a custom implementation
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset the logger to [`DefaultLogger`]
    pub fn reset_logger() {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(mut lock) = logger_lock.write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging entry point used by the `meteor_*` macros
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Logging entry point with file:line information, used by `meteor_error!`
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        let logger_lock = LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)));
        if let Ok(lock) = logger_lock.read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
