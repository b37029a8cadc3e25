//! Module ABI and dynamic library loading
//!
//! A loadable module exports a single `extern "C"` entry point named
//! [`ENTRY_SYMBOL`] that accepts an operation tag and a context pointer.
//! [`NativeLoader`] implements loading over `libloading`; the
//! [`ModuleLoader`] seam keeps the session testable without building real
//! shared libraries.

use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{Error, Result};

/// Build the platform's shared-library path for a module basename
///
/// `<dir>/<basename>.dll` on Windows, `<dir>/lib<basename>.so` on Linux,
/// `<dir>/lib<basename>.dylib` on macOS.
pub fn make_library_filepath(directory: impl AsRef<Path>, basename: &str) -> PathBuf {
    let filename = if cfg!(windows) {
        format!("{}.dll", basename)
    } else if cfg!(target_os = "macos") {
        format!("lib{}.dylib", basename)
    } else {
        format!("lib{}.so", basename)
    };
    directory.as_ref().join(filename)
}

// ============================================================================
// Module ABI
// ============================================================================

/// Operation tag passed to the module's entry point
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginOp {
    /// The module (or a new version of it) was just loaded
    Load = 0,
    /// Execute one frame step
    Step = 1,
    /// The module is about to be replaced by a newer version
    Unload = 2,
    /// The module will be released and not reloaded again
    Close = 3,
}

/// No recorded failure
pub const PLUGIN_FAILURE_NONE: u32 = 0;
/// The step callback reported a failure
pub const PLUGIN_FAILURE_UPDATE: u32 = 1;
/// An unload/load sequence failed
pub const PLUGIN_FAILURE_RELOAD: u32 = 2;

/// Context handed to every module callback
///
/// `userdata` points at the host-owned user context block; the host
/// guarantees it outlives the session. `version` starts at 1 and increments
/// on every successful reload.
#[repr(C)]
pub struct PluginContext {
    pub userdata: *mut c_void,
    pub version: u32,
    pub failure: u32,
}

/// The exported entry point's signature
pub type PluginMain = unsafe extern "C" fn(ctx: *mut PluginContext, op: PluginOp) -> i32;

/// Symbol name every loadable module must export
pub const ENTRY_SYMBOL: &[u8] = b"meteor_main";

// ============================================================================
// Loader seam
// ============================================================================

/// One loaded code unit, invocable through the module ABI
pub trait ModuleCode {
    fn invoke(&mut self, ctx: &mut PluginContext, op: PluginOp) -> i32;
}

/// Capability to load module code and observe its on-disk state
pub trait ModuleLoader {
    /// Load the code unit at `path` and resolve its entry point
    fn load(&mut self, path: &Path) -> Result<Box<dyn ModuleCode>>;

    /// Last modification time of the module file
    fn modified_time(&self, path: &Path) -> Result<SystemTime>;
}

/// Loader backed by the OS dynamic linker (dlopen / LoadLibrary)
pub struct NativeLoader;

impl ModuleLoader for NativeLoader {
    fn load(&mut self, path: &Path) -> Result<Box<dyn ModuleCode>> {
        // SAFETY: loading a library runs its initializers; the module is
        // trusted host-side code built against the same ABI.
        let library = unsafe { libloading::Library::new(path) }.map_err(|e| {
            Error::LoadFailed(format!("{}: {}", path.display(), e))
        })?;
        let entry = unsafe { library.get::<PluginMain>(ENTRY_SYMBOL) }
            .map_err(|e| {
                Error::LoadFailed(format!(
                    "{}: missing entry symbol {}: {}",
                    path.display(),
                    String::from_utf8_lossy(ENTRY_SYMBOL),
                    e
                ))
            })?;
        // The raw fn pointer stays valid for as long as the library object
        // lives; both are kept in the same struct.
        let entry = *entry;
        Ok(Box::new(NativeModule {
            _library: library,
            entry,
        }))
    }

    fn modified_time(&self, path: &Path) -> Result<SystemTime> {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .map_err(|e| Error::LoadFailed(format!("{}: {}", path.display(), e)))
    }
}

struct NativeModule {
    _library: libloading::Library,
    entry: PluginMain,
}

impl ModuleCode for NativeModule {
    fn invoke(&mut self, ctx: &mut PluginContext, op: PluginOp) -> i32 {
        // SAFETY: ctx is a valid exclusive reference for the duration of the
        // call and the entry point follows the module ABI.
        unsafe { (self.entry)(ctx as *mut PluginContext, op) }
    }
}

#[cfg(test)]
#[path = "library_tests.rs"]
mod tests;
