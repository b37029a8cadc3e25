//! Hot-reload session: lifecycle of one dynamically loaded module
//!
//! Session flow: `open` loads the code unit; each `step` optionally checks
//! the file on disk and swaps in a rebuilt module before invoking the
//! per-frame callback; `close` consumes the session, so teardown runs
//! exactly once on every exit path.

use std::ffi::c_void;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::error::Result;
use crate::hotload::library::{
    ModuleCode, ModuleLoader, PluginContext, PluginOp, PLUGIN_FAILURE_NONE,
    PLUGIN_FAILURE_RELOAD, PLUGIN_FAILURE_UPDATE,
};
use crate::{meteor_error, meteor_info};

/// Host-level interpretation of a module step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Keep running (return code 0)
    Continue,
    /// The step callback reported an error (return code -1)
    UpdateFailed,
    /// An unload/load sequence failed (return code -2, or a swap error)
    ReloadFailed,
    /// The module asked the host to terminate, carrying a diagnostic code
    RequestShutdown(i32),
}

/// Owner of one loaded module and its reload state
///
/// After a step returns [`StepResult::ReloadFailed`] or
/// [`StepResult::RequestShutdown`], the caller is expected to stop stepping
/// and proceed to [`HotReloadSession::close`]; the frame driver enforces
/// this through its loop-exit condition.
pub struct HotReloadSession {
    loader: Box<dyn ModuleLoader>,
    /// `None` only after a failed swap left the session without code
    code: Option<Box<dyn ModuleCode>>,
    path: PathBuf,
    last_modified: SystemTime,
    context: PluginContext,
    /// The module's load callback runs on the first step, when a user
    /// context is available
    initial_load_pending: bool,
}

impl HotReloadSession {
    /// Load the module at `path` and prepare a session for it
    ///
    /// The module's `Load` callback is deferred to the first [`step`],
    /// which supplies the persistent user context.
    ///
    /// [`step`]: HotReloadSession::step
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or does not expose the entry symbol.
    pub fn open(mut loader: Box<dyn ModuleLoader>, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let last_modified = loader.modified_time(&path)?;
        let code = loader.load(&path)?;
        meteor_info!("meteor::hotload", "Opened module {}", path.display());
        Ok(Self {
            loader,
            code: Some(code),
            path,
            last_modified,
            context: PluginContext {
                userdata: std::ptr::null_mut(),
                version: 1,
                failure: PLUGIN_FAILURE_NONE,
            },
            initial_load_pending: true,
        })
    }

    /// Version counter: 1 after open, +1 per successful reload
    pub fn version(&self) -> u32 {
        self.context.version
    }

    /// Failure flag visible to the module through its context
    pub fn last_failure(&self) -> u32 {
        self.context.failure
    }

    /// Execute one module step
    ///
    /// With `do_reload_check` set, the module file's modification time is
    /// compared first and a changed file triggers an atomic swap: unload the
    /// old code, load the new code, invoke its `Load` callback with the same
    /// persistent `user_context`. Without the flag, only the step callback
    /// runs.
    pub fn step<U>(&mut self, user_context: &mut U, do_reload_check: bool) -> StepResult {
        self.context.userdata = user_context as *mut U as *mut c_void;

        if self.initial_load_pending {
            if self.invoke(PluginOp::Load) != 0 {
                self.context.failure = PLUGIN_FAILURE_RELOAD;
                return StepResult::ReloadFailed;
            }
            self.initial_load_pending = false;
        }

        if do_reload_check {
            // A missing or unreadable file usually means the module is being
            // rebuilt right now; skip this check and try again later.
            if let Ok(modified) = self.loader.modified_time(&self.path) {
                if modified != self.last_modified {
                    if let Err(failure) = self.swap(modified) {
                        return failure;
                    }
                }
            }
        }

        let answer = self.invoke(PluginOp::Step);
        match answer {
            0 => StepResult::Continue,
            -1 => {
                self.context.failure = PLUGIN_FAILURE_UPDATE;
                StepResult::UpdateFailed
            }
            -2 => {
                self.context.failure = PLUGIN_FAILURE_RELOAD;
                StepResult::ReloadFailed
            }
            code => StepResult::RequestShutdown(code),
        }
    }

    /// Replace the loaded code with the current on-disk version
    fn swap(&mut self, modified: SystemTime) -> std::result::Result<(), StepResult> {
        meteor_info!(
            "meteor::hotload",
            "Module file changed, reloading v{} -> v{}",
            self.context.version,
            self.context.version + 1
        );

        if self.invoke(PluginOp::Unload) != 0 {
            self.context.failure = PLUGIN_FAILURE_RELOAD;
            return Err(StepResult::ReloadFailed);
        }
        // Release the old unit before the new one is mapped.
        self.code = None;

        match self.loader.load(&self.path) {
            Ok(code) => self.code = Some(code),
            Err(error) => {
                meteor_error!(
                    "meteor::hotload",
                    "{}",
                    crate::error::Error::ReloadFailed(error.to_string())
                );
                self.context.failure = PLUGIN_FAILURE_RELOAD;
                return Err(StepResult::ReloadFailed);
            }
        }

        self.last_modified = modified;
        self.context.version += 1;

        if self.invoke(PluginOp::Load) != 0 {
            self.context.failure = PLUGIN_FAILURE_RELOAD;
            return Err(StepResult::ReloadFailed);
        }
        Ok(())
    }

    fn invoke(&mut self, op: PluginOp) -> i32 {
        match &mut self.code {
            Some(code) => code.invoke(&mut self.context, op),
            // A failed swap left no code to call.
            None => -2,
        }
    }

    /// Invoke the module's `Close` callback and release the code unit
    ///
    /// Consumes the session, so teardown happens exactly once even on
    /// abnormal termination paths. Returns the close callback's answer
    /// (0 when no code was left to close).
    pub fn close<U>(mut self, user_context: &mut U) -> i32 {
        self.context.userdata = user_context as *mut U as *mut c_void;
        let answer = match &mut self.code {
            Some(code) => code.invoke(&mut self.context, PluginOp::Close),
            None => 0,
        };
        meteor_info!(
            "meteor::hotload",
            "Closed module {} (v{})",
            self.path.display(),
            self.context.version
        );
        answer
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
