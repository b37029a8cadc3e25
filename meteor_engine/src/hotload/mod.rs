/// Hotload module - dynamically loaded engine modules
///
/// A module is a shared library exporting one dispatch entry point. The
/// session owns the loaded code, swaps it when the file changes on disk,
/// and translates the module's return codes into host control decisions.

// Module declarations
pub mod library;
pub mod session;

// Re-export the common types
pub use library::{
    make_library_filepath, ModuleCode, ModuleLoader, NativeLoader, PluginContext, PluginMain,
    PluginOp, ENTRY_SYMBOL, PLUGIN_FAILURE_NONE, PLUGIN_FAILURE_RELOAD, PLUGIN_FAILURE_UPDATE,
};
pub use session::{HotReloadSession, StepResult};
