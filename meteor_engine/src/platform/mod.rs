/// Platform module - window and input event source
///
/// Owns the native window, polls the OS event queue once per frame, and
/// dispatches events into the per-window callback table.

// Module declarations
pub mod keyboard;
pub mod mouse;
pub mod text_input;
pub mod monitor;
pub mod window;

mod events;

// Re-export the common types
pub use keyboard::{KeyAction, KeyCode, KeyCommand, KeyMap, KeyState, Modifiers};
pub use mouse::{MouseButton, MouseButtonState};
pub use text_input::TextInput;
pub use monitor::{MonitorInfo, VideoMode};
pub use window::{
    DesktopSurface, FullscreenMode, GraphicsBackend, Window, WindowCallbacks, WindowConfig,
    WindowSystem,
};
