//! Window creation and per-window state
//!
//! A [`WindowSystem`] owns the OS event loop; a [`Window`] owns one native
//! window plus its state block (key bindings, text accumulator, callbacks).
//! Event polling never blocks: each call drains the queued OS events and
//! dispatches callbacks synchronously on the calling thread.

use std::time::Duration;

use winit::dpi::PhysicalPosition;
use winit::event::ElementState;
use winit::event_loop::EventLoop;
use winit::monitor::{MonitorHandle, VideoModeHandle};
use winit::platform::pump_events::EventLoopExtPumpEvents;
use winit::window::{Fullscreen, WindowId};

use crate::error::{Error, Result};
use crate::platform::events::{EventPump, WindowCreator};
use crate::platform::keyboard::{
    resolve_binding, KeyCode, KeyCommand, KeyMap, KeyState, Modifiers,
};
use crate::platform::monitor::{monitor_info, MonitorInfo};
use crate::platform::mouse::{
    MouseButton, MouseButtonCallback, MouseButtonState, MouseEnterCallback,
    MousePositionCallback, MouseScrollCallback, RawMouseMotionCallback,
};
use crate::platform::text_input::TextInput;
use crate::{meteor_info, meteor_warn};

// ============================================================================
// Configuration
// ============================================================================

/// Graphics API the window is created for, with its required version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsBackend {
    Vulkan { major: u32, minor: u32 },
    OpenGl { major: u32, minor: u32 },
    OpenGlEs { major: u32, minor: u32 },
}

impl Default for GraphicsBackend {
    fn default() -> Self {
        GraphicsBackend::Vulkan { major: 1, minor: 3 }
    }
}

/// Fullscreen placement of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenMode {
    Windowed,
    Fullscreen,
    WindowedBorderless,
}

/// Per-window callback registrations; every entry is optional and an absent
/// registration is a silent no-op
#[derive(Default)]
pub struct WindowCallbacks {
    pub mouse_position: Option<MousePositionCallback>,
    pub mouse_scroll: Option<MouseScrollCallback>,
    pub mouse_button: Option<MouseButtonCallback>,
    pub mouse_enter: Option<MouseEnterCallback>,
    pub raw_mouse_motion: Option<RawMouseMotionCallback>,
    /// Invoked with (full accumulated buffer, latest character)
    pub text_input: Option<Box<dyn FnMut(&str, char)>>,
    pub window_moved: Option<Box<dyn FnMut(i32, i32)>>,
    pub window_resized: Option<Box<dyn FnMut(u32, u32)>>,
    pub window_close: Option<Box<dyn FnMut()>>,
    pub window_focus: Option<Box<dyn FnMut(bool)>>,
}

/// Fully-enumerated window configuration record
///
/// Deliberately a plain struct rather than a builder: every option is
/// visible in one place and the record can be assembled with struct-update
/// syntax from [`WindowConfig::default`].
pub struct WindowConfig {
    /// Pixel width; zero is rejected
    pub width: u32,
    /// Pixel height; zero is rejected
    pub height: u32,
    pub min_size: Option<(u32, u32)>,
    pub max_size: Option<(u32, u32)>,
    /// Accepted for completeness; not supported by this window system
    pub aspect_ratio: Option<(u32, u32)>,
    /// UTF-8 window title
    pub title: String,
    pub backend: GraphicsBackend,
    pub visible: bool,
    pub focused: bool,
    pub decorated: bool,
    pub resizable: bool,
    pub always_on_top: bool,
    /// Accepted for completeness; not supported by this window system
    pub auto_minimize: bool,
    /// Accepted for completeness; not supported by this window system
    pub opacity: f32,
    pub transparent_framebuffer: bool,
    /// Start fullscreen on the monitor with this index (borderless)
    pub fullscreen_monitor: Option<usize>,
    pub raw_mouse_motion: bool,
    /// Initial key binding table
    pub key_bindings: KeyMap,
    pub callbacks: WindowCallbacks,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            min_size: None,
            max_size: None,
            aspect_ratio: None,
            title: "Meteor window".to_string(),
            backend: GraphicsBackend::default(),
            visible: true,
            focused: true,
            decorated: true,
            resizable: true,
            always_on_top: false,
            auto_minimize: false,
            opacity: 1.0,
            transparent_framebuffer: false,
            fullscreen_monitor: None,
            raw_mouse_motion: false,
            key_bindings: KeyMap::default(),
            callbacks: WindowCallbacks::default(),
        }
    }
}

// ============================================================================
// Window state block
// ============================================================================

/// Heap-allocated state associated 1:1 with a window; freed together with it
pub(crate) struct WindowState {
    pub key_bindings: KeyMap,
    pub modifiers: Modifiers,
    pub text_input: TextInput,
    pub callbacks: WindowCallbacks,
    pub close_requested: bool,
    pub focused: bool,
}

// ============================================================================
// Window system
// ============================================================================

/// Owner of the OS event loop
///
/// All windows and event polling go through this object, from the thread
/// that created it.
pub struct WindowSystem {
    event_loop: EventLoop<()>,
}

impl WindowSystem {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new().map_err(|e| {
            Error::InitializationFailed(format!("Failed to create event loop: {}", e))
        })?;
        Ok(Self { event_loop })
    }

    /// Create a window from an explicit configuration record
    ///
    /// # Errors
    ///
    /// Fails if width or height is zero, if the requested graphics backend
    /// is unsupported, or if the OS refuses the window.
    pub fn create_window(&mut self, config: WindowConfig) -> Result<Window> {
        validate_config(&config)?;

        let mut creator = WindowCreator {
            config: &config,
            created: None,
        };
        // The first pump delivers the resume event that allows window
        // creation; poll a bounded number of times, never block.
        for _ in 0..4 {
            let _ = self
                .event_loop
                .pump_app_events(Some(Duration::ZERO), &mut creator);
            if creator.created.is_some() {
                break;
            }
        }

        let inner = match creator.created {
            Some(Ok(window)) => window,
            Some(Err(os_error)) => {
                return Err(Error::WindowCreationFailed(os_error.to_string()))
            }
            None => {
                return Err(Error::WindowCreationFailed(
                    "window system delivered no resume event".to_string(),
                ))
            }
        };

        meteor_info!(
            "meteor::platform",
            "Created window \"{}\" ({}x{})",
            config.title,
            config.width,
            config.height
        );

        let fullscreen = if config.fullscreen_monitor.is_some() {
            FullscreenMode::WindowedBorderless
        } else {
            FullscreenMode::Windowed
        };
        let WindowConfig {
            title,
            backend,
            focused,
            key_bindings,
            callbacks,
            ..
        } = config;

        Ok(Window {
            inner,
            state: Box::new(WindowState {
                key_bindings,
                modifiers: Modifiers::empty(),
                text_input: TextInput::new(),
                callbacks,
                close_requested: false,
                focused,
            }),
            backend,
            fullscreen,
            windowed_position: None,
            title,
        })
    }

    /// Drain the OS event queue once, synchronously invoking the callbacks
    /// for whatever events were pending; never blocks waiting for input
    pub fn poll_events(&mut self, window: &mut Window) {
        let mut pump = EventPump { window };
        let _ = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut pump);
    }
}

// ============================================================================
// Window
// ============================================================================

/// One native window plus its owned state block
///
/// Dropping the window releases the state block and the native resource
/// together.
pub struct Window {
    inner: winit::window::Window,
    pub(crate) state: Box<WindowState>,
    backend: GraphicsBackend,
    fullscreen: FullscreenMode,
    /// Last known position while windowed; restored when leaving fullscreen
    windowed_position: Option<(i32, i32)>,
    title: String,
}

impl Window {
    pub(crate) fn id(&self) -> WindowId {
        self.inner.id()
    }

    /// Set the window title; no-op when unchanged
    pub fn set_title(&mut self, title: &str) {
        if self.title != title {
            self.title = title.to_string();
            self.inner.set_title(title);
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    pub fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    /// Whether a close was requested, by the OS or by a bound key action
    pub fn is_closing(&self) -> bool {
        self.state.close_requested
    }

    /// Whether the window currently has input focus
    pub fn is_focused(&self) -> bool {
        self.state.focused
    }

    /// Mark the window as closing; the frame driver stops on the next check
    pub fn request_close(&mut self) {
        self.state.close_requested = true;
    }

    /// Present the rendered frame
    ///
    /// Only a window-owned GL context would swap here. Vulkan surfaces are
    /// presented by the render backend's swapchain, so with the supported
    /// backends this is a no-op.
    pub fn swap_buffers(&mut self) {
        match self.backend {
            // Presentation is owned by the render backend's swapchain.
            GraphicsBackend::Vulkan { .. } => {}
            // GL backends never pass window creation; nothing owns a context.
            GraphicsBackend::OpenGl { .. } | GraphicsBackend::OpenGlEs { .. } => {}
        }
    }

    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    /// The graphics backend this window was created for
    pub fn backend(&self) -> GraphicsBackend {
        self.backend
    }

    // ===== KEY BINDINGS =====

    /// Register an action for an exact `(key, modifiers)` pair
    ///
    /// The last registration for a pair wins. Binding
    /// `(KeyCode::Anything, Modifiers::empty())` installs the wildcard
    /// fallback.
    pub fn bind_key<A>(&mut self, key: KeyCode, modifiers: Modifiers, action: A)
    where
        A: FnMut(KeyCode, KeyState, &str) -> KeyCommand + 'static,
    {
        self.state
            .key_bindings
            .insert((key, modifiers), Box::new(action));
    }

    /// Remove a binding; returns whether one existed
    pub fn unbind_key(&mut self, key: KeyCode, modifiers: Modifiers) -> bool {
        self.state.key_bindings.remove(&(key, modifiers)).is_some()
    }

    // ===== TEXT INPUT =====

    /// The accumulated input text
    pub fn input_text(&self) -> &str {
        self.state.text_input.as_str()
    }

    pub fn clear_input(&mut self) {
        self.state.text_input.clear();
    }

    pub fn undo_input(&mut self) {
        self.state.text_input.undo();
    }

    // ===== FULLSCREEN =====

    pub fn fullscreen_mode(&self) -> FullscreenMode {
        self.fullscreen
    }

    /// Transition between windowed, exclusive fullscreen, and borderless
    ///
    /// Exclusive fullscreen resolves its video mode from `size` when given,
    /// otherwise from the monitor's native (largest) mode. Returning to
    /// `Windowed` restores the position recorded before entering fullscreen.
    pub fn set_fullscreen(&mut self, mode: FullscreenMode, size: Option<(u32, u32)>) {
        if mode == self.fullscreen {
            return;
        }
        match mode {
            FullscreenMode::Fullscreen => {
                self.remember_windowed_position();
                let monitor = self
                    .inner
                    .current_monitor()
                    .or_else(|| self.inner.primary_monitor());
                let video_mode = monitor.as_ref().and_then(|m| pick_video_mode(m, size));
                match video_mode {
                    Some(video_mode) => self
                        .inner
                        .set_fullscreen(Some(Fullscreen::Exclusive(video_mode))),
                    None => {
                        meteor_warn!(
                            "meteor::platform",
                            "no matching exclusive video mode, falling back to borderless"
                        );
                        self.inner.set_fullscreen(Some(Fullscreen::Borderless(None)));
                    }
                }
            }
            FullscreenMode::WindowedBorderless => {
                self.remember_windowed_position();
                let monitor = self.inner.current_monitor();
                self.inner.set_fullscreen(Some(Fullscreen::Borderless(monitor)));
            }
            FullscreenMode::Windowed => {
                self.inner.set_fullscreen(None);
                if let Some((x, y)) = self.windowed_position {
                    self.inner.set_outer_position(PhysicalPosition::new(x, y));
                }
            }
        }
        self.fullscreen = mode;
    }

    fn remember_windowed_position(&mut self) {
        if self.fullscreen == FullscreenMode::Windowed {
            if let Ok(position) = self.inner.outer_position() {
                self.windowed_position = Some((position.x, position.y));
            }
        }
    }

    // ===== MONITORS =====

    pub fn available_monitors(&self) -> Vec<MonitorInfo> {
        self.inner
            .available_monitors()
            .map(|handle| monitor_info(&handle))
            .collect()
    }

    pub fn current_monitor(&self) -> Option<MonitorInfo> {
        self.inner.current_monitor().map(|handle| monitor_info(&handle))
    }

    pub fn primary_monitor(&self) -> Option<MonitorInfo> {
        self.inner.primary_monitor().map(|handle| monitor_info(&handle))
    }

    // ===== EVENT DISPATCH =====

    /// Dispatch one OS window event into the callback table
    pub(crate) fn handle_event(&mut self, event: winit::event::WindowEvent) {
        use winit::event::{MouseScrollDelta, WindowEvent};

        let state = &mut *self.state;
        match event {
            WindowEvent::CloseRequested => {
                state.close_requested = true;
                if let Some(callback) = &mut state.callbacks.window_close {
                    callback();
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = Modifiers::from_winit(modifiers.state());
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                // Character data arrives with the key event; accumulate it
                // before binding dispatch so a text callback sees the buffer
                // the bound action may then clear.
                if key_event.state == ElementState::Pressed {
                    if let Some(text) = key_event.text.as_ref() {
                        let WindowState {
                            text_input,
                            callbacks,
                            ..
                        } = state;
                        for ch in text.chars() {
                            if let Some(appended) = text_input.push_codepoint(ch as u32) {
                                if let Some(callback) = &mut callbacks.text_input {
                                    callback(text_input.as_str(), appended);
                                }
                            }
                        }
                    }
                }
                if let Some(key) = KeyCode::from_winit(key_event.physical_key) {
                    let key_state = match (key_event.state, key_event.repeat) {
                        (ElementState::Released, _) => KeyState::Release,
                        (ElementState::Pressed, true) => KeyState::Repeat,
                        (ElementState::Pressed, false) => KeyState::Press,
                    };
                    let modifiers = state.modifiers;
                    let command =
                        match resolve_binding(&mut state.key_bindings, key, modifiers) {
                            Some(action) => action(key, key_state, key.name()),
                            // Unbound events are dropped silently.
                            None => KeyCommand::None,
                        };
                    match command {
                        KeyCommand::None => {}
                        KeyCommand::ClearInput => state.text_input.clear(),
                        KeyCommand::UndoInput => {
                            state.text_input.undo();
                        }
                        KeyCommand::CloseWindow => state.close_requested = true,
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(callback) = &mut state.callbacks.mouse_position {
                    callback(position.x, position.y);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(callback) = &mut state.callbacks.mouse_scroll {
                    let (x, y) = match delta {
                        MouseScrollDelta::LineDelta(x, y) => (x as f64, y as f64),
                        MouseScrollDelta::PixelDelta(position) => (position.x, position.y),
                    };
                    callback(x, y);
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                if let Some(callback) = &mut state.callbacks.mouse_button {
                    let button_state = match button_state {
                        ElementState::Pressed => MouseButtonState::Press,
                        ElementState::Released => MouseButtonState::Release,
                    };
                    callback(MouseButton::from_winit(button), button_state);
                }
            }
            WindowEvent::CursorEntered { .. } => {
                if let Some(callback) = &mut state.callbacks.mouse_enter {
                    callback(true);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(callback) = &mut state.callbacks.mouse_enter {
                    callback(false);
                }
            }
            WindowEvent::Moved(position) => {
                if self.fullscreen == FullscreenMode::Windowed {
                    self.windowed_position = Some((position.x, position.y));
                }
                if let Some(callback) = &mut self.state.callbacks.window_moved {
                    callback(position.x, position.y);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(callback) = &mut state.callbacks.window_resized {
                    callback(size.width, size.height);
                }
            }
            WindowEvent::Focused(focused) => {
                state.focused = focused;
                if let Some(callback) = &mut state.callbacks.window_focus {
                    callback(focused);
                }
            }
            _ => {}
        }
    }
}

/// Reject configurations no window can be created from
pub(crate) fn validate_config(config: &WindowConfig) -> Result<()> {
    if config.width == 0 || config.height == 0 {
        return Err(Error::WindowCreationFailed(format!(
            "invalid window size {}x{}",
            config.width, config.height
        )));
    }
    match config.backend {
        GraphicsBackend::Vulkan { .. } => Ok(()),
        GraphicsBackend::OpenGl { .. } | GraphicsBackend::OpenGlEs { .. } => {
            // No GL context support in this window system; Vulkan surfaces
            // are created by the render backend instead.
            Err(Error::WindowCreationFailed(
                "requested graphics backend is not supported".to_string(),
            ))
        }
    }
}

/// Pick the exclusive-fullscreen video mode: exact size match when an
/// explicit size is requested, otherwise the monitor's largest mode
fn pick_video_mode(monitor: &MonitorHandle, size: Option<(u32, u32)>) -> Option<VideoModeHandle> {
    match size {
        Some((width, height)) => monitor
            .video_modes()
            .filter(|mode| mode.size().width == width && mode.size().height == height)
            .max_by_key(|mode| mode.refresh_rate_millihertz()),
        None => monitor.video_modes().max_by_key(|mode| {
            (
                mode.size().width as u64 * mode.size().height as u64,
                mode.refresh_rate_millihertz(),
            )
        }),
    }
}

// ============================================================================
// Desktop surface
// ============================================================================

/// Window system + window bundled into the frame driver's event surface
pub struct DesktopSurface {
    system: WindowSystem,
    window: Window,
}

impl DesktopSurface {
    pub fn new(system: WindowSystem, window: Window) -> Self {
        Self { system, window }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }
}

impl crate::driver::EventSurface for DesktopSurface {
    fn poll_events(&mut self) {
        self.system.poll_events(&mut self.window);
    }

    fn is_closing(&self) -> bool {
        self.window.is_closing()
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
