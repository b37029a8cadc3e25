//! Mouse input types and callback aliases

/// Mouse button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    pub(crate) fn from_winit(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            winit::event::MouseButton::Back => MouseButton::Back,
            winit::event::MouseButton::Forward => MouseButton::Forward,
            winit::event::MouseButton::Other(id) => MouseButton::Other(id),
        }
    }
}

/// Press/release state of a mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButtonState {
    Press,
    Release,
}

/// Cursor position in window coordinates
pub type MousePositionCallback = Box<dyn FnMut(f64, f64)>;
/// Scroll delta (x, y)
pub type MouseScrollCallback = Box<dyn FnMut(f64, f64)>;
/// Button press/release
pub type MouseButtonCallback = Box<dyn FnMut(MouseButton, MouseButtonState)>;
/// Cursor entered (true) or left (false) the window
pub type MouseEnterCallback = Box<dyn FnMut(bool)>;
/// Unaccelerated motion delta from the raw device stream
pub type RawMouseMotionCallback = Box<dyn FnMut(f64, f64)>;
