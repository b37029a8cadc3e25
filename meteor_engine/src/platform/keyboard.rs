//! Keyboard input: key identities, modifier sets, and the binding table
//!
//! Bindings are keyed by an exact `(key, modifier-set)` pair. Dispatch looks
//! up the exact pair first and falls back to the wildcard entry
//! `(KeyCode::Anything, Modifiers::empty())`; with neither registered, the
//! event is dropped silently. There is no partial-modifier matching.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey};

/// State of a key at the time of its event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Press,
    Repeat,
    Release,
}

/// Key identity usable as a binding-table key
///
/// `Anything` is only meaningful inside the binding table, as the wildcard
/// half of the fallback entry; events never carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Anything,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    CtrlLeft, CtrlRight,
    ShiftLeft, ShiftRight,
    AltLeft, AltRight,
    SuperLeft, SuperRight,
    CapsLock,
    Tab,
    Escape,
    Enter,
    Space,
    Backspace,
    Delete,
    Left, Right, Up, Down,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

impl KeyCode {
    /// Translate a winit physical key into a [`KeyCode`]
    ///
    /// Keys outside the table return `None` and are not dispatched.
    pub(crate) fn from_winit(key: PhysicalKey) -> Option<KeyCode> {
        let PhysicalKey::Code(code) = key else {
            return None;
        };
        let mapped = match code {
            WinitKeyCode::KeyA => KeyCode::A,
            WinitKeyCode::KeyB => KeyCode::B,
            WinitKeyCode::KeyC => KeyCode::C,
            WinitKeyCode::KeyD => KeyCode::D,
            WinitKeyCode::KeyE => KeyCode::E,
            WinitKeyCode::KeyF => KeyCode::F,
            WinitKeyCode::KeyG => KeyCode::G,
            WinitKeyCode::KeyH => KeyCode::H,
            WinitKeyCode::KeyI => KeyCode::I,
            WinitKeyCode::KeyJ => KeyCode::J,
            WinitKeyCode::KeyK => KeyCode::K,
            WinitKeyCode::KeyL => KeyCode::L,
            WinitKeyCode::KeyM => KeyCode::M,
            WinitKeyCode::KeyN => KeyCode::N,
            WinitKeyCode::KeyO => KeyCode::O,
            WinitKeyCode::KeyP => KeyCode::P,
            WinitKeyCode::KeyQ => KeyCode::Q,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyT => KeyCode::T,
            WinitKeyCode::KeyU => KeyCode::U,
            WinitKeyCode::KeyV => KeyCode::V,
            WinitKeyCode::KeyW => KeyCode::W,
            WinitKeyCode::KeyX => KeyCode::X,
            WinitKeyCode::KeyY => KeyCode::Y,
            WinitKeyCode::KeyZ => KeyCode::Z,
            WinitKeyCode::Digit0 => KeyCode::Digit0,
            WinitKeyCode::Digit1 => KeyCode::Digit1,
            WinitKeyCode::Digit2 => KeyCode::Digit2,
            WinitKeyCode::Digit3 => KeyCode::Digit3,
            WinitKeyCode::Digit4 => KeyCode::Digit4,
            WinitKeyCode::Digit5 => KeyCode::Digit5,
            WinitKeyCode::Digit6 => KeyCode::Digit6,
            WinitKeyCode::Digit7 => KeyCode::Digit7,
            WinitKeyCode::Digit8 => KeyCode::Digit8,
            WinitKeyCode::Digit9 => KeyCode::Digit9,
            WinitKeyCode::ControlLeft => KeyCode::CtrlLeft,
            WinitKeyCode::ControlRight => KeyCode::CtrlRight,
            WinitKeyCode::ShiftLeft => KeyCode::ShiftLeft,
            WinitKeyCode::ShiftRight => KeyCode::ShiftRight,
            WinitKeyCode::AltLeft => KeyCode::AltLeft,
            WinitKeyCode::AltRight => KeyCode::AltRight,
            WinitKeyCode::SuperLeft => KeyCode::SuperLeft,
            WinitKeyCode::SuperRight => KeyCode::SuperRight,
            WinitKeyCode::CapsLock => KeyCode::CapsLock,
            WinitKeyCode::Tab => KeyCode::Tab,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::Enter => KeyCode::Enter,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Backspace => KeyCode::Backspace,
            WinitKeyCode::Delete => KeyCode::Delete,
            WinitKeyCode::ArrowLeft => KeyCode::Left,
            WinitKeyCode::ArrowRight => KeyCode::Right,
            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::F1 => KeyCode::F1,
            WinitKeyCode::F2 => KeyCode::F2,
            WinitKeyCode::F3 => KeyCode::F3,
            WinitKeyCode::F4 => KeyCode::F4,
            WinitKeyCode::F5 => KeyCode::F5,
            WinitKeyCode::F6 => KeyCode::F6,
            WinitKeyCode::F7 => KeyCode::F7,
            WinitKeyCode::F8 => KeyCode::F8,
            WinitKeyCode::F9 => KeyCode::F9,
            WinitKeyCode::F10 => KeyCode::F10,
            WinitKeyCode::F11 => KeyCode::F11,
            WinitKeyCode::F12 => KeyCode::F12,
            _ => return None,
        };
        Some(mapped)
    }

    /// Human-readable key name passed to bound actions
    pub fn name(&self) -> &'static str {
        match self {
            KeyCode::Anything => "ANYTHING",
            KeyCode::A => "A", KeyCode::B => "B", KeyCode::C => "C",
            KeyCode::D => "D", KeyCode::E => "E", KeyCode::F => "F",
            KeyCode::G => "G", KeyCode::H => "H", KeyCode::I => "I",
            KeyCode::J => "J", KeyCode::K => "K", KeyCode::L => "L",
            KeyCode::M => "M", KeyCode::N => "N", KeyCode::O => "O",
            KeyCode::P => "P", KeyCode::Q => "Q", KeyCode::R => "R",
            KeyCode::S => "S", KeyCode::T => "T", KeyCode::U => "U",
            KeyCode::V => "V", KeyCode::W => "W", KeyCode::X => "X",
            KeyCode::Y => "Y", KeyCode::Z => "Z",
            KeyCode::Digit0 => "0", KeyCode::Digit1 => "1",
            KeyCode::Digit2 => "2", KeyCode::Digit3 => "3",
            KeyCode::Digit4 => "4", KeyCode::Digit5 => "5",
            KeyCode::Digit6 => "6", KeyCode::Digit7 => "7",
            KeyCode::Digit8 => "8", KeyCode::Digit9 => "9",
            KeyCode::CtrlLeft => "CTRL_LEFT",
            KeyCode::CtrlRight => "CTRL_RIGHT",
            KeyCode::ShiftLeft => "SHIFT_LEFT",
            KeyCode::ShiftRight => "SHIFT_RIGHT",
            KeyCode::AltLeft => "ALT_LEFT",
            KeyCode::AltRight => "ALT_RIGHT",
            KeyCode::SuperLeft => "SUPER_LEFT",
            KeyCode::SuperRight => "SUPER_RIGHT",
            KeyCode::CapsLock => "CAPS_LOCK",
            KeyCode::Tab => "TAB",
            KeyCode::Escape => "ESCAPE",
            KeyCode::Enter => "ENTER",
            KeyCode::Space => "SPACE",
            KeyCode::Backspace => "BACKSPACE",
            KeyCode::Delete => "DELETE",
            KeyCode::Left => "LEFT",
            KeyCode::Right => "RIGHT",
            KeyCode::Up => "UP",
            KeyCode::Down => "DOWN",
            KeyCode::F1 => "F1", KeyCode::F2 => "F2", KeyCode::F3 => "F3",
            KeyCode::F4 => "F4", KeyCode::F5 => "F5", KeyCode::F6 => "F6",
            KeyCode::F7 => "F7", KeyCode::F8 => "F8", KeyCode::F9 => "F9",
            KeyCode::F10 => "F10", KeyCode::F11 => "F11", KeyCode::F12 => "F12",
        }
    }
}

bitflags! {
    /// Modifier keys held at the moment of a keyboard event
    ///
    /// Recomputed from the OS report on every event; a modifier counts as
    /// held when either its left or right physical key is pressed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CTRL  = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT   = 1 << 2;
        const SUPER = 1 << 3;
    }
}

impl Default for Modifiers {
    /// No modifiers held
    fn default() -> Self {
        Modifiers::empty()
    }
}

impl Modifiers {
    pub(crate) fn from_winit(state: ModifiersState) -> Self {
        let mut mods = Modifiers::empty();
        if state.control_key() {
            mods |= Modifiers::CTRL;
        }
        if state.shift_key() {
            mods |= Modifiers::SHIFT;
        }
        if state.alt_key() {
            mods |= Modifiers::ALT;
        }
        if state.super_key() {
            mods |= Modifiers::SUPER;
        }
        mods
    }
}

/// Outcome of a bound key action, applied by the dispatcher to the window
/// state after the action returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Nothing to do
    None,
    /// Empty the text-input accumulator
    ClearInput,
    /// Remove the last character from the text-input accumulator
    UndoInput,
    /// Mark the window as closing
    CloseWindow,
}

/// Action closure invoked when its binding matches an event
pub type KeyAction = Box<dyn FnMut(KeyCode, KeyState, &str) -> KeyCommand>;

/// Binding table: at most one action per exact `(key, modifiers)` pair;
/// the last registration for a pair wins
pub type KeyMap = FxHashMap<(KeyCode, Modifiers), KeyAction>;

/// Look up the action for an event: exact pair first, wildcard second
///
/// The exact match always wins over the wildcard, even when both are
/// registered.
pub(crate) fn resolve_binding(
    bindings: &mut KeyMap,
    key: KeyCode,
    modifiers: Modifiers,
) -> Option<&mut KeyAction> {
    if bindings.contains_key(&(key, modifiers)) {
        bindings.get_mut(&(key, modifiers))
    } else {
        bindings.get_mut(&(KeyCode::Anything, Modifiers::empty()))
    }
}

#[cfg(test)]
#[path = "keyboard_tests.rs"]
mod tests;
