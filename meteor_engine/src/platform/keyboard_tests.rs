use super::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Binding that records which label fired, in order
fn recording_action(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> KeyAction {
    let log = log.clone();
    Box::new(move |_, _, _| {
        log.borrow_mut().push(label);
        KeyCommand::None
    })
}

fn dispatch(bindings: &mut KeyMap, key: KeyCode, modifiers: Modifiers) -> bool {
    match resolve_binding(bindings, key, modifiers) {
        Some(action) => {
            action(key, KeyState::Press, key.name());
            true
        }
        None => false,
    }
}

// ============================================================================
// Binding resolution
// ============================================================================

#[test]
fn exact_binding_beats_wildcard() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut bindings = KeyMap::default();
    bindings.insert((KeyCode::Q, Modifiers::ALT), recording_action(&log, "action_a"));
    bindings.insert(
        (KeyCode::Anything, Modifiers::empty()),
        recording_action(&log, "action_b"),
    );

    // (Q, NONE) has no exact entry and falls through to the wildcard.
    assert!(dispatch(&mut bindings, KeyCode::Q, Modifiers::empty()));
    // (Q, ALT) hits the exact entry.
    assert!(dispatch(&mut bindings, KeyCode::Q, Modifiers::ALT));
    // (R, NONE) falls through to the wildcard.
    assert!(dispatch(&mut bindings, KeyCode::R, Modifiers::empty()));

    assert_eq!(*log.borrow(), vec!["action_b", "action_a", "action_b"]);
}

#[test]
fn no_binding_and_no_wildcard_drops_event() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut bindings = KeyMap::default();
    bindings.insert((KeyCode::Q, Modifiers::ALT), recording_action(&log, "action_a"));

    assert!(!dispatch(&mut bindings, KeyCode::W, Modifiers::empty()));
    assert!(log.borrow().is_empty());
}

#[test]
fn empty_table_drops_every_event() {
    let mut bindings = KeyMap::default();
    assert!(!dispatch(&mut bindings, KeyCode::Escape, Modifiers::empty()));
    assert!(!dispatch(&mut bindings, KeyCode::A, Modifiers::CTRL | Modifiers::SHIFT));
}

#[test]
fn no_partial_modifier_matching() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut bindings = KeyMap::default();
    bindings.insert((KeyCode::Q, Modifiers::CTRL), recording_action(&log, "ctrl_q"));

    // Ctrl+Shift+Q must not match the Ctrl+Q binding.
    dispatch(&mut bindings, KeyCode::Q, Modifiers::CTRL | Modifiers::SHIFT);
    assert!(log.borrow().is_empty());

    dispatch(&mut bindings, KeyCode::Q, Modifiers::CTRL);
    assert_eq!(*log.borrow(), vec!["ctrl_q"]);
}

#[test]
fn last_registration_for_a_pair_wins() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut bindings = KeyMap::default();
    bindings.insert((KeyCode::S, Modifiers::CTRL), recording_action(&log, "first"));
    bindings.insert((KeyCode::S, Modifiers::CTRL), recording_action(&log, "second"));

    dispatch(&mut bindings, KeyCode::S, Modifiers::CTRL);
    assert_eq!(*log.borrow(), vec!["second"]);
    assert_eq!(bindings.len(), 1);
}

#[test]
fn action_receives_key_state_and_name() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_ref = seen.clone();
    let mut bindings = KeyMap::default();
    bindings.insert(
        (KeyCode::Escape, Modifiers::empty()),
        Box::new(move |key, state, name| {
            seen_ref.borrow_mut().push((key, state, name.to_string()));
            KeyCommand::None
        }),
    );

    let action = resolve_binding(&mut bindings, KeyCode::Escape, Modifiers::empty()).unwrap();
    action(KeyCode::Escape, KeyState::Release, KeyCode::Escape.name());

    assert_eq!(
        *seen.borrow(),
        vec![(KeyCode::Escape, KeyState::Release, "ESCAPE".to_string())]
    );
}

// ============================================================================
// Modifier conversion
// ============================================================================

#[test]
fn modifiers_from_winit_state() {
    let mut state = winit::keyboard::ModifiersState::default();
    assert_eq!(Modifiers::from_winit(state), Modifiers::empty());

    state = winit::keyboard::ModifiersState::CONTROL | winit::keyboard::ModifiersState::SHIFT;
    assert_eq!(
        Modifiers::from_winit(state),
        Modifiers::CTRL | Modifiers::SHIFT
    );

    state = winit::keyboard::ModifiersState::ALT | winit::keyboard::ModifiersState::SUPER;
    assert_eq!(
        Modifiers::from_winit(state),
        Modifiers::ALT | Modifiers::SUPER
    );
}

// ============================================================================
// Key names and winit translation
// ============================================================================

#[test]
fn key_names_are_stable() {
    assert_eq!(KeyCode::Q.name(), "Q");
    assert_eq!(KeyCode::Digit7.name(), "7");
    assert_eq!(KeyCode::CtrlLeft.name(), "CTRL_LEFT");
    assert_eq!(KeyCode::Anything.name(), "ANYTHING");
}

#[test]
fn winit_keys_translate() {
    use winit::keyboard::{KeyCode as W, PhysicalKey};

    assert_eq!(KeyCode::from_winit(PhysicalKey::Code(W::KeyQ)), Some(KeyCode::Q));
    assert_eq!(KeyCode::from_winit(PhysicalKey::Code(W::Digit0)), Some(KeyCode::Digit0));
    assert_eq!(KeyCode::from_winit(PhysicalKey::Code(W::ArrowUp)), Some(KeyCode::Up));
    assert_eq!(KeyCode::from_winit(PhysicalKey::Code(W::F12)), Some(KeyCode::F12));
    // Keys outside the table are not dispatched.
    assert_eq!(KeyCode::from_winit(PhysicalKey::Code(W::NumLock)), None);
}
