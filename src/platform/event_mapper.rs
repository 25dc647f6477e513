//=========================================================================
// Platform Event Mapper
//
// Converts winit input into platform-neutral `RawInput` notifications.
//
// Responsibilities:
// - Map physical keys onto engine key numbers (printable keys use their
//   lowercase ASCII character, the rest named engine keys)
// - Decode the character winit reports alongside a key press
// - Assign SDL-style ordinals to mouse buttons and wheel detents
//
// Unmapped keys return `None` and never reach the translator.
//
//=========================================================================

use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::core::input::keys::*;
use crate::core::input::RawInput;

//=== Key Conversion ======================================================

/// Maps a winit physical key onto an engine key number.
pub(crate) fn map_key(code: WinitKeyCode) -> Option<KeyNum> {
    use WinitKeyCode::*;

    let ascii = |ch: u8| Some(KeyNum::from(ch));

    match code {
        //--- Letters ----------------------------------------------------------
        KeyA => ascii(b'a'), KeyB => ascii(b'b'), KeyC => ascii(b'c'),
        KeyD => ascii(b'd'), KeyE => ascii(b'e'), KeyF => ascii(b'f'),
        KeyG => ascii(b'g'), KeyH => ascii(b'h'), KeyI => ascii(b'i'),
        KeyJ => ascii(b'j'), KeyK => ascii(b'k'), KeyL => ascii(b'l'),
        KeyM => ascii(b'm'), KeyN => ascii(b'n'), KeyO => ascii(b'o'),
        KeyP => ascii(b'p'), KeyQ => ascii(b'q'), KeyR => ascii(b'r'),
        KeyS => ascii(b's'), KeyT => ascii(b't'), KeyU => ascii(b'u'),
        KeyV => ascii(b'v'), KeyW => ascii(b'w'), KeyX => ascii(b'x'),
        KeyY => ascii(b'y'), KeyZ => ascii(b'z'),

        //--- Digits -----------------------------------------------------------
        Digit0 => ascii(b'0'), Digit1 => ascii(b'1'), Digit2 => ascii(b'2'),
        Digit3 => ascii(b'3'), Digit4 => ascii(b'4'), Digit5 => ascii(b'5'),
        Digit6 => ascii(b'6'), Digit7 => ascii(b'7'), Digit8 => ascii(b'8'),
        Digit9 => ascii(b'9'),

        //--- Punctuation ------------------------------------------------------
        Minus => ascii(b'-'), Equal => ascii(b'='),
        BracketLeft => ascii(b'['), BracketRight => ascii(b']'),
        Backslash | IntlBackslash => ascii(b'\\'),
        Semicolon => ascii(b';'), Quote => ascii(b'\''),
        Backquote => ascii(b'`'), Comma => ascii(b','),
        Period => ascii(b'.'), Slash => ascii(b'/'),
        Space => Some(K_SPACE),

        //--- Editing and control ---------------------------------------------
        Enter => Some(K_ENTER), Escape => Some(K_ESCAPE),
        Tab => Some(K_TAB), Backspace => Some(K_BACKSPACE),
        Insert => Some(K_INS), Delete => Some(K_DEL),
        Home => Some(K_HOME), End => Some(K_END),
        PageUp => Some(K_PGUP), PageDown => Some(K_PGDN),
        Pause => Some(K_PAUSE), Power => Some(K_POWER),
        CapsLock => Some(K_CAPSLOCK), ScrollLock => Some(K_SCROLL),
        ContextMenu => Some(K_MENU),

        //--- Modifiers --------------------------------------------------------
        ShiftLeft | ShiftRight => Some(K_SHIFT),
        ControlLeft | ControlRight => Some(K_CTRL),
        AltLeft | AltRight => Some(K_ALT),
        SuperLeft | SuperRight => Some(K_COMMAND),

        //--- Arrows -----------------------------------------------------------
        ArrowUp => Some(K_UPARROW), ArrowDown => Some(K_DOWNARROW),
        ArrowLeft => Some(K_LEFTARROW), ArrowRight => Some(K_RIGHTARROW),

        //--- Function keys ----------------------------------------------------
        F1 => Some(K_F1), F2 => Some(K_F2), F3 => Some(K_F3),
        F4 => Some(K_F4), F5 => Some(K_F5), F6 => Some(K_F6),
        F7 => Some(K_F7), F8 => Some(K_F8), F9 => Some(K_F9),
        F10 => Some(K_F10), F11 => Some(K_F11), F12 => Some(K_F12),
        F13 => Some(K_F13), F14 => Some(K_F14), F15 => Some(K_F15),

        //--- Keypad -----------------------------------------------------------
        Numpad7 => Some(K_KP_HOME), Numpad8 => Some(K_KP_UPARROW),
        Numpad9 => Some(K_KP_PGUP), Numpad4 => Some(K_KP_LEFTARROW),
        Numpad5 => Some(K_KP_5), Numpad6 => Some(K_KP_RIGHTARROW),
        Numpad1 => Some(K_KP_END), Numpad2 => Some(K_KP_DOWNARROW),
        Numpad3 => Some(K_KP_PGDN), Numpad0 => Some(K_KP_INS),
        NumpadDecimal => Some(K_KP_DEL), NumpadEnter => Some(K_KP_ENTER),
        NumpadAdd => Some(K_KP_PLUS), NumpadSubtract => Some(K_KP_MINUS),
        NumpadMultiply => Some(K_KP_STAR), NumpadDivide => Some(K_KP_SLASH),
        NumpadEqual => Some(K_KP_EQUALS), NumLock => Some(K_KP_NUMLOCK),

        //--- Unmapped ---------------------------------------------------------
        _ => None,
    }
}

/// First character of winit's decoded text, 0 if none.
pub(crate) fn decode_text(text: Option<&str>) -> u32 {
    text.and_then(|t| t.chars().next()).map_or(0, u32::from)
}

/// Builds the raw notification for a keyboard event.
pub(crate) fn key_input(
    physical_key: PhysicalKey,
    state: ElementState,
    text: Option<&str>,
) -> Option<RawInput> {
    let key = match physical_key {
        PhysicalKey::Code(code) => map_key(code)?,
        PhysicalKey::Unidentified(_) => return None,
    };

    Some(match state {
        ElementState::Pressed => RawInput::KeyDown {
            key,
            unicode: decode_text(text),
        },
        ElementState::Released => RawInput::KeyUp { key },
    })
}

//=== Mouse Conversion ====================================================

const FIRST_OTHER_ORDINAL: u8 = 8;

/// SDL-style ordinal for a winit mouse button.
pub(crate) fn button_ordinal(button: WinitMouseButton) -> u8 {
    match button {
        WinitMouseButton::Left => 1,
        WinitMouseButton::Middle => 2,
        WinitMouseButton::Right => 3,
        WinitMouseButton::Back => 6,
        WinitMouseButton::Forward => 7,
        WinitMouseButton::Other(n) => u8::try_from(n)
            .map(|n| n.saturating_add(FIRST_OTHER_ORDINAL))
            .unwrap_or(u8::MAX),
    }
}

/// Builds the raw notification for a button event.
pub(crate) fn button_input(button: WinitMouseButton, state: ElementState) -> RawInput {
    let ordinal = button_ordinal(button);
    match state {
        ElementState::Pressed => RawInput::ButtonDown(ordinal),
        ElementState::Released => RawInput::ButtonUp(ordinal),
    }
}

const WHEEL_UP_ORDINAL: u8 = 4;
const WHEEL_DOWN_ORDINAL: u8 = 5;

/// One `ButtonDown` per wheel detent.
///
/// Line deltas report one detent per whole line (at least one for any
/// movement); pixel deltas report one detent per notification.
pub(crate) fn wheel_inputs(delta: MouseScrollDelta) -> impl Iterator<Item = RawInput> {
    let (amount, detents) = match delta {
        MouseScrollDelta::LineDelta(_, y) => (f64::from(y), y.abs().round().max(1.0) as usize),
        MouseScrollDelta::PixelDelta(position) => (position.y, 1),
    };

    let ordinal = if amount > 0.0 {
        Some(WHEEL_UP_ORDINAL)
    } else if amount < 0.0 {
        Some(WHEEL_DOWN_ORDINAL)
    } else {
        None
    };

    ordinal
        .into_iter()
        .flat_map(move |ordinal| std::iter::repeat(RawInput::ButtonDown(ordinal)).take(detents))
}

//=========================================================================
// Tests
//=========================================================================
