//=========================================================================
// Engine Key Codes
//=========================================================================
//
// Engine-neutral key numbers carried in `SysEvent::value` for KEY events.
//
// Layout:
//   0         no key (dead/compose keys are zeroed to this)
//   1..=127   ASCII; printable keys use their lowercase character
//   128..     named keys, keypad, mouse buttons, wheel
//
// Platform backends map their own key symbols onto these numbers; the
// numbers themselves are the only thing the simulation sees.
//
//=========================================================================

/// Engine key number as carried in KEY events.
pub type KeyNum = i32;

/// No key. Produced for suppressed dead keys.
pub const K_NONE: KeyNum = 0;

//--- ASCII control keys --------------------------------------------------

pub const K_TAB: KeyNum = 9;
pub const K_ENTER: KeyNum = 13;
pub const K_ESCAPE: KeyNum = 27;
pub const K_SPACE: KeyNum = 32;
pub const K_BACKSPACE: KeyNum = 127;

//--- Named keys ----------------------------------------------------------

pub const K_COMMAND: KeyNum = 128;
pub const K_CAPSLOCK: KeyNum = 129;
pub const K_SCROLL: KeyNum = 130;
pub const K_POWER: KeyNum = 131;
pub const K_PAUSE: KeyNum = 132;

pub const K_UPARROW: KeyNum = 133;
pub const K_DOWNARROW: KeyNum = 134;
pub const K_LEFTARROW: KeyNum = 135;
pub const K_RIGHTARROW: KeyNum = 136;

pub const K_MENU: KeyNum = 139;

pub const K_ALT: KeyNum = 140;
pub const K_CTRL: KeyNum = 141;
pub const K_SHIFT: KeyNum = 142;
pub const K_INS: KeyNum = 143;
pub const K_DEL: KeyNum = 144;
pub const K_PGDN: KeyNum = 145;
pub const K_PGUP: KeyNum = 146;
pub const K_HOME: KeyNum = 147;
pub const K_END: KeyNum = 148;

//--- Function keys -------------------------------------------------------

pub const K_F1: KeyNum = 149;
pub const K_F2: KeyNum = 150;
pub const K_F3: KeyNum = 151;
pub const K_F4: KeyNum = 152;
pub const K_F5: KeyNum = 153;
pub const K_F6: KeyNum = 154;
pub const K_F7: KeyNum = 155;
pub const K_F8: KeyNum = 156;
pub const K_F9: KeyNum = 157;
pub const K_F10: KeyNum = 158;
pub const K_F11: KeyNum = 159;
pub const K_F12: KeyNum = 160;
pub const K_F13: KeyNum = 162;
pub const K_F14: KeyNum = 163;
pub const K_F15: KeyNum = 164;

//--- Keypad --------------------------------------------------------------

pub const K_KP_HOME: KeyNum = 165;
pub const K_KP_UPARROW: KeyNum = 166;
pub const K_KP_PGUP: KeyNum = 167;
pub const K_KP_LEFTARROW: KeyNum = 168;
pub const K_KP_5: KeyNum = 169;
pub const K_KP_RIGHTARROW: KeyNum = 170;
pub const K_KP_END: KeyNum = 171;
pub const K_KP_DOWNARROW: KeyNum = 172;
pub const K_KP_PGDN: KeyNum = 173;
pub const K_KP_ENTER: KeyNum = 174;
pub const K_KP_INS: KeyNum = 175;
pub const K_KP_DEL: KeyNum = 176;
pub const K_KP_SLASH: KeyNum = 177;
pub const K_KP_MINUS: KeyNum = 179;
pub const K_KP_PLUS: KeyNum = 181;
pub const K_KP_NUMLOCK: KeyNum = 182;
pub const K_KP_STAR: KeyNum = 183;
pub const K_KP_EQUALS: KeyNum = 184;

//--- Mouse ---------------------------------------------------------------

/// First mouse button. Buttons are contiguous: `K_MOUSE1 + index`.
pub const K_MOUSE1: KeyNum = 187;
pub const K_MOUSE2: KeyNum = 188;
pub const K_MOUSE3: KeyNum = 189;
pub const K_MOUSE4: KeyNum = 190;
pub const K_MOUSE5: KeyNum = 191;

/// Wheel detents. Edge-triggered: pressed, never released.
pub const K_MWHEELDOWN: KeyNum = 195;
pub const K_MWHEELUP: KeyNum = 196;

/// Returns `true` for the wheel pseudo-keys.
pub fn is_wheel_key(key: KeyNum) -> bool {
    key == K_MWHEELUP || key == K_MWHEELDOWN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_buttons_are_contiguous() {
        assert_eq!(K_MOUSE2, K_MOUSE1 + 1);
        assert_eq!(K_MOUSE5, K_MOUSE1 + 4);
    }

    #[test]
    fn wheel_keys_are_distinct_from_buttons() {
        assert!(is_wheel_key(K_MWHEELUP));
        assert!(is_wheel_key(K_MWHEELDOWN));
        assert!(!is_wheel_key(K_MOUSE1));
    }
}
